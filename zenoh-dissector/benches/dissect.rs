//
// Copyright (c) 2023 ZettaScale Technology
//
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// http://www.eclipse.org/legal/epl-2.0, or the Apache License, Version 2.0
// which is available at https://www.apache.org/licenses/LICENSE-2.0.
//
// SPDX-License-Identifier: EPL-2.0 OR Apache-2.0
//
// Contributors:
//   ZettaScale Zenoh Team, <zenoh@zettascale.tech>
//
#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion, Throughput};
use zenoh_codec::{WCodec, Zenoh060};
use zenoh_dissector::{Dissector, DissectorConfig, Framing};
use zenoh_protocol::{transport, zenoh};

const INIT: [u8; 12] = [
    0x03, 0x00, 0x04, 0x08, 0x34, 0x2c, 0x57, 0x2e, 0xf3, 0xc8, 0x84, 0xea,
];

// A FRAME carrying `n` DATA messages of `size` bytes each
fn frame(n: usize, size: usize) -> Vec<u8> {
    let codec = Zenoh060::new();
    let payload = vec![0xa5u8; size];
    let mut buff = vec![transport::id::FRAME | transport::flag::R];
    codec.write(&mut buff, 1u64);
    for i in 0..n {
        buff.push(zenoh::id::DATA | zenoh::flag::K);
        codec.write(&mut buff, i as u64);
        codec.write(&mut buff, "demo/example/zenoh-rs-pub");
        codec.write(&mut buff, payload.as_slice());
    }
    buff
}

fn criterion_benchmark(c: &mut Criterion) {
    let datagram = Dissector::default();
    c.bench_function("init", |b| {
        b.iter(|| datagram.dissect(&INIT));
    });

    let mut group = c.benchmark_group("frame");
    for size in [8, 64, 1_024] {
        let buff = frame(32, size);
        group.throughput(Throughput::Bytes(buff.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &buff, |b, buff| {
            b.iter(|| datagram.dissect(buff));
        });
    }
    group.finish();

    let stream = Dissector::new(DissectorConfig {
        framing: Framing::Stream,
        ..Default::default()
    });
    let batch = frame(32, 64);
    let mut buff = vec![];
    for _ in 0..16 {
        buff.extend_from_slice(&(batch.len() as u16).to_le_bytes());
        buff.extend_from_slice(&batch);
    }
    c.bench_function("stream 16 batches", |b| {
        b.iter(|| stream.dissect(&buff));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
