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
#![allow(dead_code)]

use zenoh_codec::{WCodec, Zenoh060};
use zenoh_dissector::{DecodedFrame, FieldRecord};

/// The Init captured in the reference trace: client `342c572ef3c884ea`, version 0.0.
pub const INIT_FIXTURE: [u8; 12] = [
    0x03, 0x00, 0x04, 0x08, 0x34, 0x2c, 0x57, 0x2e, 0xf3, 0xc8, 0x84, 0xea,
];

pub const PEER_ID: [u8; 8] = [0x34, 0x2c, 0x57, 0x2e, 0xf3, 0xc8, 0x84, 0xea];

/// Builds wire messages field by field.
#[derive(Default)]
pub struct Writer {
    codec: Zenoh060,
    pub buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, x: u8) -> &mut Self {
        self.codec.write(&mut self.buf, x);
        self
    }

    pub fn zint(&mut self, x: u64) -> &mut Self {
        self.codec.write(&mut self.buf, x);
        self
    }

    pub fn array(&mut self, x: &[u8]) -> &mut Self {
        self.codec.write(&mut self.buf, x);
        self
    }

    pub fn string(&mut self, x: &str) -> &mut Self {
        self.codec.write(&mut self.buf, x);
        self
    }

    pub fn finish(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    pub fn finish_into(&mut self, into: &mut Vec<u8>) {
        into.append(&mut self.buf);
    }
}

/// Prefixes every message with its length, one message per batch.
pub fn batch<M: AsRef<[u8]>>(messages: &[M]) -> Vec<u8> {
    let mut buf = vec![];
    for m in messages {
        let m = m.as_ref();
        let len = m.len() as u16;
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(m);
    }
    buf
}

/// Displayed values of every field of a layer, in decode order.
pub fn values(fields: &[FieldRecord<'_>]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|f| (f.name.to_string(), f.value.to_string()))
        .collect()
}

fn is_bit_sibling(a: &FieldRecord<'_>, b: &FieldRecord<'_>) -> bool {
    a.offset == b.offset && a.len() == 1 && b.len() == 1
}

/// Checks the provenance invariants of a dissection:
/// - every byte range lies in the frame and in its layer;
/// - layers are disjoint and in wire order;
/// - fields of a layer are disjoint and in wire order, except for the bit-fields of one octet;
/// - field names are unique within a layer.
pub fn check_layout(frame: &[u8], decoded: &DecodedFrame<'_>) {
    let mut previous_end = 0;
    for message in decoded.iter() {
        let span = message.span();
        assert!(span.end <= frame.len(), "{} past the frame", message);
        assert!(span.start >= previous_end, "{} overlaps its predecessor", message);
        assert_eq!(&frame[span.clone()], message.raw);
        previous_end = span.end;

        for (i, field) in message.fields.iter().enumerate() {
            let fs = field.span();
            assert!(
                fs.start >= span.start && fs.end <= span.end,
                "{} outside of {}",
                field,
                message
            );
            assert_eq!(&frame[fs], field.raw);
            if i > 0 {
                let prev = &message.fields[i - 1];
                assert!(
                    is_bit_sibling(prev, field) || prev.span().end <= field.offset,
                    "{} overlaps {}",
                    field,
                    prev
                );
            }
            assert!(
                message.fields[..i].iter().all(|f| f.name != field.name),
                "duplicate field {}",
                field.name
            );
        }
    }
    assert!(decoded.consumed() <= frame.len());
}
