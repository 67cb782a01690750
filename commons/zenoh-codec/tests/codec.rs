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
use rand::{thread_rng, Rng};
use zenoh_buffers::{reader::Reader, ZCursor};
use zenoh_codec::*;

const NUM_ITER: usize = 100;

macro_rules! run {
    ($rand:expr) => {
        let codec = Zenoh060::new();
        for _ in 0..NUM_ITER {
            let x: u64 = $rand;

            let mut buffer = vec![];
            let n = codec.write(&mut buffer, x);
            assert_eq!(n, buffer.len());
            assert_eq!(n, codec.w_len(x));

            let mut reader = ZCursor::new(&buffer);
            let y: u64 = codec.read(&mut reader).unwrap();
            assert_eq!(x, y);
            assert!(!reader.can_read());
        }
    };
}

// Core
#[test]
fn codec_zint() {
    run!(u64::MIN);
    run!(u64::MAX);
    run!(u8::MAX as u64);
    run!(u16::MAX as u64);
    run!(u32::MAX as u64);
    let codec = Zenoh060::new();
    for i in 1..codec.w_len(u64::MAX) {
        run!(1 << (7 * i));
        run!((1 << (7 * i)) - 1);
    }
    run!(thread_rng().gen::<u64>());
}

#[test]
fn codec_zint_len() {
    let codec = Zenoh060::new();

    let mut buff = vec![];
    codec.write(&mut buff, 0u64);
    assert_eq!(1, buff.len());

    // Every additional 7 bits of payload costs exactly one more octet
    for i in 1..codec.w_len(u64::MAX) {
        let mut buff = vec![];
        let n: u64 = 1 << (7 * i);
        codec.write(&mut buff, n);
        println!("ZInt len: {n} {buff:02x?}");
        assert_eq!(i + 1, buff.len());

        let mut buff = vec![];
        codec.write(&mut buff, n - 1);
        assert_eq!(i, buff.len());
    }

    let mut buff = vec![];
    codec.write(&mut buff, u64::MAX);
    assert_eq!(VLE_LEN, buff.len());
    assert_eq!(0x01, *buff.last().unwrap());
}

#[test]
fn codec_zint_malformed() {
    let codec = Zenoh060::new();

    // Empty: nothing to start a sequence with
    let mut reader = ZCursor::new(&[]);
    let r: Result<u64, _> = codec.read(&mut reader);
    assert!(matches!(r, Err(DidntDecode::OutOfBounds(_))));

    // Truncated mid-sequence
    let buffer = [0xff, 0xff, 0xff];
    let mut reader = ZCursor::new(&buffer);
    let r: Result<u64, _> = codec.read(&mut reader);
    assert_eq!(r, Err(DidntDecode::MalformedZInt { offset: 0 }));
    assert_eq!(0, reader.pos());

    // Never terminates within VLE_LEN octets
    let buffer = [0xffu8; VLE_LEN + 4];
    let mut reader = ZCursor::new(&buffer);
    let r: Result<u64, _> = codec.read(&mut reader);
    assert_eq!(r, Err(DidntDecode::MalformedZInt { offset: 0 }));
    assert_eq!(0, reader.pos());

    // Terminates on the last admissible octet but overflows 64 bits
    let mut buffer = [0xffu8; VLE_LEN];
    buffer[VLE_LEN - 1] = 0x02;
    let mut reader = ZCursor::new(&buffer);
    let r: Result<u64, _> = codec.read(&mut reader);
    assert_eq!(r, Err(DidntDecode::MalformedZInt { offset: 0 }));

    // Non-minimal encodings are still accepted
    let buffer = [0x80, 0x80, 0x00];
    let mut reader = ZCursor::new(&buffer);
    let r: u64 = codec.read(&mut reader).unwrap();
    assert_eq!(0, r);
    assert!(!reader.can_read());
}

#[test]
fn codec_bytes() {
    let codec = Zenoh060::new();
    let mut rng = thread_rng();
    for _ in 0..NUM_ITER {
        let len = rng.gen_range(0..512);
        let x: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        let mut buffer = vec![];
        let n = codec.write(&mut buffer, x.as_slice());
        assert_eq!(n, codec.w_len(x.as_slice()));

        let mut reader = ZCursor::new(&buffer);
        let y: &[u8] = codec.read(&mut reader).unwrap();
        assert_eq!(x.as_slice(), y);
        assert!(!reader.can_read());
    }
}
