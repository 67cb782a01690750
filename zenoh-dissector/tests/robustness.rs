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
mod common;

use common::*;
use rand::{Rng, RngCore};
use zenoh_dissector::{DecodeError, Dissector, DissectorConfig, Framing, Outcome};

const NUM_ITER: usize = 10_000;
const MAX_PAYLOAD: usize = 64;

fn dissectors() -> [Dissector; 2] {
    [Framing::Datagram, Framing::Stream].map(|framing| {
        Dissector::new(DissectorConfig {
            framing,
            ..Default::default()
        })
    })
}

#[test]
fn truncated_init() {
    for len in 1..INIT_FIXTURE.len() {
        let frame = &INIT_FIXTURE[..len];
        let decoded = zenoh_dissector::dissect(frame);
        assert!(decoded.messages.is_empty(), "prefix of {} bytes", len);
        match decoded.error() {
            Some(DecodeError::OutOfBounds { offset, .. }) => assert!(offset <= len),
            e => panic!("prefix of {} bytes: {:?}", len, e),
        }
        // What was read before running out of bytes is still reported
        let diagnostic = decoded.diagnostic().unwrap();
        assert_eq!(diagnostic.fields[0].name, "msgid");
        assert!(diagnostic.fields.iter().all(|f| f.span().end <= len));
    }
}

#[test]
fn truncated_batch() {
    let frame = batch(&[&INIT_FIXTURE]);
    let dissector = Dissector::new(DissectorConfig {
        framing: Framing::Stream,
        ..Default::default()
    });
    for len in 1..frame.len() {
        let decoded = dissector.dissect(&frame[..len]);
        assert!(decoded.messages.is_empty());
        match decoded.error() {
            Some(DecodeError::OutOfBounds { .. }) => assert_eq!(len, 1),
            Some(DecodeError::LengthMismatch {
                offset: 2,
                batch: 0,
                declared: 12,
                actual,
            }) => assert_eq!(actual, len - 2),
            e => panic!("prefix of {} bytes: {:?}", len, e),
        }
    }
}

#[test]
fn uniform_frames() {
    for len in 0..=MAX_PAYLOAD {
        for fill in [0x00u8, 0xff] {
            let frame = vec![fill; len];
            for dissector in dissectors() {
                let decoded = dissector.dissect(&frame);
                check_layout(&frame, &decoded);
            }
        }
    }

    // A run of JOIN headers with no body
    let decoded = zenoh_dissector::dissect(&[0x00; 4]);
    assert!(matches!(
        decoded.error(),
        Some(DecodeError::InvalidValue {
            field: "zid length",
            ..
        })
    ));
}

#[test]
fn unterminated_zint() {
    // A PING_PONG whose hash never ends
    let mut frame = vec![zenoh_protocol::transport::id::PING_PONG];
    frame.extend_from_slice(&[0xff; 12]);
    let decoded = zenoh_dissector::dissect(&frame);
    assert_eq!(
        decoded.error(),
        Some(DecodeError::MalformedVarint { offset: 1 })
    );

    // Ten octets, the last one overflowing 64 bits
    let mut frame = vec![zenoh_protocol::transport::id::PING_PONG];
    frame.extend_from_slice(&[0xff; 9]);
    frame.push(0x02);
    let decoded = zenoh_dissector::dissect(&frame);
    assert_eq!(
        decoded.error(),
        Some(DecodeError::MalformedVarint { offset: 1 })
    );

    frame[10] = 0x01;
    let decoded = zenoh_dissector::dissect(&frame);
    assert!(decoded.is_done());
    assert_eq!(
        decoded.messages[0].get("pingpong_hash").as_deref(),
        Some(u64::MAX.to_string().as_str())
    );
}

#[test]
fn oversized_array_length() {
    // A DATA whose payload claims u64::MAX bytes
    let message = Writer::new()
        .u8(zenoh_protocol::zenoh::id::DATA)
        .zint(0)
        .zint(u64::MAX)
        .finish();
    assert_eq!(message.len(), 12);

    let decoded = zenoh_dissector::dissect(&message);
    assert!(decoded.messages.is_empty());
    assert!(matches!(
        decoded.error(),
        Some(DecodeError::OutOfBounds {
            offset: 12,
            available: 0,
            ..
        })
    ));

    let frame = batch(&[&message]);
    let decoded = dissectors()[1].dissect(&frame);
    assert!(decoded.messages.is_empty());
    match decoded.error() {
        Some(DecodeError::LengthMismatch {
            offset,
            batch,
            declared,
            actual,
        }) => {
            assert_eq!((offset, batch, declared), (14, 0, 12));
            assert!(actual > declared);
        }
        e => panic!("{:?}", e),
    }
    assert_eq!(decoded.diagnostic().unwrap().offset(), 14);
}

#[test]
fn unknown_kinds() {
    let mut rng = rand::thread_rng();
    for _ in 0..NUM_ITER {
        let id: u8 = rng.gen_range(0x11..=0x1b);
        let flags: u8 = rng.gen::<u8>() & !0x1f;
        let mut frame = vec![id | flags; rng.gen_range(1..=MAX_PAYLOAD)];
        rng.fill_bytes(&mut frame[1..]);

        let decoded = zenoh_dissector::dissect(&frame);
        assert_eq!(decoded.messages.len(), 1);
        let unknown = &decoded.messages[0];
        assert!(unknown.is_unknown());
        assert_eq!(unknown.span(), 0..frame.len());
        assert_eq!(
            unknown.field("unknown_payload").map(|f| f.raw),
            Some(&frame[1..])
        );
        match &decoded.outcome {
            Outcome::Failed(d) => {
                assert_eq!(d.error, DecodeError::UnknownKind { offset: 0, id });
                assert_eq!(d.flags(), Some(flags));
            }
            Outcome::Done => panic!("unknown id 0x{:02x} accepted", id),
        }
        check_layout(&frame, &decoded);
    }
}

#[test]
fn random_frames() {
    let mut rng = rand::thread_rng();
    for _ in 0..NUM_ITER {
        let mut frame = vec![0u8; rng.gen_range(0..=MAX_PAYLOAD)];
        rng.fill_bytes(&mut frame);

        for dissector in dissectors() {
            let decoded = dissector.dissect(&frame);
            check_layout(&frame, &decoded);
            if let Some(d) = decoded.diagnostic() {
                assert!(d.offset() <= frame.len());
            }
            if decoded.is_done() && dissector.config().framing == Framing::Datagram {
                assert_eq!(decoded.consumed(), frame.len());
            }
        }
    }
}
