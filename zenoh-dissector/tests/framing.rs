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
use zenoh_dissector::{
    DecodeError, Dissector, DissectorConfig, FieldValue, Framing, MessageKind,
};
use zenoh_protocol::{core::Priority, transport, zenoh};

fn dissector(framing: Framing, max_messages: usize) -> Dissector {
    Dissector::new(DissectorConfig {
        framing,
        max_messages,
    })
}

fn keep_alive() -> Vec<u8> {
    vec![transport::id::KEEP_ALIVE]
}

fn data(sn: u64) -> Vec<u8> {
    Writer::new()
        .u8(zenoh::id::DATA)
        .zint(sn)
        .array(&sn.to_le_bytes())
        .finish()
}

#[test]
fn empty_frame() {
    for framing in [Framing::Datagram, Framing::Stream] {
        let decoded = dissector(framing, 16).dissect(&[]);
        assert!(decoded.is_done());
        assert!(decoded.messages.is_empty());
        assert_eq!(decoded.consumed(), 0);
    }
}

#[test]
fn concatenated_messages() {
    const N: usize = 32;

    let mut frame = vec![];
    let mut ends = vec![];
    for i in 0..N {
        frame.extend_from_slice(&data(i as u64 * 1_000));
        ends.push(frame.len());
    }

    let decoded = zenoh_dissector::dissect(&frame);
    assert!(decoded.is_done());
    assert_eq!(decoded.messages.len(), N);
    let mut start = 0;
    for (message, end) in decoded.iter().zip(ends) {
        assert_eq!(message.kind, Some(MessageKind::Data));
        assert_eq!(message.span(), start..end);
        start = end;
    }
    assert_eq!(decoded.consumed(), frame.len());
    check_layout(&frame, &decoded);
}

#[test]
fn decorated_frame() {
    let mut w = Writer::new();
    let frame = w
        .u8(zenoh::id::PRIORITY | ((Priority::DataHigh as u8) << 5))
        .u8(transport::id::FRAME | transport::flag::R)
        .zint(0x2a)
        .u8(zenoh::id::ROUTING_CONTEXT)
        .zint(3)
        .u8(zenoh::id::DATA | zenoh::flag::K)
        .zint(0)
        .string("demo/a")
        .array(b"1")
        .u8(zenoh::id::DECLARE)
        .zint(1)
        .u8(zenoh::declaration::id::PUBLISHER | zenoh::flag::K)
        .zint(0)
        .string("demo/b")
        .finish();

    let decoded = zenoh_dissector::dissect(&frame);
    assert!(decoded.is_done(), "{:?}", decoded.outcome);
    let kinds: Vec<_> = decoded.iter().filter_map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        [
            MessageKind::Priority,
            MessageKind::Frame,
            MessageKind::RoutingContext,
            MessageKind::Data,
            MessageKind::Declare,
        ]
    );

    let decorators: Vec<_> = decoded.iter().map(|m| m.is_decorator()).collect();
    assert_eq!(decorators, [true, false, true, false, false]);

    let priority = &decoded.messages[0];
    assert_eq!(priority.len(), 1);
    assert_eq!(
        priority.value("priority_value").and_then(FieldValue::label),
        Some("DataHigh")
    );
    assert_eq!(decoded.messages[1].flag_names().collect::<Vec<_>>(), ["R"]);
    assert_eq!(decoded.messages[1].get("frame_sn").as_deref(), Some("42"));
    assert_eq!(
        decoded.messages[4].get("declare_0_key_suffix").as_deref(),
        Some("demo/b")
    );
    check_layout(&frame, &decoded);
}

#[test]
fn fragment_ends_the_frame() {
    let mut w = Writer::new();
    let frame = w
        .u8(transport::id::FRAME | transport::flag::F)
        .zint(7)
        // Looks like a message, but it is the first bytes of a fragmented one
        .u8(zenoh::id::DATA)
        .zint(1)
        .finish();

    let decoded = zenoh_dissector::dissect(&frame);
    assert!(decoded.is_done());
    assert_eq!(decoded.messages.len(), 1);
    let fragment = decoded.messages[0].field("frame_fragment").unwrap();
    assert_eq!(fragment.span(), 2..4);
}

#[test]
fn batches() {
    let first = [keep_alive(), data(1)].concat();
    let second = data(2);
    let frame = batch(&[&first, &second]);

    let decoded = dissector(Framing::Stream, 16).dissect(&frame);
    assert!(decoded.is_done(), "{:?}", decoded.outcome);
    assert_eq!(decoded.messages.len(), 3);

    // The length of a batch is reported on its first layer only
    let lens: Vec<_> = decoded
        .iter()
        .map(|m| m.value("len").and_then(FieldValue::as_u64))
        .collect();
    assert_eq!(
        lens,
        [Some(first.len() as u64), None, Some(second.len() as u64)]
    );
    assert_eq!(decoded.messages[0].span(), 0..3);
    assert_eq!(decoded.messages[2].offset, 2 + first.len());
    assert_eq!(decoded.consumed(), frame.len());
    check_layout(&frame, &decoded);
}

#[test]
fn empty_batches_are_skipped() {
    let frame = [&[0x00, 0x00][..], &batch(&[&keep_alive()])[..], &[0x00, 0x00][..]].concat();

    let decoded = dissector(Framing::Stream, 16).dissect(&frame);
    assert!(decoded.is_done());
    assert_eq!(decoded.messages.len(), 1);
    assert_eq!(decoded.messages[0].span(), 2..5);
    assert_eq!(decoded.consumed(), 3);
    check_layout(&frame, &decoded);
}

#[test]
fn batch_longer_than_frame() {
    let mut frame = batch(&[&INIT_FIXTURE[..], &keep_alive()[..]]);
    frame[14] = 0x05;

    let decoded = dissector(Framing::Stream, 16).dissect(&frame);
    assert_eq!(decoded.messages.len(), 1);
    assert_eq!(
        decoded.error(),
        Some(DecodeError::LengthMismatch {
            offset: 16,
            batch: 14,
            declared: 5,
            actual: 1
        })
    );
    let diagnostic = decoded.diagnostic().unwrap();
    assert_eq!(diagnostic.header, None);
    assert_eq!(diagnostic.fields[0].name, "len");
}

#[test]
fn message_longer_than_batch() {
    // The batch ends in the middle of the peer id
    let mut frame = batch(&[&INIT_FIXTURE]);
    frame[0] = 0x08;

    let decoded = dissector(Framing::Stream, 16).dissect(&frame);
    assert!(decoded.messages.is_empty());
    assert_eq!(
        decoded.error(),
        Some(DecodeError::LengthMismatch {
            offset: 6,
            batch: 0,
            declared: 8,
            actual: 12
        })
    );
    let diagnostic = decoded.diagnostic().unwrap();
    assert_eq!(diagnostic.kind(), Some(MessageKind::Init));
    // The peer id read is where the batch ran out
    assert_eq!(diagnostic.offset(), 6);
    let names: Vec<_> = diagnostic.fields.iter().map(|f| f.name.as_ref()).collect();
    assert_eq!(
        names,
        ["len", "msgid", "init_flags", "init_v_maj", "init_v_min", "init_whatami"]
    );
}

#[test]
fn truncated_length_prefix() {
    let frame = [&batch(&[&keep_alive()])[..], &[0x01][..]].concat();

    let decoded = dissector(Framing::Stream, 16).dissect(&frame);
    assert_eq!(decoded.messages.len(), 1);
    assert!(matches!(
        decoded.error(),
        Some(DecodeError::OutOfBounds {
            offset: 3,
            wanted: 2,
            available: 1
        })
    ));
}

#[test]
fn message_limit() {
    let frame = vec![transport::id::KEEP_ALIVE; 10];

    let decoded = dissector(Framing::Datagram, 4).dissect(&frame);
    assert_eq!(decoded.messages.len(), 4);
    assert_eq!(
        decoded.error(),
        Some(DecodeError::TooManyMessages {
            offset: 4,
            limit: 4
        })
    );
    assert_eq!(decoded.diagnostic().unwrap().header, None);

    let decoded = dissector(Framing::Datagram, 10).dissect(&frame);
    assert!(decoded.is_done());
    assert_eq!(decoded.messages.len(), 10);
}

#[test]
fn unknown_kind_after_known_ones() {
    let frame = [&INIT_FIXTURE[..], &[0x15, 0xde, 0xad][..]].concat();

    let decoded = zenoh_dissector::dissect(&frame);
    assert_eq!(decoded.messages.len(), 2);
    assert_eq!(decoded.messages[0].kind, Some(MessageKind::Init));

    let unknown = &decoded.messages[1];
    assert!(unknown.is_unknown());
    assert_eq!(unknown.span(), 12..15);
    assert_eq!(unknown.get("unknown_payload").as_deref(), Some("dead"));
    assert_eq!(
        decoded.error(),
        Some(DecodeError::UnknownKind {
            offset: 12,
            id: 0x15
        })
    );
    check_layout(&frame, &decoded);
}
