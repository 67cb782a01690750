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
//! Dissects arbitrary bytes with both framings.
//!
//! Beyond not panicking, every layer and field must point inside the input, layers must follow
//! each other, and a fully decoded datagram must account for every byte.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zenoh_dissector::{Dissector, DissectorConfig, Framing};

fuzz_target!(|data: &[u8]| {
    for framing in [Framing::Datagram, Framing::Stream] {
        let dissector = Dissector::new(DissectorConfig {
            framing,
            max_messages: 64,
        });
        let decoded = dissector.dissect(data);

        let mut end = 0;
        for message in decoded.iter() {
            let span = message.span();
            assert!(span.start >= end && span.end <= data.len());
            for field in message.fields.iter() {
                let fs = field.span();
                assert!(fs.start >= span.start && fs.end <= span.end);
            }
            end = span.end;
        }

        match decoded.diagnostic() {
            Some(d) => assert!(d.offset() <= data.len()),
            None if framing == Framing::Datagram => assert_eq!(decoded.consumed(), data.len()),
            None => assert!(decoded.consumed() <= data.len()),
        }
    }
});
