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

//! Dissection of captured Zenoh 0.6 traffic into named, typed fields.
//!
//! A frame is split into layers, one per wire message or decorator, each carrying its fields in
//! decode order together with the bytes they were decoded from.
//!
//! ```
//! use zenoh_dissector::{dissect, MessageKind};
//!
//! let frame = [0x03, 0x00, 0x04, 0x08, 0x34, 0x2c, 0x57, 0x2e, 0xf3, 0xc8, 0x84, 0xea];
//! let decoded = dissect(&frame);
//! assert!(decoded.is_done());
//!
//! let init = &decoded.messages[0];
//! assert_eq!(init.kind, Some(MessageKind::Init));
//! assert_eq!(init.get("init_whatami").as_deref(), Some("4"));
//! assert_eq!(init.get("init_peerid").as_deref(), Some("342c572ef3c884ea"));
//! ```
mod config;
mod decoder;
mod dissector;
mod error;
mod field;
mod message;

pub use config::{DissectorConfig, Framing, DEFAULT_MAX_MESSAGES};
pub use dissector::{dissect, Dissector};
pub use error::DecodeError;
pub use field::{FieldRecord, FieldValue};
pub use message::{DecodedFrame, Diagnostic, Message, Outcome, UNKNOWN_KIND};
pub use zenoh_protocol::{MessageHeader, MessageKind};
