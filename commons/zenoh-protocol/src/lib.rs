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

//! ⚠️ WARNING ⚠️
//!
//! This crate is intended for the dissector's internal use.
//!
//! Identifiers, flags and enumerations of the Zenoh 0.6 wire format.
pub mod common;
pub mod core;
mod kind;
pub mod transport;
pub mod zenoh;

pub use kind::{MessageHeader, MessageKind};

// Message layouts in this crate are documented with the following conventions.
//
// A single byte field:
//
// ```text
//  7 6 5 4 3 2 1 0
// +-+-+-+-+-+-+-+-+
// |      u8       |
// +---------------+
// ```
//
// A zint, i.e. an unsigned integer encoded on 1 to 10 octets, 7 bits per octet:
//
// ```text
//  7 6 5 4 3 2 1 0
// +-+-+-+-+-+-+-+-+
// %     zint      %
// +---------------+
// ```
//
// A variable length element (byte array, string, list), always preceded by its zint length:
//
// ```text
//  7 6 5 4 3 2 1 0
// +-+-+-+-+-+-+-+-+
// ~    element    ~
// +---------------+
// ```
