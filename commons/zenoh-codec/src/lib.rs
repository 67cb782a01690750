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
//! Primitive encodings of the Zenoh 0.6 wire format.
mod core;

use std::fmt;

pub use crate::core::zint::VLE_LEN;
use zenoh_buffers::reader::DidntRead;

pub trait WCodec<Message, Buffer> {
    type Output;
    fn write(self, buffer: Buffer, message: Message) -> Self::Output;
}

pub trait RCodec<Message, Buffer> {
    type Error;
    fn read(self, buffer: Buffer) -> Result<Message, Self::Error>;
}

// Calculate the length of the value once serialized
pub trait LCodec<Message> {
    fn w_len(self, message: Message) -> usize;
}

#[derive(Clone, Copy, Default)]
#[non_exhaustive]
pub struct Zenoh060;

impl Zenoh060 {
    pub const fn new() -> Self {
        Self
    }
}

/// Why a primitive could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DidntDecode {
    /// Not enough bytes to even start, or a length-prefixed item longer than what is left.
    OutOfBounds(DidntRead),
    /// A zint that does not terminate within [`VLE_LEN`] octets, that is cut short by the
    /// end of the readable window, or whose value does not fit in 64 bits.
    MalformedZInt { offset: usize },
}

impl From<DidntRead> for DidntDecode {
    fn from(e: DidntRead) -> Self {
        DidntDecode::OutOfBounds(e)
    }
}

impl fmt::Display for DidntDecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DidntDecode::OutOfBounds(e) => e.fmt(f),
            DidntDecode::MalformedZInt { offset } => {
                write!(f, "malformed zint at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for DidntDecode {}
