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
use core::fmt;
use zenoh_buffers::reader::DidntRead;
use zenoh_codec::DidntDecode;

/// Why decoding stopped.
///
/// Every variant carries the absolute frame offset it refers to, so a failure can be pointed at
/// in the captured bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A read past the end of the readable bytes.
    OutOfBounds {
        offset: usize,
        wanted: usize,
        available: usize,
    },
    /// A zint longer than [`zenoh_codec::VLE_LEN`] octets, truncated, or overflowing 64 bits.
    MalformedVarint { offset: usize },
    /// A batch length that disagrees with the bytes actually there or actually needed.
    ///
    /// `offset` is where the read failed, `batch` the offset of the length prefix.
    LengthMismatch {
        offset: usize,
        batch: usize,
        declared: usize,
        actual: usize,
    },
    /// A value that makes the rest of the message impossible to interpret.
    InvalidValue {
        offset: usize,
        field: &'static str,
        value: u64,
    },
    /// A header whose id no decoder knows about.
    UnknownKind { offset: usize, id: u8 },
    /// The configured maximum number of layers per frame was reached.
    TooManyMessages { offset: usize, limit: usize },
}

impl DecodeError {
    pub const fn offset(&self) -> usize {
        match self {
            DecodeError::OutOfBounds { offset, .. }
            | DecodeError::MalformedVarint { offset }
            | DecodeError::LengthMismatch { offset, .. }
            | DecodeError::InvalidValue { offset, .. }
            | DecodeError::UnknownKind { offset, .. }
            | DecodeError::TooManyMessages { offset, .. } => *offset,
        }
    }

    /// A short stable name, suitable for filtering.
    pub const fn name(&self) -> &'static str {
        match self {
            DecodeError::OutOfBounds { .. } => "OutOfBounds",
            DecodeError::MalformedVarint { .. } => "MalformedVarint",
            DecodeError::LengthMismatch { .. } => "LengthMismatch",
            DecodeError::InvalidValue { .. } => "InvalidValue",
            DecodeError::UnknownKind { .. } => "UnknownKind",
            DecodeError::TooManyMessages { .. } => "TooManyMessages",
        }
    }
}

impl From<DidntRead> for DecodeError {
    fn from(e: DidntRead) -> Self {
        DecodeError::OutOfBounds {
            offset: e.offset,
            wanted: e.wanted,
            available: e.available,
        }
    }
}

impl From<DidntDecode> for DecodeError {
    fn from(e: DidntDecode) -> Self {
        match e {
            DidntDecode::OutOfBounds(e) => e.into(),
            DidntDecode::MalformedZInt { offset } => DecodeError::MalformedVarint { offset },
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::OutOfBounds {
                offset,
                wanted,
                available,
            } => write!(
                f,
                "out of bounds: wanted {} byte(s) at offset {} but only {} left",
                wanted, offset, available
            ),
            DecodeError::MalformedVarint { offset } => {
                write!(f, "malformed zint at offset {}", offset)
            }
            DecodeError::LengthMismatch {
                offset,
                batch,
                declared,
                actual,
            } => write!(
                f,
                "length mismatch at offset {}: batch at offset {} declared {} byte(s), actual {}",
                offset, batch, declared, actual
            ),
            DecodeError::InvalidValue {
                offset,
                field,
                value,
            } => write!(f, "invalid {} {} at offset {}", field, value, offset),
            DecodeError::UnknownKind { offset, id } => {
                write!(f, "unknown message id 0x{:02x} at offset {}", id, offset)
            }
            DecodeError::TooManyMessages { offset, limit } => write!(
                f,
                "more than {} messages in frame, stopped at offset {}",
                limit, offset
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

impl serde::Serialize for DecodeError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
