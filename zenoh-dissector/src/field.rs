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
use std::{borrow::Cow, fmt, ops::Range};

use serde::ser::SerializeStruct;

/// A decoded value, kept typed until it is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A zint or a plain octet.
    UInt(u64),
    /// A message or declaration id, displayed as `0x%08x`.
    Id(u8),
    /// A flag set or option bitmask, displayed as `0x%08x`.
    Flags(u64),
    /// Half of a version octet.
    Nibble(u8),
    /// Raw bytes, displayed as lowercase hex.
    Bytes(&'a [u8]),
    /// Text, with invalid UTF-8 sequences replaced.
    Text(Cow<'a, str>),
    /// A value from a closed set, displayed by its numeric value.
    Enum { value: u64, label: &'static str },
}

impl FieldValue<'_> {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::UInt(v) | FieldValue::Flags(v) | FieldValue::Enum { value: v, .. } => {
                Some(*v)
            }
            FieldValue::Id(v) | FieldValue::Nibble(v) => Some(*v as u64),
            FieldValue::Bytes(_) | FieldValue::Text(_) => None,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            FieldValue::Enum { label, .. } => Some(*label),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::UInt(v) => write!(f, "{}", v),
            FieldValue::Id(v) => write!(f, "0x{:08x}", v),
            FieldValue::Flags(v) => write!(f, "0x{:08x}", v),
            FieldValue::Nibble(v) => write!(f, "{}", v),
            FieldValue::Bytes(b) => f.write_str(&hex::encode(b)),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Enum { value, .. } => write!(f, "{}", value),
        }
    }
}

/// One decoded field and the bytes it was decoded from.
///
/// The fields of a message come in wire order and their byte ranges do not overlap, with one
/// exception: the values packed in the bits of a single octet (`msgid` and the header flags,
/// `v_maj` and `v_min`, a declaration id and its flags) are reported as separate fields with
/// the same one-octet range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord<'a> {
    pub name: Cow<'static, str>,
    pub value: FieldValue<'a>,
    /// The bytes of the field. Fields decoded from some bits of an octet share that octet.
    pub raw: &'a [u8],
    /// Absolute offset in the frame.
    pub offset: usize,
}

impl<'a> FieldRecord<'a> {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.raw.len()
    }
}

impl fmt::Display for FieldRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)?;
        if let Some(label) = self.value.label() {
            write!(f, " ({})", label)?;
        }
        write!(f, " [{}..{}]", self.offset, self.offset + self.len())
    }
}

impl serde::Serialize for FieldRecord<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let label = self.value.label();
        let mut s = serializer.serialize_struct("FieldRecord", 5)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("value", &self.value.to_string())?;
        if let Some(label) = label {
            s.serialize_field("label", label)?;
        } else {
            s.skip_field("label")?;
        }
        s.serialize_field("offset", &self.offset)?;
        s.serialize_field("len", &self.len())?;
        s.end()
    }
}
