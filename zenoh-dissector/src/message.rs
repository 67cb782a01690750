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
use std::{fmt, ops::Range};

use serde::{ser::SerializeStruct, Serialize};
use zenoh_protocol::{MessageHeader, MessageKind};

use crate::{DecodeError, FieldRecord, FieldValue};

/// Name reported for messages whose id no decoder knows about.
pub const UNKNOWN_KIND: &str = "Unknown";

/// One message layer: a wire message or a decorator, with its fields in decode order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<'a> {
    /// `None` for an unknown message, whose body is kept as an opaque blob.
    pub kind: Option<MessageKind>,
    pub header: MessageHeader,
    /// Absolute offset of the first byte of the layer.
    pub offset: usize,
    /// Every byte of the layer, including the batch length prefix it may start with.
    pub raw: &'a [u8],
    pub fields: Vec<FieldRecord<'a>>,
}

impl<'a> Message<'a> {
    pub fn kind_name(&self) -> &'static str {
        self.kind.map_or(UNKNOWN_KIND, MessageKind::name)
    }

    pub fn is_unknown(&self) -> bool {
        self.kind.is_none()
    }

    /// Whether the layer qualifies the message that follows it rather than standing alone.
    pub fn is_decorator(&self) -> bool {
        self.kind.is_some_and(MessageKind::is_decorator)
    }

    pub fn id(&self) -> u8 {
        self.header.id()
    }

    pub fn flags(&self) -> u8 {
        self.header.flags()
    }

    pub fn flag_names(&self) -> impl Iterator<Item = &'static str> {
        self.header.flag_names()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.raw.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldRecord<'a>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue<'a>> {
        self.field(name).map(|f| &f.value)
    }

    /// The displayed value of a field, as a host tool would show it.
    pub fn get(&self, name: &str) -> Option<String> {
        self.value(name).map(|v| v.to_string())
    }
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}..{}]", self.kind_name(), self.offset, self.offset + self.len())?;
        let mut names = self.flag_names().peekable();
        if names.peek().is_some() {
            f.write_str(" {")?;
            for (i, n) in names.enumerate() {
                if i > 0 {
                    f.write_str("|")?;
                }
                f.write_str(n)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

impl Serialize for Message<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Message", 8)?;
        s.serialize_field("kind", self.kind_name())?;
        s.serialize_field("decorator", &self.is_decorator())?;
        s.serialize_field("id", &self.id())?;
        s.serialize_field("flags", &FieldValue::Flags(self.flags() as u64).to_string())?;
        s.serialize_field("flag_names", &self.flag_names().collect::<Vec<_>>())?;
        s.serialize_field("offset", &self.offset)?;
        s.serialize_field("len", &self.len())?;
        s.serialize_field("fields", &self.fields)?;
        s.end()
    }
}

/// Why and where dissection of a frame stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic<'a> {
    /// Header of the failing message, `None` if the failure happened outside of any message
    /// (e.g. on a batch length prefix).
    pub header: Option<MessageHeader>,
    pub error: DecodeError,
    /// Fields of the failing message decoded before the failure.
    pub fields: Vec<FieldRecord<'a>>,
}

impl Diagnostic<'_> {
    pub fn kind(&self) -> Option<MessageKind> {
        self.header.and_then(MessageHeader::kind)
    }

    pub fn id(&self) -> Option<u8> {
        self.header.map(MessageHeader::id)
    }

    pub fn flags(&self) -> Option<u8> {
        self.header.map(MessageHeader::flags)
    }

    /// Cursor offset at failure.
    pub fn offset(&self) -> usize {
        self.error.offset()
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.header {
            Some(h) => write!(
                f,
                "malformed {} message (id 0x{:02x}, flags 0x{:02x}): {}",
                h.kind().map_or(UNKNOWN_KIND, MessageKind::name),
                h.id(),
                h.flags(),
                self.error
            ),
            None => write!(f, "malformed frame: {}", self.error),
        }
    }
}

impl Serialize for Diagnostic<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Diagnostic", 7)?;
        s.serialize_field("kind", &self.header.map(|h| match h.kind() {
            Some(k) => k.name(),
            None => UNKNOWN_KIND,
        }))?;
        s.serialize_field("id", &self.id())?;
        s.serialize_field("flags", &self.flags())?;
        s.serialize_field("offset", &self.offset())?;
        s.serialize_field("error", self.error.name())?;
        s.serialize_field("message", &self.error)?;
        s.serialize_field("fields", &self.fields)?;
        s.end()
    }
}

/// Terminal state of a dissection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state")]
pub enum Outcome<'a> {
    /// Every byte of the frame was accounted for.
    Done,
    /// Dissection stopped; the messages decoded so far are still reported.
    Failed(Diagnostic<'a>),
}

/// The result of dissecting one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedFrame<'a> {
    /// Layers in wire order.
    pub messages: Vec<Message<'a>>,
    pub outcome: Outcome<'a>,
}

impl<'a> DecodedFrame<'a> {
    pub fn is_done(&self) -> bool {
        matches!(self.outcome, Outcome::Done)
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic<'a>> {
        match &self.outcome {
            Outcome::Done => None,
            Outcome::Failed(d) => Some(d),
        }
    }

    pub fn error(&self) -> Option<DecodeError> {
        self.diagnostic().map(|d| d.error)
    }

    /// Number of bytes covered by the layers. Prefixes of empty batches belong to no layer.
    pub fn consumed(&self) -> usize {
        self.messages.iter().map(Message::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message<'a>> {
        self.messages.iter()
    }

    /// The first layer of the given kind.
    pub fn find(&self, kind: MessageKind) -> Option<&Message<'a>> {
        self.messages.iter().find(|m| m.kind == Some(kind))
    }
}

impl<'f, 'a> IntoIterator for &'f DecodedFrame<'a> {
    type Item = &'f Message<'a>;
    type IntoIter = std::slice::Iter<'f, Message<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
