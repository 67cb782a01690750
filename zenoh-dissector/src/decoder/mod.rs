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
//! Per-kind decoders and the id-indexed table they are dispatched through.
mod common;
mod decorator;
mod transport;
mod zenoh;

use std::borrow::Cow;

use tracing::trace;
use zenoh_buffers::{reader::Reader, ZCursor};
use zenoh_codec::{RCodec, Zenoh060};
use zenoh_protocol::{common::imsg, core::ZInt, MessageHeader, MessageKind};

use crate::{DecodeError, FieldRecord, FieldValue, Message};

/// Reads one message body, recording every field in the [`FieldReader`].
pub(crate) type DecodeFn = for<'a> fn(&mut FieldReader<'a>, MessageHeader) -> Result<(), DecodeError>;

const fn decoder_for(kind: MessageKind) -> DecodeFn {
    match kind {
        MessageKind::Join => transport::join,
        MessageKind::Scout => transport::scout,
        MessageKind::Hello => transport::hello,
        MessageKind::Init => transport::init,
        MessageKind::Open => transport::open,
        MessageKind::Close => transport::close,
        MessageKind::Sync => transport::sync,
        MessageKind::AckNack => transport::ack_nack,
        MessageKind::KeepAlive => transport::keep_alive,
        MessageKind::PingPong => transport::ping_pong,
        MessageKind::Frame => transport::frame,
        MessageKind::Declare => zenoh::declare,
        MessageKind::Data => zenoh::data,
        MessageKind::Query => zenoh::query,
        MessageKind::Pull => zenoh::pull,
        MessageKind::Unit => zenoh::unit,
        MessageKind::LinkStateList => zenoh::link_state_list,
        MessageKind::Priority => decorator::priority,
        MessageKind::RoutingContext => decorator::routing_context,
        MessageKind::ReplyContext => decorator::reply_context,
        MessageKind::Attachment => decorator::attachment,
    }
}

const TABLE_LEN: usize = imsg::HEADER_MASK as usize + 1;

const fn build_table() -> [Option<DecodeFn>; TABLE_LEN] {
    let mut table: [Option<DecodeFn>; TABLE_LEN] = [None; TABLE_LEN];
    let mut i = 0;
    while i < MessageKind::ALL.len() {
        let kind = MessageKind::ALL[i];
        table[kind.id() as usize] = Some(decoder_for(kind));
        i += 1;
    }
    table
}

/// Decoders indexed by message id. Empty slots are unknown kinds.
pub(crate) static DECODERS: [Option<DecodeFn>; TABLE_LEN] = build_table();

/// A failure while decoding a message, with what was decoded before it.
#[derive(Debug)]
pub(crate) struct Failure<'a> {
    pub(crate) header: MessageHeader,
    pub(crate) error: DecodeError,
    pub(crate) fields: Vec<FieldRecord<'a>>,
}

/// Decodes the message starting at the reader position.
///
/// On success the reader is moved past the message. Unknown ids produce a layer holding every
/// remaining byte of the reader, and the caller is expected to stop there.
pub(crate) fn decode<'a>(reader: &mut ZCursor<'a>) -> Result<Message<'a>, Failure<'a>> {
    let start = reader.pos();
    let header = MessageHeader(reader.peek_u8().map_err(|e| Failure {
        header: MessageHeader(0),
        error: e.into(),
        fields: vec![],
    })?);
    let kind = header.kind();
    let prefix = kind.map_or("unknown", MessageKind::prefix);

    let mut fr = FieldReader::new(*reader, prefix);
    fr.header(header);

    let result = match DECODERS[header.id() as usize] {
        Some(decode) => decode(&mut fr, header),
        None => {
            trace!("Message with unknown ID: {}", header.id());
            fr.rest("payload");
            Ok(())
        }
    };

    match result {
        Ok(()) => {
            let end = fr.reader.pos();
            *reader = fr.reader;
            Ok(Message {
                kind,
                header,
                offset: start,
                raw: &reader.buffer()[start..end],
                fields: fr.fields,
            })
        }
        Err(error) => Err(Failure {
            header,
            error,
            fields: fr.fields,
        }),
    }
}

/// Reads fields off a message, recording their name, value and provenance.
pub(crate) struct FieldReader<'a> {
    reader: ZCursor<'a>,
    codec: Zenoh060,
    prefix: &'static str,
    fields: Vec<FieldRecord<'a>>,
}

impl<'a> FieldReader<'a> {
    fn new(reader: ZCursor<'a>, prefix: &'static str) -> Self {
        Self {
            reader,
            codec: Zenoh060::new(),
            prefix,
            fields: Vec::new(),
        }
    }

    fn name(&self, field: &str) -> Cow<'static, str> {
        Cow::Owned(format!("{}_{}", self.prefix, field))
    }

    fn push(&mut self, name: Cow<'static, str>, start: usize, value: FieldValue<'a>) {
        let raw = &self.reader.buffer()[start..self.reader.pos()];
        self.fields.push(FieldRecord {
            name,
            value,
            raw,
            offset: start,
        });
    }

    /// Records a value decoded from some bits of the octet at `offset`.
    fn push_bits(&mut self, name: Cow<'static, str>, offset: usize, value: FieldValue<'a>) {
        let raw = &self.reader.buffer()[offset..offset + 1];
        self.fields.push(FieldRecord {
            name,
            value,
            raw,
            offset,
        });
    }

    /// Consumes the header octet, recording `msgid` and `<prefix>_flags`.
    fn header(&mut self, header: MessageHeader) {
        let offset = self.reader.pos();
        // Already peeked by the caller
        let _ = self.reader.skip(1);
        self.push_bits(Cow::Borrowed("msgid"), offset, FieldValue::Id(header.id()));
        let name = self.name("flags");
        self.push_bits(name, offset, FieldValue::Flags(header.flags() as u64));
    }

    pub(crate) fn pos(&self) -> usize {
        self.reader.pos()
    }

    pub(crate) fn read_zint(&mut self) -> Result<ZInt, DecodeError> {
        let v: ZInt = self.codec.read(&mut self.reader)?;
        Ok(v)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.reader.read_u8()?)
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        Ok(self.reader.read_bytes(len)?)
    }

    pub(crate) fn read_array(&mut self) -> Result<&'a [u8], DecodeError> {
        let bytes: &'a [u8] = self.codec.read(&mut self.reader)?;
        Ok(bytes)
    }

    pub(crate) fn zint(&mut self, field: &str) -> Result<ZInt, DecodeError> {
        let start = self.pos();
        let v = self.read_zint()?;
        self.push(self.name(field), start, FieldValue::UInt(v));
        Ok(v)
    }

    pub(crate) fn options(&mut self, field: &str) -> Result<ZInt, DecodeError> {
        let start = self.pos();
        let v = self.read_zint()?;
        self.push(self.name(field), start, FieldValue::Flags(v));
        Ok(v)
    }

    /// A zint from a closed set whose unknown values are still displayable.
    pub(crate) fn labelled(
        &mut self,
        field: &str,
        label: fn(ZInt) -> Option<&'static str>,
        unknown: &'static str,
    ) -> Result<ZInt, DecodeError> {
        let start = self.pos();
        let value = self.read_zint()?;
        let label = label(value).unwrap_or(unknown);
        self.push(self.name(field), start, FieldValue::Enum { value, label });
        Ok(value)
    }

    /// A zint from a closed set whose unknown values make the rest of the message unreadable.
    pub(crate) fn strict(
        &mut self,
        field: &'static str,
        label: fn(ZInt) -> Option<&'static str>,
    ) -> Result<ZInt, DecodeError> {
        let start = self.pos();
        let value = self.read_zint()?;
        let label = label(value).ok_or(DecodeError::InvalidValue {
            offset: start,
            field,
            value,
        })?;
        self.push(self.name(field), start, FieldValue::Enum { value, label });
        Ok(value)
    }

    pub(crate) fn enumerated(&mut self, field: &str, start: usize, value: ZInt, label: &'static str) {
        self.push(self.name(field), start, FieldValue::Enum { value, label });
    }

    /// A length-prefixed byte array. Only the bytes themselves are recorded.
    pub(crate) fn bytes(&mut self, field: &str) -> Result<&'a [u8], DecodeError> {
        let bytes = self.read_array()?;
        let start = self.pos() - bytes.len();
        self.push(self.name(field), start, FieldValue::Bytes(bytes));
        Ok(bytes)
    }

    /// A length-prefixed string. Only the bytes themselves are recorded.
    pub(crate) fn string(&mut self, field: &str) -> Result<(), DecodeError> {
        let bytes = self.read_array()?;
        let start = self.pos() - bytes.len();
        let text = String::from_utf8_lossy(bytes);
        self.push(self.name(field), start, FieldValue::Text(text));
        Ok(())
    }

    /// Every remaining byte of the readable window.
    pub(crate) fn rest(&mut self, field: &str) -> &'a [u8] {
        let start = self.pos();
        let bytes = self.reader.read_rest();
        self.push(self.name(field), start, FieldValue::Bytes(bytes));
        bytes
    }

    pub(crate) fn nibbles(&mut self, high: &str, low: &str, offset: usize, octet: u8) {
        self.push_bits(self.name(high), offset, FieldValue::Nibble(octet >> 4));
        self.push_bits(self.name(low), offset, FieldValue::Nibble(octet & 0x0f));
    }

    pub(crate) fn bits(&mut self, field: &str, offset: usize, value: FieldValue<'a>) {
        self.push_bits(self.name(field), offset, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_kinds() {
        for id in 0..TABLE_LEN as u8 {
            assert_eq!(
                DECODERS[id as usize].is_some(),
                MessageKind::from_id(id).is_some(),
                "id 0x{:02x}",
                id
            );
        }
    }

    #[test]
    fn reader_records_provenance() {
        let buf = [0xffu8, 0x80, 0x01, 0x02, b'h', b'i', 0x07];
        let mut cursor = ZCursor::new(&buf);
        cursor.skip(1).unwrap();
        let mut fr = FieldReader::new(cursor, "test");

        assert_eq!(fr.zint("n").unwrap(), 128);
        fr.string("s").unwrap();
        assert_eq!(fr.rest("tail"), &[0x07]);

        let names: Vec<_> = fr.fields.iter().map(|f| f.name.as_ref()).collect();
        assert_eq!(names, ["test_n", "test_s", "test_tail"]);
        assert_eq!(fr.fields[0].span(), 1..3);
        assert_eq!(fr.fields[1].span(), 4..6);
        assert_eq!(fr.fields[1].value, FieldValue::Text("hi".into()));
        assert_eq!(fr.fields[2].span(), 6..7);
    }

    #[test]
    fn strict_rejects_unknown_values() {
        let buf = [0x05u8];
        let mut fr = FieldReader::new(ZCursor::new(&buf), "query");
        let err = fr
            .strict("target", zenoh_protocol::zenoh::query_target_to_str)
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidValue {
                offset: 0,
                field: "target",
                value: 5
            }
        );
        assert!(fr.fields.is_empty());
    }
}
