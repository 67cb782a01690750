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
use crate::{common::imsg, transport, zenoh};
use core::fmt;

/// Every message kind of the Zenoh 0.6 wire format, decorators included.
///
/// Transport and zenoh messages share a single id space, so the kind is fully determined by the
/// low [`imsg::HEADER_BITS`] bits of the header octet.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    Join = imsg::id::JOIN,
    Scout = imsg::id::SCOUT,
    Hello = imsg::id::HELLO,
    Init = imsg::id::INIT,
    Open = imsg::id::OPEN,
    Close = imsg::id::CLOSE,
    Sync = imsg::id::SYNC,
    AckNack = imsg::id::ACK_NACK,
    KeepAlive = imsg::id::KEEP_ALIVE,
    PingPong = imsg::id::PING_PONG,
    Frame = imsg::id::FRAME,
    Declare = imsg::id::DECLARE,
    Data = imsg::id::DATA,
    Query = imsg::id::QUERY,
    Pull = imsg::id::PULL,
    Unit = imsg::id::UNIT,
    LinkStateList = imsg::id::LINK_STATE_LIST,
    Priority = imsg::id::PRIORITY,
    RoutingContext = imsg::id::ROUTING_CONTEXT,
    ReplyContext = imsg::id::REPLY_CONTEXT,
    Attachment = imsg::id::ATTACHMENT,
}

type FlagNames = &'static [(u8, &'static str)];

impl MessageKind {
    pub const ALL: [MessageKind; 21] = [
        MessageKind::Join,
        MessageKind::Scout,
        MessageKind::Hello,
        MessageKind::Init,
        MessageKind::Open,
        MessageKind::Close,
        MessageKind::Sync,
        MessageKind::AckNack,
        MessageKind::KeepAlive,
        MessageKind::PingPong,
        MessageKind::Frame,
        MessageKind::Declare,
        MessageKind::Data,
        MessageKind::Query,
        MessageKind::Pull,
        MessageKind::Unit,
        MessageKind::LinkStateList,
        MessageKind::Priority,
        MessageKind::RoutingContext,
        MessageKind::ReplyContext,
        MessageKind::Attachment,
    ];

    pub const fn from_id(id: u8) -> Option<Self> {
        use imsg::id::*;
        match id {
            JOIN => Some(MessageKind::Join),
            SCOUT => Some(MessageKind::Scout),
            HELLO => Some(MessageKind::Hello),
            INIT => Some(MessageKind::Init),
            OPEN => Some(MessageKind::Open),
            CLOSE => Some(MessageKind::Close),
            SYNC => Some(MessageKind::Sync),
            ACK_NACK => Some(MessageKind::AckNack),
            KEEP_ALIVE => Some(MessageKind::KeepAlive),
            PING_PONG => Some(MessageKind::PingPong),
            FRAME => Some(MessageKind::Frame),
            DECLARE => Some(MessageKind::Declare),
            DATA => Some(MessageKind::Data),
            QUERY => Some(MessageKind::Query),
            PULL => Some(MessageKind::Pull),
            UNIT => Some(MessageKind::Unit),
            LINK_STATE_LIST => Some(MessageKind::LinkStateList),
            PRIORITY => Some(MessageKind::Priority),
            ROUTING_CONTEXT => Some(MessageKind::RoutingContext),
            REPLY_CONTEXT => Some(MessageKind::ReplyContext),
            ATTACHMENT => Some(MessageKind::Attachment),
            _ => None,
        }
    }

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            MessageKind::Join => "Join",
            MessageKind::Scout => "Scout",
            MessageKind::Hello => "Hello",
            MessageKind::Init => "Init",
            MessageKind::Open => "Open",
            MessageKind::Close => "Close",
            MessageKind::Sync => "Sync",
            MessageKind::AckNack => "AckNack",
            MessageKind::KeepAlive => "KeepAlive",
            MessageKind::PingPong => "PingPong",
            MessageKind::Frame => "Frame",
            MessageKind::Declare => "Declare",
            MessageKind::Data => "Data",
            MessageKind::Query => "Query",
            MessageKind::Pull => "Pull",
            MessageKind::Unit => "Unit",
            MessageKind::LinkStateList => "LinkStateList",
            MessageKind::Priority => "Priority",
            MessageKind::RoutingContext => "RoutingContext",
            MessageKind::ReplyContext => "ReplyContext",
            MessageKind::Attachment => "Attachment",
        }
    }

    /// Prefix of the per-kind field names, e.g. `init` in `init_whatami`.
    pub const fn prefix(self) -> &'static str {
        match self {
            MessageKind::Join => "join",
            MessageKind::Scout => "scout",
            MessageKind::Hello => "hello",
            MessageKind::Init => "init",
            MessageKind::Open => "open",
            MessageKind::Close => "close",
            MessageKind::Sync => "sync",
            MessageKind::AckNack => "acknack",
            MessageKind::KeepAlive => "keepalive",
            MessageKind::PingPong => "pingpong",
            MessageKind::Frame => "frame",
            MessageKind::Declare => "declare",
            MessageKind::Data => "data",
            MessageKind::Query => "query",
            MessageKind::Pull => "pull",
            MessageKind::Unit => "unit",
            MessageKind::LinkStateList => "linkstate",
            MessageKind::Priority => "priority",
            MessageKind::RoutingContext => "routing_context",
            MessageKind::ReplyContext => "reply_context",
            MessageKind::Attachment => "attachment",
        }
    }

    pub const fn is_decorator(self) -> bool {
        matches!(
            self,
            MessageKind::Priority
                | MessageKind::RoutingContext
                | MessageKind::ReplyContext
                | MessageKind::Attachment
        )
    }

    /// The header flags this kind defines, most significant bit first.
    pub const fn flag_names(self) -> FlagNames {
        use transport::flag as t;
        use zenoh::flag as z;
        match self {
            MessageKind::Join => &[(t::O, "O"), (t::S, "S"), (t::T1, "T")],
            MessageKind::Scout => &[(t::W, "W"), (t::I, "I")],
            MessageKind::Hello => &[(t::L, "L"), (t::W, "W"), (t::I, "I")],
            MessageKind::Init => &[(t::O, "O"), (t::S, "S"), (t::A, "A")],
            MessageKind::Open => &[(t::T2, "T"), (t::A, "A")],
            MessageKind::Close => &[(t::K, "K"), (t::I, "I")],
            MessageKind::Sync => &[(t::C, "C"), (t::R, "R")],
            MessageKind::AckNack => &[(t::M, "M")],
            MessageKind::KeepAlive => &[(t::I, "I")],
            MessageKind::PingPong => &[(t::P, "P")],
            MessageKind::Frame => &[(t::E, "E"), (t::F, "F"), (t::R, "R")],
            MessageKind::Data => &[(z::K, "K"), (z::I, "I"), (z::D, "D")],
            MessageKind::Query => &[(z::K, "K"), (z::B, "B"), (z::T, "T")],
            MessageKind::Pull => &[(z::K, "K"), (z::N, "N"), (z::F, "F")],
            MessageKind::Unit => &[(z::D, "D")],
            MessageKind::ReplyContext => &[(z::F, "F")],
            MessageKind::Attachment => &[(t::Z, "Z")],
            // The flag bits of a PRIORITY carry the priority value itself
            MessageKind::Declare
            | MessageKind::LinkStateList
            | MessageKind::Priority
            | MessageKind::RoutingContext => &[],
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for MessageKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// The leading octet of a message.
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |Z|Y|X|   MID   |
/// +-+-+-+---------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHeader(pub u8);

impl MessageHeader {
    pub const fn id(self) -> u8 {
        imsg::mid(self.0)
    }

    /// The flag bits, left in place.
    pub const fn flags(self) -> u8 {
        imsg::flags(self.0)
    }

    /// `None` for ids that no decoder knows about; those are left to the caller.
    pub const fn kind(self) -> Option<MessageKind> {
        MessageKind::from_id(self.id())
    }

    pub const fn has_flag(self, flag: u8) -> bool {
        imsg::has_flag(self.0, flag)
    }

    /// Symbolic names of the flags set in this header, most significant bit first.
    pub fn flag_names(self) -> impl Iterator<Item = &'static str> {
        let names = match self.kind() {
            Some(kind) => kind.flag_names(),
            None => &[],
        };
        names
            .iter()
            .filter(move |(bit, _)| self.has_flag(*bit))
            .map(|(_, name)| *name)
    }
}

impl From<u8> for MessageHeader {
    fn from(header: u8) -> Self {
        MessageHeader(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_roundtrip_through_ids() {
        for kind in MessageKind::ALL {
            assert_eq!(MessageKind::from_id(kind.id()), Some(kind));
            assert!(kind.id() <= imsg::HEADER_MASK);
            // Flags never overlap the id bits
            for (bit, _) in kind.flag_names() {
                assert_eq!(bit & imsg::HEADER_MASK, 0);
            }
        }
        for id in 0x11..0x1c {
            assert_eq!(MessageKind::from_id(id), None);
        }
    }

    #[test]
    fn header_of_init() {
        let header = MessageHeader(0x03);
        assert_eq!(header.id(), 0x03);
        assert_eq!(header.flags(), 0x00);
        assert_eq!(header.kind(), Some(MessageKind::Init));
        assert_eq!(header.flag_names().count(), 0);

        let header = MessageHeader(0xc3);
        assert_eq!(header.flags(), 0xc0);
        assert_eq!(header.flag_names().collect::<Vec<_>>(), ["O", "S"]);
    }

    #[test]
    fn header_of_unknown_kind() {
        let header = MessageHeader(0xf5);
        assert_eq!(header.kind(), None);
        assert_eq!(header.flag_names().count(), 0);
    }
}
