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
//! Zenoh messages: declarations, data, queries and routing state.
use crate::common::imsg;
use crate::core::ZInt;

// Zenoh message IDs -- Re-export of some of the Inner Message IDs
pub mod id {
    use super::imsg;

    // Messages
    pub const DECLARE: u8 = imsg::id::DECLARE;
    pub const DATA: u8 = imsg::id::DATA;
    pub const QUERY: u8 = imsg::id::QUERY;
    pub const PULL: u8 = imsg::id::PULL;
    pub const UNIT: u8 = imsg::id::UNIT;
    pub const LINK_STATE_LIST: u8 = imsg::id::LINK_STATE_LIST;

    // Message decorators
    pub const PRIORITY: u8 = imsg::id::PRIORITY;
    pub const REPLY_CONTEXT: u8 = imsg::id::REPLY_CONTEXT;
    pub const ATTACHMENT: u8 = imsg::id::ATTACHMENT;
    pub const ROUTING_CONTEXT: u8 = imsg::id::ROUTING_CONTEXT;
}

// Zenoh message flags
pub mod flag {
    pub const B: u8 = 1 << 6; // 0x40 QueryBody     if B==1 then QueryBody is present
    pub const D: u8 = 1 << 5; // 0x20 Drop          if D==1 then the message can be dropped
    pub const F: u8 = 1 << 5; // 0x20 Final         if F==1 then this is the final message (e.g., ReplyContext, Pull)
    pub const I: u8 = 1 << 6; // 0x40 DataInfo      if I==1 then DataInfo is present
    pub const K: u8 = 1 << 7; // 0x80 KeySuffix     if K==1 then key_expr has suffix
    pub const N: u8 = 1 << 6; // 0x40 MaxSamples    if N==1 then the MaxSamples is indicated
    pub const Q: u8 = 1 << 6; // 0x40 QueryableInfo if Q==1 then the queryable info is present
    pub const R: u8 = 1 << 5; // 0x20 Reliable      if R==1 then it concerns the reliable channel, best-effort otherwise
    pub const S: u8 = 1 << 6; // 0x40 SubMode       if S==1 then the declaration SubMode is indicated
    pub const T: u8 = 1 << 5; // 0x20 QueryTarget   if T==1 then the query target is present
}

// Options used for DataInfo
pub mod data {
    pub mod info {
        use crate::core::ZInt;

        pub const SLICED: ZInt = 1 << 0; // 0x01
        pub const KIND: ZInt = 1 << 1; // 0x02
        pub const ENCODING: ZInt = 1 << 2; // 0x04
        pub const TIMESTAMP: ZInt = 1 << 3; // 0x08
                                            // 0x10: Reserved
                                            // 0x20: Reserved
                                            // 0x40: Reserved
        pub const SRCID: ZInt = 1 << 7; // 0x80
        pub const SRCSN: ZInt = 1 << 8; // 0x100
    }
}

pub mod declaration {
    pub mod id {
        // Declarations
        pub const RESOURCE: u8 = 0x01;
        pub const PUBLISHER: u8 = 0x02;
        pub const SUBSCRIBER: u8 = 0x03;
        pub const QUERYABLE: u8 = 0x04;

        pub const FORGET_RESOURCE: u8 = 0x11;
        pub const FORGET_PUBLISHER: u8 = 0x12;
        pub const FORGET_SUBSCRIBER: u8 = 0x13;
        pub const FORGET_QUERYABLE: u8 = 0x14;

        // SubModes
        pub const MODE_PUSH: u8 = 0x00;
        pub const MODE_PULL: u8 = 0x01;
    }

    pub mod flag {
        pub const PERIOD: u8 = 0x80;
    }

    /// Name of a declaration id, `None` if the id is not a known declaration.
    pub const fn name(id: u8) -> Option<&'static str> {
        match id {
            id::RESOURCE => Some("Resource"),
            id::PUBLISHER => Some("Publisher"),
            id::SUBSCRIBER => Some("Subscriber"),
            id::QUERYABLE => Some("Queryable"),
            id::FORGET_RESOURCE => Some("ForgetResource"),
            id::FORGET_PUBLISHER => Some("ForgetPublisher"),
            id::FORGET_SUBSCRIBER => Some("ForgetSubscriber"),
            id::FORGET_QUERYABLE => Some("ForgetQueryable"),
            _ => None,
        }
    }

    pub const fn submode_to_str(mode: u8) -> Option<&'static str> {
        match mode {
            id::MODE_PUSH => Some("Push"),
            id::MODE_PULL => Some("Pull"),
            _ => None,
        }
    }
}

// Options used for LinkState
pub mod link_state {
    use crate::core::ZInt;

    pub const PID: ZInt = 1; // 0x01
    pub const WAI: ZInt = 1 << 1; // 0x02
    pub const LOC: ZInt = 1 << 2; // 0x04
}

pub const fn sample_kind_to_str(kind: ZInt) -> Option<&'static str> {
    match kind {
        0 => Some("Put"),
        1 => Some("Delete"),
        _ => None,
    }
}

pub const fn query_target_to_str(target: ZInt) -> Option<&'static str> {
    match target {
        0 => Some("BestMatching"),
        1 => Some("All"),
        2 => Some("AllComplete"),
        _ => None,
    }
}

// Only the low 2 bits of the consolidation zint carry the mode
pub const CONSOLIDATION_MASK: ZInt = 0x03;

pub const fn consolidation_to_str(mode: ZInt) -> Option<&'static str> {
    match mode {
        0 => Some("None"),
        1 => Some("Monotonic"),
        2 => Some("Latest"),
        _ => None,
    }
}
