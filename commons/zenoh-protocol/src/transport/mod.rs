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
//! Transport messages: session establishment, liveliness and framing.
use crate::common::imsg;

// Transport message IDs -- Re-export of some of the Inner Message IDs
pub mod id {
    use super::imsg;

    // Messages
    pub const SCOUT: u8 = imsg::id::SCOUT;
    pub const HELLO: u8 = imsg::id::HELLO;
    pub const INIT: u8 = imsg::id::INIT;
    pub const OPEN: u8 = imsg::id::OPEN;
    pub const CLOSE: u8 = imsg::id::CLOSE;
    pub const SYNC: u8 = imsg::id::SYNC;
    pub const ACK_NACK: u8 = imsg::id::ACK_NACK;
    pub const KEEP_ALIVE: u8 = imsg::id::KEEP_ALIVE;
    pub const PING_PONG: u8 = imsg::id::PING_PONG;
    pub const FRAME: u8 = imsg::id::FRAME;
    pub const JOIN: u8 = imsg::id::JOIN;

    // Message decorators
    pub const PRIORITY: u8 = imsg::id::PRIORITY;
    pub const ATTACHMENT: u8 = imsg::id::ATTACHMENT;
}

// Transport message flags
pub mod flag {
    pub const A: u8 = 1 << 5; // 0x20 Ack           if A==1 then the message is an acknowledgment
    pub const C: u8 = 1 << 6; // 0x40 Count         if C==1 then number of unacknowledged messages is present
    pub const E: u8 = 1 << 7; // 0x80 End           if E==1 then it is the last FRAME fragment
    pub const F: u8 = 1 << 6; // 0x40 Fragment      if F==1 then the FRAME is a fragment
    pub const I: u8 = 1 << 5; // 0x20 PeerID        if I==1 then the PeerID is requested or present
    pub const K: u8 = 1 << 6; // 0x40 CloseLink     if K==1 then close the transport link only
    pub const L: u8 = 1 << 7; // 0x80 Locators      if L==1 then Locators are present
    pub const M: u8 = 1 << 5; // 0x20 Mask          if M==1 then a Mask is present
    pub const O: u8 = 1 << 7; // 0x80 Options       if O==1 then Options are present
    pub const P: u8 = 1 << 5; // 0x20 PingOrPong    if P==1 then the message is Ping, otherwise is Pong
    pub const R: u8 = 1 << 5; // 0x20 Reliable      if R==1 then it concerns the reliable channel, best-effort otherwise
    pub const S: u8 = 1 << 6; // 0x40 SN Resolution if S==1 then the SN Resolution is present
    pub const T1: u8 = 1 << 5; // 0x20 TimeRes      if T==1 then the JOIN lease is in seconds
    pub const T2: u8 = 1 << 6; // 0x40 TimeRes      if T==1 then the OPEN lease is in seconds
    pub const W: u8 = 1 << 6; // 0x40 WhatAmI       if W==1 then WhatAmI is indicated
    pub const Z: u8 = 1 << 5; // 0x20 MixedSlices   if Z==1 then the payload contains a mix of raw and shm_info payload
}

pub mod init_options {
    use crate::core::ZInt;

    pub const QOS: ZInt = 1 << 0; // 0x01 QoS       if QOS==1 then the transport supports QoS
}

pub mod join_options {
    use crate::core::ZInt;

    pub const QOS: ZInt = 1 << 0; // 0x01 QoS       if QOS==1 then the JOIN carries one sn pair per priority
}

// Reason for the Close message
pub mod close_reason {
    pub const GENERIC: u8 = 0x00;
    pub const UNSUPPORTED: u8 = 0x01;
    pub const INVALID: u8 = 0x02;
    pub const MAX_SESSIONS: u8 = 0x03;
    pub const MAX_LINKS: u8 = 0x04;
    pub const EXPIRED: u8 = 0x05;
}

pub const fn close_reason_to_str(reason: u8) -> &'static str {
    match reason {
        close_reason::GENERIC => "GENERIC",
        close_reason::UNSUPPORTED => "UNSUPPORTED",
        close_reason::INVALID => "INVALID",
        close_reason::MAX_SESSIONS => "MAX_SESSIONS",
        close_reason::MAX_LINKS => "MAX_LINKS",
        close_reason::EXPIRED => "EXPIRED",
        _ => "UNKNOWN",
    }
}

/// Size in bytes of the length prefix of a batch on stream-oriented links.
pub const BATCH_LEN_SIZE: usize = 2;
