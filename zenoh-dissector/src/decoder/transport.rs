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
use zenoh_protocol::{
    common::imsg,
    core::Priority,
    transport::{close_reason_to_str, flag, init_options, join_options},
    MessageHeader,
};

use super::FieldReader;
use crate::DecodeError;

/// # Join message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |O|S|T|  JOIN   |
/// +-+-+-+-+-------+
/// ~             |Q~ if O==1
/// +---------------+
/// | v_maj | v_min |
/// +---------------+
/// ~    whatami    ~
/// +---------------+
/// ~    peer_id    ~
/// +---------------+
/// ~     lease     ~ in seconds if T==1, milliseconds otherwise
/// +---------------+
/// ~ sn_resolution ~ if S==1
/// +---------------+
/// ~   next_sns    ~ one reliable/best-effort pair per priority if Q==1, one pair otherwise
/// +---------------+
/// ```
pub(crate) fn join(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    let options = if header.has_flag(flag::O) {
        r.options("options")?
    } else {
        0
    };
    r.version()?;
    r.whatami("whatami")?;
    r.zid("peerid")?;
    r.zint("lease")?;
    if header.has_flag(flag::S) {
        r.zint("sn_resolution")?;
    }
    if imsg::has_option(options, join_options::QOS) {
        for p in 0..Priority::NUM {
            r.zint(&format!("next_sn_{}_reliable", p))?;
            r.zint(&format!("next_sn_{}_best_effort", p))?;
        }
    } else {
        r.zint("next_sn_reliable")?;
        r.zint("next_sn_best_effort")?;
    }
    Ok(())
}

/// # Scout message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|W|I|  SCOUT  |
/// +-+-+-+-+-------+
/// ~      what     ~ if W==1, otherwise implicitly scouting for routers
/// +---------------+
/// ```
pub(crate) fn scout(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    if header.has_flag(flag::W) {
        r.whatami_matcher("what")?;
    }
    Ok(())
}

/// # Hello message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |L|W|I|  HELLO  |
/// +-+-+-+-+-------+
/// ~    peer-id    ~ if I==1
/// +---------------+
/// ~    whatami    ~ if W==1, otherwise implicitly a router
/// +---------------+
/// ~    Locators   ~ if L==1
/// +---------------+
/// ```
pub(crate) fn hello(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    if header.has_flag(flag::I) {
        r.zid("peerid")?;
    }
    if header.has_flag(flag::W) {
        r.whatami("whatami")?;
    }
    if header.has_flag(flag::L) {
        r.locators("locator")?;
    }
    Ok(())
}

/// # Init message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |O|S|A|   INIT  |
/// +-+-+-+-+-------+
/// ~             |Q~ if O==1
/// +---------------+
/// | v_maj | v_min | if A==0
/// +---------------+
/// ~    whatami    ~
/// +---------------+
/// ~    peer_id    ~
/// +---------------+
/// ~ sn_resolution ~ if S==1
/// +---------------+
/// ~     cookie    ~ if A==1
/// +---------------+
/// ```
pub(crate) fn init(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    let is_ack = header.has_flag(flag::A);
    if header.has_flag(flag::O) {
        let options = r.options("options")?;
        tracing::trace!(
            "Init with options 0x{:x}, QoS: {}",
            options,
            imsg::has_option(options, init_options::QOS)
        );
    }
    if !is_ack {
        r.version()?;
    }
    r.whatami("whatami")?;
    r.zid("peerid")?;
    if header.has_flag(flag::S) {
        r.zint("sn_resolution")?;
    }
    if is_ack {
        r.bytes("cookie")?;
    }
    Ok(())
}

/// # Open message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|T|A|   OPEN  |
/// +-+-+-+-+-------+
/// ~ lease_period  ~ in seconds if T==1, milliseconds otherwise
/// +---------------+
/// ~  initial_sn   ~
/// +---------------+
/// ~    cookie     ~ if A==0
/// +---------------+
/// ```
pub(crate) fn open(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.zint("lease")?;
    r.zint("initial_sn")?;
    if !header.has_flag(flag::A) {
        r.bytes("cookie")?;
    }
    Ok(())
}

/// # Close message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|K|I|  CLOSE  |
/// +-+-+-+-+-------+
/// ~    peer_id    ~  if I==1
/// +---------------+
/// |     reason    |
/// +---------------+
/// ```
pub(crate) fn close(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    if header.has_flag(flag::I) {
        r.zid("peerid")?;
    }
    let offset = r.pos();
    let reason = r.read_u8()?;
    r.enumerated("reason", offset, reason as u64, close_reason_to_str(reason));
    Ok(())
}

/// # Sync message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|C|R|  SYNC   |
/// +-+-+-+-+-------+
/// ~      sn       ~
/// +---------------+
/// ~     count     ~ if C==1
/// +---------------+
/// ```
pub(crate) fn sync(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.zint("sn")?;
    if header.has_flag(flag::C) {
        r.zint("count")?;
    }
    Ok(())
}

/// # AckNack message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|M| ACKNACK |
/// +-+-+-+-+-------+
/// ~     sn        ~
/// +---------------+
/// ~     mask      ~ if M==1
/// +---------------+
/// ```
pub(crate) fn ack_nack(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.zint("sn")?;
    if header.has_flag(flag::M) {
        r.zint("mask")?;
    }
    Ok(())
}

/// # KeepAlive message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|I| K_ALIVE |
/// +-+-+-+-+-------+
/// ~    peer_id    ~ if I==1
/// +---------------+
/// ```
pub(crate) fn keep_alive(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    if header.has_flag(flag::I) {
        r.zid("peerid")?;
    }
    Ok(())
}

/// # PingPong message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|P|  P_PONG |
/// +-+-+-+-+-------+
/// ~     hash      ~
/// +---------------+
/// ```
pub(crate) fn ping_pong(r: &mut FieldReader<'_>, _header: MessageHeader) -> Result<(), DecodeError> {
    r.zint("hash")?;
    Ok(())
}

/// # Frame message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |E|F|R|  FRAME  |
/// +-+-+-+-+-------+
/// ~      SN       ~
/// +---------------+
/// ~  FramePayload ~ a fragment if F==1, zenoh messages otherwise
/// +---------------+
/// ```
///
/// A fragment extends to the end of the batch. Zenoh messages are left in the reader and are
/// reported as layers of their own.
pub(crate) fn frame(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.zint("sn")?;
    if header.has_flag(flag::F) {
        r.rest("fragment");
    }
    Ok(())
}
