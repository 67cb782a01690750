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
    core::ZInt,
    zenoh::{
        consolidation_to_str, data, declaration, flag, link_state, query_target_to_str,
        CONSOLIDATION_MASK,
    },
    MessageHeader,
};

use super::FieldReader;
use crate::{DecodeError, FieldValue};

/// # Declare message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|X| DECLARE |
/// +-+-+-+-+-------+
/// ~  Num of Decl  ~
/// +---------------+
/// ~ [Declaration] ~
/// +---------------+
/// ```
pub(crate) fn declare(r: &mut FieldReader<'_>, _header: MessageHeader) -> Result<(), DecodeError> {
    let count = r.zint("count")?;
    for i in 0..count {
        declaration(r, i)?;
    }
    Ok(())
}

/// One declaration, introduced by its own header octet.
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |K|X|X| RESOURCE|  expr_id, key
/// |K|X|X|  PUB    |  key
/// |K|S|R|  SUB    |  key, sub_mode if S==1
/// |K|Q|X|  QABLE  |  key, complete + distance if Q==1
/// |X|X|X| F_RES   |  expr_id
/// |K|X|X| F_PUB   |  key
/// |K|X|X| F_SUB   |  key
/// |K|X|X| F_QABLE |  key
/// +---------------+
/// ```
fn declaration(r: &mut FieldReader<'_>, i: ZInt) -> Result<(), DecodeError> {
    use declaration::id::*;

    let offset = r.pos();
    let header = MessageHeader(r.read_u8()?);
    let id = header.id();
    let name = declaration::name(id).ok_or(DecodeError::InvalidValue {
        offset,
        field: "declaration id",
        value: id as ZInt,
    })?;
    r.bits(
        &format!("{}_id", i),
        offset,
        FieldValue::Enum {
            value: id as ZInt,
            label: name,
        },
    );
    r.bits(
        &format!("{}_flags", i),
        offset,
        FieldValue::Flags(header.flags() as ZInt),
    );

    let key = format!("{}_key", i);
    let has_suffix = header.has_flag(flag::K);
    match id {
        RESOURCE => {
            r.zint(&format!("{}_expr_id", i))?;
            r.key_expr(&key, has_suffix)?;
        }
        FORGET_RESOURCE => {
            r.zint(&format!("{}_expr_id", i))?;
        }
        SUBSCRIBER => {
            r.key_expr(&key, has_suffix)?;
            if header.has_flag(flag::S) {
                submode(r, &format!("{}_submode", i))?;
            }
        }
        QUERYABLE => {
            r.key_expr(&key, has_suffix)?;
            if header.has_flag(flag::Q) {
                r.zint(&format!("{}_complete", i))?;
                r.zint(&format!("{}_distance", i))?;
            }
        }
        // PUBLISHER, FORGET_PUBLISHER, FORGET_SUBSCRIBER, FORGET_QUERYABLE
        _ => r.key_expr(&key, has_suffix)?,
    }
    Ok(())
}

// Periodic subscriptions are not part of the wire format anymore: a period is rejected.
fn submode(r: &mut FieldReader<'_>, field: &str) -> Result<(), DecodeError> {
    use declaration::flag::PERIOD;

    let offset = r.pos();
    let mode = r.read_u8()?;
    let label = declaration::submode_to_str(mode & !PERIOD)
        .filter(|_| !imsg::has_flag(mode, PERIOD))
        .ok_or(DecodeError::InvalidValue {
            offset,
            field: "submode",
            value: mode as ZInt,
        })?;
    r.enumerated(field, offset, mode as ZInt, label);
    Ok(())
}

/// # Data message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |K|I|D|  DATA   |
/// +-+-+-+-+-------+
/// ~    KeyExpr     ~ if K==1 then key_expr has suffix
/// +---------------+
/// ~    DataInfo   ~ if I==1
/// +---------------+
/// ~    Payload    ~ sliced if DataInfo has the SLICED option
/// +---------------+
/// ```
pub(crate) fn data(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.key_expr("key", header.has_flag(flag::K))?;
    let mut sliced = false;
    if header.has_flag(flag::I) {
        let options = r.data_info("info")?;
        sliced = imsg::has_option(options, data::info::SLICED);
    }
    r.payload("payload", sliced)
}

/// # Query message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |K|B|T|  QUERY  |
/// +-+-+-+-+-------+
/// ~    KeyExpr     ~ if K==1 then key_expr has suffix
/// +---------------+
/// ~selector_params~
/// +---------------+
/// ~      qid      ~
/// +---------------+
/// ~     target    ~ if T==1
/// +---------------+
/// ~ consolidation ~
/// +---------------+
/// ~   QueryBody   ~ if B==1: DataInfo, then Payload
/// +---------------+
/// ```
pub(crate) fn query(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.key_expr("key", header.has_flag(flag::K))?;
    r.string("parameters")?;
    r.zint("qid")?;
    if header.has_flag(flag::T) {
        r.strict("target", query_target_to_str)?;
    }
    consolidation(r)?;
    if header.has_flag(flag::B) {
        let options = r.data_info("info")?;
        r.payload("payload", imsg::has_option(options, data::info::SLICED))?;
    }
    Ok(())
}

fn consolidation(r: &mut FieldReader<'_>) -> Result<(), DecodeError> {
    let offset = r.pos();
    let value = r.read_zint()?;
    let label = consolidation_to_str(value & CONSOLIDATION_MASK).ok_or(
        DecodeError::InvalidValue {
            offset,
            field: "consolidation",
            value,
        },
    )?;
    r.enumerated("consolidation", offset, value, label);
    Ok(())
}

/// # Pull message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |K|N|F|  PULL   |
/// +-+-+-+-+-------+
/// ~    KeyExpr     ~ if K==1 then key_expr has suffix
/// +---------------+
/// ~    pullid     ~
/// +---------------+
/// ~  max_samples  ~ if N==1
/// +---------------+
/// ```
pub(crate) fn pull(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.key_expr("key", header.has_flag(flag::K))?;
    r.zint("id")?;
    if header.has_flag(flag::N) {
        r.zint("max_samples")?;
    }
    Ok(())
}

/// # Unit message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|D|  UNIT   |
/// +-+-+-+-+-------+
/// ```
pub(crate) fn unit(_r: &mut FieldReader<'_>, _header: MessageHeader) -> Result<(), DecodeError> {
    Ok(())
}

/// # LinkStateList message
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|X|  L_ST_L |
/// +-+-+-+-+-------+
/// ~ [LinkState]   ~
/// +---------------+
///
/// LinkState:
/// +-+-+-+-+-+-+-+-+
/// ~     options   ~
/// +---------------+
/// ~      psid     ~
/// +---------------+
/// ~      sn       ~
/// +---------------+
/// ~      zid      ~ if options & PID
/// +---------------+
/// ~    whatami    ~ if options & WAI
/// +---------------+
/// ~   [locators]  ~ if options & LOC
/// +---------------+
/// ~    [links]    ~
/// +---------------+
/// ```
pub(crate) fn link_state_list(
    r: &mut FieldReader<'_>,
    _header: MessageHeader,
) -> Result<(), DecodeError> {
    let count = r.zint("count")?;
    for i in 0..count {
        let options = r.options(&format!("{}_options", i))?;
        r.zint(&format!("{}_psid", i))?;
        r.zint(&format!("{}_sn", i))?;
        if imsg::has_option(options, link_state::PID) {
            r.zid(&format!("{}_peerid", i))?;
        }
        if imsg::has_option(options, link_state::WAI) {
            r.whatami(&format!("{}_whatami", i))?;
        }
        if imsg::has_option(options, link_state::LOC) {
            r.locators(&format!("{}_locator", i))?;
        }
        let links = r.zint(&format!("{}_link_count", i))?;
        for j in 0..links {
            r.zint(&format!("{}_link_{}", i, j))?;
        }
    }
    Ok(())
}
