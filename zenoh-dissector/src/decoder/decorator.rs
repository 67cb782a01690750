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
//! Decorators prefix the message they apply to and are reported as layers of their own.
use zenoh_protocol::{
    common::imsg,
    core::{Priority, ZInt},
    transport, zenoh, MessageHeader,
};

use super::FieldReader;
use crate::{DecodeError, FieldValue};

/// # Priority decorator
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |  ID |  PRIO   |
/// +-+-+-+-+-------+
/// ```
///
/// The three flag bits hold the priority, so every value is valid.
pub(crate) fn priority(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    let offset = r.pos() - 1;
    let value = header.flags() >> imsg::HEADER_BITS;
    let label = Priority::try_from(value).map_or("unknown", Priority::to_str);
    r.bits(
        "value",
        offset,
        FieldValue::Enum {
            value: value as ZInt,
            label,
        },
    );
    Ok(())
}

/// # RoutingContext decorator
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|X| RT_CTX  |
/// +-+-+-+-+-------+
/// ~      tid      ~
/// +---------------+
/// ```
pub(crate) fn routing_context(
    r: &mut FieldReader<'_>,
    _header: MessageHeader,
) -> Result<(), DecodeError> {
    r.zint("tree_id")?;
    Ok(())
}

/// # ReplyContext decorator
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|F|  R_CTX  |
/// +-+-+-+-+-------+
/// ~      qid      ~
/// +---------------+
/// ~  replier_id   ~ if F==0
/// +---------------+
/// ```
pub(crate) fn reply_context(
    r: &mut FieldReader<'_>,
    header: MessageHeader,
) -> Result<(), DecodeError> {
    r.zint("qid")?;
    if !header.has_flag(zenoh::flag::F) {
        r.zid("replier_id")?;
    }
    Ok(())
}

/// # Attachment decorator
///
/// ```text
///  7 6 5 4 3 2 1 0
/// +-+-+-+-+-+-+-+-+
/// |X|X|Z|  ATTCH  |
/// +-+-+-+-+-------+
/// ~    Buffer     ~ sliced if Z==1
/// +---------------+
/// ```
pub(crate) fn attachment(r: &mut FieldReader<'_>, header: MessageHeader) -> Result<(), DecodeError> {
    r.payload("buffer", header.has_flag(transport::flag::Z))
}
