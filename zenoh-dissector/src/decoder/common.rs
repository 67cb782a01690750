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
//! Field groups shared by several message kinds.
use zenoh_protocol::{
    common::{imsg, zslice},
    core::{WhatAmI, WhatAmIMatcher, ZInt, ZenohId},
    zenoh::{data, sample_kind_to_str},
};

use super::FieldReader;
use crate::{DecodeError, FieldValue};

fn whatami_to_str(value: ZInt) -> Option<&'static str> {
    WhatAmI::try_from(value).map(WhatAmI::to_str)
}

fn matcher_to_str(value: ZInt) -> Option<&'static str> {
    WhatAmIMatcher::try_from(value).map(WhatAmIMatcher::to_str)
}

impl<'a> FieldReader<'a> {
    /// A zenoh id: a zint length between 1 and [`ZenohId::MAX_SIZE`], then the id bytes.
    pub(crate) fn zid(&mut self, field: &str) -> Result<&'a [u8], DecodeError> {
        let offset = self.pos();
        let len = self.read_zint()?;
        if len == 0 || len > ZenohId::MAX_SIZE as ZInt {
            return Err(DecodeError::InvalidValue {
                offset,
                field: "zid length",
                value: len,
            });
        }
        let start = self.pos();
        let id = self.read_bytes(len as usize)?;
        self.push(self.name(field), start, FieldValue::Bytes(id));
        Ok(id)
    }

    pub(crate) fn whatami(&mut self, field: &str) -> Result<ZInt, DecodeError> {
        self.labelled(field, whatami_to_str, "unknown")
    }

    pub(crate) fn whatami_matcher(&mut self, field: &str) -> Result<ZInt, DecodeError> {
        self.labelled(field, matcher_to_str, "invalid_matcher")
    }

    /// The `v_maj|v_min` octet of INIT and JOIN.
    pub(crate) fn version(&mut self) -> Result<u8, DecodeError> {
        let offset = self.pos();
        let version = self.read_u8()?;
        self.nibbles("v_maj", "v_min", offset, version);
        Ok(version)
    }

    /// A key expression: a numerical scope, followed by a suffix if the K flag is set.
    pub(crate) fn key_expr(&mut self, field: &str, has_suffix: bool) -> Result<(), DecodeError> {
        self.zint(&format!("{}_scope", field))?;
        if has_suffix {
            self.string(&format!("{}_suffix", field))?;
        }
        Ok(())
    }

    /// A zint count followed by that many locators.
    pub(crate) fn locators(&mut self, field: &str) -> Result<(), DecodeError> {
        let count = self.zint(&format!("{}_count", field))?;
        // Every locator takes at least one octet, the loop ends with the bytes
        for i in 0..count {
            self.string(&format!("{}_{}", field, i))?;
        }
        Ok(())
    }

    /// An HLC timestamp: NTP64 time, then an id of at most [`ZenohId::MAX_SIZE`] bytes.
    pub(crate) fn timestamp(&mut self, field: &str) -> Result<(), DecodeError> {
        self.zint(&format!("{}_time", field))?;
        let offset = self.pos();
        let len = self.read_zint()?;
        if len > ZenohId::MAX_SIZE as ZInt {
            return Err(DecodeError::InvalidValue {
                offset,
                field: "timestamp id length",
                value: len,
            });
        }
        let start = self.pos();
        let id = self.read_bytes(len as usize)?;
        self.push(self.name(&format!("{}_id", field)), start, FieldValue::Bytes(id));
        Ok(())
    }

    /// The properties of a payload, each one gated by a bit of the leading options zint.
    /// Returns the options.
    pub(crate) fn data_info(&mut self, field: &str) -> Result<ZInt, DecodeError> {
        use data::info::*;

        let options = self.options(&format!("{}_options", field))?;
        if imsg::has_option(options, KIND) {
            self.labelled(&format!("{}_kind", field), sample_kind_to_str, "unknown")?;
        }
        if imsg::has_option(options, ENCODING) {
            self.zint(&format!("{}_encoding_prefix", field))?;
            self.string(&format!("{}_encoding_suffix", field))?;
        }
        if imsg::has_option(options, TIMESTAMP) {
            self.timestamp(&format!("{}_timestamp", field))?;
        }
        if imsg::has_option(options, SRCID) {
            self.zid(&format!("{}_source_id", field))?;
        }
        if imsg::has_option(options, SRCSN) {
            self.zint(&format!("{}_source_sn", field))?;
        }
        Ok(options)
    }

    /// A payload: one byte array, or when `sliced` a zint count of slices, each a kind octet
    /// followed by a byte array (the data of a raw slice, the opaque info of a shm slice).
    pub(crate) fn payload(&mut self, field: &str, sliced: bool) -> Result<(), DecodeError> {
        if !sliced {
            self.bytes(field)?;
            return Ok(());
        }

        let count = self.zint(&format!("{}_slices", field))?;
        // Every slice takes at least one octet, the loop ends with the bytes
        for i in 0..count {
            let start = self.pos();
            let kind = self.read_u8()?;
            let label = zslice::kind_to_str(kind).ok_or(DecodeError::InvalidValue {
                offset: start,
                field: "slice kind",
                value: kind as ZInt,
            })?;
            self.enumerated(&format!("{}_{}_kind", field, i), start, kind as ZInt, label);
            self.bytes(&format!("{}_{}", field, i))?;
        }
        Ok(())
    }
}
