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
pub(crate) mod zint;

use crate::{DidntDecode, LCodec, RCodec, WCodec, Zenoh060};
use zenoh_buffers::{
    reader::{DidntRead, Reader},
    ZCursor,
};

// u8
impl WCodec<u8, &mut Vec<u8>> for Zenoh060 {
    type Output = usize;

    fn write(self, buffer: &mut Vec<u8>, x: u8) -> Self::Output {
        buffer.push(x);
        1
    }
}

impl RCodec<u8, &mut ZCursor<'_>> for Zenoh060 {
    type Error = DidntRead;

    fn read(self, reader: &mut ZCursor<'_>) -> Result<u8, Self::Error> {
        reader.read_u8()
    }
}

// &[u8], length-prefixed
impl LCodec<&[u8]> for Zenoh060 {
    fn w_len(self, x: &[u8]) -> usize {
        self.w_len(x.len() as u64) + x.len()
    }
}

impl WCodec<&[u8], &mut Vec<u8>> for Zenoh060 {
    type Output = usize;

    fn write(self, buffer: &mut Vec<u8>, x: &[u8]) -> Self::Output {
        let n = self.write(&mut *buffer, x.len() as u64);
        buffer.extend_from_slice(x);
        n + x.len()
    }
}

impl<'a> RCodec<&'a [u8], &mut ZCursor<'a>> for Zenoh060 {
    type Error = DidntDecode;

    fn read(self, reader: &mut ZCursor<'a>) -> Result<&'a [u8], Self::Error> {
        let mut probe = *reader;
        let len: u64 = self.read(&mut probe)?;
        let len = usize::try_from(len).map_err(|_| DidntRead {
            offset: probe.pos(),
            wanted: usize::MAX,
            available: probe.remaining(),
        })?;
        let bytes = probe.read_bytes(len)?;
        *reader = probe;
        Ok(bytes)
    }
}

// &str, length-prefixed
impl WCodec<&str, &mut Vec<u8>> for Zenoh060 {
    type Output = usize;

    fn write(self, buffer: &mut Vec<u8>, x: &str) -> Self::Output {
        self.write(buffer, x.as_bytes())
    }
}
