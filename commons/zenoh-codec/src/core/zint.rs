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
use crate::{DidntDecode, LCodec, RCodec, WCodec, Zenoh060};
use zenoh_buffers::ZCursor;

/// Maximum number of octets of an encoded zint, enough for any u64.
pub const VLE_LEN: usize = 10;

// The last admissible octet only has room for the 64th bit.
const VLE_LAST_MAX: u8 = 0x01;

impl LCodec<u64> for Zenoh060 {
    fn w_len(self, x: u64) -> usize {
        if x == 0 {
            1
        } else {
            (u64::BITS - x.leading_zeros()) as usize / 7
                + usize::from((u64::BITS - x.leading_zeros()) % 7 != 0)
        }
    }
}

impl WCodec<u64, &mut Vec<u8>> for Zenoh060 {
    type Output = usize;

    fn write(self, buffer: &mut Vec<u8>, mut x: u64) -> Self::Output {
        let mut len = 1;
        while x > 0x7f {
            buffer.push((x as u8) | 0x80);
            x >>= 7;
            len += 1;
        }
        buffer.push(x as u8);
        len
    }
}

impl RCodec<u64, &mut ZCursor<'_>> for Zenoh060 {
    type Error = DidntDecode;

    fn read(self, reader: &mut ZCursor<'_>) -> Result<u64, Self::Error> {
        let offset = reader.pos();
        // Make sure there is at least one octet before starting a sequence.
        reader.peek_u8()?;

        let mut v: u64 = 0;
        for (i, b) in reader.rest().iter().take(VLE_LEN).enumerate() {
            let payload = b & 0x7f;
            if i == VLE_LEN - 1 && payload > VLE_LAST_MAX {
                return Err(DidntDecode::MalformedZInt { offset });
            }
            v |= (payload as u64) << (7 * i);
            if b & 0x80 == 0 {
                reader.skip(i + 1)?;
                return Ok(v);
            }
        }

        Err(DidntDecode::MalformedZInt { offset })
    }
}
