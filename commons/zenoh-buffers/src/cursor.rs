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
use crate::reader::{DidntRead, HasReader, Reader};

/// A forward-only reader over a borrowed byte buffer.
///
/// Offsets returned by [`ZCursor::pos`] are absolute in the buffer the cursor was
/// created from, including for windows obtained with [`ZCursor::split_to`], so the
/// provenance of every byte read can be reported against the original frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> ZCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            end: buf.len(),
        }
    }

    /// Absolute offset of the next byte to be read.
    #[inline(always)]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Absolute offset one past the last readable byte.
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The whole underlying buffer, regardless of the readable window.
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    #[inline(always)]
    fn check(&self, wanted: usize) -> Result<(), DidntRead> {
        let available = self.end - self.pos;
        if wanted > available {
            return Err(DidntRead {
                offset: self.pos,
                wanted,
                available,
            });
        }
        Ok(())
    }

    pub fn peek_u8(&self) -> Result<u8, DidntRead> {
        self.check(1)?;
        Ok(self.buf[self.pos])
    }

    /// Returns the next `len` bytes without consuming them.
    pub fn peek(&self, len: usize) -> Result<&'a [u8], DidntRead> {
        self.check(len)?;
        Ok(&self.buf[self.pos..self.pos + len])
    }

    /// Consumes and returns the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DidntRead> {
        let bytes = self.peek(len)?;
        self.pos += len;
        Ok(bytes)
    }

    /// Moves forward by `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<(), DidntRead> {
        self.check(len)?;
        self.pos += len;
        Ok(())
    }

    /// The readable bytes, without consuming them.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..self.end]
    }

    /// Consumes every readable byte.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.rest();
        self.pos = self.end;
        rest
    }

    /// Consumes `len` bytes and returns a cursor whose window is exactly those bytes.
    pub fn split_to(&mut self, len: usize) -> Result<ZCursor<'a>, DidntRead> {
        self.check(len)?;
        let window = ZCursor {
            buf: self.buf,
            pos: self.pos,
            end: self.pos + len,
        };
        self.pos += len;
        Ok(window)
    }
}

impl Reader for ZCursor<'_> {
    fn read_u8(&mut self) -> Result<u8, DidntRead> {
        let b = self.peek_u8()?;
        self.pos += 1;
        Ok(b)
    }

    fn read_exact(&mut self, into: &mut [u8]) -> Result<(), DidntRead> {
        let bytes = self.read_bytes(into.len())?;
        into.copy_from_slice(bytes);
        Ok(())
    }

    #[inline(always)]
    fn remaining(&self) -> usize {
        self.end - self.pos
    }
}

impl<'a> HasReader for &'a [u8] {
    type Reader = ZCursor<'a>;

    fn reader(self) -> Self::Reader {
        ZCursor::new(self)
    }
}
