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

//! ⚠️ WARNING ⚠️
//!
//! This crate is intended for the dissector's internal use.
//!
//! Bounds-checked, forward-only reading over a captured frame.
mod cursor;

pub use cursor::ZCursor;

pub mod reader {
    use core::fmt;

    /// A read that would have gone past the end of the readable window.
    ///
    /// A failed read never consumes anything: the reader position is the one it had
    /// before the call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DidntRead {
        /// Absolute offset at which the read was attempted.
        pub offset: usize,
        /// Number of bytes the read needed.
        pub wanted: usize,
        /// Number of bytes that were left.
        pub available: usize,
    }

    impl fmt::Display for DidntRead {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "out of bounds: wanted {} byte(s) at offset {} but only {} left",
                self.wanted, self.offset, self.available
            )
        }
    }

    impl std::error::Error for DidntRead {}

    pub trait Reader {
        fn read_u8(&mut self) -> Result<u8, DidntRead>;
        fn read_exact(&mut self, into: &mut [u8]) -> Result<(), DidntRead>;
        fn remaining(&self) -> usize;

        fn can_read(&self) -> bool {
            self.remaining() != 0
        }
    }

    pub trait HasReader {
        type Reader: Reader;

        /// Returns the most appropriate reader for `self`
        fn reader(self) -> Self::Reader;
    }
}
