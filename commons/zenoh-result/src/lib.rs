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
//! Application-level errors (configuration loading, command line input). Wire-level decoding
//! errors are plain `Copy` types living next to the code that raises them.
use std::fmt;

use anyhow::Error as AnyError;

// +-------+
// | ERROR |
// +-------+

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

// +---------+
// | ZRESULT |
// +---------+

pub type ZResult<T> = core::result::Result<T, Error>;

// +--------+
// | ZERROR |
// +--------+

pub struct ZError {
    error: AnyError,
    file: &'static str,
    line: u32,
    source: Option<Error>,
}

impl ZError {
    pub fn new<E: Into<AnyError>>(error: E, file: &'static str, line: u32) -> ZError {
        ZError {
            error: error.into(),
            file,
            line,
            source: None,
        }
    }

    pub fn set_source<S: Into<Error>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Location of the `zerror!` invocation that built this error.
    pub fn location(&self) -> (&'static str, u32) {
        (self.file, self.line)
    }
}

impl std::error::Error for ZError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl fmt::Debug for ZError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for ZError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}.", self.error, self.file, self.line)?;
        if let Some(s) = &self.source {
            write!(f, " - Caused by {}", *s)?;
        }
        Ok(())
    }
}

// +--------+
// | MACROS |
// +--------+

pub use anyhow::anyhow;

#[macro_export]
macro_rules! zerror {
    ($source: expr => $($t: tt)*) => {
        $crate::ZError::new($crate::anyhow!($($t)*), file!(), line!()).set_source($source)
    };
    ($t: literal) => {
        $crate::ZError::new($crate::anyhow!($t), file!(), line!())
    };
    ($t: expr) => {
        $crate::ZError::new($t, file!(), line!())
    };
    ($($t: tt)*) => {
        $crate::ZError::new($crate::anyhow!($($t)*), file!(), line!())
    };
}

// This macro is a shorthand for the creation of a ZError
#[macro_export]
macro_rules! bail {
    ($($t: tt)*) => {
        return Err($crate::zerror!($($t)*).into())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ZResult<u16> {
        match s.parse::<u16>() {
            Ok(v) => Ok(v),
            Err(e) => bail!(e => "'{}' is not a valid batch length", s),
        }
    }

    #[test]
    fn zerror_carries_location_and_source() {
        let err = parse("70000").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("'70000' is not a valid batch length"));
        assert!(text.contains("Caused by"));
        assert!(std::error::Error::source(err.as_ref()).is_some());

        let e = zerror!("plain");
        assert_eq!(e.location().0, file!());
    }

    #[test]
    fn zresult_ok_passes_through() {
        assert_eq!(parse("12").unwrap(), 12);
    }
}
