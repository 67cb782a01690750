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
mod whatami;

pub use whatami::*;

use core::fmt;

/// The unsigned integer type carried by a zint.
pub type ZInt = u64;
pub type NonZeroZInt = core::num::NonZeroU64;

/// Identifiers of a zenoh instance.
pub struct ZenohId;

impl ZenohId {
    /// Maximum size in bytes of a zenoh id, as well as of the id of an HLC timestamp.
    pub const MAX_SIZE: usize = 16;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Priority {
    Control = 0,
    RealTime = 1,
    InteractiveHigh = 2,
    InteractiveLow = 3,
    DataHigh = 4,
    #[default]
    Data = 5,
    DataLow = 6,
    Background = 7,
}

impl Priority {
    /// The lowest Priority
    pub const MIN: Self = Self::Background;
    /// The highest Priority
    pub const MAX: Self = Self::Control;
    /// The number of available priorities
    pub const NUM: usize = 1 + Self::MIN as usize - Self::MAX as usize;

    pub const fn to_str(self) -> &'static str {
        match self {
            Priority::Control => "Control",
            Priority::RealTime => "RealTime",
            Priority::InteractiveHigh => "InteractiveHigh",
            Priority::InteractiveLow => "InteractiveLow",
            Priority::DataHigh => "DataHigh",
            Priority::Data => "Data",
            Priority::DataLow => "DataLow",
            Priority::Background => "Background",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = zenoh_result::Error;

    fn try_from(conduit: u8) -> Result<Self, Self::Error> {
        match conduit {
            0 => Ok(Priority::Control),
            1 => Ok(Priority::RealTime),
            2 => Ok(Priority::InteractiveHigh),
            3 => Ok(Priority::InteractiveLow),
            4 => Ok(Priority::DataHigh),
            5 => Ok(Priority::Data),
            6 => Ok(Priority::DataLow),
            7 => Ok(Priority::Background),
            unknown => zenoh_result::bail!(
                "{} is not a valid priority value. Admitted values are: [{}-{}].",
                unknown,
                Self::MAX as u8,
                Self::MIN as u8
            ),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl serde::Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_range() {
        assert_eq!(Priority::NUM, 8);
        for p in 0..Priority::NUM as u8 {
            let priority = Priority::try_from(p).unwrap();
            assert_eq!(priority as u8, p);
        }
        let err = Priority::try_from(8).unwrap_err();
        assert!(err.to_string().contains("8 is not a valid priority value"));
    }
}
