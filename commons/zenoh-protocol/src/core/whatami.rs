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
use super::{NonZeroZInt, ZInt};
use core::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhatAmI {
    Router = 1,
    Peer = 1 << 1,
    Client = 1 << 2,
}

impl WhatAmI {
    pub const fn to_str(self) -> &'static str {
        match self {
            WhatAmI::Router => "router",
            WhatAmI::Peer => "peer",
            WhatAmI::Client => "client",
        }
    }

    pub const fn try_from(value: ZInt) -> Option<Self> {
        const CLIENT: ZInt = WhatAmI::Client as ZInt;
        const ROUTER: ZInt = WhatAmI::Router as ZInt;
        const PEER: ZInt = WhatAmI::Peer as ZInt;
        match value {
            CLIENT => Some(WhatAmI::Client),
            ROUTER => Some(WhatAmI::Router),
            PEER => Some(WhatAmI::Peer),
            _ => None,
        }
    }
}

impl fmt::Display for WhatAmI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl serde::Serialize for WhatAmI {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_str())
    }
}

impl From<WhatAmI> for ZInt {
    fn from(w: WhatAmI) -> Self {
        w as ZInt
    }
}

/// A non-empty set of [`WhatAmI`], as carried by SCOUT.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WhatAmIMatcher(pub NonZeroZInt);

impl WhatAmIMatcher {
    pub fn try_from<T: TryInto<ZInt>>(i: T) -> Option<Self> {
        let i = i.try_into().ok()?;
        if i < 8 {
            NonZeroZInt::new(i).map(WhatAmIMatcher)
        } else {
            None
        }
    }

    pub fn matches(self, w: WhatAmI) -> bool {
        (self.0.get() & w as ZInt) != 0
    }

    pub fn to_str(self) -> &'static str {
        match self.0.get() {
            2 => "peer",
            4 => "client",
            1 => "router",
            3 => "router|peer",
            6 => "client|peer",
            5 => "client|router",
            7 => "client|router|peer",
            _ => "invalid_matcher",
        }
    }
}

impl fmt::Display for WhatAmIMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl serde::Serialize for WhatAmIMatcher {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_str())
    }
}
