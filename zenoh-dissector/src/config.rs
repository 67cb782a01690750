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
use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use zenoh_result::{bail, zerror, ZError, ZResult};

/// Maximum number of layers produced for a single frame, unless configured otherwise.
pub const DEFAULT_MAX_MESSAGES: usize = 4096;

/// How messages are laid out in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// Messages are concatenated, as on datagram links.
    #[default]
    Datagram,
    /// Messages are grouped in batches, each preceded by its length on 2 little-endian octets,
    /// as on stream links.
    Stream,
}

impl Framing {
    pub const fn to_str(self) -> &'static str {
        match self {
            Framing::Datagram => "datagram",
            Framing::Stream => "stream",
        }
    }
}

impl FromStr for Framing {
    type Err = ZError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "datagram" => Ok(Framing::Datagram),
            "stream" => Ok(Framing::Stream),
            _ => Err(zerror!(
                "{} is not a valid framing. Valid values are: [\"datagram\", \"stream\"].",
                s
            )),
        }
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Settings of a [`Dissector`](crate::Dissector).
///
/// Loadable from a JSON5 file, every key being optional:
///
/// ```json5
/// {
///   framing: "stream",
///   max_messages: 256,
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DissectorConfig {
    pub framing: Framing,
    pub max_messages: usize,
}

impl Default for DissectorConfig {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}

impl DissectorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ZResult<Self> {
        let path = path.as_ref();
        Self::_from_file(path)
    }

    fn _from_file(path: &Path) -> ZResult<DissectorConfig> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => bail!(e => "Couldn't open file {}", path.display()),
        };
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") | Some("json5") => Self::from_json5(&content),
            Some(other) => bail!(
                "Unsupported file type '.{}' (.json and .json5 are supported)",
                other
            ),
            None => bail!(
                "Unsupported file type. Configuration files must have an extension (.json and .json5 supported)"
            ),
        }
    }

    pub fn from_json5(content: &str) -> ZResult<Self> {
        let config: DissectorConfig = match json5::from_str(content) {
            Ok(c) => c,
            Err(e) => bail!("JSON5 parsing error {}", e),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ZResult<()> {
        if self.max_messages == 0 {
            bail!("Invalid configuration: max_messages must be at least 1");
        }
        Ok(())
    }
}

impl fmt::Display for DissectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "framing: {}, max_messages: {}",
            self.framing, self.max_messages
        )
    }
}
