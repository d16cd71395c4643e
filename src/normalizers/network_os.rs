use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Canonical network operating system tag driving vendor dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkOs {
    Ios,
    IosXr,
    NxOs,
    Eos,
}

/// Accepted ansible_network_os aliases, fully-qualified and short forms
const NETWORK_OS_ALIASES: &[(&str, NetworkOs)] = &[
    ("cisco.ios.ios", NetworkOs::Ios),
    ("ios", NetworkOs::Ios),
    ("cisco.nxos.nxos", NetworkOs::NxOs),
    ("nxos", NetworkOs::NxOs),
    ("cisco.iosxr.iosxr", NetworkOs::IosXr),
    ("iosxr", NetworkOs::IosXr),
    ("arista.eos.eos", NetworkOs::Eos),
    ("eos", NetworkOs::Eos),
];

impl NetworkOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::IosXr => "iosxr",
            Self::NxOs => "nxos",
            Self::Eos => "eos",
        }
    }
}

impl FromStr for NetworkOs {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        NETWORK_OS_ALIASES
            .iter()
            .find(|(alias, _)| *alias == value)
            .map(|(_, os)| *os)
            .ok_or_else(|| Error::UnsupportedPlatform {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for NetworkOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NetworkOs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Normalize an ansible_network_os alias to its canonical tag
pub fn network_os_normalize(value: &str) -> Result<NetworkOs> {
    value.parse()
}
