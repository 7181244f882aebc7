use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A program address on one side of a diff.
///
/// Displays as zero-padded upper-case hex: 8 digits when the value fits in 32 bits, 16 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub u64);

impl Address {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    pub fn to_hex_string(self) -> String {
        if self.0 <= u64::from(u32::MAX) {
            format!("{:08X}", self.0)
        } else {
            format!("{:016X}", self.0)
        }
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid address literal: {literal:?}")]
pub struct ParseAddressError {
    pub literal: String,
}

impl FromStr for Address {
    type Err = ParseAddressError;

    /// Accepts decimal (`4096`) or `0x`-prefixed hex (`0x1000`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let parsed = match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => t.parse::<u64>(),
        };
        parsed.map(Address).map_err(|_| ParseAddressError {
            literal: s.to_string(),
        })
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(u64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(Address(v)),
            Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
