use hex::FromHex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::{ToETHChecksum, ToHex};

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Expected prefix `0x`")]
    BadPrefix,
    #[error("Expected length of 40 without or 42 with a `0x` prefix")]
    Length,
    #[error("Invalid hex")]
    Hex(#[from] hex::FromHexError),
}

/// A 20-byte account identity.
///
/// Used for the channel parties, the funder, the escrow (custody) identity
/// and the token ledger identity.
/// Serializes as an EIP-55 checksummed, `0x` prefixed string and deserializes
/// with or without the prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The null identity, never a valid party of a channel.
    pub const ZERO: Address = Address([0; 20]);

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Copies the bytes of a 20 bytes long slice, returns `None` for any other length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl ToETHChecksum for Address {}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex_prefixed())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Accepts 40 hex characters, optionally `0x` prefixed, in any letter case.
/// The EIP-55 checksum is not validated.
impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = match s.len() {
            42 => s.strip_prefix("0x").ok_or(Error::BadPrefix)?,
            40 => s,
            _ => return Err(Error::Length),
        };

        Ok(Self(<[u8; 20]>::from_hex(hex)?))
    }
}

impl TryFrom<&str> for Address {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let address = String::deserialize(deserializer)?;

        address.parse().map_err(de::Error::custom)
    }
}
