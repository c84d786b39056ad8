#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Domain types shared across the payment channel escrow workspace.

pub use ethereum_types::U256;

pub use self::{
    adapter::Session,
    address::Address,
    channel::{Channel, ChannelKey, ChannelState},
    config::Config,
    event::Event,
};

pub mod adapter;
pub mod address;
pub mod channel;
pub mod config;
pub mod eth_checksum;
pub mod event;
pub mod util {
    pub mod logging;
}

#[cfg(feature = "test-util")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub mod test_util;

/// Checksummed (EIP-55) representation of 20-byte identities.
pub trait ToETHChecksum: AsRef<[u8]> {
    /// Returns the checksummed `0x` prefixed address
    fn to_checksum(&self) -> String {
        eth_checksum::checksum(&hex::encode(self.as_ref()))
    }
}

pub trait ToHex {
    /// Hex encoded value, without a `0x` prefix
    fn to_hex(&self) -> String;

    /// Hex encoded value, with a `0x` prefix
    fn to_hex_prefixed(&self) -> String {
        format!("0x{}", self.to_hex())
    }
}

impl<T: AsRef<[u8]>> ToHex for T {
    fn to_hex(&self) -> String {
        hex::encode(self.as_ref())
    }
}
