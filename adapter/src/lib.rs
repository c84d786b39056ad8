#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Adapters for the payment channel escrow.
//!
//! - [`Ethereum`] - claim signing & verification, authentication tokens
//! - [`Dummy`] - static authentication tokens for development & testing
//! - [`TokenLedger`] - the collateral custodian seam and the in-memory [`DummyLedger`]

pub use self::{
    dummy::{ledger::DummyLedger, Dummy},
    error::{Error, Kind},
    ethereum::{
        claim::{ClaimAuthorizer, ClaimSignature},
        Ethereum,
    },
    ledger::{LedgerError, TokenLedger, Transfer},
};

pub mod prelude {
    pub use crate::client::{Locked, Unlockable, Unlocked};
}

mod client;
pub mod dummy;
mod error;
pub mod ethereum;
pub mod ledger;
