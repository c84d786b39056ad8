#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! The escrow of unidirectional payment channels.
//!
//! A funder deposits tokens for a `(sender, recipient)` pair, the sender pays the recipient
//! off-chain by signing ever increasing amounts and the channel is settled either:
//!
//! - cooperatively: the recipient presents the sender's latest signed claim, or
//! - unilaterally: the sender initiates a closure and settles alone once the
//!   dispute window of [`Config::secs_closure`](primitives::Config::secs_closure) elapsed.

pub use self::{
    channels::PaymentChannels,
    clock::{Clock, ManualClock, SystemClock},
    error::{Error, NotClaimable, Party},
    registry::ChannelRegistry,
    settlement::Settlement,
};

pub mod channels;
pub mod clock;
pub mod error;
pub mod registry;
pub mod settlement;
