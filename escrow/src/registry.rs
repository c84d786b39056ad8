//! The record of every channel ever funded in the escrow.
//!
//! The registry only enforces which transitions are legal,
//! it neither moves funds nor checks who is calling.
use std::collections::HashMap;

use primitives::{Channel, ChannelKey, U256};

use crate::Error;

#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    channels: HashMap<ChannelKey, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// An unknown pair reads as the zero (closed) record.
    pub fn channel(&self, key: &ChannelKey) -> Channel {
        self.channels.get(key).copied().unwrap_or_default()
    }

    /// A pair can only be funded when it has no active channel.
    pub fn ensure_closed(&self, key: &ChannelKey) -> Result<(), Error> {
        match self.channel(key).is_active() {
            true => Err(Error::ChannelAlreadyActive(*key)),
            false => Ok(()),
        }
    }

    /// Call only once the deposit is in custody.
    pub fn record_open(&mut self, key: ChannelKey, deposit: U256) {
        self.channels.insert(key, Channel::funded(deposit));
    }

    /// Sets the time after which the sender may settle without a signature.
    ///
    /// Returns the replaced `closure_time`, `0` if no closure was initiated before.
    pub fn set_closure_time(&mut self, key: &ChannelKey, closure_time: u64) -> Result<u64, Error> {
        match self.channels.get_mut(key) {
            Some(channel) if channel.is_open => {
                Ok(std::mem::replace(&mut channel.closure_time, closure_time))
            }
            _ => Err(Error::ChannelNotOpen(*key)),
        }
    }

    /// Resets the record to [`Channel::default()`] so the pair can be funded again.
    pub fn reset(&mut self, key: &ChannelKey) {
        if let Some(channel) = self.channels.get_mut(key) {
            *channel = Channel::default();
        }
    }

    /// The sum of the deposits of all channels, i.e. the funds in custody.
    pub fn total_deposits(&self) -> U256 {
        self.channels
            .values()
            .fold(U256::zero(), |total, channel| {
                total.saturating_add(channel.deposit)
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use primitives::{Address, ChannelState};

    fn key() -> ChannelKey {
        ChannelKey::new(Address::from([1; 20]), Address::from([2; 20]))
    }

    #[test]
    fn unknown_pair_is_closed() {
        let registry = ChannelRegistry::new();

        assert_eq!(Channel::default(), registry.channel(&key()));
        assert!(registry.ensure_closed(&key()).is_ok());
        assert_eq!(U256::zero(), registry.total_deposits());
    }

    #[test]
    fn open_closure_and_reset() {
        let mut registry = ChannelRegistry::new();
        registry.record_open(key(), 100.into());

        assert!(matches!(
            registry.ensure_closed(&key()),
            Err(Error::ChannelAlreadyActive(active)) if active == key()
        ));
        assert_eq!(U256::from(100), registry.total_deposits());

        assert_eq!(0, registry.set_closure_time(&key(), 500).expect("is open"));
        assert_eq!(500, registry.set_closure_time(&key(), 700).expect("is open"));
        assert_eq!(ChannelState::PendingClosure, registry.channel(&key()).state());

        registry.reset(&key());
        assert_eq!(Channel::default(), registry.channel(&key()));
        assert_eq!(U256::zero(), registry.total_deposits());
        assert!(registry.ensure_closed(&key()).is_ok());
    }

    #[test]
    fn closure_requires_an_open_channel() {
        let mut registry = ChannelRegistry::new();
        let reversed = ChannelKey::new(key().recipient, key().sender);
        registry.record_open(key(), 100.into());

        assert!(matches!(
            registry.set_closure_time(&reversed, 500),
            Err(Error::ChannelNotOpen(not_open)) if not_open == reversed
        ));
        assert_eq!(Channel::default(), registry.channel(&reversed));
    }
}
