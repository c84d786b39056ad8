use parse_display::Display;
use serde::{Deserialize, Serialize};

use crate::{Address, U256};

/// The ordered `(sender, recipient)` pair identifying a [`Channel`].
///
/// `(A, B)` and `(B, A)` are two different channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{sender} -> {recipient}")]
pub struct ChannelKey {
    pub sender: Address,
    pub recipient: Address,
}

impl ChannelKey {
    pub fn new(sender: Address, recipient: Address) -> Self {
        Self { sender, recipient }
    }
}

/// The escrow record of a single `(sender, recipient)` pair.
///
/// Records are never removed, settling resets them to [`Channel::default()`]
/// which is the [`ChannelState::Closed`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Tokens currently escrowed for the channel.
    pub deposit: U256,
    /// Unix timestamp (in seconds) after which the sender may settle
    /// without a signature. `0` when no unilateral closure was initiated.
    pub closure_time: u64,
    pub is_open: bool,
}

impl Channel {
    /// A freshly funded channel.
    pub fn funded(deposit: U256) -> Self {
        Self {
            deposit,
            closure_time: 0,
            is_open: true,
        }
    }

    pub fn state(&self) -> ChannelState {
        match (self.is_open, self.closure_time) {
            (false, _) => ChannelState::Closed,
            (true, 0) => ChannelState::Open,
            (true, _) => ChannelState::PendingClosure,
        }
    }

    /// Whether the channel is either [`ChannelState::Open`] or [`ChannelState::PendingClosure`].
    pub fn is_active(&self) -> bool {
        self.state() != ChannelState::Closed
    }
}

/// The logical state derived from [`Channel::is_open`] & [`Channel::closure_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ChannelState {
    Closed,
    Open,
    PendingClosure,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn derives_state_from_fields() {
        assert_eq!(ChannelState::Closed, Channel::default().state());

        let open = Channel::funded(100.into());
        assert_eq!(ChannelState::Open, open.state());
        assert!(open.is_active());

        let pending = Channel {
            closure_time: 1_000,
            ..open
        };
        assert_eq!(ChannelState::PendingClosure, pending.state());
        assert!(pending.is_active());
    }

    #[test]
    fn channel_key_is_ordered() {
        let a = Address::from([1; 20]);
        let b = Address::from([2; 20]);

        assert_ne!(ChannelKey::new(a, b), ChannelKey::new(b, a));
        assert_eq!(
            format!("{} -> {}", a, b),
            ChannelKey::new(a, b).to_string()
        );
    }
}
