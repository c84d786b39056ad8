use parse_display::Display;
use primitives::{Address, ChannelKey, U256};
use thiserror::Error;

/// The channel party whose address was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Party {
    Funder,
    Sender,
    Recipient,
}

/// Why a channel can't be settled at the moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NotClaimable {
    #[display("channel is closed")]
    Closed,
    #[display("sender has not initiated a closure")]
    NoClosureInitiated,
    #[display("dispute window is active until {closure_time}, now is {now}")]
    DisputeWindowActive { closure_time: u64, now: u64 },
}

/// Every error aborts the operation and leaves the escrow & the ledger unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid party: the {0} address should be neither the zero address nor the escrow")]
    InvalidParty(Party),
    #[error("Invalid amount: the deposit should be greater than 0")]
    InvalidAmount,
    #[error("Channel {0} is already open")]
    ChannelAlreadyActive(ChannelKey),
    #[error("Channel {0} is not open")]
    ChannelNotOpen(ChannelKey),
    #[error("Channel {key} is not claimable: {reason}")]
    ChannelNotClaimable {
        key: ChannelKey,
        reason: NotClaimable,
    },
    #[error("Malformed signature: expected 65 bytes, got {0}")]
    MalformedSignature(usize),
    #[error("Signature was not produced by the sender {0}")]
    SignatureMismatch(Address),
    #[error("Claimed amount {claimed} exceeds the channel deposit {deposit}")]
    AmountExceedsDeposit { claimed: U256, deposit: U256 },
    #[error("Ledger transfer failed: {0}")]
    LedgerTransferFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn ledger<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::LedgerTransferFailed(Box::new(error))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_messages() {
        let key = ChannelKey::new(Address::from([1; 20]), Address::from([2; 20]));

        assert_eq!(
            "Invalid party: the Funder address should be neither the zero address nor the escrow",
            Error::InvalidParty(Party::Funder).to_string()
        );
        assert_eq!(
            format!("Channel {key} is not claimable: dispute window is active until 100, now is 99"),
            Error::ChannelNotClaimable {
                key,
                reason: NotClaimable::DisputeWindowActive {
                    closure_time: 100,
                    now: 99
                }
            }
            .to_string()
        );
    }
}
