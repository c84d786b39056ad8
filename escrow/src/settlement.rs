use adapter::Transfer;
use primitives::{ChannelKey, U256};

use crate::Error;

/// How a channel's deposit is split when it's settled.
///
/// `to_recipient + to_sender` always equals the settled deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub to_recipient: U256,
    pub to_sender: U256,
}

impl Settlement {
    pub fn compute(deposit: U256, claimed: U256) -> Result<Self, Error> {
        let to_sender = deposit
            .checked_sub(claimed)
            .ok_or(Error::AmountExceedsDeposit { claimed, deposit })?;

        Ok(Self {
            to_recipient: claimed,
            to_sender,
        })
    }

    /// The payouts out of custody, zero amounts are not transferred.
    pub fn transfers(&self, key: &ChannelKey) -> Vec<Transfer> {
        [
            Transfer::new(key.recipient, self.to_recipient),
            Transfer::new(key.sender, self.to_sender),
        ]
        .into_iter()
        .filter(|transfer| !transfer.amount.is_zero())
        .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use primitives::Address;

    fn key() -> ChannelKey {
        ChannelKey::new(Address::from([1; 20]), Address::from([2; 20]))
    }

    #[test]
    fn splits_the_deposit() {
        let settlement = Settlement::compute(100.into(), 40.into()).expect("Should compute");

        assert_eq!(U256::from(40), settlement.to_recipient);
        assert_eq!(U256::from(60), settlement.to_sender);
        assert_eq!(
            vec![
                Transfer::new(key().recipient, 40.into()),
                Transfer::new(key().sender, 60.into()),
            ],
            settlement.transfers(&key())
        );
    }

    #[test]
    fn skips_zero_payouts() {
        let full_refund = Settlement::compute(100.into(), 0.into()).expect("Should compute");
        assert_eq!(
            vec![Transfer::new(key().sender, 100.into())],
            full_refund.transfers(&key())
        );

        let full_claim = Settlement::compute(100.into(), 100.into()).expect("Should compute");
        assert_eq!(
            vec![Transfer::new(key().recipient, 100.into())],
            full_claim.transfers(&key())
        );
    }

    #[test]
    fn claim_over_deposit() {
        assert!(matches!(
            Settlement::compute(100.into(), 101.into()),
            Err(Error::AmountExceedsDeposit { claimed, deposit })
                if claimed == U256::from(101) && deposit == U256::from(100)
        ));
    }
}
