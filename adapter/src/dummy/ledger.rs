//! An in-memory [`TokenLedger`] with balances, allowances & frozen accounts.
use std::collections::{HashMap, HashSet};

use primitives::{Address, U256};

use crate::ledger::{LedgerError, TokenLedger, Transfer};

#[derive(Debug, Clone, Default)]
pub struct DummyLedger {
    balances: HashMap<Address, U256>,
    /// `(owner, spender) => allowance`
    allowances: HashMap<(Address, Address), U256>,
    /// Frozen accounts can neither send nor receive tokens
    frozen: HashSet<Address>,
}

impl DummyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new tokens for `account`.
    pub fn mint(&mut self, account: Address, amount: U256) -> Result<(), LedgerError> {
        let balance = self.balance_of(account);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(account))?;

        self.balances.insert(account, new_balance);

        Ok(())
    }

    /// Sets (it does not add to) the amount `spender` may pull from `owner`.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.insert((owner, spender), amount);
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn freeze(&mut self, account: Address) {
        self.frozen.insert(account);
    }

    pub fn unfreeze(&mut self, account: Address) {
        self.frozen.remove(&account);
    }

    fn ensure_not_frozen(&self, account: Address) -> Result<(), LedgerError> {
        match self.frozen.contains(&account) {
            true => Err(LedgerError::Frozen(account)),
            false => Ok(()),
        }
    }
}

impl TokenLedger for DummyLedger {
    type Error = LedgerError;

    fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_not_frozen(from)?;
        self.ensure_not_frozen(to)?;

        let allowance = self.allowance(from, caller);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: from,
                spender: caller,
                allowance,
                amount,
            });
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                balance: from_balance,
                amount,
            });
        }

        // a transfer to oneself leaves the balance unchanged
        if from != to {
            let to_balance = self
                .balance_of(to)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow(to))?;

            self.balances.insert(from, from_balance - amount);
            self.balances.insert(to, to_balance);
        }

        self.allowances.insert((from, caller), allowance - amount);

        Ok(())
    }

    fn transfer(&mut self, caller: Address, transfers: &[Transfer]) -> Result<(), LedgerError> {
        self.ensure_not_frozen(caller)?;

        // validate the whole batch on a copy of the balances, then commit it at once
        let mut balances = self.balances.clone();

        for transfer in transfers {
            self.ensure_not_frozen(transfer.to)?;

            let caller_balance = balances.get(&caller).copied().unwrap_or_default();
            if caller_balance < transfer.amount {
                return Err(LedgerError::InsufficientBalance {
                    account: caller,
                    balance: caller_balance,
                    amount: transfer.amount,
                });
            }
            balances.insert(caller, caller_balance - transfer.amount);

            let to_balance = balances.get(&transfer.to).copied().unwrap_or_default();
            let to_balance = to_balance
                .checked_add(transfer.amount)
                .ok_or(LedgerError::Overflow(transfer.to))?;
            balances.insert(transfer.to, to_balance);
        }

        self.balances = balances;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use primitives::test_util::{ADDRESS_0, ADDRESS_1, ADDRESS_2};

    fn ledger() -> DummyLedger {
        let mut ledger = DummyLedger::new();
        ledger.mint(*ADDRESS_0, 1_000.into()).expect("Should mint");
        ledger
    }

    #[test]
    fn transfer_from_spends_the_allowance() {
        let (owner, spender, to) = (*ADDRESS_0, *ADDRESS_1, *ADDRESS_2);
        let mut ledger = ledger();
        ledger.approve(owner, spender, 300.into());

        ledger
            .transfer_from(spender, owner, to, 100.into())
            .expect("Should transfer");

        assert_eq!(U256::from(900), ledger.balance_of(owner));
        assert_eq!(U256::from(100), ledger.balance_of(to));
        assert_eq!(U256::from(200), ledger.allowance(owner, spender));

        assert_eq!(
            Err(LedgerError::InsufficientAllowance {
                owner,
                spender,
                allowance: 200.into(),
                amount: 201.into(),
            }),
            ledger.transfer_from(spender, owner, to, 201.into())
        );
    }

    #[test]
    fn transfer_from_insufficient_balance_or_frozen() {
        let (owner, spender, to) = (*ADDRESS_0, *ADDRESS_1, *ADDRESS_2);
        let mut ledger = ledger();
        ledger.approve(owner, spender, 5_000.into());

        assert_eq!(
            Err(LedgerError::InsufficientBalance {
                account: owner,
                balance: 1_000.into(),
                amount: 1_001.into(),
            }),
            ledger.transfer_from(spender, owner, to, 1_001.into())
        );

        ledger.freeze(to);
        assert_eq!(
            Err(LedgerError::Frozen(to)),
            ledger.transfer_from(spender, owner, to, 1.into())
        );
        assert_eq!(U256::from(1_000), ledger.balance_of(owner));
        assert_eq!(U256::from(5_000), ledger.allowance(owner, spender));

        ledger.unfreeze(to);
        ledger
            .transfer_from(spender, owner, to, 1.into())
            .expect("Should transfer once unfrozen");
    }

    #[test]
    fn transfer_batch_is_all_or_nothing() {
        let (custodian, first, second) = (*ADDRESS_0, *ADDRESS_1, *ADDRESS_2);
        let mut ledger = ledger();

        // the second transfer exceeds what is left after the first one
        let batch = [
            Transfer::new(first, 600.into()),
            Transfer::new(second, 600.into()),
        ];
        assert!(matches!(
            ledger.transfer(custodian, &batch),
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(U256::from(1_000), ledger.balance_of(custodian));
        assert_eq!(U256::zero(), ledger.balance_of(first));

        ledger.freeze(second);
        let batch = [
            Transfer::new(first, 100.into()),
            Transfer::new(second, 100.into()),
        ];
        assert_eq!(Err(LedgerError::Frozen(second)), ledger.transfer(custodian, &batch));
        assert_eq!(U256::zero(), ledger.balance_of(first));

        ledger.unfreeze(second);
        ledger
            .transfer(custodian, &batch)
            .expect("Should apply the batch");
        assert_eq!(U256::from(800), ledger.balance_of(custodian));
        assert_eq!(U256::from(100), ledger.balance_of(first));
        assert_eq!(U256::from(100), ledger.balance_of(second));
    }

    #[test]
    fn mint_overflow() {
        let mut ledger = ledger();

        assert_eq!(
            Err(LedgerError::Overflow(*ADDRESS_0)),
            ledger.mint(*ADDRESS_0, U256::MAX)
        );
    }
}
