//! The token ledger: the custodian of the collateral.
//!
//! The escrow never changes balances itself, it only requests transfers.
use primitives::{Address, U256};
use thiserror::Error;

/// A single payout out of custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub to: Address,
    pub amount: U256,
}

impl Transfer {
    pub fn new(to: Address, amount: U256) -> Self {
        Self { to, amount }
    }
}

/// A fungible token ledger.
///
/// `caller` is the identity requesting the operation, for the escrow this is
/// always its own identity ([`Config::contract`](primitives::Config::contract)).
pub trait TokenLedger {
    type Error: std::error::Error + Send + Sync + 'static;

    fn balance_of(&self, account: Address) -> U256;

    /// Pulls `amount` from `from` into `to`,
    /// spending the allowance `from` has given to `caller`.
    ///
    /// Either the whole amount is transferred or nothing is.
    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Self::Error>;

    /// Pushes funds out of the `caller`'s balance.
    ///
    /// The batch is applied all-or-nothing: when any of the transfers fails
    /// none of the balances change.
    fn transfer(&mut self, caller: Address, transfers: &[Transfer]) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient allowance: {spender} may spend {allowance} from {owner}, {amount} requested")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: U256,
        amount: U256,
    },
    #[error("Insufficient balance: {account} holds {balance}, {amount} requested")]
    InsufficientBalance {
        account: Address,
        balance: U256,
        amount: U256,
    },
    #[error("Account {0} is frozen")]
    Frozen(Address),
    #[error("Balance of {0} overflows")]
    Overflow(Address),
}
