use primitives::{Address, Session, U256};

use crate::ClaimSignature;

/// Available methods for Locked clients.
pub trait Locked {
    type Error: std::error::Error + Into<crate::Error> + 'static;

    /// Get Adapter whoami
    fn whoami(&self) -> Address;

    /// Verify that `signature` authorizes the payment of `amount`
    /// to a recipient of a channel funded by `signer`.
    fn verify_claim(
        &self,
        signer: Address,
        amount: U256,
        signature: &[u8],
    ) -> Result<bool, Self::Error>;

    /// Creates a [`Session`] from a provided authentication token.
    fn session_from_token(&self, token: &str) -> Result<Session, Self::Error>;
}

/// Available methods for Unlocked clients.
/// Unlocked clients should also implement [`Locked`].
pub trait Unlocked: Locked {
    /// Signs a claim of `amount` for the configured escrow.
    fn sign_claim(&self, amount: U256) -> Result<ClaimSignature, Self::Error>;

    /// Creates an authentication token intended for the escrow `intended_for`.
    fn get_auth(&self, intended_for: Address) -> Result<String, Self::Error>;
}

/// A client that can be `unlock()`ed
/// and implements both [`Locked`] & [`Unlocked`].
pub trait Unlockable {
    type Unlocked: Unlocked;

    fn unlock(&self) -> Result<Self::Unlocked, <Self::Unlocked as Locked>::Error>;
}
