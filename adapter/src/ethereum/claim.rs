//! Signed claims: the sender's authorization for the recipient to withdraw an amount.
//!
//! The signed message is the Solidity equivalent of
//! `keccak256(abi.encodePacked(address(escrow), uint256(amount)))`
//! wrapped as an Ethereum Signed Message (see [`to_ethereum_signed`]).
//!
//! **NOTE:** Neither a channel nor a nonce is part of the message.
//! A claim stays valid for every channel funded by the same signer in the same escrow,
//! including channels reopened between the same parties.
use std::{fmt, str::FromStr};

use ethsign::{SecretKey, Signature};
use primitives::{Address, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    error::{MalformedSignature, SigningError},
    keccak256, recover_address, to_ethereum_signed, Electrum,
};

/// The length of a `{r}{s}{v}` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// The claim hash before applying the Ethereum Signed Message prefix.
pub fn claim_hash(escrow: Address, amount: U256) -> [u8; 32] {
    let mut packed = [0_u8; 52];
    packed[..20].copy_from_slice(escrow.as_bytes());
    amount.to_big_endian(&mut packed[20..]);

    keccak256(&packed)
}

/// The 32 bytes message which the sender signs and from which the signer is recovered.
pub fn claim_message(escrow: Address, amount: U256) -> [u8; 32] {
    to_ethereum_signed(&claim_hash(escrow, amount))
}

/// Signs a claim of `amount` for the `escrow` with the given secret.
pub fn sign_claim(
    secret: &SecretKey,
    escrow: Address,
    amount: U256,
) -> Result<ClaimSignature, SigningError> {
    let signature = secret
        .sign(&claim_message(escrow, amount))
        .map_err(|err| SigningError(err.to_string()))?;

    Ok(ClaimSignature(signature.to_electrum()))
}

/// Verifies claims made against a single escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimAuthorizer {
    escrow: Address,
}

impl ClaimAuthorizer {
    pub fn new(escrow: Address) -> Self {
        Self { escrow }
    }

    pub fn escrow(&self) -> Address {
        self.escrow
    }

    /// Returns `true` only if `signature` was produced by the private key of `signer`
    /// over the claim of `amount` for this escrow.
    ///
    /// # Errors
    ///
    /// When the signature is not exactly [`SIGNATURE_LENGTH`] bytes long.
    /// A signature of the correct length from which no address can be recovered
    /// (invalid `v`, `r` or `s`) is not an error, it simply does not authorize the claim.
    pub fn authorize(
        &self,
        signer: Address,
        amount: U256,
        signature: &[u8],
    ) -> Result<bool, MalformedSignature> {
        if signature.len() != SIGNATURE_LENGTH {
            return Err(MalformedSignature {
                length: signature.len(),
            });
        }

        let recovered = Signature::from_electrum(signature)
            .and_then(|signature| recover_address(&signature, &claim_message(self.escrow, amount)));

        Ok(recovered == Some(signer))
    }
}

/// A `{r}{s}{v}` signed claim, displayed as a `0x` prefixed hex string.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ClaimSignature([u8; SIGNATURE_LENGTH]);

impl ClaimSignature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ClaimSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for ClaimSignature {
    type Error = MalformedSignature;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; SIGNATURE_LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| MalformedSignature {
                length: bytes.len(),
            })
    }
}

impl fmt::Display for ClaimSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ClaimSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimSignature({})", self)
    }
}

impl FromStr for ClaimSignature {
    type Err = super::error::VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_signature = s
            .strip_prefix("0x")
            .ok_or(super::error::VerifyError::SignatureNotPrefixed)?;
        let bytes =
            hex::decode(hex_signature).map_err(super::error::VerifyError::SignatureDecoding)?;

        Ok(Self::try_from(bytes.as_slice())?)
    }
}

impl Serialize for ClaimSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClaimSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let signature = String::deserialize(deserializer)?;

        signature.parse().map_err(serde::de::Error::custom)
    }
}
