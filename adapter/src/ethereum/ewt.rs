//! Ethereum Web Tokens used to authenticate callers of the escrow.
//!
//! `{header}.{payload}.{signature}`, each part URL-safe base64 (no padding) encoded.
//! The signature is the electrum `{r}{s}{v}` signature followed by the [`ETH_SIGN_SUFFIX`] mode
//! over `to_ethereum_signed(keccak256("{header}.{payload}"))`.
use std::fmt;

use base64::URL_SAFE_NO_PAD;
use ethsign::{SecretKey, Signature};
use once_cell::sync::Lazy;
use primitives::Address;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{
    error::{EwtSigningError, EwtVerifyError},
    keccak256, recover_address, to_ethereum_signed, Electrum,
};

/// The signature mode suffix for Ethereum Signed Messages
pub const ETH_SIGN_SUFFIX: u8 = 0x01;

/// The only header we issue & accept, already encoded.
pub static ETH_HEADER: Lazy<String> =
    Lazy::new(|| base64::encode_config(r#"{"typ":"JWT","alg":"ETH"}"#, URL_SAFE_NO_PAD));

/// What the token's signer claims.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    /// The escrow the token is intended for.
    pub id: Address,
    /// Minutes since the unix epoch at the time of signing
    pub era: i64,
    /// The signer
    pub address: Address,
}

/// A token whose signer was recovered from its signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verified {
    pub from: Address,
    pub payload: Payload,
}

fn encode_part<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(base64::encode_config(serde_json::to_vec(value)?, URL_SAFE_NO_PAD))
}

fn decode_part<T: DeserializeOwned>(part: &str) -> Result<T, EwtVerifyError> {
    let bytes =
        base64::decode_config(part, URL_SAFE_NO_PAD).map_err(EwtVerifyError::PayloadDecoding)?;

    Ok(serde_json::from_str(std::str::from_utf8(&bytes)?)?)
}

fn signed_message(header: &str, payload: &str) -> [u8; 32] {
    to_ethereum_signed(&keccak256(format!("{header}.{payload}").as_bytes()))
}

/// An issued authentication token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub payload: Payload,
    token: String,
}

impl Token {
    pub fn sign(signer: &SecretKey, payload: Payload) -> Result<Self, EwtSigningError> {
        let payload_part = encode_part(&payload).map_err(EwtSigningError::PayloadSerialization)?;

        let mut signature = signer
            .sign(&signed_message(&ETH_HEADER, &payload_part))
            .map_err(|err| EwtSigningError::SigningMessage(err.to_string()))?
            .to_electrum()
            .to_vec();
        signature.push(ETH_SIGN_SUFFIX);

        let token = format!(
            "{}.{}.{}",
            ETH_HEADER.as_str(),
            payload_part,
            base64::encode_config(&signature, URL_SAFE_NO_PAD)
        );

        Ok(Self { payload, token })
    }

    /// Recovers the signer of the token.
    ///
    /// Whether the token is intended for a given escrow is up to the caller to check.
    pub fn verify(token: &str) -> Result<Verified, EwtVerifyError> {
        if token.len() < 16 {
            return Err(EwtVerifyError::InvalidTokenLength);
        }

        let (header, payload_part, signature_part) = match token.split('.').collect::<Vec<_>>()[..] {
            [header, payload, signature] => (header, payload, signature),
            _ => return Err(EwtVerifyError::InvalidToken),
        };

        if header != ETH_HEADER.as_str() {
            return Err(EwtVerifyError::InvalidHeader);
        }

        let payload: Payload = decode_part(payload_part)?;

        let signature = base64::decode_config(signature_part, URL_SAFE_NO_PAD)
            .map_err(EwtVerifyError::SignatureDecoding)?;
        let signature = match signature.split_last() {
            Some((&ETH_SIGN_SUFFIX, rsv)) => {
                Signature::from_electrum(rsv).ok_or(EwtVerifyError::InvalidSignature)?
            }
            _ => return Err(EwtVerifyError::InvalidSignature),
        };

        let from = recover_address(&signature, &signed_message(header, payload_part))
            .ok_or(EwtVerifyError::AddressRecovery)?;

        Ok(Verified { from, payload })
    }

    /// Ready to be used as a `Bearer` token.
    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}
