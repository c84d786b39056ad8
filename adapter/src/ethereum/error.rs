use primitives::Address;
use thiserror::Error;

use crate::Error as AdapterError;

use super::ewt::Payload;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Keystore: {0}")]
    Keystore(#[from] KeystoreError),
    #[error("Wallet unlocking: {0}")]
    WalletUnlock(String),
    /// Signing of the message failed
    #[error("Signing message: {0}")]
    SignMessage(#[from] EwtSigningError),
    #[error("Signing claim: {0}")]
    SignClaim(#[from] SigningError),
    #[error("Verifying message: {0}")]
    VerifyMessage(#[from] EwtVerifyError),
    /// Error occurred during verification of a claim signature
    #[error("Verifying claim: {0}")]
    VerifyClaim(#[from] VerifyError),
    #[error("Authentication token with payload {payload:?} is not intended for this escrow ({whoami})")]
    AuthenticationTokenNotIntendedForUs { payload: Payload, whoami: Address },
}

impl From<Error> for AdapterError {
    fn from(err: Error) -> Self {
        match err {
            Error::Keystore(_) | Error::WalletUnlock(_) => AdapterError::wallet(err),
            Error::VerifyMessage(_) | Error::AuthenticationTokenNotIntendedForUs { .. } => {
                AdapterError::authentication(err)
            }
            Error::VerifyClaim(_) => AdapterError::claim_verification(err),
            Error::SignMessage(_) | Error::SignClaim(_) => AdapterError::signing(err),
        }
    }
}

/// The signature of a claim is not exactly 65 bytes long.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Signature should be 65 bytes long, got {length}")]
pub struct MalformedSignature {
    pub length: usize,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct SigningError(pub(crate) String);

#[derive(Debug, Error)]
/// Error returned when a claim signature can't be parsed.
pub enum VerifyError {
    #[error("Decoding signature: {0}")]
    SignatureDecoding(#[source] hex::FromHexError),
    #[error("Signature is not prefixed with `0x`")]
    SignatureNotPrefixed,
    #[error(transparent)]
    Malformed(#[from] MalformedSignature),
}

#[derive(Debug, Error)]
pub enum KeystoreError {
    /// `address` key is missing from the keystore file
    #[error("\"address\" key missing in keystore file")]
    AddressMissing,
    /// The `address` length is invalid
    #[error("\"address\" length should be 20 bytes")]
    AddressLength,
    /// The private key is not a valid hex value
    #[error("Private key is not valid hex: {0}")]
    PrivateKeyHex(#[source] hex::FromHexError),
    /// reading the keystore file failed
    #[error("Reading keystore file: {0}")]
    ReadingFile(#[source] std::io::Error),
    /// Deserializing the keystore file failed
    #[error("Deserializing keystore file: {0}")]
    Deserialization(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EwtSigningError {
    #[error("Payload serialization: {0}")]
    PayloadSerialization(#[source] serde_json::Error),
    #[error("Signing message: {0}")]
    SigningMessage(String),
}

#[derive(Debug, Error)]
pub enum EwtVerifyError {
    #[error("The token length should be at least 16 characters")]
    InvalidTokenLength,
    #[error("The token does not comply to the format of header.payload.signature")]
    InvalidToken,
    #[error("The token header is not an Ethereum Web Token header")]
    InvalidHeader,
    #[error("Address recovery failed")]
    AddressRecovery,
    #[error("Signature decoding: {0}")]
    SignatureDecoding(#[source] base64::DecodeError),
    /// When token is decoded but creating a Signature results in empty Signature.
    /// Signature is encoded as RSV (V in "Electrum" notation)
    /// See [`Electrum::from_electrum`](super::Electrum::from_electrum)
    #[error("Error when decoding token signature")]
    InvalidSignature,
    #[error("Payload decoding: {0}")]
    PayloadDecoding(#[source] base64::DecodeError),
    #[error("Payload deserialization: {0}")]
    PayloadDeserialization(#[from] serde_json::Error),
    #[error("Payload is not a valid utf8 string: {0}")]
    PayloadUtf8(#[from] std::str::Utf8Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn maps_into_the_client_error_kinds() {
        let wallet: AdapterError = Error::WalletUnlock("wrong password".into()).into();
        assert_eq!(Kind::Wallet, wallet.kind());

        let claim: AdapterError = Error::from(VerifyError::from(MalformedSignature { length: 1 })).into();
        assert_eq!(Kind::ClaimVerification, claim.kind());

        let token: AdapterError = Error::from(EwtVerifyError::InvalidHeader).into();
        assert_eq!(Kind::Authentication, token.kind());
        assert_eq!(
            "Authentication: Verifying message: The token header is not an Ethereum Web Token header",
            token.to_string()
        );
    }
}
