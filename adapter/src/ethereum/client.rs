use std::fs;

use chrono::Utc;
use ethsign::{KeyFile, SecretKey};
use primitives::{Address, Config, Session, U256};

use super::{
    claim::{sign_claim, ClaimAuthorizer, ClaimSignature},
    error::{Error, KeystoreError},
    ewt::{self, Payload},
    LockedWallet, UnlockedWallet, WalletState,
};
use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct Options {
    pub keystore_file: String,
    pub keystore_pwd: String,
}

#[derive(Debug)]
/// Ethereum client, signing claims & authentication tokens for the escrow in [`Config::contract`].
pub struct Ethereum<S = LockedWallet> {
    address: Address,
    config: Config,
    pub(crate) state: S,
}

impl Ethereum<LockedWallet> {
    /// Reads the JSON keystore file.
    /// The keystore is decrypted with the password only when [`Unlockable::unlock`]ed.
    pub fn init(opts: Options, config: &Config) -> Result<Self, Error> {
        let keystore_contents =
            fs::read_to_string(&opts.keystore_file).map_err(KeystoreError::ReadingFile)?;
        let keystore_json: KeyFile =
            serde_json::from_str(&keystore_contents).map_err(KeystoreError::Deserialization)?;

        let address_bytes = keystore_json
            .address
            .clone()
            .ok_or(KeystoreError::AddressMissing)?;

        let address = Address::from_slice(&address_bytes.0).ok_or(KeystoreError::AddressLength)?;

        Ok(Self {
            address,
            config: config.to_owned(),
            state: LockedWallet::KeyStore {
                keystore: keystore_json,
                password: opts.keystore_pwd.into(),
            },
        })
    }

    /// Uses a hex encoded private key, with or without a `0x` prefix.
    pub fn from_private_key(private_key: &str, config: &Config) -> Result<Self, Error> {
        let secret = parse_private_key(private_key)?;

        Ok(Self {
            address: Address::from(*secret.public().address()),
            config: config.to_owned(),
            state: LockedWallet::PrivateKey(private_key.to_string()),
        })
    }
}

impl<S: WalletState> Ethereum<S> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn authorizer(&self) -> ClaimAuthorizer {
        ClaimAuthorizer::new(self.config.contract)
    }
}

fn parse_private_key(private_key: &str) -> Result<SecretKey, Error> {
    let bytes = hex::decode(private_key.trim_start_matches("0x"))
        .map_err(KeystoreError::PrivateKeyHex)?;

    SecretKey::from_raw(&bytes).map_err(|err| Error::WalletUnlock(err.to_string()))
}

impl Unlockable for Ethereum<LockedWallet> {
    type Unlocked = Ethereum<UnlockedWallet>;

    fn unlock(&self) -> Result<Ethereum<UnlockedWallet>, Error> {
        let wallet = match &self.state {
            LockedWallet::KeyStore { keystore, password } => keystore
                .to_secret_key(password)
                .map_err(|err| Error::WalletUnlock(err.to_string()))?,
            LockedWallet::PrivateKey(private_key) => parse_private_key(private_key)?,
        };

        Ok(Ethereum {
            address: self.address,
            config: self.config.clone(),
            state: UnlockedWallet { wallet },
        })
    }
}

impl<S: WalletState> Locked for Ethereum<S> {
    type Error = Error;

    fn whoami(&self) -> Address {
        self.address
    }

    fn verify_claim(
        &self,
        signer: Address,
        amount: U256,
        signature: &[u8],
    ) -> Result<bool, Self::Error> {
        Ok(self
            .authorizer()
            .authorize(signer, amount, signature)
            .map_err(super::error::VerifyError::from)?)
    }

    /// Creates a [`Session`] from a provided Token.
    ///
    /// The token should be intended for the escrow of [`Config::contract`].
    fn session_from_token(&self, token: &str) -> Result<Session, Self::Error> {
        let verified = ewt::Token::verify(token)?;

        if self.config.contract != verified.payload.id {
            return Err(Error::AuthenticationTokenNotIntendedForUs {
                payload: verified.payload,
                whoami: self.config.contract,
            });
        }

        Ok(Session {
            era: verified.payload.era,
            uid: verified.from,
        })
    }
}

impl Unlocked for Ethereum<UnlockedWallet> {
    fn sign_claim(&self, amount: U256) -> Result<ClaimSignature, Error> {
        Ok(sign_claim(&self.state.wallet, self.config.contract, amount)?)
    }

    fn get_auth(&self, intended_for: Address) -> Result<String, Error> {
        let era = Utc::now().timestamp() / 60;
        let payload = Payload {
            id: intended_for,
            era,
            address: self.whoami(),
        };

        let token = ewt::Token::sign(&self.state.wallet, payload)?;

        Ok(token.to_string())
    }
}
