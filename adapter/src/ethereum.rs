use ethsign::{SecretKey, Signature};
use primitives::Address;
use std::fmt;
use tiny_keccak::{Hasher, Keccak};

pub use self::client::{Ethereum, Options};

pub mod claim;
mod client;
pub mod error;
pub mod ewt;

#[cfg(any(test, feature = "test-util"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub mod test_util;

pub struct UnlockedWallet {
    wallet: SecretKey,
}

impl fmt::Debug for UnlockedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnlockedWallet").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum LockedWallet {
    KeyStore {
        keystore: ethsign::KeyFile,
        password: ethsign::Protected,
    },
    /// A hex encoded private key, with or without a `0x` prefix
    PrivateKey(String),
}

pub trait WalletState {}
impl WalletState for UnlockedWallet {}
impl WalletState for LockedWallet {}

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0_u8; 32];

    hasher.update(bytes);
    hasher.finalize(&mut output);

    output
}

/// Hashes the message following the "Signed Data Standard" (`eth_sign`, EIP-191 version `0x45`):
/// `keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)`
pub fn to_ethereum_signed(message: &[u8]) -> [u8; 32] {
    let eth = "\x19Ethereum Signed Message:\n";
    let message_length = message.len();

    let mut bytes = format!("{}{}", eth, message_length).into_bytes();
    bytes.extend(message);

    keccak256(&bytes)
}

/// The address of the private key that produced the signature over the 32 bytes `message`.
///
/// Returns `None` if the public key can't be recovered.
pub(crate) fn recover_address(signature: &Signature, message: &[u8; 32]) -> Option<Address> {
    signature
        .recover(message)
        .ok()
        .map(|public_key| Address::from(*public_key.address()))
}

/// Signatures in the `{r}{s}{v}` format where `v` is `27` or `28`.
///
/// [`Electrum::from_electrum`] also accepts the raw recovery id `0` or `1` for `v`.
pub trait Electrum: Sized {
    fn to_electrum(&self) -> [u8; 65];

    fn from_electrum(data: &[u8]) -> Option<Self>;
}

impl Electrum for Signature {
    fn to_electrum(&self) -> [u8; 65] {
        let mut electrum = [0_u8; 65];

        electrum[0..32].copy_from_slice(&self.r);
        electrum[32..64].copy_from_slice(&self.s);
        electrum[64] = self.v + 27;

        electrum
    }

    fn from_electrum(data: &[u8]) -> Option<Self> {
        if data.len() != 65 {
            return None;
        }

        let v = match data[64] {
            v @ (27 | 28) => v - 27,
            v @ (0 | 1) => v,
            _ => return None,
        };

        let mut r = [0_u8; 32];
        let mut s = [0_u8; 32];
        r.copy_from_slice(&data[0..32]);
        s.copy_from_slice(&data[32..64]);

        Some(Signature { v, r, s })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    /// The `web3.eth.accounts.sign("Some data", privateKey)` example of web3.js
    const PRIVATE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const SIGNATURE: &str = "b91467e570a6466aa9e9876cbcd013baba02900b8979d43fe208a4a4f339f5fd6007e74cd82e037b800186422fc2da167c747ef045e5d18a5f5d4300f8e1a0291c";

    #[test]
    fn ethereum_signed_message_hash_is_aligned_with_web3() {
        let hash = to_ethereum_signed(b"Some data");

        assert_eq!(
            "1da44b586eb0729ff70a73c326926f6ed5a25f5b056e7f47fbc6e58d86871655",
            hex::encode(hash)
        );
    }

    #[test]
    fn recovers_the_signer_of_web3_signature() {
        let secret = SecretKey::from_raw(&hex::decode(PRIVATE_KEY).expect("valid hex"))
            .expect("Valid private key");
        let expected = Address::from(*secret.public().address());
        assert_eq!(
            "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23",
            expected.to_string()
        );

        let signature = Signature::from_electrum(&hex::decode(SIGNATURE).expect("valid hex"))
            .expect("Valid electrum signature");

        assert_eq!(
            Some(expected),
            recover_address(&signature, &to_ethereum_signed(b"Some data"))
        );
        assert_eq!(
            hex::decode(SIGNATURE).expect("valid hex"),
            signature.to_electrum().to_vec()
        );
    }

    #[test]
    fn electrum_rejects_invalid_recovery_id_and_length() {
        let mut data = [1_u8; 65];
        data[64] = 29;
        assert!(Signature::from_electrum(&data).is_none());

        data[64] = 1;
        assert_eq!(
            1,
            Signature::from_electrum(&data).expect("raw recovery id").v
        );

        assert!(Signature::from_electrum(&data[..64]).is_none());
    }
}
