//! Private keys & their addresses used as channel parties in tests.
use ethsign::SecretKey;
use once_cell::sync::Lazy;
use primitives::Address;

pub const SENDER_PRIVATE_KEY: &str =
    "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
pub const RECIPIENT_PRIVATE_KEY: &str =
    "348ce564d427a3311b6536bbcff9390d69395b06ed6c486954e971d960fe8709";

pub static SENDER_KEY: Lazy<SecretKey> = Lazy::new(|| secret_key(SENDER_PRIVATE_KEY));
pub static RECIPIENT_KEY: Lazy<SecretKey> = Lazy::new(|| secret_key(RECIPIENT_PRIVATE_KEY));

pub static SENDER: Lazy<Address> = Lazy::new(|| address_of(&SENDER_KEY));
pub static RECIPIENT: Lazy<Address> = Lazy::new(|| address_of(&RECIPIENT_KEY));

pub fn secret_key(private_key: &str) -> SecretKey {
    let bytes = hex::decode(private_key).expect("Valid hex private key");

    SecretKey::from_raw(&bytes).expect("Valid private key")
}

pub fn address_of(secret: &SecretKey) -> Address {
    Address::from(*secret.public().address())
}
