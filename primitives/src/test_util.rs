use once_cell::sync::Lazy;

use crate::{config::DEVELOPMENT_CONFIG, Address, Config};

pub static FUNDER: Lazy<Address> = Lazy::new(|| *ADDRESS_0);
pub static OTHER_CONTRACT: Lazy<Address> = Lazy::new(|| *ADDRESS_1);
pub static OUTSIDER: Lazy<Address> = Lazy::new(|| *ADDRESS_2);

pub static ADDRESS_0: Lazy<Address> = Lazy::new(|| {
    "0x80690751969B234697e9059e04ed72195c3507fa"
        .parse()
        .expect("Valid Address")
});

pub static ADDRESS_1: Lazy<Address> = Lazy::new(|| {
    "0xf3f583AEC5f7C030722Fe992A5688557e1B86ef7"
        .parse()
        .expect("Valid Address")
});

pub static ADDRESS_2: Lazy<Address> = Lazy::new(|| {
    "0xe061E1EB461EaBE512759aa18A201B20Fe90631D"
        .parse()
        .expect("Valid Address")
});

/// The development [`Config`] with a 24 hours dispute window.
pub static CONFIG: Lazy<Config> = Lazy::new(|| DEVELOPMENT_CONFIG.clone());
