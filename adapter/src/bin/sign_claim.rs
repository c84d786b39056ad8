#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

use std::error::Error;

use clap::{crate_version, Arg, Command};

use adapter::{
    ethereum::Options,
    prelude::{Locked, Unlockable, Unlocked},
    Ethereum,
};
use primitives::{
    config::{configuration, Environment},
    util::logging::new_logger,
    Address, U256,
};
use slog::{info, o};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Command::new("Sign claim")
        .version(crate_version!())
        .about("Signs a claim of the sender for the escrow in the configuration")
        .arg(
            Arg::new("config")
                .help("the config file of the escrow")
                .takes_value(true),
        )
        .arg(
            Arg::new("keystoreFile")
                .long("keystoreFile")
                .short('k')
                .help("path to the JSON Ethereum Keystore file, its password is read from `KEYSTORE_PWD`")
                .takes_value(true)
                .required_unless_present("privateKey"),
        )
        .arg(
            Arg::new("privateKey")
                .long("privateKey")
                .short('p')
                .help("hex encoded private key used instead of a keystore")
                .takes_value(true)
                .conflicts_with("keystoreFile"),
        )
        .arg(
            Arg::new("amount")
                .long("amount")
                .short('a')
                .help("the total (cumulative) amount the recipient may withdraw, in the smallest token unit")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("authFor")
                .long("authFor")
                .help("also prints an authentication token intended for this escrow address")
                .takes_value(true),
        )
        .get_matches();

    let environment: Environment = match std::env::var("ENV") {
        Ok(env) => serde_json::from_value(serde_json::Value::String(env))?,
        Err(_) => Environment::default(),
    };
    let config = configuration(environment, cli.value_of("config"))?;
    let logger = new_logger("sign_claim").new(o!("escrow" => config.contract.to_string()));

    let amount = U256::from_dec_str(cli.value_of("amount").ok_or("amount is required")?)?;

    let locked = match (cli.value_of("keystoreFile"), cli.value_of("privateKey")) {
        (Some(keystore_file), _) => {
            let keystore_pwd = std::env::var("KEYSTORE_PWD")
                .map_err(|_| "`KEYSTORE_PWD` is required for unlocking the keystore")?;

            Ethereum::init(
                Options {
                    keystore_file: keystore_file.to_string(),
                    keystore_pwd,
                },
                &config,
            )?
        }
        (None, Some(private_key)) => Ethereum::from_private_key(private_key, &config)?,
        (None, None) => return Err("Either a keystore file or a private key is required".into()),
    };
    let sender = locked.unlock()?;
    info!(&logger, "Unlocked sender wallet"; "sender" => %sender.whoami());

    let signature = sender.sign_claim(amount)?;
    info!(&logger, "Signed claim"; "amount" => %amount);

    // the signature & the token are the output, everything else is logged to stderr
    println!("{}", signature);

    if let Some(escrow) = cli.value_of("authFor") {
        let escrow: Address = escrow.parse()?;
        let token = sender.get_auth(escrow)?;
        info!(&logger, "Issued authentication token"; "intended_for" => %escrow);

        println!("{}", token);
    }

    Ok(())
}
