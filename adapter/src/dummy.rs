//! The [`Dummy`] authentication client and the in-memory [`DummyLedger`](ledger::DummyLedger).
//!
use crate::{prelude::*, ClaimAuthorizer, Error};

use parse_display::{Display, FromStr};
use primitives::{Address, Session, ToETHChecksum, U256};
use std::collections::HashMap;

pub mod ledger;

#[derive(Debug, Clone)]
pub struct Options {
    /// The address this client authenticates as.
    pub dummy_identity: Address,
    /// Every known party and its static token.
    pub dummy_auth_tokens: HashMap<Address, String>,
    /// The escrow for which tokens are issued and claims are verified.
    pub escrow: Address,
}

/// Authentication with static tokens, for development & tests.
///
/// Claims are still verified using [`ClaimAuthorizer`],
/// only the authentication is done with static tokens.
#[derive(Debug, Clone)]
pub struct Dummy {
    identity: Address,
    /// address => token
    tokens: HashMap<Address, String>,
    authorizer: ClaimAuthorizer,
}

impl Dummy {
    pub fn init(opts: Options) -> Self {
        Self {
            identity: opts.dummy_identity,
            tokens: opts.dummy_auth_tokens,
            authorizer: ClaimAuthorizer::new(opts.escrow),
        }
    }

    /// Builds the authentication token of this identity as:
    /// `{Auth token}:escrow:{Escrow address}`
    pub fn get_auth(&self, intended_for: Address) -> Result<String, Error> {
        let token = self.tokens.get(&self.identity).cloned().ok_or_else(|| {
            Error::authentication(format!("{} has no static token", self.identity))
        })?;

        Ok(HeaderToken {
            token,
            escrow: intended_for.to_checksum(),
        }
        .to_string())
    }
}

impl Locked for Dummy {
    type Error = Error;

    fn whoami(&self) -> Address {
        self.identity
    }

    fn verify_claim(
        &self,
        signer: Address,
        amount: U256,
        signature: &[u8],
    ) -> Result<bool, Error> {
        self.authorizer
            .authorize(signer, amount, signature)
            .map_err(Error::claim_verification)
    }

    /// Parses a [`HeaderToken`], e.g.
    /// `AUTH_awesomeSender:escrow:0x2bDeAFAE53940669DaA6F519373f686c1f3d3393`,
    /// and looks up whose static token it is.
    fn session_from_token(&self, header_token: &str) -> Result<Session, Error> {
        let header_token = header_token.parse::<HeaderToken>().map_err(|_parse| {
            Error::authentication(format!("Dummy Authentication token format should be in the format: `{{Auth Token}}:escrow:{{Escrow address}}` but '{header_token}' was provided"))
        })?;

        let escrow = header_token
            .escrow
            .parse::<Address>()
            .map_err(Error::authentication)?;

        if escrow != self.authorizer.escrow() {
            return Err(Error::authentication(format!(
                "Token is intended for escrow {escrow} instead of {}",
                self.authorizer.escrow()
            )));
        }

        let uid = self
            .tokens
            .iter()
            .find_map(|(address, token)| (token == &header_token.token).then_some(*address))
            .ok_or_else(|| {
                Error::authentication(format!("Unknown token: {}", header_token.token))
            })?;

        // static tokens never expire
        Ok(Session::new(uid, 0))
    }
}

/// `{Auth token}:escrow:{Escrow address}`
#[derive(Debug, Clone, Display, FromStr)]
#[display("{token}:escrow:{escrow}")]
pub struct HeaderToken {
    pub token: String,
    pub escrow: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Kind;
    use pretty_assertions::assert_eq;
    use primitives::test_util::{CONFIG, FUNDER, OTHER_CONTRACT, OUTSIDER};

    fn dummy(identity: Address) -> Dummy {
        Dummy::init(Options {
            dummy_identity: identity,
            dummy_auth_tokens: vec![
                (*FUNDER, "AUTH_funder".to_string()),
                (*OUTSIDER, "AUTH_outsider".to_string()),
            ]
            .into_iter()
            .collect(),
            escrow: CONFIG.contract,
        })
    }

    #[test]
    fn get_auth_and_session_from_token() {
        let funder_client = dummy(*FUNDER);

        let token = funder_client
            .get_auth(CONFIG.contract)
            .expect("Should get auth");
        assert_eq!(
            format!("AUTH_funder:escrow:{}", CONFIG.contract.to_checksum()),
            token
        );

        // any other client should be able to verify the token
        let session = dummy(*OUTSIDER)
            .session_from_token(&token)
            .expect("Should create session");
        assert_eq!(Session::new(*FUNDER, 0), session);
    }

    #[test]
    fn rejects_unknown_malformed_and_foreign_tokens() {
        let client = dummy(*FUNDER);

        let unknown = format!("AUTH_unknown:escrow:{}", CONFIG.contract);
        let malformed = "AUTH_funder";
        let foreign = format!("AUTH_funder:escrow:{}", *OTHER_CONTRACT);

        for token in [unknown.as_str(), malformed, foreign.as_str()] {
            let error = client
                .session_from_token(token)
                .expect_err("Should reject token");
            assert_eq!(Kind::Authentication, error.kind());
        }
    }

    #[test]
    fn no_auth_token_for_identity() {
        let client = dummy(CONFIG.token);

        assert!(client.get_auth(CONFIG.contract).is_err());
    }
}
