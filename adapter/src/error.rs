use parse_display::Display;
use std::error::Error as StdError;
use thiserror::Error;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// The error of any [`Locked`](crate::prelude::Locked) client, regardless of its implementation.
///
/// The [`Kind`] tells which step failed, the source carries the client's own error.
#[derive(Debug, Error)]
#[error("{kind}: {source}")]
pub struct Error {
    kind: Kind,
    #[source]
    source: BoxError,
}

impl Error {
    fn new(kind: Kind, source: impl Into<BoxError>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// Reading or decrypting the wallet failed.
    pub fn wallet(source: impl Into<BoxError>) -> Self {
        Self::new(Kind::Wallet, source)
    }

    /// The caller's credentials were rejected.
    pub fn authentication(source: impl Into<BoxError>) -> Self {
        Self::new(Kind::Authentication, source)
    }

    /// A claim or a token could not be signed.
    pub fn signing(source: impl Into<BoxError>) -> Self {
        Self::new(Kind::Signing, source)
    }

    /// A claim signature could not be checked at all, e.g. it's malformed.
    pub fn claim_verification(source: impl Into<BoxError>) -> Self {
        Self::new(Kind::ClaimVerification, source)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Wallet,
    Authentication,
    Signing,
    #[display("Claim verification")]
    ClaimVerification,
}
