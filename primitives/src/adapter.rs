use serde::{Deserialize, Serialize};

use crate::Address;

/// A verified caller.
///
/// Only an authentication adapter should create a [`Session`],
/// after verifying the caller's credentials (e.g. a signed token).
/// Every state-mutating escrow operation is performed on behalf of [`Session::uid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub era: i64,
    pub uid: Address,
}

impl Session {
    pub fn new(uid: Address, era: i64) -> Self {
        Self { era, uid }
    }
}
