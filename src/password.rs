//! This file defines the salted and hashed password stored for each user.

use std::fmt::Display;

use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};
use serde::{Deserialize, Serialize};

use crate::{BusinessRule, Error};

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// The longest password, in bytes, that is hashed in full.
    ///
    /// bcrypt only reads the first 72 bytes of its input, including a null terminator.
    pub const MAX_PASSWORD_BYTES: usize = 71;

    /// Hash `raw_password` with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// A value of at least 12 is recommended. Pass in [PasswordHash::DEFAULT_COST] to use the recommended cost.
    ///
    /// # Errors
    ///
    /// This function will return a [BusinessRule::PasswordTooLong] error if
    /// `raw_password` is longer than [PasswordHash::MAX_PASSWORD_BYTES], or an
    /// [Error::HashingError] if the password could not be hashed.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        non_truncating_hash(raw_password, cost)
            .map(Self)
            .map_err(|error| match error {
                BcryptError::Truncation(_) => BusinessRule::PasswordTooLong.into(),
                error => Error::HashingError(error.to_string()),
            })
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid hash is provided it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    ///
    /// The comparison is case-sensitive and covers every byte of
    /// `raw_password`. A password longer than [PasswordHash::MAX_PASSWORD_BYTES]
    /// never matches, since no such password can have been hashed.
    ///
    /// # Errors
    ///
    /// Returns an [Error::HashingError] if the stored hash is malformed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        match non_truncating_verify(raw_password, &self.0) {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(error) => Err(Error::HashingError(error.to_string())),
        }
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
