//! Defines a user of the application and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::PasswordHash;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// The ID reserved for the placeholder that replaces deleted users.
    ///
    /// Transactions must not be assigned to this user.
    pub const DELETED: UserID = UserID(9900);

    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Whether the user may be recorded as the owner of a transaction.
    pub fn can_own_transactions(&self) -> bool {
        *self != Self::DELETED
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user of the application.
///
/// To create a `User` call [User::build] and register the builder with
/// [UserService::register](crate::UserService::register).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The email address the user logs in with. Unique across all users.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

impl User {
    /// Build a new user.
    ///
    /// Shortcut for [UserBuilder::new] for discoverability.
    pub fn build(name: &str, email: &str, password_hash: PasswordHash) -> UserBuilder {
        UserBuilder::new(name, email, password_hash)
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct UserBuilder {
    /// The user's display name.
    pub name: String,
    /// The email address the user logs in with.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

impl UserBuilder {
    /// Create a builder for a new user.
    pub fn new(name: &str, email: &str, password_hash: PasswordHash) -> Self {
        Self {
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash,
        }
    }

    /// Attach the ID assigned by a store to produce the stored [User].
    pub fn finalize(self, id: UserID) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}
