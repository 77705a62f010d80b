//! Defines the user store trait.

use crate::{
    Error,
    user::{User, UserBuilder, UserID},
};

/// Handles the creation and retrieval of User objects.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns a [BusinessRule::DuplicateEmail](crate::BusinessRule::DuplicateEmail)
    /// error if the email is already in use.
    fn create(&self, builder: UserBuilder) -> Result<User, Error>;

    /// Get a user by their ID.
    ///
    /// Returns [Error::NotFound] if no user with the given ID exists.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their email.
    ///
    /// Returns [Error::NotFound] if no user with the given email exists.
    fn get_by_email(&self, email: &str) -> Result<User, Error>;

    /// Whether any user has registered with `email`.
    fn exists_by_email(&self, email: &str) -> Result<bool, Error>;
}
