//! Logging in and registering users.

use crate::{
    AuthenticationError, BusinessRule, Error,
    stores::{Atomic, UserStore},
    user::{User, UserBuilder},
};

/// Authenticates and registers users through a [UserStore].
#[derive(Debug, Clone)]
pub struct UserService<S> {
    store: S,
}

impl<S> UserService<S>
where
    S: UserStore + Atomic,
{
    /// Create a service that keeps users in `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Check the credentials of a user trying to log in.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [AuthenticationError::UserNotFound] if no user has `email`,
    /// - [AuthenticationError::InvalidPassword] if `password` does not match,
    /// - [Error::HashingError] if the stored password hash is malformed.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, Error> {
        let user = match self.store.get_by_email(email) {
            Ok(user) => user,
            Err(Error::NotFound) => {
                tracing::warn!("Log in attempt for unknown email {email:?}");
                return Err(AuthenticationError::UserNotFound.into());
            }
            Err(error) => return Err(error),
        };

        if !user.password_hash.verify(password)? {
            tracing::warn!("Log in attempt with wrong password for user {}", user.id);
            return Err(AuthenticationError::InvalidPassword.into());
        }

        tracing::info!("User {} logged in", user.id);

        Ok(user)
    }

    /// Store a new user.
    ///
    /// # Errors
    ///
    /// Returns a [BusinessRule::DuplicateEmail] error if the email is already
    /// registered, in which case nothing is written.
    pub fn register(&self, builder: UserBuilder) -> Result<User, Error> {
        let user = self.store.atomically(|store| {
            Self::check_email_is_free(store, &builder.email)?;

            store.create(builder)
        })?;

        tracing::info!("Registered user {}", user.id);

        Ok(user)
    }

    /// Check that no user has registered with `email` yet.
    ///
    /// # Errors
    ///
    /// Returns a [BusinessRule::DuplicateEmail] error if the email is taken.
    pub fn validate_email(&self, email: &str) -> Result<(), Error> {
        Self::check_email_is_free(&self.store, email)
    }

    fn check_email_is_free(store: &S, email: &str) -> Result<(), Error> {
        if store.exists_by_email(email)? {
            tracing::debug!("Email {email:?} is already registered");
            return Err(BusinessRule::DuplicateEmail.into());
        }

        Ok(())
    }
}
