//! Defines the crate level error type and its conversions from storage errors.

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The input broke a business rule, e.g. a transaction field was invalid
    /// or an email address is already taken.
    ///
    /// These errors are safe to show to the user as is.
    #[error(transparent)]
    BusinessRule(#[from] BusinessRule),

    /// The credentials used to log in were rejected.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// Tried to update or delete a transaction that has not been saved yet.
    ///
    /// This indicates a programming error in the caller rather than bad input.
    #[error("the transaction has no ID, save it before updating or deleting it")]
    MissingId,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging.
    #[error("hashing failed: {0}")]
    HashingError(String),
}

/// A business rule that a transaction or user failed to satisfy.
///
/// The messages are written for the end user.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum BusinessRule {
    /// The description is missing or blank.
    #[error("Enter a valid description.")]
    InvalidDescription,

    /// The month is outside 1 to 12.
    #[error("Enter a valid month.")]
    InvalidMonth,

    /// The year does not have exactly four digits.
    #[error("Enter a valid year.")]
    InvalidYear,

    /// There is no owning user, or the user may not own transactions.
    #[error("Enter a user.")]
    InvalidUser,

    /// The value is missing, zero or negative.
    #[error("Enter a valid value.")]
    InvalidValue,

    /// The transaction type was not set.
    #[error("Enter a transaction type.")]
    MissingType,

    /// Another user already registered with the email address.
    #[error("A user with this email already exists.")]
    DuplicateEmail,

    /// The password is longer than bcrypt can hash without truncating it.
    #[error("Enter a password of at most 71 bytes.")]
    PasswordTooLong,
}

/// Why a log in attempt failed.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    /// No user is registered with the given email.
    #[error("no user found for the given email")]
    UserNotFound,

    /// The user exists but the password did not match.
    #[error("invalid password")]
    InvalidPassword,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    && desc.ends_with("user.email") =>
            {
                BusinessRule::DuplicateEmail.into()
            }
            // The owning user does not exist.
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                BusinessRule::InvalidUser.into()
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
