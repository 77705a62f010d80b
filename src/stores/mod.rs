//! Contains traits and implementations for objects that store the domain models.

mod transaction;
mod user;

pub mod sqlite;

pub use transaction::TransactionStore;
pub use user::UserStore;

use crate::Error;

/// A store that can group several operations into one all-or-nothing unit of work.
pub trait Atomic {
    /// Run `work` inside a storage transaction.
    ///
    /// The transaction is committed if `work` returns `Ok` and rolled back if it
    /// returns `Err`. Units of work must not be nested.
    ///
    /// # Errors
    ///
    /// Returns the error from `work`, or an error if the transaction could not be
    /// started or committed.
    fn atomically<T>(&self, work: impl FnOnce(&Self) -> Result<T, Error>) -> Result<T, Error>;
}
