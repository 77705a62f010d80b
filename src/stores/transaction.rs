//! Defines the transaction store trait.

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, TransactionId},
};

/// Handles the creation, retrieval, replacement and removal of transactions.
pub trait TransactionStore {
    /// Insert `transaction` and return the stored copy with its new ID.
    ///
    /// Any ID already set on `transaction` is ignored.
    fn create(&self, transaction: &Transaction) -> Result<Transaction, Error>;

    /// Replace every field of the stored transaction with the ID of `transaction`.
    ///
    /// Returns [Error::MissingId] if `transaction` has no ID and
    /// [Error::UpdateMissingTransaction] if no transaction has that ID.
    fn update(&self, transaction: &Transaction) -> Result<Transaction, Error>;

    /// Remove the transaction with `id`.
    ///
    /// Returns [Error::DeleteMissingTransaction] if no transaction has that ID.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;

    /// Retrieve a transaction from the store.
    ///
    /// Returns [Error::NotFound] if no transaction has that ID.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve the transactions that match `filter`, ordered by ID.
    fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error>;
}
