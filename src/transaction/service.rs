//! Business operations on transactions: save, update, delete, search and status changes.

use crate::{
    Error,
    stores::{Atomic, TransactionStore},
    transaction::{
        Transaction, TransactionFilter, TransactionId, TransactionStatus, validate,
    },
};

/// Validates transactions and persists them through a [TransactionStore].
///
/// Every write runs as one unit of work: if validation or storage fails,
/// nothing is written.
#[derive(Debug, Clone)]
pub struct TransactionService<S> {
    store: S,
}

impl<S> TransactionService<S>
where
    S: TransactionStore + Atomic,
{
    /// Create a service that persists transactions in `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and store a new transaction.
    ///
    /// The status is always reset to [TransactionStatus::Pending], whatever
    /// the caller set.
    ///
    /// # Errors
    ///
    /// Returns an [Error::BusinessRule] if validation fails, in which case the
    /// store is never written to.
    pub fn save(&self, mut transaction: Transaction) -> Result<Transaction, Error> {
        let saved = self.store.atomically(|store| {
            validate(&transaction).inspect_err(|error| {
                tracing::debug!("Rejected new transaction: {error}");
            })?;
            transaction.status = TransactionStatus::Pending;

            store.create(&transaction)
        })?;

        tracing::info!("Saved transaction {:?}", saved.id);

        Ok(saved)
    }

    /// Validate `transaction` and replace the stored copy with it.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::MissingId] if `transaction` was never saved,
    /// - an [Error::BusinessRule] if validation fails,
    /// - [Error::UpdateMissingTransaction] if the ID is not in the store.
    pub fn update(&self, transaction: &Transaction) -> Result<Transaction, Error> {
        let id = transaction.id.ok_or(Error::MissingId)?;

        let updated = self.store.atomically(|store| {
            validate(transaction).inspect_err(|error| {
                tracing::debug!("Rejected update to transaction {id}: {error}");
            })?;

            store.update(transaction)
        })?;

        tracing::info!("Updated transaction {id}");

        Ok(updated)
    }

    /// Remove `transaction` from the store.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingId] if `transaction` was never saved, or
    /// [Error::DeleteMissingTransaction] if the ID is not in the store.
    pub fn delete(&self, transaction: &Transaction) -> Result<(), Error> {
        let id = transaction.id.ok_or(Error::MissingId)?;

        self.store.atomically(|store| store.delete(id))?;

        tracing::info!("Deleted transaction {id}");

        Ok(())
    }

    /// Find the stored transactions that match `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store could not be queried.
    pub fn search(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let transactions = self.store.find(filter)?;

        tracing::debug!("Search {filter:?} matched {} transactions", transactions.len());

        Ok(transactions)
    }

    /// Set the status of `transaction` and store the whole record.
    ///
    /// The new status is kept on `transaction` even if the update fails.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [TransactionService::update].
    pub fn update_status(
        &self,
        transaction: &mut Transaction,
        status: TransactionStatus,
    ) -> Result<Transaction, Error> {
        transaction.status = status;

        self.update(transaction)
    }

    /// Retrieve the transaction with `id`, or `None` if there is no such transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store could not be queried.
    pub fn get_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        match self.store.get(id) {
            Ok(transaction) => Ok(Some(transaction)),
            Err(Error::NotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Check that `transaction` may be stored.
    ///
    /// See [validate] for the rules.
    pub fn validate(&self, transaction: &Transaction) -> Result<(), Error> {
        validate(transaction)
    }
}
