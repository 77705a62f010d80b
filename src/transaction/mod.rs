//! Transactions ("lançamentos"): the money a user earns or spends in a month.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The rules a transaction must satisfy before it is stored
//! - `TransactionFilter` for searching stored transactions
//! - `TransactionService`, which ties the rules to a store

mod filter;
mod models;
mod service;
mod validation;

pub use filter::TransactionFilter;
pub use models::{
    Transaction, TransactionBuilder, TransactionId, TransactionStatus, TransactionType,
    UnknownVariant,
};
pub use service::TransactionService;
pub use validation::validate;
