//! Minhas Finanças is a personal finance manager.
//!
//! Users record the money they earn and spend each month as transactions,
//! follow each one from pending to confirmed or cancelled, and search their
//! history.
//!
//! This library provides the services that validate and store users and
//! transactions, plus a SQLite backend for them.
//!
//! ```
//! use rusqlite::Connection;
//! use rust_decimal::Decimal;
//! use minhas_financas::{
//!     PasswordHash, Transaction, TransactionService, TransactionStatus, TransactionType, User,
//!     UserService, db::initialize,
//!     stores::sqlite::{SQLiteTransactionStore, SQLiteUserStore},
//! };
//!
//! let connection = Connection::open_in_memory().unwrap();
//! initialize(&connection).unwrap();
//!
//! let users = UserService::new(SQLiteUserStore::new(&connection));
//! let user = users
//!     .register(User::build("Maria", "maria@email.com", PasswordHash::new("senha", 4).unwrap()))
//!     .unwrap();
//!
//! let transactions = TransactionService::new(SQLiteTransactionStore::new(&connection));
//! let salary = transactions
//!     .save(
//!         Transaction::build("Salary")
//!             .month(1)
//!             .year(2020)
//!             .user_id(user.id)
//!             .value(Decimal::from(10))
//!             .transaction_type(TransactionType::Income)
//!             .finalize(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(salary.status, TransactionStatus::Pending);
//! ```

#![warn(missing_docs)]

mod config;
pub mod db;
mod error;
mod logging;
mod password;
pub mod stores;
pub mod transaction;
pub mod user;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{AuthenticationError, BusinessRule, Error};
pub use logging::setup_logging;
pub use password::PasswordHash;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionFilter, TransactionId, TransactionService,
    TransactionStatus, TransactionType,
};
pub use user::{User, UserBuilder, UserID, UserService};
