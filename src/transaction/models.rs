//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::user::UserID;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money earned, e.g. a salary.
    Income,
    /// Money spent, e.g. rent.
    Expense,
}

impl TransactionType {
    /// The name used when storing the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

/// Where a transaction is in its life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Recorded but not confirmed yet. Every new transaction starts here.
    #[default]
    Pending,
    /// The money actually moved.
    Confirmed,
    /// The transaction will not happen.
    Cancelled,
}

impl TransactionStatus {
    /// The name used when storing the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Confirmed => "CONFIRMED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

/// A string did not name a known transaction type or status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction {kind} \"{value}\"")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl FromStr for TransactionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            _ => Err(UnknownVariant {
                kind: "type",
                value: s.to_owned(),
            }),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "CONFIRMED" => Ok(TransactionStatus::Confirmed),
            "CANCELLED" => Ok(TransactionStatus::Cancelled),
            _ => Err(UnknownVariant {
                kind: "status",
                value: s.to_owned(),
            }),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

impl ToSql for TransactionStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income ("lançamento") recorded against a user for a month and year.
///
/// Fields that are optional here are required before the transaction can be
/// saved, see [validate](crate::transaction::validate). To create a new
/// `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, `None` until it has been saved.
    pub id: Option<TransactionId>,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The month the transaction belongs to, 1 to 12.
    pub month: u32,
    /// The four digit year the transaction belongs to.
    pub year: i32,
    /// The user that owns the transaction.
    pub user_id: Option<UserID>,
    /// The amount of money earned or spent, always positive.
    pub value: Option<Decimal>,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Where the transaction is in its life.
    pub status: TransactionStatus,
    /// When the transaction was recorded.
    pub registration_date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(description: &str) -> TransactionBuilder {
        TransactionBuilder::new(description)
    }
}

/// A builder for creating [Transaction] instances.
///
/// Month and year default to zero and the owner, value and type to `None`,
/// none of which pass validation, so forgetting a setter is caught on save.
/// The registration date defaults to today (UTC).
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use minhas_financas::{Transaction, TransactionStatus, TransactionType, UserID};
///
/// let transaction = Transaction::build("Salary")
///     .month(1)
///     .year(2020)
///     .user_id(UserID::new(1))
///     .value(Decimal::from(10))
///     .transaction_type(TransactionType::Income)
///     .finalize();
///
/// assert_eq!(transaction.id, None);
/// assert_eq!(transaction.status, TransactionStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Start building a transaction with `description`.
    pub fn new(description: &str) -> Self {
        Self {
            transaction: Transaction {
                id: None,
                description: description.to_owned(),
                month: 0,
                year: 0,
                user_id: None,
                value: None,
                transaction_type: None,
                status: TransactionStatus::default(),
                registration_date: OffsetDateTime::now_utc().date(),
            },
        }
    }

    /// Set the ID, for transactions that already exist in a store.
    pub fn id(mut self, id: TransactionId) -> Self {
        self.transaction.id = Some(id);
        self
    }

    /// Set the month, 1 to 12.
    pub fn month(mut self, month: u32) -> Self {
        self.transaction.month = month;
        self
    }

    /// Set the four digit year.
    pub fn year(mut self, year: i32) -> Self {
        self.transaction.year = year;
        self
    }

    /// Set the owning user.
    pub fn user_id(mut self, user_id: UserID) -> Self {
        self.transaction.user_id = Some(user_id);
        self
    }

    /// Set the amount of money earned or spent.
    pub fn value(mut self, value: Decimal) -> Self {
        self.transaction.value = Some(value);
        self
    }

    /// Set whether the money was earned or spent.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction.transaction_type = Some(transaction_type);
        self
    }

    /// Set the status.
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.transaction.status = status;
        self
    }

    /// Set the date the transaction was recorded.
    pub fn registration_date(mut self, date: Date) -> Self {
        self.transaction.registration_date = date;
        self
    }

    /// Finish building the transaction.
    pub fn finalize(self) -> Transaction {
        self.transaction
    }
}
