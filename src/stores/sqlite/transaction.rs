//! Implements a SQLite backed transaction store.

use std::str::FromStr;

use rusqlite::{
    Connection, Row, params_from_iter,
    types::{Type, Value},
};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    stores::{Atomic, TransactionStore, sqlite::run_atomically},
    transaction::{Transaction, TransactionFilter, TransactionId},
    user::UserID,
};

const COLUMNS: &str =
    "id, description, month, year, user_id, value, type, status, registration_date";

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone, Copy)]
pub struct SQLiteTransactionStore<'c> {
    connection: &'c Connection,
}

impl<'c> SQLiteTransactionStore<'c> {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: &'c Connection) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore<'_> {
    /// Insert `transaction` into the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [BusinessRule::InvalidUser](crate::BusinessRule::InvalidUser) if the owning user does not exist,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, transaction: &Transaction) -> Result<Transaction, Error> {
        self.connection.execute(
            "INSERT INTO \"transaction\" (description, month, year, user_id, value, type, status, registration_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            (
                &transaction.description,
                transaction.month,
                transaction.year,
                transaction.user_id.map(|id| id.as_i64()),
                transaction.value.map(|value| value.to_string()),
                transaction.transaction_type,
                transaction.status,
                transaction.registration_date,
            ),
        )?;

        let mut stored = transaction.clone();
        stored.id = Some(self.connection.last_insert_rowid());

        Ok(stored)
    }

    /// Overwrite the stored row that has the same ID as `transaction`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingId] if `transaction` has no ID,
    /// - [Error::UpdateMissingTransaction] if there is no row with the ID,
    /// - [BusinessRule::InvalidUser](crate::BusinessRule::InvalidUser) if the owning user does not exist,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&self, transaction: &Transaction) -> Result<Transaction, Error> {
        let id = transaction.id.ok_or(Error::MissingId)?;

        let rows_affected = self.connection.execute(
            "UPDATE \"transaction\"
            SET description = ?1, month = ?2, year = ?3, user_id = ?4, value = ?5, type = ?6, status = ?7, registration_date = ?8
            WHERE id = ?9",
            (
                &transaction.description,
                transaction.month,
                transaction.year,
                transaction.user_id.map(|id| id.as_i64()),
                transaction.value.map(|value| value.to_string()),
                transaction.transaction_type,
                transaction.status,
                transaction.registration_date,
                id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::UpdateMissingTransaction);
        }

        Ok(transaction.clone())
    }

    /// Delete the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a [Error::DeleteMissingTransaction] if there
    /// is no row with the ID, or [Error::SqlError] if there is some other SQL error.
    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingTransaction);
        }

        Ok(())
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.connection
            .prepare(&format!("SELECT {COLUMNS} FROM \"transaction\" WHERE id = :id"))?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Query for transactions in the database.
    ///
    /// Exact matches are filtered in SQL. The description, which matches
    /// ignoring case, and the value, which matches numerically, are checked
    /// against the remaining rows.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn find(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![format!("SELECT {COLUMNS} FROM \"transaction\"")];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        let exact_matches = [
            ("id", filter.id.map(Value::Integer)),
            ("month", filter.month.map(|month| Value::Integer(month.into()))),
            ("year", filter.year.map(|year| Value::Integer(year.into()))),
            ("user_id", filter.user_id.map(|id| Value::Integer(id.as_i64()))),
            (
                "type",
                filter
                    .transaction_type
                    .map(|kind| Value::Text(kind.as_str().to_owned())),
            ),
            (
                "status",
                filter
                    .status
                    .map(|status| Value::Text(status.as_str().to_owned())),
            ),
            (
                "registration_date",
                filter
                    .registration_date
                    .map(|date| Value::Text(date.to_string())),
            ),
        ];

        for (column, value) in exact_matches {
            if let Some(value) = value {
                query_parameters.push(value);
                where_clause_parts.push(format!("{column} = ?{}", query_parameters.len()));
            }
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        query_string_parts.push("ORDER BY id ASC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        let transactions = self
            .connection
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions
            .into_iter()
            .filter(|transaction| filter.matches(transaction))
            .collect())
    }
}

impl Atomic for SQLiteTransactionStore<'_> {
    fn atomically<T>(&self, work: impl FnOnce(&Self) -> Result<T, Error>) -> Result<T, Error> {
        run_atomically(self.connection, self, work)
    }
}

impl CreateTable for SQLiteTransactionStore<'_> {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    description TEXT NOT NULL,
                    month INTEGER NOT NULL,
                    year INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    value TEXT NOT NULL,
                    type TEXT NOT NULL,
                    status TEXT NOT NULL,
                    registration_date TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore<'_> {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_value: String = row.get(offset + 5)?;
        let value = Decimal::from_str(&raw_value).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 5, Type::Text, Box::new(error))
        })?;

        Ok(Transaction {
            id: Some(row.get(offset)?),
            description: row.get(offset + 1)?,
            month: row.get(offset + 2)?,
            year: row.get(offset + 3)?,
            user_id: Some(UserID::new(row.get(offset + 4)?)),
            value: Some(value),
            transaction_type: Some(row.get(offset + 6)?),
            status: row.get(offset + 7)?,
            registration_date: row.get(offset + 8)?,
        })
    }
}
