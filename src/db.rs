/*! This module defines the traits shared by the SQLite stores and sets up the application's database. */

use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    stores::sqlite::{SQLiteTransactionStore, SQLiteUserStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table for the model if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
///
/// # Examples
/// ```
/// use rusqlite::{Connection, Row};
///
/// use minhas_financas::db::{CreateTable, MapRow};
///
/// struct Foo {
///     id: i64,
///     desc: String,
/// }
///
/// impl CreateTable for Foo {
///     fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
///         connection.execute(
///             "CREATE TABLE foo (id INTEGER PRIMARY KEY, desc TEXT NOT NULL)",
///             (),
///         )?;
///
///         Ok(())
///     }
/// }
///
/// impl MapRow for Foo {
///     type ReturnType = Self;
///
///     fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self, rusqlite::Error> {
///         Ok(Self {
///             id: row.get(offset)?,
///             desc: row.get(offset + 1)?,
///         })
///     }
/// }
///
/// let connection = Connection::open_in_memory().unwrap();
/// Foo::create_table(&connection).unwrap();
/// connection
///     .execute("INSERT INTO foo (id, desc) VALUES (1, 'bar')", ())
///     .unwrap();
///
/// let foo = connection
///     .query_row("SELECT id, desc FROM foo", [], Foo::map_row)
///     .unwrap();
///
/// assert_eq!(foo.id, 1);
/// assert_eq!(foo.desc, "bar");
/// ```
pub trait MapRow {
    /// The type a row is converted into.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, starting at column `offset`.
    ///
    /// Use this when the model's columns follow other columns, e.g. in a join.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for the domain models and turn on foreign key checks.
///
/// Existing tables and their data are left untouched, so this is safe to call
/// on every start up.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Has no effect inside a transaction, so it must come first.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    SQLiteUserStore::create_table(&transaction)?;
    SQLiteTransactionStore::create_table(&transaction)?;

    transaction.commit()?;

    tracing::debug!("Database initialized");

    Ok(())
}
