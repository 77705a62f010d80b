//! Settings shared by the command line tools.

use std::path::PathBuf;

use clap::Args;
use rusqlite::Connection;

use crate::{Error, PasswordHash, db::initialize};

/// Where the application keeps its data and logs, and how it hashes passwords.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct Config {
    /// File path to the SQLite database.
    #[arg(long, env = "FINANCAS_DB_PATH")]
    pub db_path: PathBuf,

    /// File to append debug logs to. Debug logs are not written if omitted.
    #[arg(long, env = "FINANCAS_LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// The bcrypt cost used when hashing new passwords.
    #[arg(long, default_value_t = PasswordHash::DEFAULT_COST)]
    pub password_cost: u32,
}

impl Config {
    /// Open the database at `db_path` and create any missing tables.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if the file cannot be opened or the schema
    /// cannot be created.
    pub fn open_database(&self) -> Result<Connection, Error> {
        let connection = Connection::open(&self.db_path)?;
        initialize(&connection)?;

        tracing::debug!("Opened database {}", self.db_path.display());

        Ok(connection)
    }
}
