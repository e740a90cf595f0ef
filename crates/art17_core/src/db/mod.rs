//! SQLite backing for `SqliteKvStore`.
//!
//! # Responsibility
//! - Open file or in-memory connections with the key-value schema in place.
//! - Track the schema version in `PRAGMA user_version`.
//!
//! # Invariants
//! - A connection handed out by `open_db*` is fully migrated.
//! - A database written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Stored `user_version` is above what this build knows.
    SchemaTooNew { found: u32, supported: u32 },
    /// Connection is open but the key-value table is missing.
    MissingSchema(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "schema version {found} was written by a newer build (this build supports {supported})"
            ),
            Self::MissingSchema(table) => {
                write!(f, "table `{table}` not found; open the database with open_db")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
