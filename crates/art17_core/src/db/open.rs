//! Connection opening.
//!
//! Each open logs one `db_open` line with the outcome and elapsed time.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(3);

enum DbTarget {
    File(PathBuf),
    Memory,
}

impl DbTarget {
    fn connect(&self) -> rusqlite::Result<Connection> {
        match self {
            Self::File(path) => Connection::open(path),
            Self::Memory => Connection::open_in_memory(),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Memory => ":memory:".to_string(),
        }
    }
}

/// Opens (creating if needed) the database file at `path` and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_target(DbTarget::File(path.as_ref().to_path_buf()))
}

/// Opens a migrated in-memory database. Contents vanish with the connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_target(DbTarget::Memory)
}

fn open_target(target: DbTarget) -> DbResult<Connection> {
    let started = Instant::now();
    let result: DbResult<Connection> = target.connect().map_err(Into::into).and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    let elapsed_ms = started.elapsed().as_millis();
    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok target={} duration_ms={elapsed_ms}",
            target.label()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={} duration_ms={elapsed_ms} error={err}",
            target.label()
        ),
    }
    result
}
