use std::path::Path;

use rusqlite::Connection;
use sqlmigrate_common::{Error, Result};
use tracing::debug;

/// Pragmas applied to every connection before a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub foreign_keys: bool,
    pub journal_mode: Option<String>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            foreign_keys: true,
            journal_mode: None,
        }
    }
}

/// Open (creating if absent) the SQLite database at `path`.
pub fn open_database(path: &Path, options: &ConnectionOptions) -> Result<Connection> {
    debug!("opening database at {}", path.display());
    let conn = Connection::open(path).map_err(|e| {
        Error::Database(format!("failed to open database {}: {e}", path.display()))
    })?;

    apply_pragmas(&conn, options)?;
    Ok(conn)
}

pub fn open_in_memory(options: &ConnectionOptions) -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Database(format!("failed to open in-memory database: {e}")))?;

    apply_pragmas(&conn, options)?;
    Ok(conn)
}

fn apply_pragmas(conn: &Connection, options: &ConnectionOptions) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", options.foreign_keys)
        .map_err(|e| Error::Database(format!("failed to set foreign_keys: {e}")))?;

    if let Some(mode) = &options.journal_mode {
        let applied: String = conn
            .pragma_update_and_check(None, "journal_mode", mode, |row| row.get(0))
            .map_err(|e| Error::Database(format!("failed to set journal_mode: {e}")))?;
        debug!("journal_mode = {applied}");
    }

    Ok(())
}
