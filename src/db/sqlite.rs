//! SQLite connection handling and schema initialization.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::Mutex;

/// Database wrapping a single SQLite connection. Shared across actix workers
/// behind an `Arc`; the mutex serializes statements, SQLite provides the
/// transactional guarantees.
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file and initialize the schema.
    pub fn new(database_url: &str) -> SqliteResult<Self> {
        if let Some(parent) = Path::new(database_url).parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(database_url)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init_tables(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database for tests.
    #[cfg(test)]
    pub fn new_in_memory() -> SqliteResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // The implicit SQLite rowid is the identity key, matching the wire name.
    fn init_tables(conn: &Connection) -> SqliteResult<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                username TEXT NOT NULL,
                body TEXT NOT NULL DEFAULT '',
                created_timestamp REAL NOT NULL,
                updated_timestamp REAL NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}
