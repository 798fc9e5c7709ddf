pub mod sqlite;
pub mod tables;

pub use sqlite::Database;

use thiserror::Error;

/// Typed storage error. `NotFound` is the "row absent" condition; anything
/// else coming out of the driver is an opaque storage failure.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("no matching record")]
    NotFound,

    #[error("sqlite error: {0}")]
    Sqlite(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound,
            other => DbError::Sqlite(other),
        }
    }
}
