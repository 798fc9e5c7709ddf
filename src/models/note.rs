use serde::{Deserialize, Serialize};

/// A persisted note. `rowid` is the SQLite identity key and the sole
/// lookup key; both timestamps are fractional seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub rowid: i64,
    pub username: String,
    pub body: String,
    pub created_timestamp: f64,
    pub updated_timestamp: f64,
}

/// Response wrapper for `GET /notes`
#[derive(Debug, Serialize)]
pub struct NoteList {
    pub notes: Vec<Note>,
}

/// Inbound payload for create and update. Timestamps are always
/// server-assigned; any client-supplied timestamp fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteData {
    pub username: String,
    #[serde(default)]
    pub body: String,
}

impl NoteData {
    /// Username must be non-empty. Checked before any store call.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.is_empty() {
            return Err("username must be non empty");
        }
        Ok(())
    }
}
