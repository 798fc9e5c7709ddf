//! Note table operations

use chrono::Utc;
use rusqlite::{Row, params};

use super::super::{Database, DbError};
use crate::models::{Note, NoteData};

/// Current wall clock as fractional seconds since the Unix epoch.
fn unix_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        rowid: row.get(0)?,
        username: row.get(1)?,
        body: row.get(2)?,
        created_timestamp: row.get(3)?,
        updated_timestamp: row.get(4)?,
    })
}

impl Database {
    /// All notes, newest rowid first. An empty table is an empty vec.
    pub fn list_notes(&self) -> Result<Vec<Note>, DbError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT rowid, username, body, created_timestamp, updated_timestamp
             FROM notes ORDER BY rowid DESC",
        )?;
        let notes = stmt
            .query_map([], |row| note_from_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    /// Single note by rowid, `NotFound` when no row matches.
    pub fn get_note(&self, note_id: i64) -> Result<Note, DbError> {
        let conn = self.conn.lock().unwrap();

        let note = conn.query_row(
            "SELECT rowid, username, body, created_timestamp, updated_timestamp
             FROM notes WHERE rowid = ?1",
            params![note_id],
            note_from_row,
        )?;

        Ok(note)
    }

    /// Insert a note, assigning rowid and both timestamps from the server
    /// clock. Returns the fully populated note.
    pub fn create_note(&self, data: &NoteData) -> Result<Note, DbError> {
        let conn = self.conn.lock().unwrap();
        let now = unix_now();

        conn.execute(
            "INSERT INTO notes (username, body, created_timestamp, updated_timestamp)
             VALUES (?1, ?2, ?3, ?3)",
            params![data.username, data.body, now],
        )?;
        let rowid = conn.last_insert_rowid();

        Ok(Note {
            rowid,
            username: data.username.clone(),
            body: data.body.clone(),
            created_timestamp: now,
            updated_timestamp: now,
        })
    }

    /// Replace username/body and refresh `updated_timestamp`, preserving
    /// rowid and `created_timestamp`. `NotFound` if the row does not exist.
    pub fn update_note(&self, note_id: i64, data: &NoteData) -> Result<Note, DbError> {
        let conn = self.conn.lock().unwrap();
        let now = unix_now();

        let changed = conn.execute(
            "UPDATE notes SET username = ?1, body = ?2, updated_timestamp = ?3
             WHERE rowid = ?4",
            params![data.username, data.body, now, note_id],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound);
        }

        let note = conn.query_row(
            "SELECT rowid, username, body, created_timestamp, updated_timestamp
             FROM notes WHERE rowid = ?1",
            params![note_id],
            note_from_row,
        )?;

        Ok(note)
    }

    /// Hard delete. Deleting a rowid that does not exist is `NotFound`,
    /// keeping DELETE symmetrical with GET and PUT.
    pub fn delete_note(&self, note_id: i64) -> Result<(), DbError> {
        let conn = self.conn.lock().unwrap();

        let changed = conn.execute("DELETE FROM notes WHERE rowid = ?1", params![note_id])?;
        if changed == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_db() -> Database {
        Database::new_in_memory().expect("Failed to open in-memory database")
    }

    fn note_data(username: &str, body: &str) -> NoteData {
        NoteData {
            username: username.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let db = test_db();

        let created = db
            .create_note(&note_data("alice", "hello"))
            .expect("Failed to create note");
        assert_eq!(created.rowid, 1);
        assert_eq!(created.created_timestamp, created.updated_timestamp);

        let fetched = db.get_note(created.rowid).expect("Failed to get note");
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_list_orders_newest_first() {
        let db = test_db();

        for i in 1..=3 {
            db.create_note(&note_data("alice", &format!("note {}", i)))
                .expect("Failed to create note");
        }

        let notes = db.list_notes().expect("Failed to list notes");
        let rowids: Vec<i64> = notes.iter().map(|n| n.rowid).collect();
        assert_eq!(rowids, vec![3, 2, 1]);
    }

    #[test]
    fn test_list_empty_table_is_empty_vec() {
        let db = test_db();
        assert!(db.list_notes().expect("Failed to list notes").is_empty());
    }

    #[test]
    fn test_update_preserves_identity_and_creation_time() {
        let db = test_db();

        let created = db
            .create_note(&note_data("alice", "original"))
            .expect("Failed to create note");

        let updated = db
            .update_note(created.rowid, &note_data("bob", "revised"))
            .expect("Failed to update note");

        assert_eq!(updated.rowid, created.rowid);
        assert_eq!(updated.created_timestamp, created.created_timestamp);
        assert!(updated.updated_timestamp >= created.updated_timestamp);
        assert_eq!(updated.username, "bob");
        assert_eq!(updated.body, "revised");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let db = test_db();
        let err = db.get_note(999).unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let db = test_db();
        let err = db.update_note(999, &note_data("alice", "x")).unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let db = test_db();

        let created = db
            .create_note(&note_data("alice", "doomed"))
            .expect("Failed to create note");
        db.delete_note(created.rowid).expect("Failed to delete note");

        assert!(matches!(db.get_note(created.rowid), Err(DbError::NotFound)));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let db = test_db();
        assert!(matches!(db.delete_note(42), Err(DbError::NotFound)));
    }

    #[test]
    fn test_reopens_database_file() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join(".db").join("notes.db");
        let db_url = db_path.to_str().unwrap();

        let created = {
            let db = Database::new(db_url).expect("Failed to open database");
            db.create_note(&note_data("alice", "persisted"))
                .expect("Failed to create note")
        };

        let db = Database::new(db_url).expect("Failed to reopen database");
        let fetched = db.get_note(created.rowid).expect("Failed to get note");
        assert_eq!(fetched, created);
    }
}
