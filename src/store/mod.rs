//! Persistence Layer
//! Mission: SQLite-backed CRUD for users, events, items, reminders, locations

pub mod events;
pub mod items;
pub mod locations;
pub mod models;
pub mod reminders;
pub mod users;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::sync::Arc;
use tracing::info;

pub use models::{Event, Item, Location, NewEvent, NewItem, NewReminder, NewUser, Reminder, User};

/// Store-level failures the handlers must discriminate.
#[derive(Debug)]
pub enum StoreError {
    /// Unique-email constraint fired on user creation.
    EmailTaken,
    /// A pre-checked foreign key target was absent at write time.
    MissingReference { table: &'static str, id: i64 },
    /// SQLite's own foreign-key enforcement rejected the statement
    /// (e.g. deleting a row something still references).
    ReferentialIntegrity,
    /// Update/delete targeted a row that does not exist.
    NotFound,
    Sqlite(rusqlite::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::EmailTaken => write!(f, "email already registered"),
            StoreError::MissingReference { table, id } => {
                write!(f, "referenced {table} {id} does not exist")
            }
            StoreError::ReferentialIntegrity => write!(f, "foreign key constraint violated"),
            StoreError::NotFound => write!(f, "row not found"),
            StoreError::Sqlite(e) => write!(f, "database error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, Some(msg)) = &e {
            if err.code == rusqlite::ErrorCode::ConstraintViolation {
                if msg.contains("users.email") {
                    return StoreError::EmailTaken;
                }
                if msg.contains("FOREIGN KEY") {
                    return StoreError::ReferentialIntegrity;
                }
            }
        }
        StoreError::Sqlite(e)
    }
}

/// Relational store over a single SQLite connection. One handler call maps
/// to one lock acquisition; the guard drops on every exit path.
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database and apply the schema idempotently.
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database at {db_path}"))?;

        conn.pragma_update(None, "foreign_keys", true)
            .context("Failed to enable foreign key enforcement")?;

        init_schema(&conn).context("Failed to initialize schema")?;

        info!("database ready at {db_path}");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub(crate) fn lock(&self) -> parking_lot::MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

/// Create the five planner tables if absent. Safe to run on every startup.
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS locations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            occupation TEXT,
            fcm_token TEXT,
            location_id INTEGER REFERENCES locations(id)
        );

        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            location_id INTEGER NOT NULL REFERENCES locations(id),
            user_id INTEGER REFERENCES users(id)
        );

        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY,
            event_id INTEGER NOT NULL REFERENCES events(id),
            is_checked INTEGER NOT NULL DEFAULT 0,
            notes TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            title TEXT NOT NULL,
            schedule_date TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            message TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_events_user ON events(user_id);
        CREATE INDEX IF NOT EXISTS idx_items_event ON items(event_id);
        CREATE INDEX IF NOT EXISTS idx_reminders_user ON reminders(user_id);",
    )
}

/// Fail with `MissingReference` unless `id` exists in `table`.
fn ensure_exists(conn: &Connection, table: &'static str, id: i64) -> Result<(), StoreError> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
    match conn.query_row(&sql, params![id], |_| Ok(())) {
        Ok(()) => Ok(()),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            Err(StoreError::MissingReference { table, id })
        }
        Err(e) => Err(StoreError::Sqlite(e)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_schema_creation_is_idempotent() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();

        // Opening twice must not fail or clobber data.
        let store = Store::open(db_path).unwrap();
        let location = store.create_location("Kyoto").unwrap();
        drop(store);

        let store = Store::open(db_path).unwrap();
        let found = store.location_by_id(location.id).unwrap();
        assert_eq!(found.unwrap().name, "Kyoto");
    }

    #[test]
    fn test_ensure_exists_reports_table_and_id() {
        let (store, _temp) = test_util::test_store();
        let conn = store.lock();

        match ensure_exists(&conn, "locations", 42) {
            Err(StoreError::MissingReference { table, id }) => {
                assert_eq!(table, "locations");
                assert_eq!(id, 42);
            }
            other => panic!("expected MissingReference, got {other:?}"),
        }
    }
}
