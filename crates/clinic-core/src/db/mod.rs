//! Database layer for clinic records.

mod appointments;
mod doctors;
mod medical_records;
mod patients;
mod schema;

pub use schema::*;

use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use thiserror::Error;

use crate::models::ValidationError;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("The {0} has not been saved yet")]
    NotPersisted(&'static str),

    #[error("The {entity} is already saved with id {id}")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    #[error("The {entity} with id {id} is borrowed elsewhere and cannot be reloaded")]
    InstanceBorrowed { entity: &'static str, id: i64 },
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == ErrorCode::ConstraintViolation =>
            {
                DbError::Constraint(message.unwrap_or_else(|| code.to_string()))
            }
            other => DbError::Sqlite(other),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Connection settings applied when a database is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseOptions {
    /// Turn on `PRAGMA foreign_keys`. Off by default, matching SQLite.
    pub enforce_foreign_keys: bool,
}

/// Database connection wrapper.
///
/// One handle is opened at startup and lent to every repository. The
/// connection closes when the handle is dropped.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::open_with(path, DatabaseOptions::default())
    }

    /// Open database at path with explicit options.
    pub fn open_with<P: AsRef<Path>>(path: P, options: DatabaseOptions) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, options)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Self::open_in_memory_with(DatabaseOptions::default())
    }

    /// Create in-memory database with explicit options.
    pub fn open_in_memory_with(options: DatabaseOptions) -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, options)
    }

    fn from_connection(conn: Connection, options: DatabaseOptions) -> DbResult<Self> {
        conn.pragma_update(None, "foreign_keys", options.enforce_foreign_keys)?;
        let db = Self { conn };
        db.initialize()?;
        tracing::debug!(
            enforce_foreign_keys = options.enforce_foreign_keys,
            "database opened"
        );
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Whether SQLite is currently enforcing foreign keys.
    pub fn foreign_keys_enforced(&self) -> DbResult<bool> {
        let enabled: bool = self
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(enabled)
    }

    /// Drop and recreate the `patients` table, discarding every patient row.
    pub fn recreate_patients_table(&self) -> DbResult<()> {
        self.conn.execute("DROP TABLE IF EXISTS patients", [])?;
        self.conn.execute_batch(PATIENTS_TABLE)?;
        Ok(())
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, err)| DbError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(
            tables,
            vec!["appointments", "doctors", "medical_records", "patients"]
        );
    }

    #[test]
    fn test_foreign_keys_off_by_default() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.foreign_keys_enforced().unwrap());

        let db = Database::open_in_memory_with(DatabaseOptions {
            enforce_foreign_keys: true,
        })
        .unwrap();
        assert!(db.foreign_keys_enforced().unwrap());
    }

    #[test]
    fn test_constraint_errors_are_mapped() {
        let db = Database::open_in_memory().unwrap();
        let err: DbError = db
            .conn()
            .execute("INSERT INTO doctors (name) VALUES ('Smith')", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, DbError::Constraint(_)), "got {:?}", err);
    }

    #[test]
    fn test_recreate_patients_table() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO patients (first_name, last_name, age, gender) VALUES ('A', 'B', 1, 'Male')",
                [],
            )
            .unwrap();

        db.recreate_patients_table().unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
