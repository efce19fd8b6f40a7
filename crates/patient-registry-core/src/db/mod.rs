//! Document store for the patient registry.
//!
//! A schemaless collection of JSON documents on SQLite. Documents are
//! addressed by collection name and a store-assigned identifier, and support
//! fetch-all, fetch-by-id, equality filtering on a (nested) field with
//! ordering, insert, partial update and delete.

mod documents;
mod schema;

pub use documents::*;
pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Operations the registry needs from a document store.
///
/// [`Database`] is the production implementation; anything else (a remote
/// client, a fault-injecting test double) only has to honour these calls.
pub trait DocumentStore {
    /// Insert a new document and return its generated identifier.
    fn add_document(&self, collection: &str, data: &serde_json::Value) -> DbResult<String>;

    /// Fetch one document. `Ok(None)` when no document has that identifier.
    fn get_document(&self, collection: &str, id: &str) -> DbResult<Option<Document>>;

    /// Fetch every document in the collection, in insertion order.
    fn list_documents(&self, collection: &str) -> DbResult<Vec<Document>>;

    /// Fetch the documents matching a query.
    fn query_documents(&self, collection: &str, query: &Query) -> DbResult<Vec<Document>>;

    /// Replace the given top-level fields of an existing document.
    ///
    /// Fails with [`DbError::NotFound`] when the document does not exist.
    fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> DbResult<()>;

    /// Remove a document. Returns whether anything was removed.
    fn delete_document(&self, collection: &str, id: &str) -> DbResult<bool>;
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        log::debug!("document store schema initialized");
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
