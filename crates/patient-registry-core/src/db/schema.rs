//! SQLite schema definition.

/// Schema for the document store.
///
/// Every collection shares one table; a document is a JSON object keyed by
/// `(collection, id)`. Insertion order is kept by the implicit rowid.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Documents
-- ============================================================================

CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body TEXT NOT NULL CHECK (json_valid(body)),  -- JSON object
    PRIMARY KEY (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
"#;
