//! SQL DDL for initializing the itinerary storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `budget` the only nullable column
/// - `created_at` RFC3339 text assigned by the server on insert
/// - index on `created_at` for the newest-first listing
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS itineraries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    days INTEGER NOT NULL,
    budget TEXT NULL,
    places TEXT NOT NULL,
    accommodation TEXT NOT NULL,
    transport TEXT NOT NULL,
    details TEXT NOT NULL,
    package_name TEXT NOT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_itineraries_created_at ON itineraries(created_at);
"#;
