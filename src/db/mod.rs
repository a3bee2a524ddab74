//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: itinerary CRUD over a sqlx pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Itinerary, NewItinerary};
pub use schema::SQLITE_INIT;
pub use sqlite::{ItineraryStorage, SqlitePool};
