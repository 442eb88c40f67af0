//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: named record types, one per query result shape
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the storage handle over a sqlx pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Credential, SurveyFilter, SurveyRecord, TransactionRecord, UserProfile};
pub use schema::SQLITE_INIT;
pub use sqlite::{BudgetStorage, SqlitePool, connect};
