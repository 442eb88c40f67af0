//! SQL DDL for initializing the application tables.
//! SQLite-first design; can be adapted for other RDBMS.

/// Idempotent schema. The UNIQUE constraint on `login.identifier` is the
/// authority that closes the registration check-then-act race; the
/// application-level pre-check only improves the error path.
/// `transaction_type` is a read-only lookup table seeded here.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS login (
    identifier TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    income_id INTEGER NULL
);

CREATE TABLE IF NOT EXISTS transaction_type (
    transaction_type_id INTEGER PRIMARY KEY,
    transaction_category TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
    transaction_type_id INTEGER NOT NULL REFERENCES transaction_type(transaction_type_id),
    amount REAL NOT NULL,
    user_id INTEGER NULL REFERENCES users(user_id)
);

CREATE TABLE IF NOT EXISTS user_inputs (
    user_id INTEGER PRIMARY KEY,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    relationship_status TEXT NOT NULL,
    occupation_status TEXT NOT NULL,
    daily_hours REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS ratings (
    user_id INTEGER PRIMARY KEY,
    distraction_rating INTEGER NOT NULL,
    anxiety_rating INTEGER NOT NULL,
    depression_rating INTEGER NOT NULL,
    sleep_rating INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS social_media_platforms (
    user_id INTEGER PRIMARY KEY,
    platform TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS organization_affiliations (
    user_id INTEGER PRIMARY KEY,
    organization TEXT NOT NULL
);

INSERT OR IGNORE INTO transaction_type (transaction_type_id, transaction_category) VALUES
    (1, 'Groceries'),
    (2, 'Rent'),
    (3, 'Utilities'),
    (4, 'Entertainment'),
    (5, 'Income')
"#;
