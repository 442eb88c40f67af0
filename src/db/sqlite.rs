use std::str::FromStr;

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::db::models::{Credential, SurveyFilter, SurveyRecord, TransactionRecord, UserProfile};
use crate::db::schema::SQLITE_INIT;
use crate::error::BuddyError;

pub type SqlitePool = Pool<Sqlite>;

/// Build a pool against `database_url` (creating the file if needed) and
/// run the bundled DDL.
pub async fn connect(database_url: &str) -> Result<BudgetStorage, BuddyError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)
        .map_err(sqlx::Error::from)?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    let storage = BudgetStorage::new(pool);
    storage.init_schema().await?;
    Ok(storage)
}

const TRANSACTIONS_FOR_USER: &str = r#"
    SELECT t.transaction_id, u.first_name, u.last_name, tt.transaction_category, t.amount
    FROM users u
    JOIN transactions t ON t.user_id = u.user_id
    JOIN transaction_type tt ON tt.transaction_type_id = t.transaction_type_id
    WHERE u.user_id = ?
    ORDER BY t.transaction_id
"#;

const SURVEY_SELECT: &str = r#"
    SELECT ui.user_id, ui.age, ui.gender, ui.relationship_status, ui.occupation_status,
           ui.daily_hours, r.distraction_rating, r.anxiety_rating, r.depression_rating,
           r.sleep_rating, smp.platform, oa.organization
    FROM user_inputs ui
    JOIN ratings r ON r.user_id = ui.user_id
    JOIN social_media_platforms smp ON smp.user_id = ui.user_id
    JOIN organization_affiliations oa ON oa.user_id = ui.user_id
"#;

const SURVEY_SELECT_FOR_USER: &str = r#"
    SELECT ui.user_id, ui.age, ui.gender, ui.relationship_status, ui.occupation_status,
           ui.daily_hours, r.distraction_rating, r.anxiety_rating, r.depression_rating,
           r.sleep_rating, smp.platform, oa.organization
    FROM user_inputs ui
    JOIN ratings r ON r.user_id = ui.user_id
    JOIN social_media_platforms smp ON smp.user_id = ui.user_id
    JOIN organization_affiliations oa ON oa.user_id = ui.user_id
    WHERE ui.user_id = ?
"#;

#[derive(Clone)]
pub struct BudgetStorage {
    pool: SqlitePool,
}

impl BudgetStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BuddyError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn find_credential(&self, identifier: &str) -> Result<Option<Credential>, BuddyError> {
        let row = sqlx::query_as::<_, Credential>(
            "SELECT identifier, password FROM login WHERE identifier = ?",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Register a credential and its user profile as one atomic unit.
    /// The pre-check gives a clean error for the common case; the UNIQUE
    /// constraint settles concurrent registrations of the same identifier.
    /// Returns the new profile's `user_id`.
    pub async fn register_user(
        &self,
        identifier: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        income_id: Option<i64>,
    ) -> Result<i64, BuddyError> {
        if self.find_credential(identifier).await?.is_some() {
            return Err(BuddyError::DuplicateIdentifier);
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO login (identifier, password) VALUES (?, ?)")
            .bind(identifier)
            .bind(password)
            .execute(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        let res = sqlx::query(
            "INSERT INTO users (email, first_name, last_name, income_id) VALUES (?, ?, ?, ?)",
        )
        .bind(identifier)
        .bind(first_name)
        .bind(last_name)
        .bind(income_id)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn list_credentials(&self) -> Result<Vec<Credential>, BuddyError> {
        let rows = sqlx::query_as::<_, Credential>(
            "SELECT identifier, password FROM login ORDER BY identifier",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Delete a credential by identifier. Idempotent: returns the number
    /// of rows removed (0 or 1), never an error for a missing row.
    pub async fn delete_credential(&self, identifier: &str) -> Result<u64, BuddyError> {
        let res = sqlx::query("DELETE FROM login WHERE identifier = ?")
            .bind(identifier)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn find_profile(&self, email: &str) -> Result<Option<UserProfile>, BuddyError> {
        let row = sqlx::query_as::<_, UserProfile>(
            "SELECT user_id, email, first_name, last_name, income_id FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert one transaction. `user_id` is the caller's session scope
    /// when present; a session with no resolved profile records an
    /// unscoped row.
    pub async fn insert_transaction(
        &self,
        transaction_type_id: i64,
        amount: f64,
        user_id: Option<i64>,
    ) -> Result<(), BuddyError> {
        sqlx::query(
            "INSERT INTO transactions (transaction_type_id, amount, user_id) VALUES (?, ?, ?)",
        )
        .bind(transaction_type_id)
        .bind(amount)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Three-way join scoped to one user, ordered by transaction id.
    pub async fn transactions_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<TransactionRecord>, BuddyError> {
        let rows = sqlx::query_as::<_, TransactionRecord>(TRANSACTIONS_FOR_USER)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Four-way survey join as a lazy stream: rows are decoded as the
    /// caller pulls them, and the stream cannot be restarted.
    pub fn survey_records(
        &self,
        filter: SurveyFilter,
    ) -> BoxStream<'_, Result<SurveyRecord, BuddyError>> {
        match filter {
            SurveyFilter::All => sqlx::query_as::<_, SurveyRecord>(SURVEY_SELECT)
                .fetch(&self.pool)
                .map_err(BuddyError::from)
                .boxed(),
            SurveyFilter::User(user_id) => {
                sqlx::query_as::<_, SurveyRecord>(SURVEY_SELECT_FOR_USER)
                    .bind(user_id)
                    .fetch(&self.pool)
                    .map_err(BuddyError::from)
                    .boxed()
            }
        }
    }
}

fn map_unique_violation(e: sqlx::Error) -> BuddyError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => BuddyError::DuplicateIdentifier,
        _ => BuddyError::Database(e),
    }
}
