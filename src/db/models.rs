use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error as ThisError;

/// One row of the `login` table. The password is an opaque string
/// compared by equality; this store inherits unhashed data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Credential {
    pub identifier: String,
    pub password: String,
}

/// One row of the `users` table, 1:1 with a credential by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub income_id: Option<i64>,
}

/// Flattened row of the users x transactions x transaction_type join.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub transaction_category: String,
    pub amount: f64,
}

/// Flattened row of the four-way survey join on shared `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct SurveyRecord {
    pub user_id: i64,
    pub age: i64,
    pub gender: String,
    pub relationship_status: String,
    pub occupation_status: String,
    pub daily_hours: f64,
    pub distraction_rating: i64,
    pub anxiety_rating: i64,
    pub depression_rating: i64,
    pub sleep_rating: i64,
    pub platform: String,
    pub organization: String,
}

/// Survey aggregation filter: a specific user id, or the `all` sentinel
/// meaning unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyFilter {
    All,
    User(i64),
}

#[derive(Debug, ThisError)]
#[error("expected `all` or a user id")]
pub struct InvalidSurveyFilter;

impl FromStr for SurveyFilter {
    type Err = InvalidSurveyFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(SurveyFilter::All);
        }
        s.parse::<i64>()
            .map(SurveyFilter::User)
            .map_err(|_| InvalidSurveyFilter)
    }
}
