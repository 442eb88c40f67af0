//! Survey aggregation across the four survey tables.

use axum::extract::{Query, State};
use axum::response::Html;
use futures::TryStreamExt;
use serde::Deserialize;

use crate::db::models::SurveyFilter;
use crate::error::BuddyError;
use crate::middleware::AdminOnly;
use crate::router::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct SurveyQuery {
    #[serde(default = "default_user_filter")]
    pub user: String,
}

fn default_user_filter() -> String {
    "all".to_string()
}

/// GET /surveyResults?user=all|<id>: drains the lazy four-way-join
/// stream and renders the flattened records.
pub async fn survey_results(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Query(query): Query<SurveyQuery>,
) -> Result<Html<String>, BuddyError> {
    let filter: SurveyFilter = query
        .user
        .parse()
        .map_err(|_| BuddyError::InvalidUserFilter(query.user.clone()))?;

    let mut rows = state.storage().survey_records(filter);
    let mut records = Vec::new();
    while let Some(record) = rows.try_next().await? {
        records.push(record);
    }
    Ok(views::survey_page(&records))
}
