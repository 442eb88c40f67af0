//! Admin-only account management.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use tracing::info;

use crate::error::BuddyError;
use crate::middleware::AdminOnly;
use crate::router::AppState;
use crate::views;

/// GET /usernames: every credential row.
pub async fn list_accounts(
    _admin: AdminOnly,
    State(state): State<AppState>,
) -> Result<Html<String>, BuddyError> {
    let accounts = state.storage().list_credentials().await?;
    Ok(views::accounts_page(&accounts))
}

/// POST /deleteUser/{identifier}: removes at most one row; deleting an
/// unknown identifier is a success.
pub async fn delete_account(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Redirect, BuddyError> {
    let deleted = state.storage().delete_credential(&identifier).await?;
    info!(identifier = %identifier, deleted, "account delete requested");
    Ok(Redirect::to("/usernames"))
}
