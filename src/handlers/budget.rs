//! Landing page and the transaction endpoints.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::error::BuddyError;
use crate::middleware::Authenticated;
use crate::router::AppState;
use crate::views;

/// Field names match the original registration-era HTML forms.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "transactionType")]
    pub transaction_type_id: i64,
    #[serde(rename = "expenseAmount")]
    pub amount: f64,
}

pub async fn landing() -> Html<&'static str> {
    views::landing_page()
}

pub async fn transaction_page(_auth: Authenticated) -> Html<&'static str> {
    views::transaction_page()
}

/// POST /transaction: one insert, scoped to the caller's session userID
/// when one resolved (the sentinel admin has none and records unscoped).
pub async fn record_transaction(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
    Form(form): Form<TransactionForm>,
) -> Result<Redirect, BuddyError> {
    state
        .storage()
        .insert_transaction(form.transaction_type_id, form.amount, session.user_id)
        .await?;
    Ok(Redirect::to("/"))
}

/// GET /viewTransactions: the three-way join, caller-scoped. A session
/// with no profile id sees an empty list.
pub async fn view_transactions(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
) -> Result<Html<String>, BuddyError> {
    let records = match session.user_id {
        Some(user_id) => state.storage().transactions_for_user(user_id).await?,
        None => Vec::new(),
    };
    Ok(views::transactions_page(&records))
}
