//! Registration, login and logout.
//!
//! Login has two paths: the configured admin sentinel pair (compared in
//! constant time, no store lookup) and the credential table. Stored
//! passwords are opaque strings compared by equality; this preserves the
//! data contract the application inherited.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::info;

use crate::error::BuddyError;
use crate::middleware::SessionCtx;
use crate::router::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub identifier: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub income_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
}

pub async fn register_page() -> Html<&'static str> {
    views::register_page()
}

/// POST /register: credential + profile in one atomic unit, then hand
/// the caller to the login entry point.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, BuddyError> {
    let user_id = state
        .storage()
        .register_user(
            &form.identifier,
            &form.password,
            &form.first_name,
            &form.last_name,
            form.income_id,
        )
        .await?;
    info!(user_id, identifier = %form.identifier, "registered new account");
    Ok(Redirect::to("/login"))
}

pub async fn login_page() -> Html<&'static str> {
    views::login_page()
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    mut ctx: SessionCtx,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, BuddyError> {
    if is_admin_sentinel(&state, &form) {
        ctx.data.grant_admin();
        ctx.commit();
        info!("admin sentinel login");
        return Ok(Redirect::to("/"));
    }

    let Some(cred) = state.storage().find_credential(&form.identifier).await? else {
        return Err(BuddyError::InvalidCredentials);
    };
    if cred.password != form.password {
        return Err(BuddyError::InvalidCredentials);
    }

    let profile = state.storage().find_profile(&form.identifier).await?;
    let user_id = profile.map(|p| p.user_id);
    ctx.data.grant_user(user_id);
    ctx.commit();
    info!(identifier = %form.identifier, ?user_id, "login succeeded");
    Ok(Redirect::to("/"))
}

/// GET /logout: destroy unconditionally, redirect regardless of outcome.
pub async fn logout(ctx: SessionCtx) -> Redirect {
    ctx.destroy();
    Redirect::to("/")
}

fn is_admin_sentinel(state: &AppState, form: &LoginForm) -> bool {
    let id_ok = form
        .identifier
        .as_bytes()
        .ct_eq(state.admin_identifier().as_bytes());
    let pw_ok = form
        .password
        .as_bytes()
        .ct_eq(state.admin_password().as_bytes());
    bool::from(id_ok & pw_ok)
}
