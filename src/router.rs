use std::sync::Arc;

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::db::BudgetStorage;
use crate::handlers;
use crate::session::SessionStore;

/// Shared application state: storage, the injected session store, the
/// admin sentinel pair, and the cookie encryption key.
#[derive(Clone)]
pub struct AppState {
    storage: BudgetStorage,
    sessions: Arc<dyn SessionStore>,
    admin_identifier: Arc<str>,
    admin_password: Arc<str>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(storage: BudgetStorage, sessions: Arc<dyn SessionStore>, cfg: &Config) -> Self {
        Self {
            storage,
            sessions,
            admin_identifier: Arc::from(cfg.admin_identifier.as_str()),
            admin_password: Arc::from(cfg.admin_password.as_str()),
            cookie_key: derive_cookie_key(&cfg.session_secret),
        }
    }

    pub fn storage(&self) -> &BudgetStorage {
        &self.storage
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub fn admin_identifier(&self) -> &str {
        &self.admin_identifier
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    pub fn cookie_key(&self) -> Key {
        self.cookie_key.clone()
    }
}

/// The cookie crate wants a master key of at least 32 bytes, while
/// legacy deployments of this app configured secrets as short as the
/// default `proj3`. The secret is cycled out to master-key length before
/// derivation so those secrets keep working.
fn derive_cookie_key(secret: &str) -> Key {
    let mut material = [0u8; 64];
    let bytes = secret.as_bytes();
    if !bytes.is_empty() {
        for (i, slot) in material.iter_mut().enumerate() {
            *slot = bytes[i % bytes.len()];
        }
    }
    Key::derive_from(&material)
}

pub fn budget_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::budget::landing))
        .route(
            "/register",
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
        .route(
            "/transaction",
            get(handlers::budget::transaction_page).post(handlers::budget::record_transaction),
        )
        .route("/viewTransactions", get(handlers::budget::view_transactions))
        .route("/usernames", get(handlers::admin::list_accounts))
        .route("/deleteUser/{identifier}", post(handlers::admin::delete_account))
        .route("/surveyResults", get(handlers::survey::survey_results))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::session_layer,
        ))
        .with_state(state)
}
