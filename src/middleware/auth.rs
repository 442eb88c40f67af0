//! Session resolution and the authorization gate.
//!
//! [`session_layer`] wraps the whole router: it resolves (or creates)
//! the caller's session from the encrypted cookie before any guard
//! runs, shares it with extractors through request extensions, and
//! re-issues the session cookie on every response — the behavior the
//! original stack had. `Authenticated` and `AdminOnly` are the two
//! guards: pure predicates over the resolved session that short-circuit
//! with a 401 before the handler runs. Guards never touch the database.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use tracing::{error, warn};

use crate::error::{ApiErrorBody, ApiErrorResponse, BuddyError};
use crate::router::AppState;
use crate::session::{Session, SessionId, SessionStore};

pub const SESSION_COOKIE: &str = "budgetbuddy_session";

fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn expired_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn lookup(jar: &PrivateCookieJar, store: &Arc<dyn SessionStore>) -> Option<(SessionId, Session)> {
    let id = jar.get(SESSION_COOKIE)?.value().to_owned();
    let session = store.get(&id)?;
    Some((id, session))
}

/// The caller's session as resolved by [`session_layer`], shared with
/// the extractors below through request extensions.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: SessionId,
    pub data: Session,
}

/// Router-level middleware. Lookup happens once per request; a
/// cookie-less caller gets a fresh empty session. On the way out the
/// session cookie is re-issued on every response, so even an error
/// response hands the client the id of the session that was created for
/// it. A session the handler destroyed gets its cookie cleared instead.
pub async fn session_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = PrivateCookieJar::from_headers(req.headers(), state.cookie_key());
    let (id, data) = match lookup(&jar, state.sessions()) {
        Some(found) => found,
        None => (state.sessions().create(), Session::default()),
    };
    req.extensions_mut().insert(CurrentSession {
        id: id.clone(),
        data,
    });

    let resp = next.run(req).await;

    let jar = if state.sessions().get(&id).is_some() {
        jar.add(session_cookie(id))
    } else {
        jar.remove(expired_cookie())
    };
    (jar, resp).into_response()
}

/// The caller's session, for handlers that mutate it. `commit()`
/// persists the changes; `destroy()` removes the session. The response
/// cookie is the layer's business either way.
pub struct SessionCtx {
    pub id: SessionId,
    pub data: Session,
    store: Arc<dyn SessionStore>,
}

impl SessionCtx {
    /// Persist the (possibly mutated) session.
    pub fn commit(self) {
        if !self.store.update(&self.id, self.data) {
            warn!(session_id = %self.id, "session disappeared before commit");
        }
    }

    /// Destroy the session. A store failure is logged and swallowed: the
    /// caller still gets its redirect, with the cookie cleared.
    pub fn destroy(self) {
        if let Err(e) = self.store.destroy(&self.id) {
            warn!(session_id = %self.id, error = %e, "failed to destroy session");
        }
    }
}

impl<S> FromRequestParts<S> for SessionCtx
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let Some(current) = parts.extensions.get::<CurrentSession>().cloned() else {
            error!("session layer missing from router assembly");
            return Err(internal_error());
        };
        Ok(SessionCtx {
            id: current.id,
            data: current.data,
            store: app.sessions().clone(),
        })
    }
}

/// Passes iff the caller's session is authenticated.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Session);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentSession>() {
            Some(current) if current.data.authenticated => Ok(Self(current.data.clone())),
            _ => Err(BuddyError::AuthenticationRequired.into_response()),
        }
    }
}

/// Passes iff the caller's session carries the admin flag.
#[derive(Debug, Clone)]
pub struct AdminOnly(pub Session);

impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentSession>() {
            Some(current) if current.data.admin => Ok(Self(current.data.clone())),
            _ => Err(BuddyError::AdminRequired.into_response()),
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorResponse {
            error: ApiErrorBody {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred.".to_string(),
            },
        }),
    )
        .into_response()
}
