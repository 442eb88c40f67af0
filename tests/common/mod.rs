#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use tower::ServiceExt;

use budgetbuddy::config::Config;
use budgetbuddy::db::BudgetStorage;
use budgetbuddy::router::{AppState, budget_router};
use budgetbuddy::session::MemorySessionStore;

pub struct TestApp {
    pub app: Router,
    pub storage: BudgetStorage,
    pub sessions: Arc<MemorySessionStore>,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

/// Build the real router against a throwaway SQLite file.
pub async fn spawn_app() -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "budgetbuddy-test-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let storage = budgetbuddy::db::connect(&database_url)
        .await
        .expect("failed to open test database");

    let mut cfg = Config::default();
    cfg.database_url = database_url;

    let sessions = Arc::new(MemorySessionStore::default());
    let state = AppState::new(storage.clone(), sessions.clone(), &cfg);
    let app = budget_router(state);

    TestApp {
        app,
        storage,
        sessions,
        db_path,
    }
}

pub async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).expect("failed to build request"))
        .await
        .expect("request failed")
}

pub async fn post_form(
    app: &Router,
    path: &str,
    form: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(
            builder
                .body(Body::from(form.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

/// Extract the session cookie pair from a response, ready to replay in a
/// `Cookie` header.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    let value = resp.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    Some(value.split(';').next().unwrap_or(value).to_string())
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

/// Register an account and log in with it, returning the session cookie.
pub async fn register_and_login(app: &Router, identifier: &str, password: &str) -> String {
    let resp = post_form(
        app,
        "/register",
        &format!(
            "identifier={identifier}&password={password}&first_name=Test&last_name=User&income_id=1"
        ),
        None,
    )
    .await;
    assert!(
        resp.status().is_redirection(),
        "registration failed: {}",
        resp.status()
    );

    login(app, identifier, password).await
}

pub async fn login(app: &Router, identifier: &str, password: &str) -> String {
    let resp = post_form(
        app,
        "/login",
        &format!("identifier={identifier}&password={password}"),
        None,
    )
    .await;
    assert!(
        resp.status().is_redirection(),
        "login failed: {}",
        resp.status()
    );
    session_cookie(&resp).expect("login response carried no session cookie")
}

/// Seed one flattened survey record across the four survey tables.
pub async fn seed_survey_record(
    storage: &BudgetStorage,
    user_id: i64,
    platform: &str,
    organization: &str,
) {
    sqlx::query(
        "INSERT INTO user_inputs (user_id, age, gender, relationship_status, occupation_status, daily_hours) \
         VALUES (?, 25, 'Female', 'Single', 'Student', 3.5)",
    )
    .bind(user_id)
    .execute(storage.pool())
    .await
    .expect("seed user_inputs");

    sqlx::query(
        "INSERT INTO ratings (user_id, distraction_rating, anxiety_rating, depression_rating, sleep_rating) \
         VALUES (?, 3, 2, 1, 4)",
    )
    .bind(user_id)
    .execute(storage.pool())
    .await
    .expect("seed ratings");

    sqlx::query("INSERT INTO social_media_platforms (user_id, platform) VALUES (?, ?)")
        .bind(user_id)
        .bind(platform)
        .execute(storage.pool())
        .await
        .expect("seed social_media_platforms");

    sqlx::query("INSERT INTO organization_affiliations (user_id, organization) VALUES (?, ?)")
        .bind(user_id)
        .bind(organization)
        .execute(storage.pool())
        .await
        .expect("seed organization_affiliations");
}

pub async fn login_row_count(storage: &BudgetStorage) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM login")
        .fetch_one(storage.pool())
        .await
        .expect("count login rows");
    count
}
