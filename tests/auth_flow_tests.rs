mod common;

use axum::http::StatusCode;

use common::*;

#[tokio::test]
async fn duplicate_registration_is_rejected_without_a_write() {
    let t = spawn_app().await;

    let resp = post_form(
        &t.app,
        "/register",
        "identifier=jacob@byu.edu&password=pw1&first_name=Jacob&last_name=B&income_id=2",
        None,
    )
    .await;
    assert!(resp.status().is_redirection());
    assert_eq!(login_row_count(&t.storage).await, 1);

    let resp = post_form(
        &t.app,
        "/register",
        "identifier=jacob@byu.edu&password=other&first_name=Someone&last_name=Else&income_id=1",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_string(resp).await;
    assert!(body.contains("DUPLICATE_IDENTIFIER"));

    assert_eq!(login_row_count(&t.storage).await, 1);
}

#[tokio::test]
async fn invalid_credentials_leave_the_caller_unauthenticated() {
    let t = spawn_app().await;
    register_and_login(&t.app, "ana@example.com", "right").await;

    // Unknown identifier and wrong password both collapse into the same error.
    for form in [
        "identifier=nobody@example.com&password=whatever",
        "identifier=ana@example.com&password=wrong",
    ] {
        let resp = post_form(&t.app, "/login", form, None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let cookie = session_cookie(&resp);

        // Whatever session the failed attempt may reference is not authenticated.
        let resp = get(&t.app, "/transaction", cookie.as_deref()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn sentinel_login_grants_admin_with_empty_credential_store() {
    let t = spawn_app().await;
    assert_eq!(login_row_count(&t.storage).await, 0);

    let cookie = login(&t.app, "admin", "intexfun").await;

    let resp = get(&t.app, "/usernames", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Admin implies authenticated.
    let resp = get(&t.app, "/transaction", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_half_of_sentinel_pair_is_not_admin() {
    let t = spawn_app().await;

    let resp = post_form(&t.app, "/login", "identifier=admin&password=nope", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_guarded_access() {
    let t = spawn_app().await;
    let cookie = register_and_login(&t.app, "drew@example.com", "hunter2").await;

    let resp = get(&t.app, "/transaction", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get(&t.app, "/logout", Some(&cookie)).await;
    assert!(resp.status().is_redirection());

    // The old cookie now points at a destroyed session.
    let resp = get(&t.app, "/transaction", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let resp = get(&t.app, "/viewTransactions", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn every_response_carries_the_session_cookie() {
    let t = spawn_app().await;

    // A fresh caller gets a session cookie from the landing page alone.
    let resp = get(&t.app, "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("landing page set no session cookie");

    // Guard-only routes re-issue it as well.
    let auth_cookie = register_and_login(&t.app, "carry@example.com", "pw").await;
    let resp = get(&t.app, "/transaction", Some(&auth_cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(session_cookie(&resp).is_some());

    // The landing-page session is real: replaying the cookie does not
    // mint another one.
    let before = t.sessions.len();
    let resp = get(&t.app, "/", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(t.sessions.len(), before);
}

#[tokio::test]
async fn failed_login_hands_out_a_reachable_session_cookie() {
    let t = spawn_app().await;

    let resp = post_form(
        &t.app,
        "/login",
        "identifier=nobody@example.com&password=wrong",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let cookie = session_cookie(&resp).expect("401 login carried no session cookie");
    assert_eq!(t.sessions.len(), 1);

    // Replaying the cookie reuses the same server-side session instead
    // of stranding it and minting another.
    let resp = post_form(
        &t.app,
        "/login",
        "identifier=nobody@example.com&password=wrong",
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(t.sessions.len(), 1);
}

#[tokio::test]
async fn logout_without_a_session_still_redirects() {
    let t = spawn_app().await;
    let resp = get(&t.app, "/logout", None).await;
    assert!(resp.status().is_redirection());
}
