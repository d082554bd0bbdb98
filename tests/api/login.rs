//! tests/api/login.rs
use crate::helpers::{assert_is_redirect_to, spawn_app};
use serde_json::json;

#[tokio::test]
async fn error_flash_message_is_set_on_failure() {
    // Arrange
    let app = spawn_app().await;

    let body = json!({
        "email": app.test_user.email,
        "password": "wrong-password"
    });

    // Act 1 - POST with invalid credentials
    let response = app.post_login(&body).await;
    assert_is_redirect_to(&response, "/login");

    // Act 2 - Follow the redirect, the error is shown
    let html_page = app.get_login_html().await;
    assert!(html_page.contains("<i>Invalid email or password.</i>"));

    // Act 3 - Reload, the message is gone
    let html_page = app.get_login_html().await;
    assert!(!html_page.contains("Invalid email or password."));
}

#[tokio::test]
async fn unknown_email_gets_the_same_message_as_a_wrong_password() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .await;

    assert_is_redirect_to(&response, "/login");
    let html_page = app.get_login_html().await;
    assert!(html_page.contains("<i>Invalid email or password.</i>"));
    assert!(!html_page.contains("not found"));

    // No principal is bound to the session.
    let response = app.get_user_page().await;
    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn redirect_to_user_page_after_login_success() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!({
            "email": app.test_user.email,
            "password": app.test_user.password
        }))
        .await;
    assert_is_redirect_to(&response, "/user");

    let html_page = app.get_user_html().await;
    assert!(html_page.contains(&format!("<h1>{}</h1>", app.test_user.name)));
}

#[tokio::test]
async fn email_lookup_ignores_case() {
    let app = spawn_app().await;

    let response = app
        .post_login(&json!({
            "email": app.test_user.email.to_uppercase(),
            "password": app.test_user.password
        }))
        .await;

    assert_is_redirect_to(&response, "/user");
}

#[tokio::test]
async fn a_malformed_stored_hash_is_a_failed_login_not_a_crash() {
    let app = spawn_app().await;
    sqlx::query("UPDATE users SET password_hash = 'garbage' WHERE id = $1")
        .bind(app.test_user.user_id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app
        .post_login(&json!({
            "email": app.test_user.email,
            "password": app.test_user.password
        }))
        .await;

    assert_is_redirect_to(&response, "/login");
    let html_page = app.get_login_html().await;
    assert!(html_page.contains("<i>Invalid email or password.</i>"));
}

#[tokio::test]
async fn login_renews_the_session_key() {
    let app = spawn_app().await;

    // A failed login creates an anonymous session holding the flash message.
    app.post_login(&json!({
        "email": app.test_user.email,
        "password": "wrong-password"
    }))
    .await;
    let anonymous_sid: String = sqlx::query_scalar("SELECT sid FROM session")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();

    app.test_user.login(&app).await;

    let sids: Vec<String> = sqlx::query_scalar("SELECT sid FROM session")
        .fetch_all(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(sids.len(), 1);
    assert_ne!(sids[0], anonymous_sid);
}
