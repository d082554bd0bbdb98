//! tests/api/register.rs
use crate::helpers::{assert_is_redirect_to, spawn_app};
use futures_util::future::join_all;
use serde_json::json;

#[tokio::test]
async fn registration_redirects_to_login() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({
            "email": "a@x.com",
            "password": "pw1"
        }))
        .await;

    assert_is_redirect_to(&response, "/login");
    let stored: (String, String) =
        sqlx::query_as("SELECT email, password_hash FROM users WHERE email = 'a@x.com'")
            .fetch_one(&app.db_pool)
            .await
            .expect("The new user was not stored.");
    assert_eq!(stored.0, "a@x.com");
    assert!(stored.1.starts_with("$argon2id$"));
    assert!(!stored.1.contains("pw1"));
}

#[tokio::test]
async fn a_registered_user_can_log_in_and_sees_an_empty_shelf() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({
            "email": "a@x.com",
            "password": "pw1"
        }))
        .await;
    assert_is_redirect_to(&response, "/login");

    let response = app
        .post_login(&json!({
            "email": "a@x.com",
            "password": "pw1"
        }))
        .await;
    assert_is_redirect_to(&response, "/user");

    let response = app.get_user_page().await;
    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("Books (0)"));
    assert!(html_page.contains("No books yet."));
}

#[tokio::test]
async fn registering_an_existing_email_is_a_conflict() {
    let app = spawn_app().await;

    let response = app
        .post_register(&json!({
            "email": app.test_user.email,
            "password": "another-password"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response.text().await.unwrap(),
        "Email already exists. Try logging in."
    );
}

#[tokio::test]
async fn concurrent_registrations_store_a_single_user() {
    let app = spawn_app().await;
    let body = json!({
        "email": "race@x.com",
        "password": "pw1"
    });

    let requests = (0..5).map(|_| {
        let client = app.new_client();
        let url = format!("{}/addUser", app.address);
        let body = body.clone();
        tokio::spawn(async move { client.post(url).form(&body).send().await.unwrap() })
    });
    let statuses: Vec<u16> = join_all(requests)
        .await
        .into_iter()
        .map(|r| r.unwrap().status().as_u16())
        .collect();

    assert_eq!(statuses.iter().filter(|s| **s == 303).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == 409).count(), 4);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'race@x.com'")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn invalid_submissions_are_sent_back_to_the_form() {
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({"email": "not-an-email", "password": "pw1"}), "not a valid email"),
        (json!({"email": "b@x.com", "password": ""}), "A password is required."),
        (
            json!({"email": "b@x.com", "password": "pw1", "profileLink": "not a link"}),
            "not a valid link",
        ),
    ];

    for (body, message) in test_cases {
        let response = app.post_register(&body).await;
        assert_is_redirect_to(&response, "/addUser");

        let html_page = app.get_html("/addUser").await;
        assert!(
            html_page.contains(message),
            "The form did not show `{}` for payload {}",
            message,
            body
        );
    }
}

#[tokio::test]
async fn profile_fields_are_stored() {
    let app = spawn_app().await;

    app.post_register(&json!({
        "email": "c@x.com",
        "password": "pw1",
        "name": "Octavia",
        "about": "Reads science fiction.",
        "profileLink": "https://example.com/octavia"
    }))
    .await;

    let html_page = app.get_html("/").await;
    assert!(html_page.contains("Octavia"));
    assert!(html_page.contains("Reads science fiction."));
}
