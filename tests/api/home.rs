//! tests/api/home.rs
use crate::helpers::{spawn_app, TestUser};
use serde_json::json;

#[tokio::test]
async fn home_lists_readers_with_their_book_counts() {
    let app = spawn_app().await;
    let bookless = TestUser {
        name: "Octavia".into(),
        ..TestUser::generate()
    };
    bookless.store(&app.db_pool).await;

    app.test_user.login(&app).await;
    for title in ["Dune", "Hyperion"] {
        app.post_add_book(&json!({"title": title, "rating": "4"}))
            .await;
    }

    let html_page = app.get_html("/").await;

    assert!(html_page.contains(&format!(
        r#"<a href="/user?userId={}">Ursula</a> (2 books)"#,
        app.test_user.user_id
    )));
    assert!(html_page.contains(&format!(
        r#"<a href="/user?userId={}">Octavia</a> (0 books)"#,
        bookless.user_id
    )));
    assert!(!html_page.contains("argon2"));
}

#[tokio::test]
async fn anyone_can_look_at_a_readers_shelf() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.post_add_book(&json!({"title": "Dune", "rating": "5"}))
        .await;

    let anonymous = app.new_client();
    let response = anonymous
        .get(format!("{}/user?userId={}", app.address, app.test_user.user_id))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("<h3>Dune</h3>"));
    // Only the owner gets the edit controls.
    assert!(!html_page.contains(r#"action="/edit""#));
    assert!(!html_page.contains(r#"action="/add""#));
}

#[tokio::test]
async fn the_owner_gets_edit_controls_on_their_own_shelf() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.post_add_book(&json!({"title": "Dune", "rating": "5"}))
        .await;

    let html_page = app
        .get_html(&format!("/user?userId={}", app.test_user.user_id))
        .await;

    assert!(html_page.contains(r#"action="/edit""#));
    assert!(html_page.contains(r#"action="/delete""#));
    assert!(html_page.contains(r#"action="/add""#));
}

#[tokio::test]
async fn an_unknown_reader_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .get(&format!("/user?userId={}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn anonymous_visitors_without_a_user_id_are_sent_to_login() {
    let app = spawn_app().await;

    let response = app.get_user_page().await;

    crate::helpers::assert_is_redirect_to(&response, "/login");
}
