//! tests/api/logout.rs
use crate::helpers::{assert_is_redirect_to, spawn_app};

#[tokio::test]
async fn you_should_be_redirected_to_login_on_logout_with_success_message() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app.get_logout().await;
    assert_is_redirect_to(&response, "/login");

    let page_html = app.get_login_html().await;
    assert!(page_html.contains("You have successfully logged out."));
}

#[tokio::test]
async fn you_should_lose_access_to_your_books_after_logout() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app.get_logout().await;
    assert_is_redirect_to(&response, "/login");

    let response = app.get_user_page().await;
    assert_is_redirect_to(&response, "/login");

    let response = app
        .post_add_book(&serde_json::json!({
            "title": "Dune",
            "rating": "5"
        }))
        .await;
    assert_is_redirect_to(&response, "/login");
    assert!(app.book_ids_of(app.test_user.user_id).await.is_empty());
}
