//! tests/api/books.rs
use crate::helpers::{assert_is_redirect_to, spawn_app, TestApp, TestUser};
use serde_json::json;
use uuid::Uuid;

fn dune() -> serde_json::Value {
    json!({
        "title": "Dune",
        "readDate": "2024-01-01",
        "rating": "5",
        "isbn": "123"
    })
}

async fn add_dune(app: &TestApp) -> Uuid {
    let response = app.post_add_book(&dune()).await;
    assert_is_redirect_to(&response, "/user");
    let ids = app.book_ids_of(app.test_user.user_id).await;
    assert_eq!(ids.len(), 1);
    ids[0]
}

#[tokio::test]
async fn you_must_be_logged_in_to_add_a_book() {
    let app = spawn_app().await;

    let response = app.post_add_book(&dune()).await;

    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn an_added_book_shows_up_on_the_user_page() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    add_dune(&app).await;

    let html_page = app.get_user_html().await;
    assert_eq!(html_page.matches(r#"<li class="book">"#).count(), 1);
    assert!(html_page.contains("<h3>Dune</h3>"));
    assert!(html_page.contains("read on 2024-01-01"));
    assert!(html_page.contains("Dune has been added."));
}

#[tokio::test]
async fn adding_without_a_rating_renders_the_form() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app
        .post_add_book(&json!({"title": "Dune", "readDate": "2024-01-01"}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains(r#"<form action="/add" method="post">"#));
    assert!(html_page.contains(r#"value="Dune""#));
    assert!(app.book_ids_of(app.test_user.user_id).await.is_empty());
}

#[tokio::test]
async fn an_invalid_rating_renders_the_form_with_an_error() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app
        .post_add_book(&json!({"title": "Dune", "rating": "11"}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("The rating must be between 1 and 5."));
    assert!(app.book_ids_of(app.test_user.user_id).await.is_empty());
}

#[tokio::test]
async fn editing_without_a_rating_renders_a_prefilled_form() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let book_id = add_dune(&app).await;

    let response = app.post_edit_book(&json!({"bookId": book_id})).await;

    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains(r#"<form action="/edit" method="post">"#));
    assert!(html_page.contains(&format!(r#"name="bookId" value="{}""#, book_id)));
    assert!(html_page.contains(r#"value="Dune""#));
    assert!(html_page.contains(r#"value="2024-01-01""#));
    assert!(html_page.contains(r#"value="5""#));
    assert!(html_page.contains(r#"value="123""#));
}

#[tokio::test]
async fn editing_with_a_rating_updates_the_book() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let book_id = add_dune(&app).await;

    let response = app
        .post_edit_book(&json!({
            "bookId": book_id,
            "title": "Dune Messiah",
            "readDate": "2024-02-01",
            "rating": "3",
            "description": "Shorter.",
            "isbn": "456"
        }))
        .await;
    assert_is_redirect_to(&response, "/user");

    let (title, rating): (String, i16) =
        sqlx::query_as("SELECT title, rating FROM books WHERE id = $1")
            .bind(book_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(title, "Dune Messiah");
    assert_eq!(rating, 3);
}

#[tokio::test]
async fn you_cannot_edit_or_delete_someone_elses_book() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let book_id = add_dune(&app).await;

    // Another reader, in another browser.
    let other = TestUser::generate();
    other.store(&app.db_pool).await;
    let client = app.new_client();
    let response = client
        .post(format!("{}/login", app.address))
        .form(&json!({"email": other.email, "password": other.password}))
        .send()
        .await
        .unwrap();
    assert_is_redirect_to(&response, "/user");

    let response = client
        .post(format!("{}/edit", app.address))
        .form(&json!({"bookId": book_id}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .post(format!("{}/edit", app.address))
        .form(&json!({"bookId": book_id, "title": "Mine now", "rating": "1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .post(format!("{}/delete", app.address))
        .form(&json!({"bookId": book_id}))
        .send()
        .await
        .unwrap();
    assert_is_redirect_to(&response, "/");

    assert_eq!(app.book_ids_of(app.test_user.user_id).await, vec![book_id]);
}

#[tokio::test]
async fn deleting_a_book_removes_it() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let book_id = add_dune(&app).await;

    let response = app.post_delete_book(&json!({"bookId": book_id})).await;
    assert_is_redirect_to(&response, "/");

    assert!(app.book_ids_of(app.test_user.user_id).await.is_empty());
    let html_page = app.get_html("/").await;
    assert!(html_page.contains("The book has been deleted."));
}

#[tokio::test]
async fn all_books_lists_every_readers_books() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    add_dune(&app).await;

    let html_page = app.get_html("/books").await;

    assert_eq!(html_page.matches(r#"<tr class="book">"#).count(), 1);
    assert!(html_page.contains("<td>Dune</td>"));
    assert!(html_page.contains(&app.test_user.name));
}

#[tokio::test]
async fn book_titles_are_escaped() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    app.post_add_book(&json!({"title": "<script>alert(1)</script>", "rating": "4"}))
        .await;

    let html_page = app.get_user_html().await;
    assert!(!html_page.contains("<script>"));
    assert!(html_page.contains("&lt;script&gt;"));
}
