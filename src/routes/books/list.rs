//! src/routes/books/list.rs
use crate::routes::helpers::{e500, escape, flash_messages_html, html_page};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::IncomingFlashMessages;
use anyhow::Context;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct ListedBook {
    title: String,
    read_date: Option<NaiveDate>,
    rating: i16,
    isbn: Option<String>,
    owner_id: Uuid,
    owner_name: String,
}

#[tracing::instrument(name = "List all books", skip(pool, flash_messages))]
pub async fn list_books(
    pool: web::Data<PgPool>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    let books = get_all_books(&pool).await.map_err(e500)?;

    let mut rows = String::new();
    for book in &books {
        rows.push_str(&format!(
            r#"      <tr class="book"><td>{}</td><td>{}</td><td>{}/5</td><td>{}</td><td><a href="/user?userId={}">{}</a></td></tr>
"#,
            escape(&book.title),
            book.read_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            book.rating,
            escape(book.isbn.as_deref().unwrap_or_default()),
            book.owner_id,
            escape(&book.owner_name),
        ));
    }

    let msg_html = flash_messages_html(&flash_messages);
    Ok(html_page(
        "All books",
        &format!(
            r#"
    <h1>All books</h1>
    {msg_html}
    <table>
      <tr><th>Title</th><th>Read on</th><th>Rating</th><th>ISBN</th><th>Reader</th></tr>
{rows}    </table>
"#
        ),
    ))
}

#[tracing::instrument(name = "Get all books", skip(pool))]
async fn get_all_books(pool: &PgPool) -> Result<Vec<ListedBook>, anyhow::Error> {
    sqlx::query_as::<_, ListedBook>(
        r#"
SELECT b.title, b.read_date, b.rating, b.isbn,
       u.id AS owner_id, COALESCE(u.name, u.email) AS owner_name
FROM books b
JOIN users u ON u.id = b.user_id
ORDER BY b.created_at DESC
"#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to retrieve books.")
}
