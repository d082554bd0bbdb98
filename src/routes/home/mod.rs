//! src/routes/home/mod.rs
use crate::routes::helpers::{e500, escape, flash_messages_html, html_page};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::IncomingFlashMessages;
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct Reader {
    id: Uuid,
    email: String,
    name: Option<String>,
    about: Option<String>,
    book_count: i64,
}

#[tracing::instrument(name = "List readers", skip(pool, flash_messages))]
pub async fn home(
    pool: web::Data<PgPool>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    let readers = get_readers(&pool).await.map_err(e500)?;

    let mut rows = String::new();
    for reader in &readers {
        let name = reader.name.as_deref().unwrap_or(&reader.email);
        rows.push_str(&format!(
            r#"      <li><a href="/user?userId={}">{}</a> ({} books) {}</li>
"#,
            reader.id,
            escape(name),
            reader.book_count,
            escape(reader.about.as_deref().unwrap_or_default()),
        ));
    }
    if readers.is_empty() {
        rows.push_str("      <li>Nobody has signed up yet.</li>\n");
    }

    let msg_html = flash_messages_html(&flash_messages);
    Ok(html_page(
        "Readers",
        &format!(
            r#"
    <h1>Readers</h1>
    {msg_html}
    <ul>
{rows}    </ul>
"#
        ),
    ))
}

#[tracing::instrument(name = "Get readers with book counts", skip(pool))]
async fn get_readers(pool: &PgPool) -> Result<Vec<Reader>, anyhow::Error> {
    sqlx::query_as::<_, Reader>(
        r#"
SELECT u.id, u.email, u.name, u.about, COUNT(b.id) AS book_count
FROM users u
LEFT JOIN books b ON b.user_id = u.id
GROUP BY u.id
ORDER BY u.created_at
"#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to retrieve readers.")
}
