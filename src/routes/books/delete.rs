//! src/routes/books/delete.rs
use crate::authentication::Principal;
use crate::routes::helpers::{e500, see_other};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    book_id: Uuid,
}

#[tracing::instrument(
    name = "Delete a book",
    skip(form, pool, principal),
    fields(user_id = %principal.id, book_id = %form.book_id)
)]
pub async fn delete_book(
    form: web::Form<FormData>,
    pool: web::Data<PgPool>,
    principal: web::ReqData<Principal>,
) -> Result<HttpResponse, actix_web::Error> {
    let deleted = delete_owned_book(&pool, form.book_id, principal.id)
        .await
        .map_err(e500)?;
    if deleted {
        FlashMessage::info("The book has been deleted.").send();
    } else {
        FlashMessage::error("There is no such book on your shelf.").send();
    }
    Ok(see_other("/"))
}

#[tracing::instrument(name = "Delete owned book", skip(pool))]
async fn delete_owned_book(pool: &PgPool, book_id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
    let result = sqlx::query(r#"DELETE FROM books WHERE id = $1 AND user_id = $2"#)
        .bind(book_id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("Failed to delete the book.")?;
    Ok(result.rows_affected() == 1)
}
