//! src/routes/books/edit.rs
use super::{book_form_page, get_owned_book, BookFormData, BookFormValues};
use crate::authentication::Principal;
use crate::domain::NewBook;
use crate::routes::helpers::{e500, page_with_status, see_other};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

/// Without a rating the submission is a request for the pre-filled form,
/// with one it is the edited book.
#[tracing::instrument(
    name = "Edit a book",
    skip(form, pool, principal),
    fields(user_id = %principal.id, book_id = tracing::field::Empty)
)]
pub async fn edit_book(
    form: web::Form<BookFormData>,
    pool: web::Data<PgPool>,
    principal: web::ReqData<Principal>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = form.into_inner();
    let book_id = match form.book_id {
        Some(book_id) => book_id,
        None => return Ok(HttpResponse::BadRequest().body("A bookId is required.")),
    };
    tracing::Span::current().record("book_id", tracing::field::display(&book_id));

    if !form.has_rating() {
        return match get_owned_book(&pool, book_id, principal.id)
            .await
            .map_err(e500)?
        {
            Some(book) => Ok(book_form_page(
                "Edit book",
                "/edit",
                &BookFormValues::from(&book),
                None,
            )),
            None => Ok(book_not_found()),
        };
    }

    let book = match NewBook::try_from(&form) {
        Ok(book) => book,
        Err(e) => {
            return Ok(book_form_page(
                "Edit book",
                "/edit",
                &BookFormValues::from(&form),
                Some(e.as_str()),
            ))
        }
    };

    let updated = update_book(&pool, book_id, principal.id, &book)
        .await
        .map_err(e500)?;
    if !updated {
        return Ok(book_not_found());
    }
    FlashMessage::info(format!("{} has been updated.", book.title.as_ref())).send();
    Ok(see_other("/user"))
}

fn book_not_found() -> HttpResponse {
    page_with_status(
        StatusCode::NOT_FOUND,
        "Book not found",
        "    <h1>Book not found</h1>\n    <p>There is no such book on your shelf.</p>\n",
    )
}

/// Returns `false` when no book with this id belongs to `user_id`.
#[tracing::instrument(name = "Update book", skip(pool, book))]
async fn update_book(
    pool: &PgPool,
    book_id: Uuid,
    user_id: Uuid,
    book: &NewBook,
) -> Result<bool, anyhow::Error> {
    let result = sqlx::query(
        r#"
UPDATE books
SET title = $3, read_date = $4, rating = $5, description = $6, isbn = $7
WHERE id = $1 AND user_id = $2
"#,
    )
    .bind(book_id)
    .bind(user_id)
    .bind(book.title.as_ref())
    .bind(book.read_date)
    .bind(book.rating.value())
    .bind(book.description.as_deref())
    .bind(book.isbn.as_deref())
    .execute(pool)
    .await
    .context("Failed to update the book.")?;
    Ok(result.rows_affected() == 1)
}
