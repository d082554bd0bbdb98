//! src/routes/books/add.rs
use super::{book_form_page, BookFormData, BookFormValues};
use crate::authentication::Principal;
use crate::domain::NewBook;
use crate::routes::helpers::{e500, see_other};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(
    name = "Add a book",
    skip(form, pool, principal),
    fields(user_id = %principal.id)
)]
pub async fn add_book(
    form: web::Form<BookFormData>,
    pool: web::Data<PgPool>,
    principal: web::ReqData<Principal>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = form.into_inner();
    if !form.has_rating() {
        return Ok(book_form_page(
            "Add a book",
            "/add",
            &BookFormValues::from(&form),
            None,
        ));
    }
    let new_book = match NewBook::try_from(&form) {
        Ok(new_book) => new_book,
        Err(e) => {
            return Ok(book_form_page(
                "Add a book",
                "/add",
                &BookFormValues::from(&form),
                Some(e.as_str()),
            ))
        }
    };

    insert_book(&pool, principal.id, &new_book)
        .await
        .map_err(e500)?;
    FlashMessage::info(format!("{} has been added.", new_book.title.as_ref())).send();
    Ok(see_other("/user"))
}

#[tracing::instrument(name = "Saving new book in the database", skip(pool, new_book))]
async fn insert_book(pool: &PgPool, user_id: Uuid, new_book: &NewBook) -> Result<Uuid, anyhow::Error> {
    let book_id = Uuid::new_v4();
    sqlx::query(
        r#"
INSERT INTO books (id, user_id, title, read_date, rating, description, isbn)
VALUES ($1, $2, $3, $4, $5, $6, $7)
"#,
    )
    .bind(book_id)
    .bind(user_id)
    .bind(new_book.title.as_ref())
    .bind(new_book.read_date)
    .bind(new_book.rating.value())
    .bind(new_book.description.as_deref())
    .bind(new_book.isbn.as_deref())
    .execute(pool)
    .await
    .context("Failed to insert a new book.")?;
    Ok(book_id)
}
