//! src/routes/books/mod.rs
mod add;
mod delete;
mod edit;
mod list;

pub use add::add_book;
pub use delete::delete_book;
pub use edit::edit_book;
pub use list::list_books;

use crate::domain::{parse_read_date, BookTitle, NewBook, Rating};
use crate::routes::helpers::{escape, escape_attribute, html_page};
use actix_web::HttpResponse;
use anyhow::Context;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(sqlx::FromRow, Debug)]
pub struct Book {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub read_date: Option<NaiveDate>,
    pub rating: i16,
    pub description: Option<String>,
    pub isbn: Option<String>,
}

/// Fields shared by the add and edit forms. Everything is optional here so a
/// submission without a rating can be told apart from a malformed one.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookFormData {
    #[serde(default)]
    book_id: Option<Uuid>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    read_date: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    isbn: Option<String>,
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl BookFormData {
    pub fn has_rating(&self) -> bool {
        non_blank(&self.rating).is_some()
    }
}

impl TryFrom<&BookFormData> for NewBook {
    type Error = String;

    fn try_from(form: &BookFormData) -> Result<Self, Self::Error> {
        let title = BookTitle::parse(form.title.clone().unwrap_or_default())?;
        let rating = Rating::parse(non_blank(&form.rating).unwrap_or_default())?;
        let read_date = non_blank(&form.read_date)
            .map(parse_read_date)
            .transpose()?;
        Ok(NewBook {
            title,
            read_date,
            rating,
            description: non_blank(&form.description).map(str::to_string),
            isbn: non_blank(&form.isbn).map(str::to_string),
        })
    }
}

/// What the add/edit form is pre-filled with.
#[derive(Default)]
struct BookFormValues {
    book_id: Option<Uuid>,
    title: String,
    read_date: String,
    rating: String,
    description: String,
    isbn: String,
}

impl From<&Book> for BookFormValues {
    fn from(book: &Book) -> Self {
        Self {
            book_id: Some(book.id),
            title: book.title.clone(),
            read_date: book
                .read_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            rating: book.rating.to_string(),
            description: book.description.clone().unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
        }
    }
}

impl From<&BookFormData> for BookFormValues {
    fn from(form: &BookFormData) -> Self {
        Self {
            book_id: form.book_id,
            title: form.title.clone().unwrap_or_default(),
            read_date: form.read_date.clone().unwrap_or_default(),
            rating: form.rating.clone().unwrap_or_default(),
            description: form.description.clone().unwrap_or_default(),
            isbn: form.isbn.clone().unwrap_or_default(),
        }
    }
}

fn book_form_page(heading: &str, action: &str, values: &BookFormValues, error: Option<&str>) -> HttpResponse {
    let error_html = error
        .map(|e| format!(r#"<p class="error"><i>{}</i></p>"#, escape(e)))
        .unwrap_or_default();
    let book_id_html = values
        .book_id
        .map(|id| format!(r#"<input type="hidden" name="bookId" value="{}">"#, id))
        .unwrap_or_default();
    let title = escape_attribute(&values.title);
    let read_date = escape_attribute(&values.read_date);
    let rating = escape_attribute(&values.rating);
    let description = escape(&values.description);
    let isbn = escape_attribute(&values.isbn);
    html_page(
        heading,
        &format!(
            r#"
    <h1>{heading}</h1>
    {error_html}
    <form action="{action}" method="post">
      {book_id_html}
      <label for="title">Title
        <input id="title" type="text" name="title" value="{title}" required>
      </label>
      <br />
      <label for="readDate">Read on
        <input id="readDate" type="date" name="readDate" value="{read_date}">
      </label>
      <br />
      <label for="rating">Rating
        <input id="rating" type="number" name="rating" min="1" max="5" value="{rating}" required>
      </label>
      <br />
      <label for="description">Description
        <textarea id="description" name="description" rows="6" cols="50">{description}</textarea>
      </label>
      <br />
      <label for="isbn">ISBN
        <input id="isbn" type="text" name="isbn" value="{isbn}">
      </label>
      <br />
      <button type="submit">Save</button>
    </form>
    <a href="/user">Cancel</a>
"#
        ),
    )
}

/// One `<li>` per book. The owner additionally gets edit and delete buttons.
pub fn book_list_html(books: &[Book], owner_controls: bool) -> String {
    if books.is_empty() {
        return "    <p>No books yet.</p>\n".to_string();
    }
    let mut html = String::from("    <ul>\n");
    for book in books {
        let read_date = book
            .read_date
            .map(|d| format!("read on {}", d.format("%Y-%m-%d")))
            .unwrap_or_else(|| "not read yet".to_string());
        let isbn = book
            .isbn
            .as_deref()
            .map(|isbn| format!(" · ISBN {}", escape(isbn)))
            .unwrap_or_default();
        let description = book
            .description
            .as_deref()
            .map(|d| format!("<p>{}</p>", escape(d)))
            .unwrap_or_default();
        let controls = if owner_controls {
            format!(
                r#"
        <form action="/edit" method="post"><input type="hidden" name="bookId" value="{id}"><button type="submit">Edit</button></form>
        <form action="/delete" method="post"><input type="hidden" name="bookId" value="{id}"><button type="submit">Delete</button></form>"#,
                id = book.id
            )
        } else {
            String::new()
        };
        html.push_str(&format!(
            r#"      <li class="book">
        <h3>{title}</h3>
        <p>{rating}/5, {read_date}{isbn}</p>
        {description}{controls}
      </li>
"#,
            title = escape(&book.title),
            rating = book.rating,
        ));
    }
    html.push_str("    </ul>\n");
    html
}

#[tracing::instrument(name = "Get owned book", skip(pool))]
async fn get_owned_book(
    pool: &PgPool,
    book_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Book>, anyhow::Error> {
    sqlx::query_as::<_, Book>(
        r#"
SELECT id, user_id, title, read_date, rating, description, isbn
FROM books
WHERE id = $1 AND user_id = $2
"#,
    )
    .bind(book_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to retrieve the book.")
}

#[tracing::instrument(name = "Get books of a user", skip(pool))]
pub async fn get_books_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Book>, anyhow::Error> {
    sqlx::query_as::<_, Book>(
        r#"
SELECT id, user_id, title, read_date, rating, description, isbn
FROM books
WHERE user_id = $1
ORDER BY read_date DESC NULLS LAST, created_at DESC
"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("Failed to retrieve the user's books.")
}
