//! src/routes/user.rs
use crate::authentication::{get_principal, Principal};
use crate::routes::books::{book_list_html, get_books_for_user};
use crate::routes::helpers::{
    e500, escape, escape_attribute, flash_messages_html, html_page, page_with_status, see_other,
};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::IncomingFlashMessages;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    user_id: Option<Uuid>,
}

/// Books of `?userId=`, or of the logged-in user when the parameter is absent.
#[tracing::instrument(
    name = "Get user page",
    skip(pool, principal, flash_messages),
    fields(viewer_id = tracing::field::Empty)
)]
pub async fn user_page(
    parameters: web::Query<Parameters>,
    pool: web::Data<PgPool>,
    principal: Option<web::ReqData<Principal>>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    let viewer = principal.map(|p| p.into_inner());
    if let Some(viewer) = &viewer {
        tracing::Span::current().record("viewer_id", tracing::field::display(&viewer.id));
    }

    let owner = match (parameters.user_id, &viewer) {
        (Some(user_id), Some(viewer)) if user_id == viewer.id => viewer.clone(),
        (Some(user_id), _) => match get_principal(&pool, user_id).await.map_err(e500)? {
            Some(owner) => owner,
            None => {
                return Ok(page_with_status(
                    StatusCode::NOT_FOUND,
                    "Reader not found",
                    "    <h1>Reader not found</h1>\n",
                ))
            }
        },
        (None, Some(viewer)) => viewer.clone(),
        (None, None) => return Ok(see_other("/login")),
    };
    let same_user = viewer.as_ref().is_some_and(|v| v.id == owner.id);

    let books = get_books_for_user(&pool, owner.id).await.map_err(e500)?;

    let about = owner
        .about
        .as_deref()
        .map(|a| format!("<p>{}</p>", escape(a)))
        .unwrap_or_default();
    let profile_link = owner
        .profile_link
        .as_deref()
        .map(|l| format!(r#"<p><a href="{}">{}</a></p>"#, escape_attribute(l), escape(l)))
        .unwrap_or_default();
    let add_html = if same_user {
        r#"<form action="/add" method="post"><button type="submit">Add a book</button></form>"#
    } else {
        ""
    };
    let msg_html = flash_messages_html(&flash_messages);
    let name = escape(owner.display_name());
    let books_html = book_list_html(&books, same_user);

    Ok(html_page(
        &format!("{} books", owner.display_name()),
        &format!(
            r#"
    <h1>{name}</h1>
    {msg_html}
    {about}
    {profile_link}
    <h2>Books ({count})</h2>
    {add_html}
{books_html}"#,
            count = books.len(),
        ),
    ))
}
