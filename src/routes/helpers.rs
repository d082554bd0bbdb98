//! src/routes/helpers.rs
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{http::StatusCode, HttpResponse};
use actix_web_flash_messages::{IncomingFlashMessages, Level};

pub fn e500<T>(e: T) -> actix_web::Error
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    actix_web::error::ErrorInternalServerError(e)
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::build(StatusCode::SEE_OTHER)
        .insert_header((LOCATION, location))
        .finish()
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Escapes user-provided text before it is interpolated into a page.
pub fn escape(text: &str) -> String {
    htmlescape::encode_minimal(text)
}

/// For values placed inside double- or single-quoted attributes. Only the
/// quotes are added to `escape`, dates and URLs keep their punctuation.
pub fn escape_attribute(text: &str) -> String {
    escape(text).replace('"', "&quot;").replace('\'', "&#x27;")
}

pub fn flash_messages_html(flash_messages: &IncomingFlashMessages) -> String {
    let mut msg_html = String::new();
    for m in flash_messages.iter() {
        let class = match m.level() {
            Level::Error | Level::Warning => "error",
            _ => "info",
        };
        msg_html.push_str(&format!(
            r#"<p class="{class}"><i>{}</i></p>
"#,
            escape(m.content())
        ));
    }
    msg_html
}

/// Wraps `body` in the shared page skeleton and navigation.
pub fn html_page(title: &str, body: &str) -> HttpResponse {
    page_with_status(StatusCode::OK, title, body)
}

pub fn page_with_status(status: StatusCode, title: &str, body: &str) -> HttpResponse {
    let title = escape(title);
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta http-equiv="content-type" content="text/html; charset=utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
</head>
<body>
  <nav>
    <a href="/">Readers</a>
    <a href="/books">All books</a>
    <a href="/user">My books</a>
    <a href="/login">Login</a>
    <a href="/addUser">Register</a>
    <a href="/logout">Logout</a>
  </nav>
{body}
</body>
</html>"#
        ))
}
