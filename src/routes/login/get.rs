//! src/routes/login/get.rs
use crate::routes::helpers::{flash_messages_html, html_page};
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

#[tracing::instrument(name = "Get login form", skip(flash_messages))]
pub async fn login_form(flash_messages: IncomingFlashMessages) -> HttpResponse {
    let msg_html = flash_messages_html(&flash_messages);
    html_page(
        "Login",
        &format!(
            r#"
    <h1>Login</h1>
    {msg_html}
    <form action="/login" method="post">
      <label for="email">Email
        <input id="email" type="email" name="email" placeholder="Enter email">
      </label>
      <br />
      <label for="password">Password
        <input id="password" type="password" name="password" placeholder="Enter password">
      </label>
      <button type="submit">Login</button>
    </form>
    <p>No account yet? <a href="/addUser">Register</a></p>
"#
        ),
    )
}
