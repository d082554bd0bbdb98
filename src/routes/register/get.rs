//! src/routes/register/get.rs
use crate::routes::helpers::{flash_messages_html, html_page};
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

#[tracing::instrument(name = "Get registration form", skip(flash_messages))]
pub async fn register_form(flash_messages: IncomingFlashMessages) -> HttpResponse {
    let msg_html = flash_messages_html(&flash_messages);
    html_page(
        "Register",
        &format!(
            r#"
    <h1>Register</h1>
    {msg_html}
    <form action="/addUser" method="post">
      <label for="email">Email
        <input id="email" type="email" name="email" placeholder="Enter email" required>
      </label>
      <br />
      <label for="password">Password
        <input id="password" type="password" name="password" placeholder="Choose a password" required>
      </label>
      <br />
      <label for="name">Name
        <input id="name" type="text" name="name" placeholder="How should we call you?">
      </label>
      <br />
      <label for="about">About
        <textarea id="about" name="about" rows="4" cols="50" placeholder="A few words about you"></textarea>
      </label>
      <br />
      <label for="profileLink">Profile link
        <input id="profileLink" type="url" name="profileLink" placeholder="https://...">
      </label>
      <br />
      <button type="submit">Register</button>
    </form>
    <p>Already registered? <a href="/login">Login</a></p>
"#
        ),
    )
}
