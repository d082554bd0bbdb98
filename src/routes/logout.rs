//! src/routes/logout.rs
use crate::{routes::helpers::see_other, session_state::TypedSession};
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;

#[tracing::instrument(name = "Log out", skip(session))]
pub async fn logout(session: TypedSession) -> Result<HttpResponse, actix_web::Error> {
    session.logout();
    FlashMessage::info("You have successfully logged out.").send();
    Ok(see_other("/login"))
}
