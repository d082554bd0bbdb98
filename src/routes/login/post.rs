//! src/routes/login/post.rs
use crate::authentication::{validate_credentials, AuthError, Credentials};
use crate::routes::helpers::{error_chain_fmt, see_other};
use crate::session_state::TypedSession;
use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;
use sqlx::PgPool;

#[derive(serde::Deserialize)]
pub struct FormData {
    email: String,
    password: Secret<String>,
}

#[tracing::instrument(
    skip(form, pool, session),
    fields(email=tracing::field::Empty, user_id=tracing::field::Empty)
)]
pub async fn login(
    form: web::Form<FormData>,
    pool: web::Data<PgPool>,
    session: TypedSession,
) -> Result<HttpResponse, InternalError<LoginError>> {
    let form = form.into_inner();
    let credentials = Credentials::new(form.email.trim().to_lowercase(), form.password);
    tracing::Span::current().record("email", tracing::field::display(credentials.email()));

    match validate_credentials(credentials, &pool).await {
        Ok(principal) => {
            tracing::Span::current().record("user_id", tracing::field::display(&principal.id));
            session.renew();
            session
                .insert_user_id(principal.id)
                .map_err(|e| login_redirect(LoginError::UnexpectedError(e.into())))?;
            Ok(see_other("/user"))
        }
        Err(e) => {
            let e = match e {
                AuthError::InvalidCredentials(_) => LoginError::AuthError(e.into()),
                AuthError::MalformedHash(_) => {
                    tracing::error!(error.cause_chain = ?e, "Stored password hash is unusable");
                    LoginError::AuthError(e.into())
                }
                AuthError::UnexpectedError(_) => LoginError::UnexpectedError(e.into()),
            };
            Err(login_redirect(e))
        }
    }
}

/// Queues the error as a flash message and sends the user back to the form.
fn login_redirect(e: LoginError) -> InternalError<LoginError> {
    FlashMessage::error(e.to_string()).send();
    InternalError::from_response(e, see_other("/login"))
}

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password.")]
    AuthError(#[source] anyhow::Error),
    #[error("Something went wrong.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
