//! src/routes/register/post.rs
use crate::authentication::compute_password_hash;
use crate::configuration::HashingSettings;
use crate::domain::{NewUser, UserEmail, UserName};
use crate::routes::helpers::{error_chain_fmt, see_other};
use crate::telemetry::spawn_blocking_with_tracing;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidateUrl;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    email: String,
    password: Secret<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    about: Option<String>,
    #[serde(default)]
    profile_link: Option<String>,
}

/// Blank form fields come through as empty strings.
fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<FormData> for NewUser {
    type Error = String;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        let email = UserEmail::parse(form.email)?;
        if form.password.expose_secret().is_empty() {
            return Err("A password is required.".to_string());
        }
        let name = non_blank(form.name).map(UserName::parse).transpose()?;
        let profile_link = non_blank(form.profile_link);
        if let Some(link) = &profile_link {
            if !link.validate_url() {
                return Err(format!("{} is not a valid link.", link));
            }
        }
        Ok(NewUser {
            email,
            password: form.password,
            name,
            about: non_blank(form.about),
            profile_link,
        })
    }
}

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("Email already exists. Try logging in.")]
    EmailTaken,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for RegisterError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegisterError::EmailTaken => StatusCode::CONFLICT,
            RegisterError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            RegisterError::EmailTaken => HttpResponse::build(self.status_code())
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
            RegisterError::UnexpectedError(_) => HttpResponse::new(self.status_code()),
        }
    }
}

#[tracing::instrument(
    name = "Registering a new user",
    skip(form, pool, hashing),
    fields(user_email = %form.email)
)]
pub async fn register(
    form: web::Form<FormData>,
    pool: web::Data<PgPool>,
    hashing: web::Data<HashingSettings>,
) -> Result<HttpResponse, RegisterError> {
    let new_user: NewUser = match form.0.try_into() {
        Ok(new_user) => new_user,
        Err(e) => {
            FlashMessage::error(e).send();
            return Ok(see_other("/addUser"));
        }
    };

    let settings = hashing.get_ref().clone();
    let password = new_user.password.clone();
    let password_hash =
        spawn_blocking_with_tracing(move || compute_password_hash(password, &settings))
            .await
            .context("Failed to spawn blocking task.")??;

    insert_user(&pool, &new_user, password_hash).await?;
    FlashMessage::info("Your account has been created, you can log in now.").send();
    Ok(see_other("/login"))
}

/// The `UNIQUE` constraint on `users.email` is what rejects duplicates, so
/// concurrent registrations for one email cannot both succeed.
#[tracing::instrument(name = "Saving new user details in the database", skip(pool, new_user, password_hash))]
async fn insert_user(
    pool: &PgPool,
    new_user: &NewUser,
    password_hash: Secret<String>,
) -> Result<Uuid, RegisterError> {
    let user_id = Uuid::new_v4();
    sqlx::query(
        r#"
INSERT INTO users (id, email, password_hash, name, about, profile_link)
VALUES ($1, $2, $3, $4, $5, $6)
"#,
    )
    .bind(user_id)
    .bind(new_user.email.as_ref())
    .bind(password_hash.expose_secret())
    .bind(new_user.name.as_ref().map(|n| n.as_ref()))
    .bind(new_user.about.as_deref())
    .bind(new_user.profile_link.as_deref())
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
            tracing::info!("Email is already registered");
            RegisterError::EmailTaken
        }
        e => RegisterError::UnexpectedError(
            anyhow::Error::new(e).context("Failed to insert a new user."),
        ),
    })?;
    Ok(user_id)
}
