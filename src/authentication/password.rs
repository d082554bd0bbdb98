//! src/authentication/password.rs
use crate::authentication::Principal;
use crate::configuration::HashingSettings;
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

pub struct Credentials {
    email: String,
    password: Secret<String>,
}

impl Credentials {
    pub fn new(email: String, password: Secret<String>) -> Self {
        Credentials { email, password }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }
}

/// Why a login attempt was rejected. Kept for logs only, callers must not
/// show it to the user.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("No user is registered with this email.")]
    UnknownEmail,
    #[error("The password does not match the stored hash.")]
    PasswordMismatch,
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] AuthFailure),
    #[error("The stored password hash is malformed.")]
    MalformedHash(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

#[derive(sqlx::FromRow)]
struct StoredCredentials {
    id: Uuid,
    email: String,
    password_hash: String,
    name: Option<String>,
    about: Option<String>,
    profile_link: Option<String>,
}

#[tracing::instrument(name = "Get stored credentials", skip(pool, email))]
async fn get_stored_credentials(
    pool: &PgPool,
    email: &str,
) -> Result<Option<(Principal, Secret<String>)>, anyhow::Error> {
    let row = sqlx::query_as::<_, StoredCredentials>(
        r#"SELECT id, email, password_hash, name, about, profile_link FROM users WHERE email = $1"#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .context("Failed to perform a query to retrieve stored credentials.")?
    .map(|r| {
        let principal = Principal {
            id: r.id,
            email: r.email,
            name: r.name,
            about: r.about,
            profile_link: r.profile_link,
        };
        (principal, Secret::new(r.password_hash))
    });
    Ok(row)
}

#[tracing::instrument(name = "Verify password hash", skip(expected_password_hash, password_candidate))]
pub fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<(), AuthError> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC format.")
        .map_err(AuthError::MalformedHash)?;
    match Argon2::default().verify_password(
        password_candidate.expose_secret().as_bytes(),
        &expected_password_hash,
    ) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => {
            Err(AuthError::InvalidCredentials(AuthFailure::PasswordMismatch))
        }
        Err(e) => Err(AuthError::MalformedHash(
            anyhow::Error::new(e).context("Failed to verify password hash."),
        )),
    }
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, pool))]
pub async fn validate_credentials(
    credentials: Credentials,
    pool: &PgPool,
) -> Result<Principal, AuthError> {
    let mut principal = None;
    // Verified against when the email is unknown, so both paths cost the same.
    let mut expected_password_hash = Secret::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
gZiV/M1gPc22ElAH/Jh1Hw$\
CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    );
    if let Some((stored_principal, stored_password_hash)) =
        get_stored_credentials(pool, credentials.email()).await?
    {
        principal = Some(stored_principal);
        expected_password_hash = stored_password_hash;
    }

    let password = credentials.password;
    let verification = spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, password)
    })
    .await
    .context("Failed to spawn blocking task.")?;

    let principal = principal.ok_or(AuthError::InvalidCredentials(AuthFailure::UnknownEmail))?;
    verification?;
    Ok(principal)
}

#[tracing::instrument(name = "Compute password hash", skip(password, settings))]
pub fn compute_password_hash(
    password: Secret<String>,
    settings: &HashingSettings,
) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = settings
        .params()
        .context("Invalid password hashing parameters.")?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .context("Failed to hash password.")?
        .to_string();
    Ok(Secret::new(password_hash))
}
