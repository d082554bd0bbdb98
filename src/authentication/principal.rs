//! src/authentication/principal.rs
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

/// The logged-in user, as seen by request handlers.
///
/// Built from the `users` row minus its password hash. Only `id` ever goes
/// into the session; the rest is reloaded on every request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub about: Option<String>,
    pub profile_link: Option<String>,
}

impl Principal {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[tracing::instrument(name = "Get principal", skip(pool))]
pub async fn get_principal(pool: &PgPool, user_id: Uuid) -> Result<Option<Principal>, anyhow::Error> {
    sqlx::query_as::<_, Principal>(
        r#"SELECT id, email, name, about, profile_link FROM users WHERE id = $1"#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("Failed to perform a query to retrieve the current user.")
}
