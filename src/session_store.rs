//! src/session_store.rs
//!
//! Postgres backend for `actix-session`, storing each session as one row of
//! the `session` table (`sid`, `sess` JSON payload, `expire`).
use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_web::cookie::time::Duration;
use anyhow::Context;
use chrono::{DateTime, Utc};
use rand::distributions::{Alphanumeric, DistString};
use sqlx::PgPool;
use std::collections::HashMap;

type SessionState = HashMap<String, String>;

#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Removes every expired session, returning how many rows went away.
    #[tracing::instrument(name = "Delete expired sessions", skip(self))]
    pub async fn delete_expired(&self) -> Result<u64, anyhow::Error> {
        let result = sqlx::query(r#"DELETE FROM session WHERE expire <= now()"#)
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions.")?;
        Ok(result.rows_affected())
    }
}

fn generate_session_key() -> Result<SessionKey, anyhow::Error> {
    let value = Alphanumeric.sample_string(&mut rand::thread_rng(), 64);
    SessionKey::try_from(value).map_err(|_| anyhow::anyhow!("Generated an invalid session key."))
}

fn expires_at(ttl: &Duration) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::seconds(ttl.whole_seconds())
}

impl SessionStore for PostgresSessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<SessionState>, LoadError> {
        let sess = sqlx::query_scalar::<_, serde_json::Value>(
            r#"SELECT sess FROM session WHERE sid = $1 AND expire > now()"#,
        )
        .bind(session_key.as_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load session state.")
        .map_err(LoadError::Other)?;

        match sess {
            None => Ok(None),
            Some(sess) => serde_json::from_value(sess)
                .context("Failed to deserialize session state.")
                .map(Some)
                .map_err(LoadError::Deserialization),
        }
    }

    async fn save(
        &self,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, SaveError> {
        let sess = serde_json::to_value(&session_state)
            .context("Failed to serialize session state.")
            .map_err(SaveError::Serialization)?;
        let session_key = generate_session_key().map_err(SaveError::Other)?;

        sqlx::query(r#"INSERT INTO session (sid, sess, expire) VALUES ($1, $2, $3)"#)
            .bind(session_key.as_ref())
            .bind(sess)
            .bind(expires_at(ttl))
            .execute(&self.pool)
            .await
            .context("Failed to save session state.")
            .map_err(SaveError::Other)?;

        Ok(session_key)
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        let sess = serde_json::to_value(&session_state)
            .context("Failed to serialize session state.")
            .map_err(UpdateError::Serialization)?;

        let result = sqlx::query(r#"UPDATE session SET sess = $2, expire = $3 WHERE sid = $1"#)
            .bind(session_key.as_ref())
            .bind(sess)
            .bind(expires_at(ttl))
            .execute(&self.pool)
            .await
            .context("Failed to update session state.")
            .map_err(UpdateError::Other)?;

        if result.rows_affected() > 0 {
            return Ok(session_key);
        }
        // The row was pruned in the meantime, start over with a fresh key.
        self.save(session_state, ttl).await.map_err(|e| match e {
            SaveError::Serialization(e) => UpdateError::Serialization(e),
            SaveError::Other(e) => UpdateError::Other(e),
        })
    }

    async fn update_ttl(&self, session_key: &SessionKey, ttl: &Duration) -> Result<(), anyhow::Error> {
        sqlx::query(r#"UPDATE session SET expire = $2 WHERE sid = $1"#)
            .bind(session_key.as_ref())
            .bind(expires_at(ttl))
            .execute(&self.pool)
            .await
            .context("Failed to update session expiry.")?;
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> Result<(), anyhow::Error> {
        sqlx::query(r#"DELETE FROM session WHERE sid = $1"#)
            .bind(session_key.as_ref())
            .execute(&self.pool)
            .await
            .context("Failed to delete session.")?;
        Ok(())
    }
}
