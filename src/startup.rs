//! src/startup.rs
use crate::authentication::{reject_anonymous_users, resolve_principal};
use crate::configuration::{DatabaseSettings, HashingSettings, Settings};
use crate::routes::{
    add_book, delete_book, edit_book, health_check, home, list_books, login, login_form, logout,
    register, register_form, user_page,
};
use crate::session_store::PostgresSessionStore;
use actix_session::config::PersistentSession;
use actix_session::SessionMiddleware;
use actix_web::cookie::time::Duration;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use actix_web_flash_messages::storage::SessionMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: &Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        check_database(&connection_pool).await?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}.", address))?;
        let port = listener.local_addr()?.port();

        let session_store = PostgresSessionStore::new(connection_pool.clone());
        spawn_session_pruning(
            session_store.clone(),
            std::time::Duration::from_secs(configuration.application.session_prune_interval_seconds),
        );

        let server = run(
            listener,
            connection_pool,
            session_store,
            SessionSettings {
                hmac_secret: configuration.application.hmac_secret.clone(),
                ttl: Duration::seconds(configuration.application.session_ttl_seconds),
                cookie_secure: configuration.application.cookie_secure,
            },
            configuration.hashing.clone(),
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.connection_options())
}

/// Fails fast when the database cannot be reached instead of serving errors.
#[tracing::instrument(name = "Check database connectivity", skip(pool))]
pub async fn check_database(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("Failed to connect to Postgres.")?;
    tracing::info!("Connected to Postgres");
    Ok(())
}

fn spawn_session_pruning(store: PostgresSessionStore, every: std::time::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match store.delete_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::info!(pruned = n, "Deleted expired sessions"),
                Err(e) => tracing::error!(error.cause_chain = ?e, "Failed to prune sessions"),
            }
        }
    });
}

pub struct SessionSettings {
    pub hmac_secret: Secret<String>,
    pub ttl: Duration,
    pub cookie_secure: bool,
}

pub fn run(
    listener: TcpListener,
    pool: PgPool,
    session_store: PostgresSessionStore,
    session_settings: SessionSettings,
    hashing: HashingSettings,
) -> Result<Server, anyhow::Error> {
    let pool = web::Data::new(pool);
    let hashing = web::Data::new(hashing);

    let secret_key = Key::try_from(session_settings.hmac_secret.expose_secret().as_bytes())
        .map_err(|e| anyhow::anyhow!("The session secret is unusable: {}", e))?;
    let message_framework = FlashMessagesFramework::builder(SessionMessageStore::default()).build();
    let SessionSettings { ttl, cookie_secure, .. } = session_settings;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(from_fn(resolve_principal))
            .wrap(TracingLogger::default())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(session_store.clone(), secret_key.clone())
                    .session_lifecycle(PersistentSession::default().session_ttl(ttl))
                    .cookie_secure(cookie_secure)
                    .build(),
            )
            .route("/health_check", web::get().to(health_check))
            .route("/", web::get().to(home))
            .route("/login", web::get().to(login_form))
            .route("/login", web::post().to(login))
            .route("/logout", web::get().to(logout))
            .route("/addUser", web::get().to(register_form))
            .route("/addUser", web::post().to(register))
            .route("/user", web::get().to(user_page))
            .route("/books", web::get().to(list_books))
            .service(
                web::resource("/add")
                    .wrap(from_fn(reject_anonymous_users))
                    .route(web::post().to(add_book)),
            )
            .service(
                web::resource("/edit")
                    .wrap(from_fn(reject_anonymous_users))
                    .route(web::post().to(edit_book)),
            )
            .service(
                web::resource("/delete")
                    .wrap(from_fn(reject_anonymous_users))
                    .route(web::post().to(delete_book)),
            )
            .app_data(pool.clone())
            .app_data(hashing.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
