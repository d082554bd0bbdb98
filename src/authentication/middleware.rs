//! src/authentication/middleware.rs
use crate::authentication::{get_principal, Principal};
use crate::routes::{e500, see_other};
use crate::session_state::TypedSession;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::middleware::Next;
use actix_web::{web, FromRequest, HttpMessage};
use sqlx::PgPool;

/// Turns the user id stored in the session back into a [`Principal`] and
/// attaches it to the request extensions.
///
/// A session pointing at a user that no longer exists is purged and the
/// request carries on anonymously.
pub async fn resolve_principal(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    if let Some(user_id) = session.get_user_id().map_err(e500)? {
        let pool = req
            .app_data::<web::Data<PgPool>>()
            .cloned()
            .ok_or_else(|| e500("The connection pool is not registered."))?;
        match get_principal(&pool, user_id).await.map_err(e500)? {
            Some(principal) => {
                req.extensions_mut().insert(principal);
            }
            None => {
                tracing::warn!(%user_id, "Session refers to an unknown user, dropping it.");
                session.purge();
            }
        }
    }
    next.call(req).await
}

/// Only lets requests through when [`resolve_principal`] found a user.
pub async fn reject_anonymous_users(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if req.extensions().get::<Principal>().is_some() {
        next.call(req).await
    } else {
        let response = see_other("/login");
        let e = anyhow::anyhow!("The user has not logged in");
        Err(InternalError::from_response(e, response).into())
    }
}
