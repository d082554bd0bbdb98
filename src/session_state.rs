//! src/session_state.rs
use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

pub struct TypedSession(Session);

impl TypedSession {
    const USER_ID_KEY: &'static str = "user_id";

    /// Rotates the session key, dropping the record stored under the old one.
    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn insert_user_id(&self, user_id: Uuid) -> Result<(), SessionInsertError> {
        self.0.insert(Self::USER_ID_KEY, user_id)
    }

    pub fn get_user_id(&self) -> Result<Option<Uuid>, SessionGetError> {
        self.0.get(Self::USER_ID_KEY)
    }

    /// Forgets the user and rotates the key. The session itself survives so
    /// a flash message can still be attached to the response.
    pub fn logout(self) {
        self.0.clear();
        self.0.renew();
    }

    /// Deletes the session record and its cookie.
    pub fn purge(self) {
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    // Same error as the inner `Session` extractor.
    type Error = <Session as FromRequest>::Error;
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
