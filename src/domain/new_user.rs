//! src/domain/new_user.rs
use crate::domain::UserEmail;
use crate::domain::UserName;
use secrecy::Secret;

#[derive(Debug)]
pub struct NewUser {
    pub email: UserEmail,
    pub password: Secret<String>,
    pub name: Option<UserName>,
    pub about: Option<String>,
    pub profile_link: Option<String>,
}
