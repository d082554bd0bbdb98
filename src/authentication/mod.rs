//! src/authentication/mod.rs

mod middleware;
mod password;
mod principal;
pub use middleware::{reject_anonymous_users, resolve_principal};
pub use password::*;
pub use principal::{get_principal, Principal};
