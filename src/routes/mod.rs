//! src/routes/mod.rs
mod books;
mod health_check;
mod helpers;
mod home;
mod login;
mod logout;
mod register;
mod user;

pub use books::*;
pub use health_check::*;
pub use helpers::*;
pub use home::*;
pub use login::*;
pub use logout::*;
pub use register::*;
pub use user::*;
