//! src/domain/mod.rs
mod book;
mod new_user;
mod user_email;
mod user_name;

pub use book::{parse_read_date, BookTitle, NewBook, Rating};
pub use new_user::NewUser;
pub use user_email::UserEmail;
pub use user_name::UserName;
