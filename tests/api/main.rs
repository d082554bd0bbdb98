mod books;
mod health_check;
mod home;
mod login;
mod logout;
mod register;
