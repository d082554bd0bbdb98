//! src/domain/user_email.rs
use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct UserEmail(String);

impl UserEmail {
    /// Emails are compared case-insensitively, so they are stored lowercased.
    pub fn parse(email: String) -> Result<Self, String> {
        let email = email.trim().to_lowercase();
        if email.validate_email() {
            Ok(Self(email))
        } else {
            Err(format!("{} is not a valid email address.", email))
        }
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
