//! src/domain/user_name.rs
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct UserName(String);

impl UserName {
    /// Returns `Ok(UserName)` if the input is a usable display name,
    /// `Err(String)` otherwise.
    pub fn parse(name: String) -> Result<Self, String> {
        let name = name.trim().to_string();
        let is_empty = name.is_empty();
        // `å` is a single grapheme made of two chars, count what the user sees.
        let is_too_long = name.graphemes(true).count() > 256;
        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = name.chars().any(|g| forbidden_characters.contains(&g));
        if is_empty || is_too_long || contains_forbidden_characters {
            Err(format!("{} is not a valid name.", name))
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
