//! src/domain/book.rs
use chrono::NaiveDate;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn parse(title: String) -> Result<Self, String> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err("A book needs a title.".to_string());
        }
        if title.graphemes(true).count() > 512 {
            return Err("The title is too long.".to_string());
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for BookTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A rating between 1 and 5, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(i16);

impl Rating {
    pub const MIN: i16 = 1;
    pub const MAX: i16 = 5;

    pub fn parse(rating: &str) -> Result<Self, String> {
        let value: i16 = rating
            .trim()
            .parse()
            .map_err(|_| format!("{} is not a valid rating.", rating))?;
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "The rating must be between {} and {}.",
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub fn value(&self) -> i16 {
        self.0
    }
}

#[derive(Debug)]
pub struct NewBook {
    pub title: BookTitle,
    pub read_date: Option<NaiveDate>,
    pub rating: Rating,
    pub description: Option<String>,
    pub isbn: Option<String>,
}

/// Parses the `YYYY-MM-DD` value sent by `<input type="date">`.
pub fn parse_read_date(read_date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(read_date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{} is not a valid date (expected YYYY-MM-DD).", read_date))
}
