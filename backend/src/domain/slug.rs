//! URL-safe slug identifiers for sluggable content kinds.
//!
//! Slugs are trimmed, non-empty identifiers composed of ASCII letters,
//! digits, and the unreserved URL characters `-`, `_`, `.` and `~`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for [`Slug`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    /// The slug is empty or whitespace only.
    Empty,
    /// The slug has leading or trailing whitespace.
    Untrimmed,
    /// The slug contains a character outside the URL-safe set.
    InvalidCharacter {
        /// First offending character.
        character: char,
    },
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::Untrimmed => write!(f, "slug must not have surrounding whitespace"),
            Self::InvalidCharacter { character } => {
                write!(f, "slug contains unsupported character {character:?}")
            }
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// Unique URL-safe identifier of a content item, distinct from its numeric id.
///
/// # Examples
/// ```
/// use agency_content::domain::Slug;
///
/// let slug = Slug::new("brand-refresh_2024").expect("valid slug");
/// assert_eq!(slug.as_str(), "brand-refresh_2024");
/// assert!(Slug::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Validate and wrap `value`.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(SlugValidationError::Untrimmed);
        }
        if let Some(character) = raw.chars().find(|ch| !is_slug_char(*ch)) {
            return Err(SlugValidationError::InvalidCharacter { character });
        }
        Ok(Self(raw))
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '~')
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    //! Slug validation coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("home")]
    #[case("about-us")]
    #[case("Case_Study.2024~v2")]
    fn accepts_url_safe_slugs(#[case] raw: &str) {
        assert_eq!(Slug::new(raw).expect("valid").as_str(), raw);
    }

    #[rstest]
    #[case("", SlugValidationError::Empty)]
    #[case("   ", SlugValidationError::Empty)]
    #[case(" home", SlugValidationError::Untrimmed)]
    #[case("a/b", SlugValidationError::InvalidCharacter { character: '/' })]
    #[case("café", SlugValidationError::InvalidCharacter { character: 'é' })]
    fn rejects_invalid_slugs(#[case] raw: &str, #[case] expected: SlugValidationError) {
        assert_eq!(Slug::new(raw).expect_err("invalid"), expected);
    }

    #[rstest]
    fn deserialisation_validates() {
        let result: Result<Slug, _> = serde_json::from_str("\"two words\"");
        assert!(result.is_err());
    }
}
