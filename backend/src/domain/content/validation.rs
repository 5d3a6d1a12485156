//! Validation helpers shared by content kinds.

use super::ContentValidationError;
use crate::domain::slug::Slug;

pub(super) fn validate_slug(
    value: String,
    field: &'static str,
) -> Result<Slug, ContentValidationError> {
    Slug::new(value).map_err(|reason| ContentValidationError::InvalidSlug { field, reason })
}

pub(super) fn validate_non_empty_field(
    value: String,
    field: &'static str,
) -> Result<String, ContentValidationError> {
    if value.trim().is_empty() {
        return Err(ContentValidationError::EmptyField { field });
    }
    Ok(value)
}

/// Drop optional text that is present but blank.
pub(super) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
