//! Uploaded media referenced by content kinds.

use serde::{Deserialize, Serialize};

use super::validation::{blank_to_none, validate_non_empty_field};
use super::{ContentValidationError, deserialize_via_draft};

/// Image or file uploaded to the repository's media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Media library identifier.
    pub id: Option<u64>,
    /// Public URL, absolute or relative to the repository host.
    pub url: String,
    /// Alternative text for accessibility.
    pub alternative_text: Option<String>,
    /// Intrinsic width in pixels.
    pub width: Option<u32>,
    /// Intrinsic height in pixels.
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaAssetDraft {
    #[serde(default)]
    id: Option<u64>,
    url: String,
    #[serde(default)]
    alternative_text: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

impl MediaAsset {
    /// Create a media asset with only a URL.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agency_content::domain::MediaAsset;
    ///
    /// let image = MediaAsset::new("/uploads/hero.jpg").expect("valid media asset");
    /// assert_eq!(image.url, "/uploads/hero.jpg");
    /// assert!(image.alternative_text.is_none());
    /// ```
    pub fn new(url: impl Into<String>) -> Result<Self, ContentValidationError> {
        Ok(Self {
            id: None,
            url: validate_non_empty_field(url.into(), "media.url")?,
            alternative_text: None,
            width: None,
            height: None,
        })
    }
}

impl TryFrom<MediaAssetDraft> for MediaAsset {
    type Error = ContentValidationError;

    fn try_from(draft: MediaAssetDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            id: draft.id,
            url: validate_non_empty_field(draft.url, "media.url")?,
            alternative_text: blank_to_none(draft.alternative_text),
            width: draft.width,
            height: draft.height,
        })
    }
}

deserialize_via_draft!(MediaAsset, MediaAssetDraft);
