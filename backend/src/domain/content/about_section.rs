//! Ordered section of the "About" page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media_asset::MediaAsset;
use super::validation::validate_non_empty_field;
use super::{ContentValidationError, Publishable, deserialize_via_draft};

/// Input payload for [`AboutSection::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSectionDraft {
    /// Repository identifier.
    pub id: u64,
    /// Section heading.
    pub title: String,
    /// Rich-text body.
    #[serde(default)]
    pub content: Option<String>,
    /// Explicit position on the page, ascending.
    #[serde(default)]
    pub order: i32,
    /// Illustration.
    #[serde(default)]
    pub image: Option<MediaAsset>,
    /// Publish timestamp; absent for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// One section of the About page, rendered in `order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSection {
    id: u64,
    title: String,
    content: Option<String>,
    order: i32,
    image: Option<MediaAsset>,
    published_at: Option<DateTime<Utc>>,
}

impl AboutSection {
    /// Validate and construct a section.
    pub fn new(draft: AboutSectionDraft) -> Result<Self, ContentValidationError> {
        Self::try_from(draft)
    }

    /// Repository identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
    /// Section heading.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    /// Rich-text body.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
    /// Display position; lower values come first.
    pub fn order(&self) -> i32 {
        self.order
    }
    /// Section image.
    pub fn image(&self) -> Option<&MediaAsset> {
        self.image.as_ref()
    }
}

impl Publishable for AboutSection {
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

impl TryFrom<AboutSectionDraft> for AboutSection {
    type Error = ContentValidationError;

    fn try_from(draft: AboutSectionDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            id: draft.id,
            title: validate_non_empty_field(draft.title, "about_section.title")?,
            content: draft.content,
            order: draft.order,
            image: draft.image,
            published_at: draft.published_at,
        })
    }
}

deserialize_via_draft!(AboutSection, AboutSectionDraft);
