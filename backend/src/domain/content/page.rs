//! Static marketing page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media_asset::MediaAsset;
use super::validation::{validate_non_empty_field, validate_slug};
use super::{ContentValidationError, Publishable, Sluggable, deserialize_via_draft};
use crate::domain::slug::Slug;

/// Input payload for [`Page::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDraft {
    /// Repository identifier.
    pub id: u64,
    /// Unique slug.
    pub slug: String,
    /// Page title.
    pub title: String,
    /// Rich-text body.
    #[serde(default)]
    pub content: Option<String>,
    /// Hero image relation.
    #[serde(default)]
    pub image: Option<MediaAsset>,
    /// Publish timestamp; absent for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Marketing page addressed by slug (`home`, `services`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    id: u64,
    slug: Slug,
    title: String,
    content: Option<String>,
    image: Option<MediaAsset>,
    published_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Validate and construct a page.
    pub fn new(draft: PageDraft) -> Result<Self, ContentValidationError> {
        Self::try_from(draft)
    }

    /// Repository identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
    /// Page title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    /// Rich-text body.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
    /// Hero image.
    pub fn image(&self) -> Option<&MediaAsset> {
        self.image.as_ref()
    }
}

impl Sluggable for Page {
    fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

impl Publishable for Page {
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

impl TryFrom<PageDraft> for Page {
    type Error = ContentValidationError;

    fn try_from(draft: PageDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            id: draft.id,
            slug: validate_slug(draft.slug, "page.slug")?,
            title: validate_non_empty_field(draft.title, "page.title")?,
            content: draft.content,
            image: draft.image,
            published_at: draft.published_at,
        })
    }
}

deserialize_via_draft!(Page, PageDraft);
