//! Client case study with image gallery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media_asset::MediaAsset;
use super::validation::{blank_to_none, validate_non_empty_field, validate_slug};
use super::{ContentValidationError, Publishable, Sluggable, deserialize_via_draft};
use crate::domain::slug::Slug;

/// Input payload for [`CaseStudy::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyDraft {
    /// Repository identifier.
    pub id: u64,
    /// Unique slug.
    pub slug: String,
    /// Headline.
    pub title: String,
    /// Client name.
    #[serde(default)]
    pub client: Option<String>,
    /// Short summary for listing cards.
    #[serde(default)]
    pub summary: Option<String>,
    /// Rich-text body.
    #[serde(default)]
    pub content: Option<String>,
    /// Listing and header image.
    #[serde(default)]
    pub cover_image: Option<MediaAsset>,
    /// Gallery images in display order.
    #[serde(default)]
    pub gallery: Vec<MediaAsset>,
    /// Publish timestamp; absent for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Case study showcased in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    id: u64,
    slug: Slug,
    title: String,
    client: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    cover_image: Option<MediaAsset>,
    gallery: Vec<MediaAsset>,
    published_at: Option<DateTime<Utc>>,
}

impl CaseStudy {
    /// Validate and construct a case study.
    pub fn new(draft: CaseStudyDraft) -> Result<Self, ContentValidationError> {
        Self::try_from(draft)
    }

    /// Repository identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
    /// Case study title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    /// Client the work was done for.
    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }
    /// Short summary for listings.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
    /// Rich-text body.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
    /// Cover image.
    pub fn cover_image(&self) -> Option<&MediaAsset> {
        self.cover_image.as_ref()
    }
    /// Additional images, in editor order.
    pub fn gallery(&self) -> &[MediaAsset] {
        self.gallery.as_slice()
    }
}

impl Sluggable for CaseStudy {
    fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

impl Publishable for CaseStudy {
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

impl TryFrom<CaseStudyDraft> for CaseStudy {
    type Error = ContentValidationError;

    fn try_from(draft: CaseStudyDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            id: draft.id,
            slug: validate_slug(draft.slug, "case_study.slug")?,
            title: validate_non_empty_field(draft.title, "case_study.title")?,
            client: blank_to_none(draft.client),
            summary: draft.summary,
            content: draft.content,
            cover_image: draft.cover_image,
            gallery: draft.gallery,
            published_at: draft.published_at,
        })
    }
}

deserialize_via_draft!(CaseStudy, CaseStudyDraft);
