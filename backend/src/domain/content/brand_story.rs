//! Structured brand story: mission, vision and values of a client brand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{blank_to_none, validate_non_empty_field, validate_slug};
use super::{ContentValidationError, Publishable, Sluggable, deserialize_via_draft};
use crate::domain::slug::Slug;
use crate::domain::workflow::WorkflowStage;

/// Input payload for [`BrandStory::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandStoryDraft {
    /// Repository identifier.
    pub id: u64,
    /// Unique slug.
    pub slug: String,
    /// Story title.
    pub title: String,
    /// One-line positioning statement.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Mission statement.
    #[serde(default)]
    pub mission: Option<String>,
    /// Vision statement.
    #[serde(default)]
    pub vision: Option<String>,
    /// Core values in priority order.
    #[serde(default)]
    pub values: Vec<String>,
    /// Editorial stage recorded by editors.
    #[serde(default)]
    pub workflow_stage: Option<WorkflowStage>,
    /// Publish timestamp; absent for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Brand story rendered on the agency's story pages.
///
/// `workflow_stage` is informational: nothing validates stage transitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandStory {
    id: u64,
    slug: Slug,
    title: String,
    tagline: Option<String>,
    mission: Option<String>,
    vision: Option<String>,
    values: Vec<String>,
    workflow_stage: Option<WorkflowStage>,
    published_at: Option<DateTime<Utc>>,
}

impl BrandStory {
    /// Validate and construct a brand story.
    pub fn new(draft: BrandStoryDraft) -> Result<Self, ContentValidationError> {
        Self::try_from(draft)
    }

    /// Repository identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
    /// Story title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    /// One-line tagline.
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }
    /// Mission statement.
    pub fn mission(&self) -> Option<&str> {
        self.mission.as_deref()
    }
    /// Vision statement.
    pub fn vision(&self) -> Option<&str> {
        self.vision.as_deref()
    }
    /// Brand values, in editor order.
    pub fn values(&self) -> &[String] {
        self.values.as_slice()
    }
    /// Editorial stage recorded by editors, if any.
    pub fn workflow_stage(&self) -> Option<WorkflowStage> {
        self.workflow_stage
    }
}

impl Sluggable for BrandStory {
    fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

impl Publishable for BrandStory {
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

impl TryFrom<BrandStoryDraft> for BrandStory {
    type Error = ContentValidationError;

    fn try_from(draft: BrandStoryDraft) -> Result<Self, Self::Error> {
        let values = draft
            .values
            .into_iter()
            .map(|value| validate_non_empty_field(value, "brand_story.values"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: draft.id,
            slug: validate_slug(draft.slug, "brand_story.slug")?,
            title: validate_non_empty_field(draft.title, "brand_story.title")?,
            tagline: blank_to_none(draft.tagline),
            mission: blank_to_none(draft.mission),
            vision: blank_to_none(draft.vision),
            values,
            workflow_stage: draft.workflow_stage,
            published_at: draft.published_at,
        })
    }
}

deserialize_via_draft!(BrandStory, BrandStoryDraft);
