//! Open position on the careers page.
//!
//! Listings are browsed by filtering the full list on the client side, so
//! they carry no slug.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{blank_to_none, validate_non_empty_field};
use super::{ContentValidationError, Publishable, deserialize_via_draft};

/// Input payload for [`JobListing::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListingDraft {
    /// Repository identifier.
    pub id: u64,
    /// Role title.
    pub title: String,
    /// Team or practice.
    #[serde(default)]
    pub department: Option<String>,
    /// Office or `Remote`.
    #[serde(default)]
    pub location: Option<String>,
    /// Contract type, e.g. `Full-time`.
    #[serde(default)]
    pub employment_type: Option<String>,
    /// Rich-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Publish timestamp; absent for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Published job opening.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    id: u64,
    title: String,
    department: Option<String>,
    location: Option<String>,
    employment_type: Option<String>,
    description: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

impl JobListing {
    /// Validate and construct a job listing.
    pub fn new(draft: JobListingDraft) -> Result<Self, ContentValidationError> {
        Self::try_from(draft)
    }

    /// Repository identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
    /// Role title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    /// Hiring department.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }
    /// Office or remote arrangement.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
    /// Full-time, contract, ...
    pub fn employment_type(&self) -> Option<&str> {
        self.employment_type.as_deref()
    }
    /// Rich-text role description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Publishable for JobListing {
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

impl TryFrom<JobListingDraft> for JobListing {
    type Error = ContentValidationError;

    fn try_from(draft: JobListingDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            id: draft.id,
            title: validate_non_empty_field(draft.title, "job_listing.title")?,
            department: blank_to_none(draft.department),
            location: blank_to_none(draft.location),
            employment_type: blank_to_none(draft.employment_type),
            description: draft.description,
            published_at: draft.published_at,
        })
    }
}

deserialize_via_draft!(JobListing, JobListingDraft);
