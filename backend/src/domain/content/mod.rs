//! Content kinds served by the repository's public read API.
//!
//! Each kind is decoded through a `*Draft` and validated on conversion, so a
//! malformed payload fails at the client boundary instead of surfacing as
//! missing fields in rendering code.

use std::fmt;

use chrono::{DateTime, Utc};

use super::slug::SlugValidationError;

mod about_section;
mod blog_post;
mod brand_story;
mod case_study;
mod contact;
mod job_listing;
mod media_asset;
mod page;
mod site_settings;
mod validation;

#[cfg(test)]
mod tests;

pub use about_section::{AboutSection, AboutSectionDraft};
pub use blog_post::{BlogPost, BlogPostDraft, Tag};
pub use brand_story::{BrandStory, BrandStoryDraft};
pub use case_study::{CaseStudy, CaseStudyDraft};
pub use contact::{ContactInquiry, ContactSubmission, InquiryStatus};
pub use job_listing::{JobListing, JobListingDraft};
pub use media_asset::MediaAsset;
pub use page::{Page, PageDraft};
pub use site_settings::{SiteSettings, SiteSettingsDraft, SocialLink};

/// Validation errors returned by content-kind constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    /// A required text field is empty.
    EmptyField {
        /// Dotted field path.
        field: &'static str,
    },
    /// A slug field failed validation.
    InvalidSlug {
        /// Dotted field path.
        field: &'static str,
        /// Slug rule that was violated.
        reason: SlugValidationError,
    },
    /// An e-mail field is not syntactically valid.
    InvalidEmail {
        /// Dotted field path.
        field: &'static str,
    },
}

impl fmt::Display for ContentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidSlug { field, reason } => write!(f, "{field} is invalid: {reason}"),
            Self::InvalidEmail { field } => write!(f, "{field} must be a valid email address"),
        }
    }
}

impl std::error::Error for ContentValidationError {}

impl ContentValidationError {
    /// Dotted path of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field }
            | Self::InvalidSlug { field, .. }
            | Self::InvalidEmail { field } => field,
        }
    }
}

/// Content kinds carrying a publish timestamp.
pub trait Publishable {
    /// Publish timestamp; `None` marks an unpublished draft.
    fn published_at(&self) -> Option<DateTime<Utc>>;

    /// Return `true` when the item is visible on the public read path at `now`.
    fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published_at().is_some_and(|published| published <= now)
    }
}

/// Content kinds addressed by a unique slug.
pub trait Sluggable {
    /// The item's slug.
    fn slug(&self) -> &str;
}

/// Implements `Deserialize` for a validated kind through its draft.
macro_rules! deserialize_via_draft {
    ($kind:ty, $draft:ty) => {
        impl<'de> ::serde::Deserialize<'de> for $kind {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                <$draft as ::serde::Deserialize>::deserialize(deserializer)?
                    .try_into()
                    .map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use deserialize_via_draft;
