//! Content domain: typed content kinds, the classified error taxonomy and the
//! services that read from and write to the content repository.
//!
//! Public surface:
//! - `ContentClient`: typed reads and contact submission over a transport port.
//! - `ContentError` / `ErrorKind`: closed classification of every failure.
//! - Content kinds (`Page`, `BlogPost`, `CaseStudy`, ...) decoded through
//!   validating drafts.
//! - `PermissionReconciler`: converges the public role on the read path's needs.
//! - `ContactInquiryIntake` / `NotificationWorker`: repository-side intake
//!   with notification delivery as a separate retryable job.

mod classify;
pub mod contact_intake;
pub mod content;
pub mod content_client;
mod envelope;
pub mod error;
pub mod permissions;
pub mod ports;
pub mod query;
pub mod slug;
pub mod workflow;

pub use self::contact_intake::{
    AttemptJitter, BackoffJitter, ContactInquiryIntake, DeliveryOutcome, InquiryNotification,
    IntakeError, NotificationWorker, NotificationWorkerRuntime, RetryPolicy, Sleeper,
    TokioSleeper,
};
pub use self::content::{
    AboutSection, AboutSectionDraft, BlogPost, BlogPostDraft, BrandStory, BrandStoryDraft,
    CaseStudy, CaseStudyDraft, ContactInquiry, ContactSubmission, ContentValidationError,
    InquiryStatus, JobListing, JobListingDraft, MediaAsset, Page, PageDraft, Publishable,
    SiteSettings, SiteSettingsDraft, Sluggable, SocialLink, Tag,
};
pub use self::content_client::{BlogPostFilters, ContentClient};
pub use self::envelope::ContentList;
pub use self::error::{ContentError, ErrorKind};
pub use self::permissions::{
    PermissionReconciler, ReconciliationError, ReconciliationReport, desired_public_permissions,
    permission_action,
};
pub use self::query::{ContentQuery, Filter, FilterOperator, SortDirection};
pub use self::slug::{Slug, SlugValidationError};
pub use self::workflow::WorkflowStage;

/// Result of a content client operation.
pub type ContentResult<T> = Result<T, ContentError>;
