//! Contact inquiry intake and notification delivery.
//!
//! Intake persists the stamped inquiry first and only then queues a
//! notification. Notification delivery is a separate, retryable unit of work:
//! a failure to enqueue or deliver never undoes or fails the stored inquiry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::content::{ContactInquiry, ContactSubmission, ContentValidationError};
use super::ports::{ContactInquiryRepository, ContactInquiryRepositoryError, NotificationQueue};

mod worker;

#[cfg(test)]
mod tests;

pub use worker::{
    AttemptJitter, BackoffJitter, DeliveryOutcome, NotificationWorker, NotificationWorkerRuntime,
    RetryPolicy, Sleeper, TokioSleeper,
};

/// Longest message excerpt carried in a notification, in characters.
pub const MESSAGE_EXCERPT_CHARS: usize = 160;

/// Job payload describing one received inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryNotification {
    /// Unique job identifier, stable across retries.
    pub job_id: Uuid,
    /// Stored inquiry identifier, when the repository assigned one.
    pub inquiry_id: Option<u64>,
    /// Sender's name.
    pub name: String,
    /// Sender's e-mail address.
    pub email: String,
    /// Leading part of the message body.
    pub message_excerpt: String,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
}

impl InquiryNotification {
    /// Build the notification for a stored inquiry.
    pub fn for_inquiry(inquiry: &ContactInquiry) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            inquiry_id: inquiry.id,
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            message_excerpt: excerpt(&inquiry.message),
            submitted_at: inquiry.submitted_at,
        }
    }
}

fn excerpt(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(MESSAGE_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

/// Errors raised while receiving a contact submission.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The submission failed its preconditions.
    #[error("contact submission is invalid: {0}")]
    Invalid(#[from] ContentValidationError),
    /// The inquiry could not be stored.
    #[error(transparent)]
    Repository(#[from] ContactInquiryRepositoryError),
}

/// Receives contact submissions on the repository side.
#[derive(Clone)]
pub struct ContactInquiryIntake<R, Q> {
    repository: Arc<R>,
    queue: Arc<Q>,
    clock: Arc<dyn Clock>,
}

impl<R, Q> ContactInquiryIntake<R, Q> {
    /// Create an intake service.
    pub fn new(repository: Arc<R>, queue: Arc<Q>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            queue,
            clock,
        }
    }
}

impl<R, Q> ContactInquiryIntake<R, Q>
where
    R: ContactInquiryRepository,
    Q: NotificationQueue,
{
    /// Validate, stamp and store `submission`, then queue its notification.
    ///
    /// # Errors
    ///
    /// [`IntakeError::Invalid`] before anything is stored, or
    /// [`IntakeError::Repository`] when the insert fails. Queue failures are
    /// logged and do not produce an error.
    pub async fn receive(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactInquiry, IntakeError> {
        submission.validate()?;
        let inquiry = ContactInquiry::received(submission, self.clock.utc());
        let stored = self.repository.create(inquiry).await?;

        let notification = InquiryNotification::for_inquiry(&stored);
        let job_id = notification.job_id;
        match self.queue.enqueue(notification).await {
            Ok(()) => info!(%job_id, inquiry_id = ?stored.id, "contact inquiry stored and notification queued"),
            Err(error) => warn!(
                %job_id,
                inquiry_id = ?stored.id,
                error = %error,
                "contact inquiry stored but notification could not be queued"
            ),
        }
        Ok(stored)
    }
}
