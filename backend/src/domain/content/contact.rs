//! Contact-form submissions and the inquiries stored from them.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ContentValidationError;
use super::validation::blank_to_none;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Syntactic check only: one `@`, no whitespace, a dot in the domain.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Visitor-supplied contact form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Sender's name.
    pub name: String,
    /// Sender's e-mail address.
    pub email: String,
    /// Sender's organisation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Sender's phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Message body.
    pub message: String,
}

impl ContactSubmission {
    /// Check the submission's preconditions.
    ///
    /// `name`, `email` and `message` must be non-blank and `email` must look
    /// like `local@domain.tld`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agency_content::domain::ContactSubmission;
    ///
    /// let submission = ContactSubmission {
    ///     name: "Ada".to_owned(),
    ///     email: "not-an-email".to_owned(),
    ///     company: None,
    ///     phone: None,
    ///     message: "Hello".to_owned(),
    /// };
    /// assert!(submission.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ContentValidationError> {
        for (value, field) in [
            (&self.name, "contact.name"),
            (&self.email, "contact.email"),
            (&self.message, "contact.message"),
        ] {
            if value.trim().is_empty() {
                return Err(ContentValidationError::EmptyField { field });
            }
        }
        if !email_regex().is_match(self.email.trim()) {
            return Err(ContentValidationError::InvalidEmail {
                field: "contact.email",
            });
        }
        Ok(())
    }
}

/// Processing status of a stored inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InquiryStatus {
    /// Received and not yet handled.
    New,
}

/// Contact inquiry as stored by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInquiry {
    /// Repository identifier; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Sender's name.
    pub name: String,
    /// Sender's e-mail address.
    pub email: String,
    /// Sender's organisation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Sender's phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Message body.
    pub message: String,
    /// Processing status.
    pub status: InquiryStatus,
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
}

impl ContactInquiry {
    /// Stamp a submission as a new inquiry received at `now`.
    ///
    /// Text fields are trimmed and blank optional fields dropped.
    pub fn received(submission: ContactSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: submission.name.trim().to_owned(),
            email: submission.email.trim().to_owned(),
            company: blank_to_none(submission.company).map(|value| value.trim().to_owned()),
            phone: blank_to_none(submission.phone).map(|value| value.trim().to_owned()),
            message: submission.message.trim().to_owned(),
            status: InquiryStatus::New,
            submitted_at: now,
        }
    }

    /// Return the inquiry with its repository identifier.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}
