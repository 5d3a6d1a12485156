//! Notification sender that records deliveries as structured log events.
//!
//! Used where no mail transport is configured; the event carries the
//! inquiry's identifiers but never the full message body.

use async_trait::async_trait;
use tracing::info;

use crate::domain::InquiryNotification;
use crate::domain::ports::{NotificationSendError, NotificationSender};

/// Sender that logs each notification at `info` level and always succeeds.
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationSender {
    recipient: Option<String>,
}

impl TracingNotificationSender {
    /// Create a sender addressed to `recipient`, typically the studio inbox.
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: Some(recipient.into()),
        }
    }
}

#[async_trait]
impl NotificationSender for TracingNotificationSender {
    async fn send(&self, notification: &InquiryNotification) -> Result<(), NotificationSendError> {
        info!(
            target: "agency_content::notifications",
            job_id = %notification.job_id,
            inquiry_id = ?notification.inquiry_id,
            recipient = self.recipient.as_deref().unwrap_or("unset"),
            from = %notification.email,
            excerpt_chars = notification.message_excerpt.chars().count(),
            "new contact inquiry"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactInquiry, ContactSubmission};
    use chrono::Utc;

    #[tokio::test]
    async fn logging_sender_always_succeeds() {
        let inquiry = ContactInquiry::received(
            ContactSubmission {
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                company: None,
                phone: None,
                message: "Hello".to_owned(),
            },
            Utc::now(),
        );

        let sender = TracingNotificationSender::new("studio@example.test");
        sender
            .send(&InquiryNotification::for_inquiry(&inquiry))
            .await
            .expect("logging never fails");
    }
}
