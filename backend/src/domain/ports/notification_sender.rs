//! Driven port delivering one inquiry notification (e-mail or equivalent).

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::InquiryNotification;

define_port_error! {
    /// Errors raised while delivering a notification.
    pub enum NotificationSendError {
        /// Delivery failed for a reason that may clear on retry.
        Transient { message: String } =>
            "notification delivery failed: {message}",
        /// Delivery can never succeed for this notification.
        Permanent { message: String } =>
            "notification delivery rejected: {message}",
    }
}

impl NotificationSendError {
    /// Return whether retrying this error is expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Port for delivering inquiry notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver `notification` once.
    async fn send(&self, notification: &InquiryNotification) -> Result<(), NotificationSendError>;
}
