//! Domain port describing dispatch of inquiry notifications.
//!
//! Enqueueing hands the notification to a separate unit of work; the caller
//! does not wait for delivery.
use async_trait::async_trait;

use super::define_port_error;
use crate::domain::InquiryNotification;

define_port_error! {
    /// Errors surfaced by the notification queue adapter.
    pub enum NotificationQueueError {
        /// Queue infrastructure is unavailable.
        Unavailable { message: String } => "notification queue is unavailable: {message}",
        /// The job could not be accepted.
        Rejected { message: String } => "notification job was rejected: {message}",
    }
}

/// Port for queueing inquiry notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Enqueue a notification for asynchronous delivery.
    async fn enqueue(&self, notification: InquiryNotification)
    -> Result<(), NotificationQueueError>;
}
