//! In-process notification queue backed by a tokio channel.
//!
//! [`InMemoryNotificationQueue`] implements the `NotificationQueue` port by
//! pushing jobs onto a bounded channel. [`spawn_notification_worker`] drains
//! that channel on a background task, handing each job to a
//! [`NotificationWorker`]. Jobs are lost if the process stops before they are
//! delivered.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::ports::{NotificationQueue, NotificationQueueError};
use crate::domain::{DeliveryOutcome, InquiryNotification, NotificationWorker};

/// Queue handing notifications to an in-process worker task.
#[derive(Debug, Clone)]
pub struct InMemoryNotificationQueue {
    sender: Sender<InquiryNotification>,
}

impl InMemoryNotificationQueue {
    /// Create a queue holding at most `capacity` pending jobs, returning the
    /// receiving end for [`spawn_notification_worker`].
    pub fn channel(capacity: usize) -> (Self, Receiver<InquiryNotification>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationQueue for InMemoryNotificationQueue {
    async fn enqueue(
        &self,
        notification: InquiryNotification,
    ) -> Result<(), NotificationQueueError> {
        match self.sender.try_send(notification) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(rejected)) => Err(NotificationQueueError::rejected(format!(
                "queue is full; job {} dropped",
                rejected.job_id
            ))),
            Err(TrySendError::Closed(_)) => Err(NotificationQueueError::unavailable(
                "notification worker has stopped",
            )),
        }
    }
}

/// Drain `receiver` on a background task until every queue handle is dropped.
///
/// The task resolves to the number of notifications delivered.
pub fn spawn_notification_worker(
    mut receiver: Receiver<InquiryNotification>,
    worker: NotificationWorker,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut delivered = 0;
        while let Some(notification) = receiver.recv().await {
            match worker.deliver(&notification).await {
                DeliveryOutcome::Delivered { .. } => delivered += 1,
                DeliveryOutcome::Abandoned { attempts, last_error } => warn!(
                    job_id = %notification.job_id,
                    attempts,
                    error = %last_error,
                    "dropping undeliverable inquiry notification"
                ),
            }
        }
        debug!(delivered, "notification queue closed");
        delivered
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockNotificationSender;
    use crate::domain::{ContactInquiry, ContactSubmission, NotificationWorkerRuntime, RetryPolicy};
    use chrono::Utc;
    use rstest::rstest;

    fn notification() -> InquiryNotification {
        let submission = ContactSubmission {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            company: None,
            phone: None,
            message: "Hello".to_owned(),
        };
        InquiryNotification::for_inquiry(&ContactInquiry::received(submission, Utc::now()))
    }

    #[rstest]
    #[tokio::test]
    async fn queued_notifications_reach_the_worker() {
        let mut sender = MockNotificationSender::new();
        sender.expect_send().times(2).returning(|_| Ok(()));
        let worker = NotificationWorker::new(
            Arc::new(sender),
            RetryPolicy::default(),
            NotificationWorkerRuntime::default(),
        );
        let (queue, receiver) = InMemoryNotificationQueue::channel(4);
        let handle = spawn_notification_worker(receiver, worker);

        queue.enqueue(notification()).await.expect("queued");
        queue.enqueue(notification()).await.expect("queued");
        drop(queue);

        assert_eq!(handle.await.expect("worker task joins"), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn full_queue_rejects_jobs() {
        let (queue, _receiver) = InMemoryNotificationQueue::channel(1);

        queue.enqueue(notification()).await.expect("first fits");
        let error = queue
            .enqueue(notification())
            .await
            .expect_err("second overflows");

        assert!(matches!(error, NotificationQueueError::Rejected { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn closed_queue_reports_unavailable() {
        let (queue, receiver) = InMemoryNotificationQueue::channel(1);
        drop(receiver);

        let error = queue
            .enqueue(notification())
            .await
            .expect_err("receiver gone");

        assert!(matches!(error, NotificationQueueError::Unavailable { .. }));
    }
}
