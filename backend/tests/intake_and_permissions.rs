//! Repository-side services wired to their in-process adapters.

use std::sync::Arc;

use agency_content::domain::ports::{FixtureContactInquiryRepository, PermissionStore};
use agency_content::domain::{
    ContactInquiryIntake, ContactSubmission, IntakeError, NotificationWorker,
    NotificationWorkerRuntime, PermissionReconciler, RetryPolicy, desired_public_permissions,
    permission_action,
};
use agency_content::outbound::notifications::TracingNotificationSender;
use agency_content::outbound::permissions::InMemoryPermissionStore;
use agency_content::outbound::queue::{InMemoryNotificationQueue, spawn_notification_worker};
use mockable::DefaultClock;
use rstest::rstest;

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Grace".to_owned(),
        email: "grace@example.com".to_owned(),
        company: None,
        phone: Some("+44 20 7946 0000".to_owned()),
        message: "Can you help with our launch campaign?".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn reconciliation_converges_then_stays_quiet() {
    let store = Arc::new(InMemoryPermissionStore::with_actions([
        permission_action("page", "find"),
        permission_action("blog-post", "delete"),
        "plugin::upload.content-api.upload".to_owned(),
    ]));
    let reconciler = PermissionReconciler::new(Arc::clone(&store));

    let first = reconciler.reconcile().await.expect("first run");
    let second = reconciler.reconcile().await.expect("second run");

    assert_eq!(first.revoked, vec![permission_action("blog-post", "delete")]);
    assert_eq!(first.granted.len(), desired_public_permissions().len() - 1);
    assert!(second.is_noop());

    let current = store.public_permissions().await.expect("permissions");
    assert!(desired_public_permissions().is_subset(&current));
    assert!(current.contains("plugin::upload.content-api.upload"));
}

#[rstest]
#[tokio::test]
async fn received_inquiries_are_notified_through_the_queue() {
    let (queue, receiver) = InMemoryNotificationQueue::channel(8);
    let worker = NotificationWorker::new(
        Arc::new(TracingNotificationSender::new("studio@example.com")),
        RetryPolicy::default(),
        NotificationWorkerRuntime::default(),
    );
    let handle = spawn_notification_worker(receiver, worker);
    let intake = ContactInquiryIntake::new(
        Arc::new(FixtureContactInquiryRepository),
        Arc::new(queue),
        Arc::new(DefaultClock),
    );

    let stored = intake.receive(submission()).await.expect("stored");
    let rejected = intake
        .receive(ContactSubmission {
            message: String::new(),
            ..submission()
        })
        .await
        .expect_err("blank message");
    drop(intake);

    assert_eq!(stored.id, Some(1));
    assert!(matches!(rejected, IntakeError::Invalid(_)));
    assert_eq!(handle.await.expect("worker task joins"), 1);
}
