//! Tests for contact intake and the notification worker.

use std::sync::Mutex;
use std::time::Duration;

use super::*;
use crate::domain::ports::{
    FixtureContactInquiryRepository, MockContactInquiryRepository, MockNotificationQueue,
    MockNotificationSender, NotificationQueueError, NotificationSendError,
};
use chrono::{Local, TimeZone};
use rstest::rstest;

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        fixture_now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_now()
    }
}

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        company: None,
        phone: None,
        message: "We would like to talk about a rebrand.".to_owned(),
    }
}

#[tokio::test]
async fn receive_stores_then_queues_notification() {
    let mut queue = MockNotificationQueue::new();
    queue
        .expect_enqueue()
        .withf(|notification: &InquiryNotification| {
            notification.inquiry_id == Some(1) && notification.email == "ada@example.com"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let intake = ContactInquiryIntake::new(
        Arc::new(FixtureContactInquiryRepository),
        Arc::new(queue),
        Arc::new(FixtureClock),
    );

    let stored = intake.receive(submission()).await.expect("stored");

    assert_eq!(stored.id, Some(1));
    assert_eq!(stored.submitted_at, fixture_now());
}

#[tokio::test]
async fn queue_failures_do_not_fail_the_write() {
    let mut queue = MockNotificationQueue::new();
    queue
        .expect_enqueue()
        .times(1)
        .return_once(|_| Err(NotificationQueueError::unavailable("worker stopped")));
    let intake = ContactInquiryIntake::new(
        Arc::new(FixtureContactInquiryRepository),
        Arc::new(queue),
        Arc::new(FixtureClock),
    );

    let stored = intake.receive(submission()).await.expect("write survives");

    assert_eq!(stored.id, Some(1));
}

#[tokio::test]
async fn invalid_submissions_store_nothing() {
    let mut repository = MockContactInquiryRepository::new();
    repository.expect_create().times(0);
    let mut queue = MockNotificationQueue::new();
    queue.expect_enqueue().times(0);
    let intake =
        ContactInquiryIntake::new(Arc::new(repository), Arc::new(queue), Arc::new(FixtureClock));

    let error = intake
        .receive(ContactSubmission {
            email: "not-an-email".to_owned(),
            ..submission()
        })
        .await
        .expect_err("invalid email");

    assert!(matches!(error, IntakeError::Invalid(_)));
}

#[tokio::test]
async fn repository_failures_skip_the_notification() {
    let mut repository = MockContactInquiryRepository::new();
    repository
        .expect_create()
        .times(1)
        .return_once(|_| Err(ContactInquiryRepositoryError::rejected("duplicate")));
    let mut queue = MockNotificationQueue::new();
    queue.expect_enqueue().times(0);
    let intake =
        ContactInquiryIntake::new(Arc::new(repository), Arc::new(queue), Arc::new(FixtureClock));

    let error = intake.receive(submission()).await.expect_err("rejected");

    assert!(matches!(error, IntakeError::Repository(_)));
}

#[rstest]
fn long_messages_are_excerpted() {
    let inquiry = ContactInquiry::received(
        ContactSubmission {
            message: "a".repeat(MESSAGE_EXCERPT_CHARS + 40),
            ..submission()
        },
        fixture_now(),
    );

    let notification = InquiryNotification::for_inquiry(&inquiry);

    assert_eq!(
        notification.message_excerpt.chars().count(),
        MESSAGE_EXCERPT_CHARS + 3
    );
    assert!(notification.message_excerpt.ends_with("..."));
}

#[derive(Default)]
struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().expect("delays lock").push(duration);
    }
}

struct NoJitter;

impl BackoffJitter for NoJitter {
    fn jittered_delay(&self, base: Duration, _attempt: u32) -> Duration {
        base
    }
}

fn policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 4,
        initial_backoff: Duration::from_millis(100),
        max_backoff: Duration::from_millis(250),
    }
}

fn worker(sender: MockNotificationSender, sleeper: Arc<RecordingSleeper>) -> NotificationWorker {
    NotificationWorker::new(
        Arc::new(sender),
        policy(),
        NotificationWorkerRuntime {
            sleeper,
            jitter: Arc::new(NoJitter),
        },
    )
}

fn notification() -> InquiryNotification {
    let inquiry = ContactInquiry::received(submission(), fixture_now()).with_id(7);
    InquiryNotification::for_inquiry(&inquiry)
}

#[rstest]
#[case(1, Duration::from_millis(100))]
#[case(2, Duration::from_millis(200))]
#[case(3, Duration::from_millis(250))]
#[case(30, Duration::from_millis(250))]
fn base_delay_doubles_and_caps(#[case] attempt: u32, #[case] expected: Duration) {
    assert_eq!(policy().base_delay(attempt), expected);
}

#[rstest]
fn default_jitter_stays_within_a_quarter() {
    let base = Duration::from_millis(400);
    let delay = AttemptJitter.jittered_delay(base, 1);
    assert!(delay >= base);
    assert!(delay <= Duration::from_millis(500));
}

#[tokio::test]
async fn transient_failures_are_retried_until_delivered() {
    let mut sender = MockNotificationSender::new();
    let mut calls = 0;
    sender.expect_send().times(3).returning(move |_| {
        calls += 1;
        if calls < 3 {
            Err(NotificationSendError::transient("smtp 421"))
        } else {
            Ok(())
        }
    });
    let sleeper = Arc::new(RecordingSleeper::default());

    let outcome = worker(sender, Arc::clone(&sleeper))
        .deliver(&notification())
        .await;

    assert_eq!(outcome, DeliveryOutcome::Delivered { attempts: 3 });
    assert_eq!(
        *sleeper.delays.lock().expect("delays lock"),
        vec![Duration::from_millis(100), Duration::from_millis(200)]
    );
}

#[tokio::test]
async fn exhausted_budget_abandons_with_last_error() {
    let mut sender = MockNotificationSender::new();
    sender
        .expect_send()
        .times(4)
        .returning(|_| Err(NotificationSendError::transient("smtp 421")));
    let sleeper = Arc::new(RecordingSleeper::default());

    let outcome = worker(sender, Arc::clone(&sleeper))
        .deliver(&notification())
        .await;

    assert_eq!(
        outcome,
        DeliveryOutcome::Abandoned {
            attempts: 4,
            last_error: NotificationSendError::transient("smtp 421"),
        }
    );
    assert_eq!(sleeper.delays.lock().expect("delays lock").len(), 3);
}

#[tokio::test]
async fn permanent_failures_are_not_retried() {
    let mut sender = MockNotificationSender::new();
    sender
        .expect_send()
        .times(1)
        .returning(|_| Err(NotificationSendError::permanent("mailbox does not exist")));
    let sleeper = Arc::new(RecordingSleeper::default());

    let outcome = worker(sender, Arc::clone(&sleeper))
        .deliver(&notification())
        .await;

    assert!(!outcome.is_delivered());
    assert!(sleeper.delays.lock().expect("delays lock").is_empty());
}
