//! Retrying delivery of inquiry notifications.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::InquiryNotification;
use crate::domain::ports::{NotificationSendError, NotificationSender};

/// Attempt budget and backoff bounds for notification delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum delivery attempts per notification, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay before jitter.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Un-jittered delay after failed attempt `attempt` (1-based):
    /// `initial_backoff * 2^(attempt - 1)`, capped at `max_backoff`.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        let base_ms = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }

    fn attempt_budget(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Async sleeping abstraction so retries can be tested without waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Spreads retry delays so simultaneous failures do not retry in lockstep.
pub trait BackoffJitter: Send + Sync {
    /// Return the delay to wait given the exponential `base` delay.
    fn jittered_delay(&self, base: Duration, attempt: u32) -> Duration;
}

/// Adds up to a quarter of the base delay, chosen at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttemptJitter;

impl BackoffJitter for AttemptJitter {
    fn jittered_delay(&self, base: Duration, _attempt: u32) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let max_extra = base_ms.checked_div(4).unwrap_or_default().max(1);
        let extra = SmallRng::from_entropy().gen_range(0..=max_extra);
        Duration::from_millis(base_ms.saturating_add(extra))
    }
}

/// Sleep and jitter strategies used between attempts.
pub struct NotificationWorkerRuntime {
    /// Async sleep implementation.
    pub sleeper: Arc<dyn Sleeper>,
    /// Jitter strategy for retry delays.
    pub jitter: Arc<dyn BackoffJitter>,
}

impl Default for NotificationWorkerRuntime {
    fn default() -> Self {
        Self {
            sleeper: Arc::new(TokioSleeper),
            jitter: Arc::new(AttemptJitter),
        }
    }
}

/// Result of delivering one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The sender accepted the notification.
    Delivered {
        /// Attempts used, including the successful one.
        attempts: u32,
    },
    /// Delivery stopped without success.
    Abandoned {
        /// Attempts used.
        attempts: u32,
        /// Error from the final attempt.
        last_error: NotificationSendError,
    },
}

impl DeliveryOutcome {
    /// Return `true` when the notification was delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Delivers queued notifications, retrying transient failures.
pub struct NotificationWorker {
    sender: Arc<dyn NotificationSender>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    jitter: Arc<dyn BackoffJitter>,
}

impl NotificationWorker {
    /// Create a worker delivering through `sender`.
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        policy: RetryPolicy,
        runtime: NotificationWorkerRuntime,
    ) -> Self {
        Self {
            sender,
            policy,
            sleeper: runtime.sleeper,
            jitter: runtime.jitter,
        }
    }

    /// Deliver `notification`, retrying transient failures with backoff.
    ///
    /// Permanent failures stop immediately. The outcome is returned rather
    /// than raised because nothing upstream waits on delivery.
    pub async fn deliver(&self, notification: &InquiryNotification) -> DeliveryOutcome {
        let budget = self.policy.attempt_budget();
        let mut attempt = 1;
        loop {
            match self.sender.send(notification).await {
                Ok(()) => {
                    info!(job_id = %notification.job_id, attempts = attempt, "inquiry notification delivered");
                    return DeliveryOutcome::Delivered { attempts: attempt };
                }
                Err(error) if error.is_retryable() && attempt < budget => {
                    let delay = self
                        .jitter
                        .jittered_delay(self.policy.base_delay(attempt), attempt);
                    warn!(
                        job_id = %notification.job_id,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "inquiry notification failed; retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    warn!(
                        job_id = %notification.job_id,
                        attempts = attempt,
                        error = %error,
                        "inquiry notification abandoned"
                    );
                    return DeliveryOutcome::Abandoned {
                        attempts: attempt,
                        last_error: error,
                    };
                }
            }
        }
    }
}
