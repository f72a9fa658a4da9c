//! Bounded retry/backoff policy and dispatch observability hooks.

use std::future::Future;
use std::time::Duration;

use crate::BackendError;

/// Retry bounds for one dispatch: at most `max_attempts` sends, with the
/// first retry delayed `initial_backoff` and each subsequent delay doubling
/// under `backoff_multiplier`, capped at `max_backoff`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_secs(8),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn should_retry(&self, attempt: u32, error: &BackendError) -> bool {
        error.retryable && attempt < self.max_attempts
    }

    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let unbounded = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()))
    }
}

/// Advisory instrumentation around dispatch attempts. Not part of the
/// functional contract; every callback defaults to a no-op.
pub trait DispatchHooks: Send + Sync {
    fn on_attempt_start(&self, _operation: &str, _attempt: u32) {}

    fn on_retry_scheduled(
        &self,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &BackendError,
    ) {
    }

    fn on_success(&self, _operation: &str, _attempts: u32) {}

    fn on_failure(&self, _operation: &str, _attempts: u32, _error: &BackendError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDispatchHooks;

impl DispatchHooks for NoopDispatchHooks {}

/// Runs `execute` up to the policy's attempt budget, sleeping between
/// retryable failures via the injected `sleep`. The final error is returned
/// unchanged, whether it was terminal on the first attempt or the last of a
/// retryable streak.
pub async fn send_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn DispatchHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, BackendError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, BackendError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        hooks.on_attempt_start(operation, attempt);

        match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(operation, attempt);
                return Ok(value);
            }
            Err(error) => {
                if policy.should_retry(attempt, &error) {
                    let delay = policy.backoff_for_attempt(attempt);
                    hooks.on_retry_scheduled(operation, attempt, delay, &error);
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                hooks.on_failure(operation, attempt, &error);
                return Err(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::{BackendError, BackendErrorKind};

    #[test]
    fn retry_policy_uses_retryable_flag_and_attempt_limit() {
        let policy = RetryPolicy::default();
        let throttled = BackendError::rate_limited("quota exceeded");
        let terminal = BackendError::authentication("bad key");

        assert!(policy.should_retry(1, &throttled));
        assert!(policy.should_retry(3, &throttled));
        assert!(!policy.should_retry(4, &throttled));
        assert!(!policy.should_retry(1, &terminal));
    }

    #[test]
    fn retry_policy_default_backoff_is_one_two_four_seconds() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.backoff_for_attempt(3), Duration::from_millis(4000));
    }

    #[test]
    fn retry_policy_backoff_caps_at_max() {
        let policy = RetryPolicy {
            max_attempts: 6,
            initial_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_millis(5000),
            backoff_multiplier: 2.0,
        };

        assert_eq!(policy.backoff_for_attempt(4), Duration::from_millis(5000));
        assert_eq!(policy.backoff_for_attempt(5), Duration::from_millis(5000));
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl DispatchHooks for RecordingHooks {
        fn on_attempt_start(&self, operation: &str, attempt: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{operation}:{attempt}"));
        }

        fn on_retry_scheduled(
            &self,
            operation: &str,
            attempt: u32,
            delay: Duration,
            _error: &BackendError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("retry:{operation}:{attempt}:{}", delay.as_millis()));
        }

        fn on_success(&self, operation: &str, attempts: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{operation}:{attempts}"));
        }

        fn on_failure(&self, operation: &str, attempts: u32, error: &BackendError) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{operation}:{attempts}:{:?}", error.kind));
        }
    }

    #[tokio::test]
    async fn send_with_retry_masks_transient_failures_and_reports_hooks() {
        let policy = RetryPolicy::default();
        let hooks = RecordingHooks::default();
        let sleeps = Arc::new(Mutex::new(Vec::new()));

        let result = send_with_retry(
            "send",
            &policy,
            &hooks,
            |attempt| async move {
                if attempt < 3 {
                    Err(BackendError::overloaded("try later"))
                } else {
                    Ok("Ciao anche a te!")
                }
            },
            {
                let sleeps = Arc::clone(&sleeps);
                move |delay| {
                    let sleeps = Arc::clone(&sleeps);
                    async move {
                        sleeps.lock().expect("sleep lock").push(delay);
                    }
                }
            },
        )
        .await;

        assert_eq!(result.expect("retry should recover"), "Ciao anche a te!");
        assert_eq!(
            *sleeps.lock().expect("sleep lock"),
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );

        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.contains(&"retry:send:1:1000".to_string()));
        assert!(events.contains(&"retry:send:2:2000".to_string()));
        assert!(events.contains(&"success:send:3".to_string()));
    }

    #[tokio::test]
    async fn send_with_retry_returns_last_error_after_exhaustion() {
        let policy = RetryPolicy::default();
        let hooks = RecordingHooks::default();
        let attempts = Arc::new(Mutex::new(0_u32));
        let sleeps = Arc::new(Mutex::new(Vec::new()));

        let result = send_with_retry::<(), _, _, _, _>(
            "send",
            &policy,
            &hooks,
            {
                let attempts = Arc::clone(&attempts);
                move |attempt| {
                    let attempts = Arc::clone(&attempts);
                    async move {
                        *attempts.lock().expect("attempts lock") = attempt;
                        Err(BackendError::rate_limited(format!("throttled #{attempt}")))
                    }
                }
            },
            {
                let sleeps = Arc::clone(&sleeps);
                move |delay| {
                    let sleeps = Arc::clone(&sleeps);
                    async move {
                        sleeps.lock().expect("sleep lock").push(delay);
                    }
                }
            },
        )
        .await;

        let error = result.expect_err("exhausted retries must fail");
        assert_eq!(error.kind, BackendErrorKind::RateLimited);
        assert_eq!(error.message, "throttled #4");
        assert_eq!(*attempts.lock().expect("attempts lock"), 4);
        assert_eq!(
            *sleeps.lock().expect("sleep lock"),
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
            ]
        );
    }

    #[tokio::test]
    async fn send_with_retry_stops_immediately_on_terminal_error() {
        let policy = RetryPolicy::default();
        let hooks = RecordingHooks::default();

        let result = send_with_retry::<(), _, _, _, _>(
            "send",
            &policy,
            &hooks,
            |_| async move { Err(BackendError::transport("connection refused")) },
            |_| async move { panic!("terminal errors must not sleep") },
        )
        .await;

        let error = result.expect_err("terminal error must fail");
        assert_eq!(error.kind, BackendErrorKind::Transport);

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(events, vec!["start:send:1", "failure:send:1:Transport"]);
    }
}
