//! Metrics-based dispatch hooks.
//!
//! ```rust
//! use aobserve::MetricsDispatchHooks;
//! use aprovider::DispatchHooks;
//!
//! fn accepts_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! accepts_hooks(&MetricsDispatchHooks);
//! ```

use std::time::Duration;

use aprovider::{BackendError, DispatchHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsDispatchHooks;

impl DispatchHooks for MetricsDispatchHooks {
    fn on_attempt_start(&self, operation: &str, _attempt: u32) {
        metrics::counter!(
            "alice_dispatch_attempt_start_total",
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &BackendError,
    ) {
        metrics::counter!(
            "alice_dispatch_retry_scheduled_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "alice_dispatch_retry_delay_seconds",
            "operation" => operation.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        metrics::counter!(
            "alice_dispatch_success_total",
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "alice_dispatch_attempts_per_success",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &BackendError) {
        metrics::counter!(
            "alice_dispatch_failure_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "alice_dispatch_attempts_per_failure",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}
