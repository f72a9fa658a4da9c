//! Tracing-based dispatch hooks.
//!
//! ```rust
//! use aobserve::TracingDispatchHooks;
//! use aprovider::DispatchHooks;
//!
//! fn accepts_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! accepts_hooks(&TracingDispatchHooks);
//! ```

use std::time::Duration;

use aprovider::{BackendError, DispatchHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatchHooks;

impl DispatchHooks for TracingDispatchHooks {
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        tracing::info!(event = "attempt_start", operation, attempt);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &BackendError,
    ) {
        tracing::warn!(
            event = "retry_scheduled",
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = ?error.kind,
            status = error.status,
            error = %error
        );
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        tracing::info!(event = "success", operation, attempts);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &BackendError) {
        tracing::error!(
            event = "failure",
            operation,
            attempts,
            error_kind = ?error.kind,
            status = error.status,
            retryable = error.retryable,
            error = %error
        );
    }
}
