//! Backend error kinds and error value helpers.
//!
//! ```rust
//! use aprovider::BackendError;
//!
//! let throttled = BackendError::rate_limited("quota exceeded");
//! assert!(throttled.retryable);
//!
//! let auth = BackendError::authentication("bad key");
//! assert!(!auth.retryable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tagged failure classes produced at the backend boundary. The dispatcher
/// decides retry behavior from `retryable` alone and never inspects message
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    RateLimited,
    Overloaded,
    Authentication,
    InvalidRequest,
    Transport,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
    /// HTTP status code when the failure came from a response.
    pub status: Option<u16>,
    pub retryable: bool,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retryable,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::RateLimited, message, true)
    }

    pub fn overloaded(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Overloaded, message, true)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Authentication, message, false)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::InvalidRequest, message, false)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Transport, message, false)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Other, message, false)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for BackendError {}
