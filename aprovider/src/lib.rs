//! Backend boundary for the alice chat workspace: the chat context
//! contracts, the tagged failure taxonomy, the retry/backoff combinator, and
//! the Gemini adapter.

mod backend;
mod credentials;
mod error;
mod resilience;

pub mod adapters;

pub use adapters::gemini::{
    GEMINI_BASE_URL, GeminiBackend, GeminiContent, GeminiHttpTransport, GeminiRequest,
    GeminiTransport,
};
pub use backend::{BackendFuture, ChatBackend, ChatContext, ContextConfig, TurnReply};
pub use credentials::SecretString;
pub use error::{BackendError, BackendErrorKind};
pub use resilience::{DispatchHooks, NoopDispatchHooks, RetryPolicy, send_with_retry};
