//! Conversation session management over a chat backend.
//!
//! The crate owns two pieces: the session state holder (one active backend
//! context, replaced wholesale on reset) and the turn dispatcher (bounded
//! exponential backoff over transient backend failures).

mod client;

pub use client::{ChatClient, ChatClientBuilder};
pub use acommon::{GenerationSettings, Role, Turn};
pub use aprovider::{
    BackendError, BackendErrorKind, BackendFuture, ChatBackend, ChatContext, ContextConfig,
    DispatchHooks, NoopDispatchHooks, RetryPolicy, TurnReply,
};
