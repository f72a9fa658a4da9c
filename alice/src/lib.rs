//! Unified facade over the alice workspace crates.
//!
//! This crate is designed to be the single dependency for the chat
//! application. It re-exports the workspace crates, carries the fixed
//! persona data, and provides the convenience constructors that wire the
//! Gemini backend, the retry policy, and tracing instrumentation together.
//!
//! ```rust
//! use alice::{persona, turns};
//!
//! let client = alice::build_chat_client("api-key");
//!
//! // The welcome greeting only enters backend memory when the caller seeds
//! // it explicitly.
//! client.init_session(turns![model => persona::WELCOME_GREETING]);
//! assert!(client.active_context().is_some());
//! ```

mod macros;

pub mod persona;

use std::sync::Arc;

use reqwest::Client;

pub use achat;
pub use acommon;
pub use aobserve;
pub use aprovider;

pub use achat::{ChatClient, ChatClientBuilder};
pub use acommon::{
    GenerationSettings, Role, TranscriptError, Turn, parse_transcript, render_transcript,
};
pub use aobserve::{MetricsDispatchHooks, TracingDispatchHooks};
pub use aprovider::{
    BackendError, BackendErrorKind, BackendFuture, ChatBackend, ChatContext, ContextConfig,
    DispatchHooks, GEMINI_BASE_URL, GeminiBackend, GeminiContent, GeminiHttpTransport,
    GeminiRequest, GeminiTransport, NoopDispatchHooks, RetryPolicy, SecretString, TurnReply,
    send_with_retry,
};
pub use persona::fallback_reply;

/// Builds the production client: Gemini over HTTPS with the fixed persona
/// configuration and tracing instrumentation on retries.
pub fn build_chat_client(api_key: impl Into<String>) -> ChatClient {
    let transport = GeminiBackend::default_http_transport(Client::new(), api_key);
    chat_client_with(Arc::new(GeminiBackend::new(Arc::new(transport))))
}

/// Same wiring as [`build_chat_client`] over an arbitrary backend, for tests
/// and local doubles.
pub fn chat_client_with(backend: Arc<dyn ChatBackend>) -> ChatClient {
    ChatClient::builder(backend, persona::context_config())
        .with_hooks(Arc::new(TracingDispatchHooks))
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use aprovider::{
        BackendError, BackendFuture, ChatBackend, ChatContext, ContextConfig, TurnReply,
    };

    use crate::{Role, Turn, chat_client_with, persona};

    #[test]
    fn turn_macros_build_expected_turns() {
        let single = crate::turn!(user => "Ciao");
        assert_eq!(single.role, Role::User);
        assert_eq!(single.text, "Ciao");

        let history = crate::turns![
            model => persona::WELCOME_GREETING,
            user => "Ciao!",
        ];
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::Model);
        assert_eq!(history[0].text, persona::WELCOME_GREETING);
    }

    #[derive(Default)]
    struct RecordingBackend {
        opened_with: Mutex<Vec<(ContextConfig, Vec<Turn>)>>,
    }

    impl ChatBackend for RecordingBackend {
        fn open_context(&self, config: ContextConfig, history: Vec<Turn>) -> Arc<dyn ChatContext> {
            self.opened_with
                .lock()
                .expect("opened lock")
                .push((config, history.clone()));

            Arc::new(StaticContext { seed: history })
        }
    }

    struct StaticContext {
        seed: Vec<Turn>,
    }

    impl ChatContext for StaticContext {
        fn send<'a>(
            &'a self,
            _message: String,
        ) -> BackendFuture<'a, Result<TurnReply, BackendError>> {
            Box::pin(async move { Ok(TurnReply::empty()) })
        }

        fn history(&self) -> Vec<Turn> {
            self.seed.clone()
        }
    }

    #[test]
    fn wired_client_opens_contexts_with_the_persona_config() {
        let backend = Arc::new(RecordingBackend::default());
        let client = chat_client_with(Arc::clone(&backend) as _);

        client.init_session(crate::turns![user => "Ciao"]);

        let opened = backend.opened_with.lock().expect("opened lock");
        let (config, history) = &opened[0];
        assert_eq!(config.model, persona::DEFAULT_MODEL);
        assert_eq!(
            config.generation.temperature,
            Some(persona::DEFAULT_TEMPERATURE)
        );
        assert_eq!(config.generation.top_k, Some(persona::DEFAULT_TOP_K));
        assert_eq!(history.len(), 1);
    }
}
