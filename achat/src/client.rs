//! The conversation session manager: one active backend context plus the
//! turn dispatcher that masks transient failures with bounded backoff.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use acommon::Turn;
use aprovider::{
    BackendError, ChatBackend, ChatContext, ContextConfig, DispatchHooks, NoopDispatchHooks,
    RetryPolicy, send_with_retry,
};
use futures_timer::Delay;

const SEND_OPERATION: &str = "send_message";

/// Owns the single active session context for one conversation.
///
/// `init_session` replaces the context wholesale; `send_message` dispatches
/// one user utterance against whatever context is active at attempt time,
/// bootstrapping an empty session if none exists. The client never touches
/// the caller's own turn log: appending the user turn and the reply after a
/// successful dispatch is the caller's job.
pub struct ChatClient {
    backend: Arc<dyn ChatBackend>,
    config: ContextConfig,
    policy: RetryPolicy,
    hooks: Arc<dyn DispatchHooks>,
    active: Mutex<Option<Arc<dyn ChatContext>>>,
}

impl ChatClient {
    pub fn new(backend: Arc<dyn ChatBackend>, config: ContextConfig) -> Self {
        Self::builder(backend, config).build()
    }

    pub fn builder(backend: Arc<dyn ChatBackend>, config: ContextConfig) -> ChatClientBuilder {
        ChatClientBuilder {
            backend,
            config,
            policy: RetryPolicy::default(),
            hooks: Arc::new(NoopDispatchHooks),
        }
    }

    /// Installs a fresh context seeded with exactly `history`, discarding any
    /// previous one. Synchronous and infallible: the backend is not contacted
    /// until the next dispatch.
    pub fn init_session(&self, history: Vec<Turn>) {
        let context = self.backend.open_context(self.config.clone(), history);
        let mut slot = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(context);
    }

    /// The currently active context, if one has been initialized or
    /// bootstrapped.
    pub fn active_context(&self) -> Option<Arc<dyn ChatContext>> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    /// Delivers one user utterance and resolves with the reply text, with a
    /// missing reply payload normalized to the empty string.
    ///
    /// Rate-limit and overload failures are retried up to the policy budget
    /// (by default 3 retries delayed 1000/2000/4000 ms); any other failure,
    /// and the last failure once retries are exhausted, is returned to the
    /// caller unchanged.
    pub async fn send_message(&self, text: &str) -> Result<String, BackendError> {
        self.dispatch(text, Delay::new).await
    }

    async fn dispatch<Sleep, SleepFuture>(
        &self,
        text: &str,
        sleep: Sleep,
    ) -> Result<String, BackendError>
    where
        Sleep: FnMut(Duration) -> SleepFuture,
        SleepFuture: Future<Output = ()>,
    {
        let reply = send_with_retry(
            SEND_OPERATION,
            &self.policy,
            self.hooks.as_ref(),
            |_attempt| {
                // Re-read the slot on every attempt so a reset that lands
                // between attempts is picked up rather than a stale snapshot.
                let context = self.current_or_bootstrap();
                let message = text.to_string();
                async move { context.send(message).await }
            },
            sleep,
        )
        .await?;

        Ok(reply.text_or_empty())
    }

    fn current_or_bootstrap(&self) -> Arc<dyn ChatContext> {
        let mut slot = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(context) => Arc::clone(context),
            None => {
                let context = self.backend.open_context(self.config.clone(), Vec::new());
                *slot = Some(Arc::clone(&context));
                context
            }
        }
    }
}

pub struct ChatClientBuilder {
    backend: Arc<dyn ChatBackend>,
    config: ContextConfig,
    policy: RetryPolicy,
    hooks: Arc<dyn DispatchHooks>,
}

impl ChatClientBuilder {
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn DispatchHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ChatClient {
        ChatClient {
            backend: self.backend,
            config: self.config,
            policy: self.policy,
            hooks: self.hooks,
            active: Mutex::new(None),
        }
    }
}
