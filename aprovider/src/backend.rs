//! Backend contracts: stateful chat contexts and the factory that opens them.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use acommon::{GenerationSettings, Turn};

use crate::BackendError;

pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fixed configuration attached to every session context: model, persona
/// instruction, and generation parameters. Network calls happen only on
/// `send`, so opening a context is synchronous and infallible.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    pub model: String,
    pub system_instruction: Option<String>,
    pub generation: GenerationSettings,
}

impl ContextConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            generation: GenerationSettings::default(),
        }
    }

    pub fn with_system_instruction(mut self, system_instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(system_instruction.into());
        self
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }
}

/// One model reply. A missing payload is normalized to `None`, never an
/// error; callers render it as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnReply {
    pub text: Option<String>,
}

impl TurnReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text_or_empty(self) -> String {
        self.text.unwrap_or_default()
    }
}

pub trait ChatBackend: Send + Sync {
    /// Opens a fresh stateful context seeded with exactly `history`, in
    /// order, nothing added or removed.
    fn open_context(&self, config: ContextConfig, history: Vec<Turn>) -> Arc<dyn ChatContext>;
}

/// A backend-held conversation: seed history plus the exchanges accumulated
/// by successful sends.
pub trait ChatContext: Send + Sync {
    fn send<'a>(&'a self, message: String) -> BackendFuture<'a, Result<TurnReply, BackendError>>;

    /// Seed history followed by accumulated exchanges, oldest first.
    fn history(&self) -> Vec<Turn>;
}
