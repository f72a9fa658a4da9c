//! Gemini chat backend: stateful contexts over the generateContent endpoint.

mod serde_api;
mod transport;
mod types;

use std::sync::{Arc, Mutex};

use acommon::Turn;
use reqwest::Client;

use crate::{BackendError, BackendFuture, ChatBackend, ChatContext, ContextConfig, TurnReply};

pub use transport::{GEMINI_BASE_URL, GeminiHttpTransport, GeminiTransport};
pub use types::{GeminiContent, GeminiRequest};

#[derive(Debug, Clone)]
pub struct GeminiBackend {
    transport: Arc<dyn GeminiTransport>,
}

impl GeminiBackend {
    pub fn new(transport: Arc<dyn GeminiTransport>) -> Self {
        Self { transport }
    }

    pub fn default_http_transport(client: Client, api_key: impl Into<String>) -> GeminiHttpTransport {
        GeminiHttpTransport::new(client, api_key)
    }
}

impl ChatBackend for GeminiBackend {
    fn open_context(&self, config: ContextConfig, history: Vec<Turn>) -> Arc<dyn ChatContext> {
        Arc::new(GeminiSessionContext {
            transport: Arc::clone(&self.transport),
            config,
            seed: history,
            exchanges: Mutex::new(Vec::new()),
        })
    }
}

/// One conversation held against Gemini. The endpoint itself is stateless,
/// so the context replays seed history plus accumulated exchanges on every
/// send, the way the official SDK's chat handle does. Exchanges are appended
/// only after a successful send; a failed attempt leaves the memory as it
/// was.
#[derive(Debug)]
struct GeminiSessionContext {
    transport: Arc<dyn GeminiTransport>,
    config: ContextConfig,
    seed: Vec<Turn>,
    exchanges: Mutex<Vec<Turn>>,
}

impl ChatContext for GeminiSessionContext {
    fn send<'a>(&'a self, message: String) -> BackendFuture<'a, Result<TurnReply, BackendError>> {
        Box::pin(async move {
            let user_turn = Turn::user(message);
            let mut contents = self
                .history()
                .iter()
                .map(GeminiContent::from)
                .collect::<Vec<_>>();
            contents.push(GeminiContent::from(&user_turn));

            let request = GeminiRequest {
                model: self.config.model.clone(),
                system_instruction: self.config.system_instruction.clone(),
                contents,
                generation: self.config.generation,
            };

            let reply = self.transport.generate(request).await?;

            let model_turn = Turn::model(reply.clone().text_or_empty());
            let mut exchanges = self
                .exchanges
                .lock()
                .map_err(|_| BackendError::other("session exchange lock poisoned"))?;
            exchanges.push(user_turn);
            exchanges.push(model_turn);

            Ok(reply)
        })
    }

    fn history(&self) -> Vec<Turn> {
        let mut history = self.seed.clone();
        if let Ok(exchanges) = self.exchanges.lock() {
            history.extend(exchanges.iter().cloned());
        }

        history
    }
}
