//! Gemini transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response};

use crate::{BackendError, BackendFuture, SecretString, TurnReply};

use super::serde_api::{build_api_request, classify_failure, extract_error_message, extract_reply};
use super::types::GeminiRequest;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub trait GeminiTransport: Send + Sync + std::fmt::Debug {
    fn generate<'a>(
        &'a self,
        request: GeminiRequest,
    ) -> BackendFuture<'a, Result<TurnReply, BackendError>>;
}

#[derive(Debug)]
pub struct GeminiHttpTransport {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl GeminiHttpTransport {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: SecretString::new(api_key),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn parse_error(response: Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("Gemini request failed with status {status}"));

        classify_failure(Some(status), message)
    }
}

impl GeminiTransport for GeminiHttpTransport {
    fn generate<'a>(
        &'a self,
        request: GeminiRequest,
    ) -> BackendFuture<'a, Result<TurnReply, BackendError>> {
        Box::pin(async move {
            let url = self.endpoint(&request.model);
            let body = build_api_request(&request);
            let response = self
                .client
                .post(url)
                .header("x-goog-api-key", self.api_key.expose())
                .json(&body)
                .send()
                .await
                .map_err(|err| BackendError::transport(err.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed = response
                .json::<super::serde_api::GeminiApiResponse>()
                .await
                .map_err(|err| BackendError::transport(err.to_string()))?;

            Ok(extract_reply(parsed))
        })
    }
}
