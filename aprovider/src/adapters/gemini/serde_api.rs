//! Gemini HTTP payload serde models, reply extraction, and failure
//! classification.

use serde::{Deserialize, Serialize};

use crate::{BackendError, TurnReply};

use super::types::GeminiRequest;

pub(crate) fn build_api_request(request: &GeminiRequest) -> GeminiApiRequest {
    let system_instruction = request
        .system_instruction
        .as_ref()
        .map(|text| GeminiApiContent {
            role: None,
            parts: vec![GeminiApiPart { text: text.clone() }],
        });

    let contents = request
        .contents
        .iter()
        .map(|content| GeminiApiContent {
            role: Some(content.role.as_str().to_string()),
            parts: content
                .parts
                .iter()
                .map(|text| GeminiApiPart { text: text.clone() })
                .collect(),
        })
        .collect();

    let generation_config =
        if request.generation.temperature.is_none() && request.generation.top_k.is_none() {
            None
        } else {
            Some(GeminiApiGenerationConfig {
                temperature: request.generation.temperature,
                top_k: request.generation.top_k,
            })
        };

    GeminiApiRequest {
        system_instruction,
        contents,
        generation_config,
    }
}

/// Flattens the first candidate's parts into one reply. An empty or missing
/// candidate payload is a valid empty reply, not a failure.
pub(crate) fn extract_reply(response: GeminiApiResponse) -> TurnReply {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return TurnReply::empty();
    };

    let Some(content) = candidate.content else {
        return TurnReply::empty();
    };

    let text = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");

    TurnReply { text: Some(text) }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<GeminiApiErrorEnvelope>(body).ok()?;
    let message = match parsed.error.status {
        Some(status) if !status.is_empty() => format!("{} ({status})", parsed.error.message),
        _ => parsed.error.message,
    };

    Some(message)
}

/// Produces the tagged error for a failed call. Transient classes are the
/// rate-limit signature (429 / `quota` / `RESOURCE_EXHAUSTED`) and the
/// overload signature (503); everything else is terminal.
pub(crate) fn classify_failure(status: Option<u16>, message: String) -> BackendError {
    let rate_limited = status == Some(429)
        || message.contains("429")
        || message.contains("quota")
        || message.contains("RESOURCE_EXHAUSTED");
    let overloaded = status == Some(503) || message.contains("503");

    let error = if rate_limited {
        BackendError::rate_limited(message)
    } else if overloaded {
        BackendError::overloaded(message)
    } else {
        match status {
            Some(401) | Some(403) => BackendError::authentication(message),
            Some(400) | Some(422) => BackendError::invalid_request(message),
            _ => BackendError::transport(message),
        }
    };

    match status {
        Some(code) => error.with_status(code),
        None => error,
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiApiContent>,
    pub contents: Vec<GeminiApiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiApiGenerationConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<GeminiApiPart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "topK", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiApiCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiCandidate {
    pub content: Option<GeminiApiResponseContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiResponseContent {
    #[serde(default)]
    pub parts: Vec<GeminiApiResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiErrorEnvelope {
    pub error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
