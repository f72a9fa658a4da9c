//! Gemini-native request shapes.

use acommon::{GenerationSettings, Role, Turn};

/// One history entry in the backend's native shape: a role plus a list of
/// content parts. A turn maps to a single text part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiContent {
    pub role: Role,
    pub parts: Vec<String>,
}

impl From<Turn> for GeminiContent {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.role,
            parts: vec![turn.text],
        }
    }
}

impl From<&Turn> for GeminiContent {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            parts: vec![turn.text.clone()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub contents: Vec<GeminiContent>,
    pub generation: GenerationSettings,
}
