//! Shared conversation types for the alice workspace crates.
//!
//! ```rust
//! use acommon::{GenerationSettings, Role, Turn};
//!
//! let turn = Turn::new(Role::User, "Ciao!");
//! let settings = GenerationSettings::default().with_temperature(0.7).with_top_k(40);
//!
//! assert_eq!(turn.role, Role::User);
//! assert_eq!(settings.temperature, Some(0.7));
//! ```

pub mod conversation {
    //! Conversation roles and immutable turn records.
    //!
    //! ```rust
    //! use acommon::{Role, Turn};
    //!
    //! let turn = Turn::new(Role::Model, "Ciao anche a te!");
    //! assert_eq!(turn.role.as_str(), "model");
    //! assert!(turn.timestamp > 0);
    //! ```

    use std::fmt::{Display, Formatter};
    use std::time::{SystemTime, UNIX_EPOCH};

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        User,
        Model,
    }

    impl Role {
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::User => "user",
                Self::Model => "model",
            }
        }
    }

    impl Display for Role {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// One message unit in a conversation. Turns are immutable once created;
    /// callers append them to their own log and replace the whole sequence on
    /// reset, never splice mid-sequence.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Turn {
        pub role: Role,
        pub text: String,
        /// Creation instant as epoch milliseconds. Imported transcripts may
        /// omit it; the core never reads it.
        #[serde(default)]
        pub timestamp: i64,
    }

    impl Turn {
        pub fn new(role: Role, text: impl Into<String>) -> Self {
            Self {
                role,
                text: text.into(),
                timestamp: now_millis(),
            }
        }

        pub fn with_timestamp(mut self, timestamp: i64) -> Self {
            self.timestamp = timestamp;
            self
        }

        pub fn user(text: impl Into<String>) -> Self {
            Self::new(Role::User, text)
        }

        pub fn model(text: impl Into<String>) -> Self {
            Self::new(Role::Model, text)
        }
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}

pub mod generation {
    //! Fixed generation settings attached to a session context.
    //!
    //! ```rust
    //! use acommon::GenerationSettings;
    //!
    //! let settings = GenerationSettings::default().with_temperature(0.7).with_top_k(40);
    //! assert_eq!(settings.top_k, Some(40));
    //! ```

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationSettings {
        pub temperature: Option<f32>,
        pub top_k: Option<u32>,
    }

    impl GenerationSettings {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_top_k(mut self, top_k: u32) -> Self {
            self.top_k = Some(top_k);
            self
        }
    }
}

pub mod transcript {
    //! JSON transcript export/import in the shape the surrounding app saves.
    //!
    //! The on-disk shape is an ordered array of objects with at least `role`
    //! and `text`; extra fields such as `id` are tolerated and dropped, and a
    //! missing `timestamp` defaults to zero.
    //!
    //! ```rust
    //! use acommon::{parse_transcript, render_transcript, Role, Turn};
    //!
    //! let log = vec![Turn::user("Ciao"), Turn::model("Ciao anche a te!")];
    //! let exported = render_transcript(&log).expect("render");
    //! let imported = parse_transcript(&exported).expect("parse");
    //! assert_eq!(imported, log);
    //! ```

    use std::error::Error;
    use std::fmt::{Display, Formatter};

    use crate::Turn;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TranscriptError {
        pub message: String,
    }

    impl TranscriptError {
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }
    }

    impl Display for TranscriptError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "transcript: {}", self.message)
        }
    }

    impl Error for TranscriptError {}

    pub fn parse_transcript(json: &str) -> Result<Vec<Turn>, TranscriptError> {
        serde_json::from_str(json).map_err(|err| TranscriptError::new(err.to_string()))
    }

    pub fn render_transcript(turns: &[Turn]) -> Result<String, TranscriptError> {
        serde_json::to_string_pretty(turns).map_err(|err| TranscriptError::new(err.to_string()))
    }
}

pub use conversation::{Role, Turn};
pub use generation::GenerationSettings;
pub use transcript::{TranscriptError, parse_transcript, render_transcript};

#[cfg(test)]
mod tests {
    use super::{GenerationSettings, Role, Turn, parse_transcript, render_transcript};

    #[test]
    fn role_serializes_to_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Role::User).expect("serialize"), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).expect("serialize"), "\"model\"");
        assert_eq!(Role::Model.to_string(), "model");
    }

    #[test]
    fn turn_constructors_stamp_creation_time() {
        let turn = Turn::user("hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "hello");
        assert!(turn.timestamp > 0);

        let pinned = Turn::model("reply").with_timestamp(42);
        assert_eq!(pinned.timestamp, 42);
    }

    #[test]
    fn generation_settings_builder_helpers_set_values() {
        let settings = GenerationSettings::default()
            .with_temperature(0.7)
            .with_top_k(40);

        assert_eq!(settings.temperature, Some(0.7));
        assert_eq!(settings.top_k, Some(40));
    }

    #[test]
    fn transcript_import_ignores_id_and_missing_timestamp() {
        let exported = r#"[
            {"id": "welcome", "role": "model", "text": "Ciao!", "timestamp": 1700000000000},
            {"role": "user", "text": "Come stai?"}
        ]"#;

        let imported = parse_transcript(exported).expect("parse");
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].role, Role::Model);
        assert_eq!(imported[0].timestamp, 1_700_000_000_000);
        assert_eq!(imported[1].role, Role::User);
        assert_eq!(imported[1].timestamp, 0);
    }

    #[test]
    fn transcript_round_trip_preserves_order_and_content() {
        let log = vec![
            Turn::user("Ciao").with_timestamp(1),
            Turn::model("Ciao anche a te!").with_timestamp(2),
            Turn::user("Che fai?").with_timestamp(3),
        ];

        let exported = render_transcript(&log).expect("render");
        let imported = parse_transcript(&exported).expect("parse");
        assert_eq!(imported, log);
    }

    #[test]
    fn transcript_rejects_unknown_role() {
        let err = parse_transcript(r#"[{"role": "assistant", "text": "hi"}]"#)
            .expect_err("unknown role must fail");
        assert!(err.message.contains("assistant"));
    }
}
