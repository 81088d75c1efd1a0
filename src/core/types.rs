// src/core/types.rs — Shared types for color resolution

use serde::{Deserialize, Serialize};

use crate::provider::Message;

/// Neutral dark gray returned alongside every error so callers can still paint something.
pub const FALLBACK_COLOR: &str = "#1f1f1f";

/// A color picked for some input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorResult {
    /// `#RRGGBB`, as it appeared in the model output.
    pub color: String,
    /// First line of the output with its `Imagery:` label removed.
    pub imagery: Option<String>,
    pub raw_output: String,
}

/// Everything the orchestrator needs for one request.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub session_id: Option<String>,
    pub client_ip: Option<String>,
    pub text: String,
    pub keep_history: bool,
    pub conversation_history: Vec<Message>,
}

impl ResolveRequest {
    /// A single-turn request (cache eligible).
    pub fn single_turn(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            text: text.into(),
            ..Self::default()
        }
    }

    /// A multi-turn request carrying prior exchanges.
    pub fn multi_turn(
        session_id: impl Into<String>,
        text: impl Into<String>,
        history: Vec<Message>,
    ) -> Self {
        Self {
            session_id: Some(session_id.into()),
            text: text.into(),
            keep_history: true,
            conversation_history: history,
            ..Self::default()
        }
    }

    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        self.client_ip = Some(ip.into());
        self
    }
}

/// Outcome of a successful resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub color: String,
    pub raw_output: String,
    pub imagery: Option<String>,
    pub from_cache: bool,
}

impl Resolution {
    pub fn new(result: ColorResult, from_cache: bool) -> Self {
        Self {
            color: result.color,
            raw_output: result.raw_output,
            imagery: result.imagery,
            from_cache,
        }
    }
}
