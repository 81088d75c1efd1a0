// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::core::FALLBACK_COLOR;
use crate::provider::Message;

/// Request body for `POST /api/text-to-color`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToColorRequest {
    /// Missing text is reported as a validation error, not a JSON rejection.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub keep_history: bool,
    #[serde(default)]
    pub conversation_history: Vec<Message>,
}

/// Successful resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToColorResponse {
    pub color: String,
    pub raw_output: String,
    pub from_cache: bool,
}

/// Failure body: always carries a color the client can still render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorErrorResponse {
    pub error: String,
    pub color: String,
}

impl ColorErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            color: FALLBACK_COLOR.to_string(),
        }
    }
}

/// Query string for the admin listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentRequestsQuery {
    pub limit: Option<u32>,
}

/// Error response body for endpoints that do not deal in colors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
