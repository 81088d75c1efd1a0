// src/core/cache.rs — Memoized colors keyed by normalized input text
//
// Append-only: every miss writes a new row and the newest matching row answers
// later lookups. No eviction, no invalidation.

use super::types::ColorResult;
use crate::infra::errors::TinctureError;
use crate::store::StoreHandle;

/// Lookup key for an input: surrounding whitespace trimmed, lowercased.
pub fn normalize_input(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Clone)]
pub struct ColorCache {
    store: StoreHandle,
}

impl ColorCache {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Most recent stored result for `input_text`, matched case- and trim-insensitively.
    pub async fn find(&self, input_text: &str) -> Result<Option<ColorResult>, TinctureError> {
        let normalized = normalize_input(input_text);
        let row = self
            .store
            .find_latest_color_request(normalized)
            .await
            .map_err(TinctureError::Store)?;

        match row {
            Some(row) => {
                tracing::info!(input = input_text, color = %row.hex_color, "Cache hit");
                Ok(Some(ColorResult {
                    color: row.hex_color,
                    imagery: row.imagery,
                    raw_output: row.raw_output,
                }))
            }
            None => {
                tracing::info!(input = input_text, "Cache miss");
                Ok(None)
            }
        }
    }

    /// Append a result. The original, unnormalized text is stored alongside the key.
    pub async fn record(
        &self,
        session_id: &str,
        input_text: &str,
        result: &ColorResult,
    ) -> Result<(), TinctureError> {
        let id = self
            .store
            .insert_color_request(
                session_id.to_string(),
                input_text.to_string(),
                normalize_input(input_text),
                result.color.clone(),
                result.raw_output.clone(),
                result.imagery.clone(),
            )
            .await
            .map_err(TinctureError::Store)?;

        tracing::debug!(id, session_id, color = %result.color, "Recorded color request");
        Ok(())
    }
}
