// src/core/orchestrator.rs — Cache-or-model decision for one color request

use std::sync::Arc;

use super::cache::ColorCache;
use super::completion::CompletionClient;
use super::session::SessionStore;
use super::types::{Resolution, ResolveRequest};
use crate::infra::errors::TinctureError;
use crate::store::StoreHandle;

/// Resolves text to a color.
///
/// Single-turn requests go through the cache: a hit returns immediately, a
/// miss calls the model and records the answer. Multi-turn requests always
/// call the model with the caller's history and never touch the cache.
pub struct Orchestrator {
    sessions: SessionStore,
    cache: ColorCache,
    completion: Arc<CompletionClient>,
}

impl Orchestrator {
    pub fn new(store: StoreHandle, completion: Arc<CompletionClient>) -> Self {
        Self {
            sessions: SessionStore::new(store.clone()),
            cache: ColorCache::new(store),
            completion,
        }
    }

    pub async fn resolve(&self, request: ResolveRequest) -> Result<Resolution, TinctureError> {
        let session_id = validate(&request)?;

        self.sessions
            .ensure_session(session_id, request.client_ip.as_deref())
            .await?;

        let use_cache = !request.keep_history;

        if use_cache {
            if let Some(cached) = self.cache.find(&request.text).await? {
                return Ok(Resolution::new(cached, true));
            }
        }

        tracing::info!(
            input = %request.text,
            keep_history = request.keep_history,
            "Calling completion provider"
        );
        let result = self
            .completion
            .generate(
                &request.text,
                &request.conversation_history,
                request.keep_history,
            )
            .await?;

        if use_cache {
            self.cache.record(session_id, &request.text, &result).await?;
        }

        Ok(Resolution::new(result, false))
    }
}

/// Reject requests that cannot be served, before any I/O. Returns the session id.
fn validate(request: &ResolveRequest) -> Result<&str, TinctureError> {
    if request.text.trim().is_empty() {
        return Err(TinctureError::validation("Text is required"));
    }
    match request.session_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(TinctureError::validation("Session cookie is required")),
    }
}
