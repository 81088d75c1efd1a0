// src/api/handlers.rs

use crate::api::{auth, cookie, types::*, ApiState};
use crate::color::ColorInfo;
use crate::core::ResolveRequest;
use crate::infra::errors::{ErrorKind, TinctureError};
use crate::store::store::RecentRequestRow;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

pub const DEFAULT_HISTORY_LIMIT: u32 = 100;
pub const MAX_HISTORY_LIMIT: u32 = 500;

/// POST /api/text-to-color — Resolve text to a color (cache first for single-turn).
pub async fn text_to_color(
    State(state): State<ApiState>,
    headers: HeaderMap,
    payload: Result<Json<TextToColorRequest>, JsonRejection>,
) -> Result<Json<TextToColorResponse>, (StatusCode, Json<ColorErrorResponse>)> {
    let Json(body) = payload.map_err(|rejection| body_error(&rejection))?;

    let request = ResolveRequest {
        session_id: cookie::session_cookie(&headers),
        client_ip: cookie::client_ip(&headers),
        text: body.text,
        keep_history: body.keep_history,
        conversation_history: body.conversation_history,
    };

    match state.orchestrator.resolve(request).await {
        Ok(resolution) => Ok(Json(TextToColorResponse {
            color: resolution.color,
            raw_output: resolution.raw_output,
            from_cache: resolution.from_cache,
        })),
        Err(e) => Err(resolve_error(&e)),
    }
}

/// Malformed bodies still get the fallback color.
fn body_error(rejection: &JsonRejection) -> (StatusCode, Json<ColorErrorResponse>) {
    let message = rejection.body_text();
    tracing::warn!(kind = "validation", "Rejected request body: {message}");
    (
        StatusCode::BAD_REQUEST,
        Json(ColorErrorResponse::new(format!("Invalid request body: {message}"))),
    )
}

/// Map a resolve failure to a status and a body carrying the fallback color.
fn resolve_error(err: &TinctureError) -> (StatusCode, Json<ColorErrorResponse>) {
    let kind = err.kind();
    match kind {
        ErrorKind::Validation => {
            tracing::warn!(kind = kind.as_str(), "Rejected request: {err}");
            (
                StatusCode::BAD_REQUEST,
                Json(ColorErrorResponse::new(err.to_string())),
            )
        }
        ErrorKind::Upstream => {
            tracing::error!(kind = kind.as_str(), "Color generation failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ColorErrorResponse::new(err.to_string())),
            )
        }
        ErrorKind::Store | ErrorKind::Internal => {
            tracing::error!(kind = kind.as_str(), "Request failed: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ColorErrorResponse::new("Failed to process request")),
            )
        }
    }
}

/// GET /api/v1/colors/{hex} — Hex, RGB, HSL and contrast mode for a color.
pub async fn color_info(
    Path(hex): Path<String>,
) -> Result<Json<ColorInfo>, (StatusCode, Json<ErrorResponse>)> {
    ColorInfo::from_hex(&hex).map(Json).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid hex color '{hex}'"),
            }),
        )
    })
}

/// GET /api/v1/admin/requests — Most recent color requests with session IPs.
pub async fn recent_requests(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Query(query): Query<RecentRequestsQuery>,
) -> Result<Json<Vec<RecentRequestRow>>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_admin(&state, &headers)?;

    let limit = clamp_limit(query.limit);
    match state.store.query_recent_requests(limit).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Failed to list recent requests: {e:#}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load requests".into(),
                }),
            ))
        }
    }
}

pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

/// GET /api/v1/health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), 500);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, Json(body)) = resolve_error(&TinctureError::validation("Text is required"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Text is required");
        assert_eq!(body.color, "#1f1f1f");
    }

    #[test]
    fn test_upstream_message_surfaces() {
        let (status, Json(body)) = resolve_error(&TinctureError::MissingColor {
            output: "no idea".into(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "No valid color found in response");
    }

    #[test]
    fn test_store_error_is_generic() {
        let err = TinctureError::Store(anyhow::anyhow!("disk I/O error at /var/db"));
        let (status, Json(body)) = resolve_error(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to process request");
        assert_eq!(body.color, "#1f1f1f");
    }
}
