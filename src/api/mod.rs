// src/api/mod.rs — HTTP API: text-to-color endpoint plus color/admin helpers

pub mod auth;
pub mod cookie;
pub mod handlers;
pub mod types;

use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::core::Orchestrator;
use crate::infra::config::ServerConfig;
use crate::store::StoreHandle;
pub use cookie::CookieSettings;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: StoreHandle,
    pub admin_token: Option<String>,
    pub admin_open: bool,
    pub cookie: CookieSettings,
}

impl ApiState {
    pub fn new(orchestrator: Arc<Orchestrator>, store: StoreHandle, config: &ServerConfig) -> Self {
        Self {
            orchestrator,
            store,
            admin_token: config.admin_token.clone().filter(|t| !t.is_empty()),
            admin_open: config.admin_open,
            cookie: CookieSettings {
                max_age_secs: config.cookie_max_age_secs,
                secure: config.secure_cookies,
            },
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState, cors_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(cors_origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let session_cookies =
        middleware::from_fn_with_state(state.cookie.clone(), cookie::issue_session_cookie);

    Router::new()
        .route("/api/text-to-color", post(handlers::text_to_color))
        .route("/api/v1/colors/{hex}", get(handlers::color_info))
        .route("/api/v1/admin/requests", get(handlers::recent_requests))
        .route("/api/v1/health", get(handlers::health))
        .layer(session_cookies)
        .layer(cors)
        .with_state(state)
}

fn allowed_origins(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}

/// Start the API server (runs until the process is stopped).
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state, &config.cors_origins);

    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutting down");
            }
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::completion::CompletionClient;
    use crate::infra::errors::TinctureError;
    use crate::provider::{ChatRequest, ChatResponse, ModelProvider};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    struct SilentProvider;

    #[async_trait]
    impl ModelProvider for SilentProvider {
        fn id(&self) -> &str {
            "silent"
        }

        fn name(&self) -> &str {
            "Silent"
        }

        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, TinctureError> {
            Ok(ChatResponse::default())
        }
    }

    async fn test_state(config: &ServerConfig) -> ApiState {
        let store = crate::store::in_memory().unwrap();
        let (handle, _join) = crate::store::spawn_store_server(store);
        let completion = Arc::new(CompletionClient::new(Arc::new(SilentProvider)));
        let orchestrator = Arc::new(Orchestrator::new(handle.clone(), completion));
        ApiState::new(orchestrator, handle, config)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let config = ServerConfig::default();
        let app = build_router(test_state(&config).await, &config.cors_origins);
        let req = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cookie_issued_only_when_missing() {
        let config = ServerConfig::default();
        let app = build_router(test_state(&config).await, &config.cors_origins);

        let fresh = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(fresh).await.unwrap();
        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(set_cookie.starts_with("session="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Strict"));
        assert!(!set_cookie.contains("Secure"));

        let returning = Request::builder()
            .uri("/api/v1/health")
            .header(header::COOKIE, "session=abc")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(returning).await.unwrap();
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_secure_cookie_flag() {
        let config = ServerConfig {
            secure_cookies: true,
            ..ServerConfig::default()
        };
        let app = build_router(test_state(&config).await, &config.cors_origins);
        let req = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap();
        assert!(set_cookie.to_str().unwrap().ends_with("; Secure"));
    }

    #[tokio::test]
    async fn test_empty_admin_token_is_unset() {
        let config = ServerConfig {
            admin_token: Some(String::new()),
            ..ServerConfig::default()
        };
        let state = test_state(&config).await;
        assert!(state.admin_token.is_none());
    }
}
