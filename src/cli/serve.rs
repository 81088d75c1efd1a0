// src/cli/serve.rs — Run the HTTP server

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::core::Orchestrator;
use crate::infra::config::ServerConfig;
use crate::store::StoreHandle;

pub async fn run_serve(
    config: &ServerConfig,
    orchestrator: Arc<Orchestrator>,
    store: StoreHandle,
) -> anyhow::Result<()> {
    if config.admin_token.is_none() && config.admin_open {
        tracing::warn!("Admin listing is open without a token");
    }
    let state = ApiState::new(orchestrator, store, config);
    api::start_server(config, state).await
}
