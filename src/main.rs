// src/main.rs — Tincture entry point

use clap::Parser;
use std::sync::Arc;

use tincture::cli::{Cli, Commands};
use tincture::core::completion::CompletionClient;
use tincture::core::Orchestrator;
use tincture::infra::config::Config;
use tincture::infra::logger;
use tincture::provider::openai::OpenAIProvider;
use tincture::provider::ModelProvider;
use tincture::store::{self, StoreHandle};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Respects RUST_LOG; otherwise info for the server, warn for one-shot commands
    logger::init_logging(cli.command.default_log_level());

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    let db_path = config.store.db_path();

    // Commands that need neither the model nor the store actor
    match &cli.command {
        Commands::Color { hex } => return tincture::cli::color::show_color(hex),
        Commands::Migrate { status, rollback } => {
            return tincture::cli::migrate::run_migrate(&db_path, *status, *rollback);
        }
        Commands::History { limit, json } => {
            let store = store::open(&db_path)?;
            return tincture::cli::history::show_history(&store, *limit, *json);
        }
        _ => {}
    }

    let provider: Arc<dyn ModelProvider> = Arc::new(OpenAIProvider::from_config(&config.completion)?);
    let completion = Arc::new(CompletionClient::from_config(provider, &config.completion));
    tracing::debug!(provider = completion.provider_id(), "Completion client ready");

    let (handle, _store_task) = store::spawn_store_server(store::open(&db_path)?);
    tracing::debug!("Database: {}", db_path.display());
    let orchestrator = Arc::new(Orchestrator::new(handle.clone(), completion));

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            serve(&config, orchestrator, handle).await
        }
        Commands::Resolve {
            text,
            session,
            no_cache,
        } => {
            tincture::cli::resolve::run_resolve(
                &orchestrator,
                &text.join(" "),
                session.as_deref(),
                no_cache,
            )
            .await
        }
        Commands::Color { .. } | Commands::Migrate { .. } | Commands::History { .. } => Ok(()),
    }
}

async fn serve(
    config: &Config,
    orchestrator: Arc<Orchestrator>,
    store: StoreHandle,
) -> anyhow::Result<()> {
    tracing::info!(
        model = %config.completion.model,
        base_url = %config.completion.base_url,
        "Completion provider ready"
    );
    tincture::cli::serve::run_serve(&config.server, orchestrator, store).await
}
