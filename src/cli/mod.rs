// src/cli/mod.rs — CLI definition (clap derive)

pub mod color;
pub mod history;
pub mod migrate;
pub mod resolve;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tincture", about = "Turn a phrase into a color", version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },
    /// Resolve text to a color from the terminal
    Resolve {
        /// Text to resolve
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
        /// Session token to record the request under
        #[arg(long)]
        session: Option<String>,
        /// Skip the cache and always ask the model
        #[arg(long)]
        no_cache: bool,
    },
    /// Show recent color requests
    History {
        /// Number of requests to show
        #[arg(short, long, default_value = "20")]
        limit: u32,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show RGB, HSL and contrast mode for a hex color
    Color {
        /// Hex color, with or without the leading '#'
        hex: String,
    },
    /// Run database migrations
    Migrate {
        /// Show migration status
        #[arg(long)]
        status: bool,
        /// Roll back the last migration
        #[arg(long)]
        rollback: bool,
    },
}

impl Commands {
    /// Default log level when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Commands::Serve { .. } => "info",
            _ => "warn",
        }
    }
}
