// src/cli/resolve.rs — Resolve one phrase from the terminal

use crate::cli::color::format_color;
use crate::color::ColorInfo;
use crate::core::{Orchestrator, Resolution, ResolveRequest};

/// Session token used when `--session` is not given.
pub const CLI_SESSION: &str = "local-cli";

pub async fn run_resolve(
    orchestrator: &Orchestrator,
    text: &str,
    session: Option<&str>,
    no_cache: bool,
) -> anyhow::Result<()> {
    let session_id = session.unwrap_or(CLI_SESSION);
    let request = if no_cache {
        ResolveRequest::multi_turn(session_id, text, Vec::new())
    } else {
        ResolveRequest::single_turn(session_id, text)
    };

    let resolution = orchestrator.resolve(request).await?;
    print!("{}", format_resolution(&resolution));
    Ok(())
}

fn format_resolution(resolution: &Resolution) -> String {
    let mut out = match ColorInfo::from_hex(&resolution.color) {
        Some(info) => format_color(&info),
        None => format!("  Hex:   {}\n", resolution.color),
    };
    if let Some(ref imagery) = resolution.imagery {
        out.push_str(&format!("  Image: {imagery}\n"));
    }
    out.push_str(if resolution.from_cache {
        "  Source: cache\n"
    } else {
        "  Source: model\n"
    });
    out
}
