// src/core/mod.rs — Color resolution: extraction, sessions, cache, completion, orchestration

pub mod cache;
pub mod completion;
pub mod extractor;
pub mod orchestrator;
pub mod session;
pub mod system_prompt;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::{ColorResult, Resolution, ResolveRequest, FALLBACK_COLOR};
