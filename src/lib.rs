// src/lib.rs — Library root for Tincture

pub mod api;
pub mod cli;
pub mod color;
pub mod core;
pub mod infra;
pub mod provider;
pub mod store;
