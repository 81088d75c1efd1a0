// src/store/mod.rs — Persistence for sessions and color requests

pub mod schema;
#[allow(clippy::module_inception)]
pub mod store;
pub mod store_server;

use rusqlite::Connection;
use std::path::Path;

pub use store::Store;
pub use store_server::{spawn_store_server, StoreHandle};

/// Open (or create) the database at the given path and run migrations.
pub fn open(path: &Path) -> anyhow::Result<Store> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    schema::run_migrations(&conn)?;

    Ok(Store::new(conn))
}

/// Create an in-memory database (for testing).
pub fn in_memory() -> anyhow::Result<Store> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    schema::run_migrations(&conn)?;
    Ok(Store::new(conn))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tincture.db");
        let store = open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.count_sessions().unwrap(), 0);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let store = in_memory().unwrap();
        let result = store.insert_color_request(&store::NewColorRequest {
            session_id: "missing",
            input_text: "peach",
            normalized_text: "peach",
            hex_color: "#f5a15f",
            raw_output: "#f5a15f",
            imagery: None,
        });
        assert!(result.is_err());
    }
}
