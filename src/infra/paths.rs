// src/infra/paths.rs — Config and data locations
//
// TINCTURE_HOME overrides everything: config and data both live under it.
// Otherwise config lives in ~/.tincture/ and data in XDG_DATA_HOME/tincture.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Returns the TINCTURE_HOME override, if set.
fn tincture_home() -> Option<PathBuf> {
    std::env::var_os("TINCTURE_HOME").map(PathBuf::from)
}

/// Home directory, or the working directory when none can be determined.
pub fn dirs_home() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $TINCTURE_HOME/ or ~/.tincture/
pub fn config_dir() -> PathBuf {
    if let Some(home) = tincture_home() {
        return home;
    }
    dirs_home().join(".tincture")
}

/// Data directory: $TINCTURE_HOME/data/ or ~/.local/share/tincture/
pub fn data_dir() -> PathBuf {
    if let Some(home) = tincture_home() {
        return home.join("data");
    }
    ProjectDirs::from("", "", "tincture")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| config_dir().join("data"))
}

/// Default database path
pub fn db_path() -> PathBuf {
    data_dir().join("tincture.db")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
