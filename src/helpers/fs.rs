//! File System Utilities
//!
//! Platform directories for profiles and log files.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "authcfg", "authcfg-console").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Get or create the configuration directory holding `profiles.toml`
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/authcfg-console/` or `$XDG_CONFIG_HOME/authcfg-console/`
/// - **macOS**: `~/Library/Application Support/org.authcfg.authcfg-console/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\authcfg\authcfg-console\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Get or create the data directory holding log files
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/authcfg-console/`
/// - **macOS**: `~/Library/Application Support/org.authcfg.authcfg-console/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\authcfg\authcfg-console\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Check if running in development mode
pub fn is_development() -> bool {
    cfg!(debug_assertions)
}
