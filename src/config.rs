//! Command-line configuration
//!
//! Log files go in the OS-standard data directory (via the `directories`
//! crate) unless a path is given.

use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name used inside the data directory.
const LOG_FILE_NAME: &str = "lobsterble.log";

/// Errors resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine data directory")]
    NoDataDirectory,

    #[error("failed to create data directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Drag tiles between rack and board", long_about = None)]
pub struct Cli {
    /// Write logs here instead of the data directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Seed for rack shuffles (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Game identifier shown in the title bar
    #[arg(long, default_value = "local")]
    pub game_id: String,
}

impl Cli {
    /// The log file path, creating its parent directory if needed.
    pub fn resolve_log_file(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.log_file {
            Some(path) => path.clone(),
            None => data_dir()?.join(LOG_FILE_NAME),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(path)
    }
}

/// Platform data directory for the game.
///
/// - Linux: `~/.local/share/lobsterble/`
/// - macOS: `~/Library/Application Support/lobsterble/`
/// - Windows: `%APPDATA%\lobsterble\data\`
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("", "", "lobsterble")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoDataDirectory)
}
