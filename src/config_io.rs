//! Runtime configuration I/O operations.
//!
//! Directory detection and config/content loading. These need runtime
//! dependencies (dirs, tracing), so they live apart from `config.rs`, which
//! schema-only builds also compile.

use crate::config::{Config, ConfigError};
use crate::content::Portfolio;
use std::path::{Path, PathBuf};

/// Directories the application reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryContext {
    /// `~/.config/termfolio`
    pub config_dir: PathBuf,
    /// `~/.local/share/termfolio` (resume asset lives here)
    pub data_dir: PathBuf,
    /// Where downloads are saved
    pub download_dir: PathBuf,
}

impl DirectoryContext {
    /// Resolve the platform directories, falling back to the home directory
    /// and finally to the current directory.
    pub fn from_system() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            config_dir: dirs::config_dir()
                .unwrap_or_else(|| home.join(".config"))
                .join("termfolio"),
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| home.join(".local").join("share"))
                .join("termfolio"),
            download_dir: dirs::download_dir().unwrap_or(home),
        }
    }

    /// Build a context rooted in a single directory (used by tests).
    pub fn for_testing(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            download_dir: root.join("downloads"),
        }
    }

    /// Path of the user config file.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Default location of the resume asset.
    pub fn resume_path(&self) -> PathBuf {
        self.data_dir.join("resume.pdf")
    }
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, the user config file is used if
/// present and defaults otherwise.
pub fn load_config(
    dir_context: &DirectoryContext,
    explicit: Option<&Path>,
) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from {}", path.display());
        return Config::load_from_file(path);
    }

    let user_path = dir_context.config_path();
    if user_path.exists() {
        tracing::info!("Loading user config from {}", user_path.display());
        return Config::load_from_file(&user_path);
    }

    tracing::debug!("No config file at {}, using defaults", user_path.display());
    Ok(Config::default())
}

/// Load portfolio content: the configured JSON file, or the built-in content.
pub fn load_content(config: &Config) -> Result<Portfolio, ConfigError> {
    match &config.content {
        Some(path) => {
            tracing::info!("Loading content from {}", path.display());
            Portfolio::load_from_file(path)
        }
        None => Ok(Portfolio::default()),
    }
}

/// Where the resume asset is read from.
pub fn resume_source(config: &Config, dir_context: &DirectoryContext) -> PathBuf {
    config
        .resume
        .source
        .clone()
        .unwrap_or_else(|| dir_context.resume_path())
}
