//! Global context for scriptgate operations.
//!
//! Provides centralized access to the working directory and the
//! configuration locations derived from it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config};

/// Global context containing the working directory and configuration paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global config file (~/.scriptgate/config.toml), if a home exists
    global_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context for a specific directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        GlobalContext {
            cwd: cwd.into(),
            global_config: config::global_config_path(),
        }
    }

    /// Use a different global config file, or none.
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_config.as_deref()
    }

    /// Project config path (.scriptgate/config.toml under the cwd).
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load the layered configuration, including environment overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = config::load_config(self.global_config_path(), &self.project_config_path())?;
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Resolve a user-supplied path against the cwd.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
