//! Configuration file support for scriptgate.
//!
//! Two configuration file locations are read:
//! - Global: `~/.scriptgate/config.toml` - User-wide defaults
//! - Project: `.scriptgate/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and the
//! `SCRIPTGATE_ENABLE_SCRIPTS` environment variable takes precedence over
//! both.
//!
//! ```toml
//! enable-scripts = false
//!
//! [dependencies-meta.esbuild]
//! built = true
//!
//! [dependencies-meta."fsevents@2.3.3"]
//! built = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::build::HostPlatform;
use crate::core::{DependencyMeta, DependencyMetaMap, Locator};

/// Environment variable overriding `enable-scripts`.
pub const ENABLE_SCRIPTS_ENV: &str = "SCRIPTGATE_ENABLE_SCRIPTS";

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value `{value}` for {var}: expected true, false, 1 or 0")]
    InvalidEnv { var: &'static str, value: String },
}

/// One configuration file as written; unset keys stay `None` so files
/// can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Allow lifecycle scripts to run
    pub enable_scripts: Option<bool>,

    /// Platform identifier to check manifests against
    pub platform: Option<String>,

    /// Architecture identifier to check manifests against
    pub arch: Option<String>,

    /// Per-dependency build overrides
    pub dependencies_meta: DependencyMetaMap,
}

impl ConfigFile {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge another file into this one (other takes precedence).
    pub fn merge(&mut self, other: ConfigFile) {
        if other.enable_scripts.is_some() {
            self.enable_scripts = other.enable_scripts;
        }
        if other.platform.is_some() {
            self.platform = other.platform;
        }
        if other.arch.is_some() {
            self.arch = other.arch;
        }
        self.dependencies_meta.merge(&other.dependencies_meta);
    }
}

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Gate for all lifecycle scripts
    pub enable_scripts: bool,

    /// Platform override
    pub platform: Option<String>,

    /// Architecture override
    pub arch: Option<String>,

    /// Per-dependency build overrides
    pub dependencies_meta: DependencyMetaMap,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            enable_scripts: true,
            platform: None,
            arch: None,
            dependencies_meta: DependencyMetaMap::new(),
        }
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Config {
            enable_scripts: file.enable_scripts.unwrap_or(true),
            platform: file.platform,
            arch: file.arch,
            dependencies_meta: file.dependencies_meta,
        }
    }
}

impl Config {
    pub fn enable_scripts(&self) -> bool {
        self.enable_scripts
    }

    /// The host manifests are checked against, with overrides applied.
    pub fn host(&self) -> HostPlatform {
        HostPlatform::current().with_overrides(self.platform.as_deref(), self.arch.as_deref())
    }

    /// Effective dependency meta for a package.
    pub fn dependency_meta(&self, locator: &Locator) -> DependencyMeta {
        self.dependencies_meta.get(locator)
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENABLE_SCRIPTS_ENV) {
            self.enable_scripts = parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                var: ENABLE_SCRIPTS_ENV,
                value,
            })?;
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.scriptgate/config.toml)
/// 2. Global config (~/.scriptgate/config.toml)
/// 3. Defaults
///
/// Missing files are skipped; unreadable or malformed ones are errors.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config, ConfigError> {
    let mut file = ConfigFile::default();

    for path in global_path.into_iter().chain(std::iter::once(project_path)) {
        let exists = path.try_exists().map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if exists {
            tracing::debug!("loading config from {}", path.display());
            file.merge(ConfigFile::load(path)?);
        }
    }

    Ok(Config::from(file))
}

/// Get the global scriptgate config directory (~/.scriptgate).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".scriptgate"))
}

/// Get the global config path (~/.scriptgate/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.scriptgate/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".scriptgate").join("config.toml")
}
