//! File-based configuration (YAML)
//!
//! Lookup order: explicit path, `$WEBTOOLS_CONFIG`, then the user-level file
//! (~/.config/webtools/config.yaml). A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};
use super::settings::WebToolsConfig;

/// Environment variable naming a config file
pub const CONFIG_PATH_ENV: &str = "WEBTOOLS_CONFIG";

/// Reads `WebToolsConfig` from a YAML file
///
/// # Example
///
/// ```no_run
/// use webtools_core::config::FileConfigProvider;
///
/// let config = FileConfigProvider::user().load().unwrap();
/// println!("backend: {}", config.backend_url);
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// User-level config (~/.config/webtools/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("webtools").join("config.yaml"))
    }

    /// Pick the config file: explicit path, then `$WEBTOOLS_CONFIG`, then user-level
    pub fn discover(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::user(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the config; a missing file yields defaults
    pub fn load(&self) -> ConfigResult<WebToolsConfig> {
        if !self.exists() {
            return Ok(WebToolsConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        parse_yaml(&content, &self.path)
    }
}

fn parse_yaml(content: &str, path: &Path) -> ConfigResult<WebToolsConfig> {
    // serde_yaml rejects an empty document, which should mean "all defaults"
    if content.trim().is_empty() {
        return Ok(WebToolsConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

impl WebToolsConfig {
    /// Load from the discovered file, apply environment overrides, validate
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = FileConfigProvider::discover(explicit).load()?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }
}
