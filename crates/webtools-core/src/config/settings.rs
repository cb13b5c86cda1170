//! Resolved runtime settings

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::types::{ToolArchetype, ToolCategory};

use super::error::{ConfigError, ConfigResult};

/// Backend address used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Path prefix of the backend's versioned API
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Relay listen address
pub const DEFAULT_RELAY_BIND: &str = "127.0.0.1:3000";

/// Upload limit for multipart requests through the relay (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Environment variable that selects the backend base URL
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Identifiers featured when no allow-list is configured
pub const DEFAULT_FEATURED: &[&str] = &[
    "story-generator",
    "ai-story-generator",
    "ai-content-improver",
    "code-beautifier",
];

/// Known identifiers whose keywords collide with an earlier rule
pub const DEFAULT_OVERRIDES: &[(&str, ToolCategory, ToolArchetype)] = &[
    ("domain-checker", ToolCategory::Seo, ToolArchetype::Form),
    ("meta-tag-generator", ToolCategory::Seo, ToolArchetype::Form),
];

/// Fixed classification for one exact identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOverride {
    pub category: ToolCategory,
    pub archetype: ToolArchetype,
}

/// Default override table keyed by identifier
pub fn default_overrides() -> BTreeMap<String, ClassificationOverride> {
    DEFAULT_OVERRIDES
        .iter()
        .map(|&(id, category, archetype)| (id.to_string(), ClassificationOverride { category, archetype }))
        .collect()
}

/// Relay server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Socket address the relay listens on
    pub bind: String,
    /// Maximum accepted request body for file uploads
    pub max_upload_bytes: usize,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_RELAY_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// WebTools configuration
///
/// Every field has a default, so an empty YAML document is a valid config.
///
/// ```yaml
/// backend_url: http://agents.internal:8000
/// featured:
///   - story-generator
/// overrides:
///   url-shortener-seo:
///     category: SEO
///     archetype: form
/// relay:
///   bind: 0.0.0.0:3000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebToolsConfig {
    /// Base URL of the agents backend, without the API prefix
    pub backend_url: String,
    /// Versioned API prefix appended to `backend_url`
    pub api_prefix: String,
    /// Exact identifiers the classifier marks as featured
    pub featured: Vec<String>,
    /// Exact identifiers whose category/archetype bypass the keyword rules
    pub overrides: BTreeMap<String, ClassificationOverride>,
    pub relay: RelaySettings,
}

impl Default for WebToolsConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            featured: DEFAULT_FEATURED.iter().map(|s| s.to_string()).collect(),
            overrides: default_overrides(),
            relay: RelaySettings::default(),
        }
    }
}

impl WebToolsConfig {
    /// Override the backend URL
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Override the relay bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.relay.bind = bind.into();
        self
    }

    /// Backend URL joined with the API prefix, e.g. `http://127.0.0.1:8000/api/v1`
    pub fn api_base(&self) -> String {
        let base = self.backend_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, prefix)
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides using a custom variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                self.backend_url = url.to_string();
            }
        }
    }

    /// Check that the backend URL is an absolute http(s) URL
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.backend_url).map_err(|e| ConfigError::InvalidBackendUrl {
            url: self.backend_url.clone(),
            message: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidBackendUrl {
                url: self.backend_url.clone(),
                message: format!("unsupported scheme '{}'", other),
            }),
        }
    }
}
