//! Execution contexts
//!
//! The same calls can go straight to the agents backend or through the
//! relay. The two speak slightly different dialects:
//!
//! | context | list                          | process                           | error field |
//! |---------|-------------------------------|-----------------------------------|-------------|
//! | Direct  | `{api}/agents/list`           | `{api}/agents/process/{slug}`     | ignored     |
//! | Relay   | `{relay}/api/agents/list`     | `{relay}/api/tools/{slug}`        | honored     |

use reqwest::Url;

use crate::config::WebToolsConfig;

use super::error::{ClientError, ClientResult};

/// Which response dialect an endpoint speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Backend process response; success may be signalled by `status: "success"`
    Backend,
    /// Relay response; carries its own `error` text on failure
    Relay,
}

/// Where calls are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Straight to the backend; `api_base` already includes the API prefix
    Direct { api_base: String },
    /// Through a WebTools relay
    Relay { relay_base: String },
}

impl ExecutionContext {
    pub fn direct(api_base: impl Into<String>) -> Self {
        Self::Direct {
            api_base: api_base.into(),
        }
    }

    pub fn relay(relay_base: impl Into<String>) -> Self {
        Self::Relay {
            relay_base: relay_base.into(),
        }
    }

    /// Direct context pointed at the configured backend
    pub fn from_config(config: &WebToolsConfig) -> Self {
        Self::direct(config.api_base())
    }

    pub fn base_url(&self) -> &str {
        match self {
            Self::Direct { api_base } => api_base,
            Self::Relay { relay_base } => relay_base,
        }
    }

    pub fn shape(&self) -> ResponseShape {
        match self {
            Self::Direct { .. } => ResponseShape::Backend,
            Self::Relay { .. } => ResponseShape::Relay,
        }
    }

    /// URL of the tool listing
    pub fn list_url(&self) -> ClientResult<Url> {
        match self {
            Self::Direct { .. } => self.join(&["agents", "list"]),
            Self::Relay { .. } => self.join(&["api", "agents", "list"]),
        }
    }

    /// URL that processes `slug`; the slug is percent-encoded as one segment
    pub fn process_url(&self, slug: &str) -> ClientResult<Url> {
        if slug.trim().is_empty() {
            return Err(ClientError::InvalidRequest("tool slug is empty".to_string()));
        }
        match self {
            Self::Direct { .. } => self.join(&["agents", "process", slug]),
            Self::Relay { .. } => self.join(&["api", "tools", slug]),
        }
    }

    fn join(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(self.base_url())
            .map_err(|e| ClientError::InvalidRequest(format!("invalid base URL {}: {}", self.base_url(), e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("base URL cannot have a path: {}", self.base_url())))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}
