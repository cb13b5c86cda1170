//! Request and result types for the agents backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error text used when a call fails without the backend saying why
pub const GENERIC_FAILURE_MESSAGE: &str = "Tool processing failed";

/// Response of `GET /agents/list`
///
/// `all` is the authoritative list of tool identifiers. Fields the backend
/// adds beyond the known three are kept so the relay can pass them through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentList {
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub all: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AgentList {
    /// Check `all`, `agents` and `tools` for a slug
    pub fn contains(&self, slug: &str) -> bool {
        [&self.all, &self.agents, &self.tools]
            .iter()
            .any(|list| list.iter().any(|s| s == slug))
    }
}

/// Whether a slug is known to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLookup {
    pub slug: String,
    pub exists: bool,
    pub available_agents: Vec<String>,
}

impl ToolLookup {
    pub fn from_list(slug: impl Into<String>, list: &AgentList) -> Self {
        let slug = slug.into();
        Self {
            exists: list.contains(&slug),
            available_agents: list.all.clone(),
            slug,
        }
    }
}

/// Generation parameters sent with every process call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl GenerationSettings {
    pub const DEFAULT_TEMPERATURE: f64 = 0.9;
    pub const DEFAULT_TOP_P: f64 = 0.9;
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            top_p: Self::DEFAULT_TOP_P,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Caller-supplied settings; unset fields fall back to the defaults one by one
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl SettingsOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Fill unset fields from `GenerationSettings::default()`
    pub fn resolve(&self) -> GenerationSettings {
        let defaults = GenerationSettings::default();
        GenerationSettings {
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
        }
    }
}

/// A text/form tool invocation as accepted by the relay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_context: Option<Map<String, Value>>,
}

impl ToolRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            settings: None,
            user_context: None,
        }
    }

    pub fn with_settings(mut self, settings: SettingsOverride) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_user_context(mut self, context: Map<String, Value>) -> Self {
        self.user_context = Some(context);
        self
    }

    /// Build the outbound body with defaults applied
    pub fn to_payload(&self) -> ProcessPayload {
        ProcessPayload {
            prompt: self.prompt.clone(),
            settings: self.settings.unwrap_or_default().resolve(),
            user_context: self.user_context.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /agents/process/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessPayload {
    pub prompt: String,
    pub settings: GenerationSettings,
    pub user_context: Map<String, Value>,
}

/// Normalized result of a process call
///
/// The camelCase serialization of this type is the relay's response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCallResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentCallResult {
    pub fn success(content: impl Into<String>, agent_id: Option<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            agent_id,
            usage: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// A single file to upload to a file-archetype tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Normalized result of a file upload call
///
/// A success carrying neither content nor a download URL is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCallResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileCallResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
