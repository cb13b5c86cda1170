//! Response normalization
//!
//! The backend and the relay answer process calls with different field
//! names. Both are decoded into one permissive `RawAgentResponse` and then
//! folded into the public result types.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{AgentCallResult, FileCallResult, GENERIC_FAILURE_MESSAGE};

use super::context::ResponseShape;

/// Union of every field either dialect may send
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawAgentResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default, rename = "agentId")]
    pub agent_id_camel: Option<String>,
    #[serde(default, rename = "agent_id")]
    pub agent_id_snake: Option<String>,
    #[serde(default)]
    pub usage: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default, rename = "downloadUrl")]
    pub download_url_camel: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
}

impl RawAgentResponse {
    fn status_is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    fn agent_id(&self) -> Option<String> {
        self.agent_id_camel.clone().or_else(|| self.agent_id_snake.clone())
    }

    fn error_text(&self) -> Option<String> {
        self.error.as_ref().and_then(text)
    }

    /// Text normalization
    pub fn into_call_result(self, shape: ResponseShape) -> AgentCallResult {
        let success = self.success == Some(true) || self.status_is_success();
        let error = match shape {
            ResponseShape::Relay => self.error_text(),
            ResponseShape::Backend => None,
        };

        let error = if success {
            error
        } else {
            error.or_else(|| Some(GENERIC_FAILURE_MESSAGE.to_string()))
        };

        AgentCallResult {
            success,
            content: self.content.as_ref().and_then(text),
            agent_id: self.agent_id(),
            usage: self.usage.filter(|u| !u.is_null()),
            error,
        }
    }

    /// File normalization
    ///
    /// Backends answering uploads are less uniform: an explicit flag wins,
    /// then `status`, and a body with neither counts as success.
    pub fn into_file_result(self) -> FileCallResult {
        let success = match (self.success, self.status.as_deref()) {
            (Some(flag), _) => flag,
            (None, Some(status)) => status == "success",
            (None, None) => true,
        };

        let content = [&self.content, &self.result, &self.response]
            .into_iter()
            .flatten()
            .find_map(text);

        let error = if success {
            None
        } else {
            Some(
                self.error_text()
                    .or_else(|| self.detail.as_ref().and_then(text))
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            )
        };

        FileCallResult {
            success,
            content,
            download_url: self.download_url.clone().or_else(|| self.download_url_camel.clone()),
            agent_id: self.agent_id(),
            error,
        }
    }
}

/// Render a JSON value as display text; strings verbatim, null as absent
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Message for a non-2xx response body
///
/// Tries `error`, then `detail`; otherwise a generic line with the status.
pub(crate) fn error_message(status: u16, body: &[u8]) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    parsed
        .as_ref()
        .and_then(|v| v.get("error").and_then(text).or_else(|| v.get("detail").and_then(text)))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}
