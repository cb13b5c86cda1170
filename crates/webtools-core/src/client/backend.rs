//! HTTP client for the agents backend

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::logging::SharedLogger;
use crate::{log_debug, log_error, log_warn};
use crate::registry::ToolSource;
use crate::types::{
    AgentCallResult, AgentList, FileCallResult, FileUpload, SettingsOverride, ToolLookup, ToolRequest,
};

use super::context::ExecutionContext;
use super::error::{ClientError, ClientResult};
use super::normalize::{error_message, RawAgentResponse};

/// Multipart field name the process endpoint expects for uploads
const FILE_FIELD: &str = "file";

/// Client for listing and invoking backend tools
///
/// `try_*` methods return typed errors. The plain variants never fail: any
/// error is folded into a `success: false` result carrying a display message.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    context: ExecutionContext,
    logger: SharedLogger,
}

impl BackendClient {
    pub fn new(context: ExecutionContext, logger: SharedLogger) -> Self {
        Self::with_http_client(reqwest::Client::new(), context, logger)
    }

    /// Use a preconfigured `reqwest::Client` (timeouts, proxies)
    pub fn with_http_client(http: reqwest::Client, context: ExecutionContext, logger: SharedLogger) -> Self {
        Self { http, context, logger }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Fetch the backend's tool listing
    pub async fn list_agents(&self) -> ClientResult<AgentList> {
        let url = self.context.list_url()?;
        log_debug!(self.logger, "[BackendClient] GET {}", url);
        self.execute(self.http.get(url)).await
    }

    /// Check whether the backend knows `slug`
    pub async fn lookup_tool(&self, slug: &str) -> ClientResult<ToolLookup> {
        let list = self.list_agents().await?;
        Ok(ToolLookup::from_list(slug, &list))
    }

    /// Run a text or form tool
    pub async fn try_call_tool(&self, slug: &str, request: &ToolRequest) -> ClientResult<AgentCallResult> {
        let url = self.context.process_url(slug)?;
        log_debug!(self.logger, "[BackendClient] POST {}", url);

        let raw: RawAgentResponse = self.execute(self.http.post(url).json(&request.to_payload())).await?;
        Ok(raw.into_call_result(self.context.shape()))
    }

    /// Run a text or form tool with a bare prompt
    pub async fn call_tool(&self, slug: &str, prompt: &str, settings: Option<SettingsOverride>) -> AgentCallResult {
        let mut request = ToolRequest::new(prompt);
        request.settings = settings;
        self.call_tool_with(slug, &request).await
    }

    pub async fn call_tool_with(&self, slug: &str, request: &ToolRequest) -> AgentCallResult {
        match self.try_call_tool(slug, request).await {
            Ok(result) => {
                if !result.success {
                    log_warn!(self.logger, "[BackendClient] Tool {} reported failure", slug);
                }
                result
            }
            Err(e) => {
                log_error!(self.logger, "[BackendClient] Tool {} failed: {}", slug, e);
                AgentCallResult::failure(e.to_string())
            }
        }
    }

    /// Upload a single file to a file tool
    pub async fn try_call_file_tool(&self, slug: &str, upload: FileUpload) -> ClientResult<FileCallResult> {
        let url = self.context.process_url(slug)?;
        log_debug!(
            self.logger,
            "[BackendClient] POST {} ({}, {} bytes)",
            url,
            upload.file_name,
            upload.bytes.len()
        );

        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| ClientError::InvalidRequest(format!("invalid content type {}: {}", content_type, e)))?;
        }
        let form = Form::new().part(FILE_FIELD, part);

        let raw: RawAgentResponse = self.execute(self.http.post(url).multipart(form)).await?;
        Ok(raw.into_file_result())
    }

    pub async fn call_file_tool(&self, slug: &str, upload: FileUpload) -> FileCallResult {
        match self.try_call_file_tool(slug, upload).await {
            Ok(result) => result,
            Err(e) => {
                log_error!(self.logger, "[BackendClient] File tool {} failed: {}", slug, e);
                FileCallResult::failure(e.to_string())
            }
        }
    }

    /// Send, check the status, decode the body
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            log_warn!(self.logger, "[BackendClient] HTTP {}: {}", status.as_u16(), message);
            return Err(ClientError::upstream(status.as_u16(), message));
        }

        serde_json::from_slice(&body).map_err(|e| {
            log_warn!(self.logger, "[BackendClient] Undecodable response: {}", e);
            ClientError::invalid_response(e.to_string())
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_builder() {
            ClientError::InvalidRequest(e.to_string())
        } else {
            ClientError::connection(self.context.base_url(), e)
        }
    }
}

#[async_trait]
impl ToolSource for BackendClient {
    fn name(&self) -> &str {
        self.context.base_url()
    }

    async fn fetch_tool_ids(&self) -> ClientResult<Vec<String>> {
        Ok(self.list_agents().await?.all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Bytes;
    use axum::extract::Path;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::logging::{MemoryLogger, NoOpLogger};
    use crate::registry::{Classifier, ToolLoader};
    use crate::types::GENERIC_FAILURE_MESSAGE;

    async fn list() -> Json<Value> {
        Json(json!({
            "agents": ["story-generator"],
            "tools": ["hex-to-rgb"],
            "all": ["story-generator", "hex-to-rgb"]
        }))
    }

    async fn process(Path(slug): Path<String>, headers: HeaderMap, body: Bytes) -> Response {
        match slug.as_str() {
            "shape" => Json(json!({"status": "success", "content": "hi", "agent_id": "a1"})).into_response(),
            "echo" => {
                let payload: Value = serde_json::from_slice(&body).unwrap();
                Json(json!({
                    "status": "success",
                    "agent_id": &slug,
                    "content": payload["settings"].to_string(),
                    "usage": {"prompt": payload["prompt"]}
                }))
                .into_response()
            }
            "failing" => Json(json!({"status": "error", "agent_id": &slug})).into_response(),
            "strict" => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": "prompt too long"}))).into_response(),
            "broken" => (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").into_response(),
            "garbage" => (StatusCode::OK, "definitely not json").into_response(),
            "image-compressor" => {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                let body = String::from_utf8_lossy(&body);
                if !content_type.starts_with("multipart/form-data")
                    || !body.contains("name=\"file\"")
                    || !body.contains("filename=\"cat.png\"")
                {
                    return (StatusCode::BAD_REQUEST, Json(json!({"detail": "file missing"}))).into_response();
                }
                Json(json!({"status": "success", "downloadUrl": "/files/cat.min.png"})).into_response()
            }
            "pdf-converter" => Json(json!({"status": "success"})).into_response(),
            _ => (StatusCode::NOT_FOUND, Json(json!({"error": format!("Unknown agent: {}", slug)}))).into_response(),
        }
    }

    async fn relay_tool() -> Json<Value> {
        Json(json!({"success": true, "content": "hi", "agentId": "a1"}))
    }

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route("/api/v1/agents/list", get(list))
            .route("/api/v1/agents/process/:slug", post(process))
            .route("/api/tools/:slug", post(relay_tool));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn direct(base: &str) -> BackendClient {
        BackendClient::new(
            ExecutionContext::direct(format!("{}/api/v1", base)),
            Arc::new(NoOpLogger::new()),
        )
    }

    #[tokio::test]
    async fn test_list_and_lookup() {
        let base = spawn_backend().await;
        let client = direct(&base);

        let list = client.list_agents().await.unwrap();
        assert_eq!(list.all, vec!["story-generator", "hex-to-rgb"]);

        let lookup = client.lookup_tool("hex-to-rgb").await.unwrap();
        assert!(lookup.exists);
        assert_eq!(lookup.available_agents.len(), 2);
        assert!(!client.lookup_tool("nope").await.unwrap().exists);
    }

    #[tokio::test]
    async fn test_direct_and_relay_shapes_agree() {
        let base = spawn_backend().await;
        let via_backend = direct(&base).call_tool("shape", "x", None).await;
        let via_relay = BackendClient::new(ExecutionContext::relay(base.as_str()), Arc::new(NoOpLogger::new()))
            .call_tool("shape", "x", None)
            .await;

        assert_eq!(via_backend, via_relay);
        assert!(via_backend.success);
        assert_eq!(via_backend.content.as_deref(), Some("hi"));
        assert_eq!(via_backend.agent_id.as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn test_default_settings_are_sent() {
        let base = spawn_backend().await;
        let result = direct(&base).call_tool("echo", "hello", None).await;

        let sent: Value = serde_json::from_str(result.content.as_deref().unwrap()).unwrap();
        assert_eq!(sent, json!({"temperature": 0.9, "top_p": 0.9, "max_tokens": 1000}));
        assert_eq!(result.usage, Some(json!({"prompt": "hello"})));

        let partial = SettingsOverride::new().with_max_tokens(50);
        let result = direct(&base).call_tool("echo", "hello", Some(partial)).await;
        let sent: Value = serde_json::from_str(result.content.as_deref().unwrap()).unwrap();
        assert_eq!(sent["max_tokens"], 50);
        assert_eq!(sent["temperature"], 0.9);
    }

    #[tokio::test]
    async fn test_non_success_status_is_generic_failure() {
        let base = spawn_backend().await;
        let result = direct(&base).call_tool("failing", "x", None).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
        assert_eq!(result.agent_id.as_deref(), Some("failing"));
    }

    #[tokio::test]
    async fn test_upstream_errors() {
        let base = spawn_backend().await;
        let client = direct(&base);

        let err = client.try_call_tool("strict", &ToolRequest::new("x")).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "prompt too long");

        let result = client.call_tool("broken", "x", None).await;
        assert_eq!(result.error.as_deref(), Some("Request failed with status 502"));

        let result = client.call_tool("unknown-thing", "x", None).await;
        assert_eq!(result.error.as_deref(), Some("Unknown agent: unknown-thing"));
    }

    #[tokio::test]
    async fn test_garbage_body_does_not_panic() {
        let base = spawn_backend().await;
        let client = direct(&base);

        let err = client.try_call_tool("garbage", &ToolRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse { .. }));

        let result = client.call_tool("garbage", "x", None).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Unexpected response from backend"));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let logger = Arc::new(MemoryLogger::new());
        let client = BackendClient::new(ExecutionContext::direct(format!("http://{}/api/v1", addr)), logger.clone());

        let err = client.list_agents().await.unwrap_err();
        assert!(err.is_connectivity());

        let result = client.call_tool("story-generator", "x", None).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("backend"));
        assert!(logger.contains("[BackendClient] Tool story-generator failed"));

        let file = client.call_file_tool("pdf-converter", FileUpload::new("a.pdf", b"%PDF".to_vec())).await;
        assert!(!file.success);
    }

    #[tokio::test]
    async fn test_file_upload() {
        let base = spawn_backend().await;
        let client = direct(&base);

        let upload = FileUpload::new("cat.png", vec![0x89, b'P', b'N', b'G']).with_content_type("image/png");
        let result = client.call_file_tool("image-compressor", upload).await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.download_url.as_deref(), Some("/files/cat.min.png"));

        let result = client.call_file_tool("pdf-converter", FileUpload::new("a.docx", Vec::new())).await;
        assert!(result.success);
        assert_eq!(result.content, None);
        assert_eq!(result.download_url, None);
    }

    #[tokio::test]
    async fn test_bad_mime_type_is_invalid_request() {
        let client = direct("http://127.0.0.1:1");
        let upload = FileUpload::new("a.bin", vec![1]).with_content_type("not a mime");

        let err = client.try_call_file_tool("pdf-converter", upload).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_loader_reads_all_field() {
        let base = spawn_backend().await;
        let client = direct(&base);
        let loader = ToolLoader::new(Classifier::default(), Arc::new(NoOpLogger::new()));

        let tools = loader.load(&client).await;
        let slugs: Vec<_> = tools.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["story-generator", "hex-to-rgb"]);
        assert!(tools[0].featured);
    }
}
