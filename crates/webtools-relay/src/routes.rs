//! API routes for the relay
//!
//! Failures always come back as JSON bodies. The HTTP status mirrors the
//! backend's on upstream errors and is 500 when the backend is unreachable.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};
use webtools_core::{
    AgentCallResult, CatalogFilter, ClientError, ClientErrorKind, FileCallResult, FileUpload, Tool,
    ToolArchetype, ToolCategory, ToolRequest,
};

use crate::server::RelayState;

type RelayStateArc = Arc<RelayState>;

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

fn error_status(e: &ClientError) -> StatusCode {
    match e.kind() {
        ClientErrorKind::Upstream => e
            .status()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        ClientErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ClientErrorKind::Connection | ClientErrorKind::InvalidResponse => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Agent Routes
// ============================================================================

pub fn agent_routes() -> Router<RelayStateArc> {
    Router::new().route("/api/agents/list", get(list_agents))
}

async fn list_agents(State(state): State<RelayStateArc>) -> Response {
    match state.backend.list_agents().await {
        Ok(list) => Json(list).into_response(),
        Err(e) => {
            error!("Listing agents failed: {}", e);
            (
                error_status(&e),
                Json(json!({
                    "error": e.to_string(),
                    "agents": [],
                    "tools": [],
                    "all": [],
                })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Tool Routes
// ============================================================================

pub fn tool_routes() -> Router<RelayStateArc> {
    Router::new().route("/api/tools/:slug", post(process_tool).get(lookup_tool))
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

async fn process_tool(State(state): State<RelayStateArc>, Path(slug): Path<String>, request: Request) -> Response {
    if is_multipart(&request) {
        process_file(&state, &slug, request).await
    } else {
        process_text(&state, &slug, request).await
    }
}

async fn process_text(state: &RelayState, slug: &str, request: Request) -> Response {
    // Any content type; fetch with a string body sends text/plain
    let body = match Bytes::from_request(request, &()).await {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Rejected request for {}: {}", slug, rejection.body_text());
            return (rejection.status(), Json(AgentCallResult::failure(rejection.body_text()))).into_response();
        }
    };

    let tool_request = if body.iter().all(u8::is_ascii_whitespace) {
        ToolRequest::default()
    } else {
        match serde_json::from_slice::<ToolRequest>(&body) {
            Ok(r) => r,
            Err(e) => {
                warn!("Malformed JSON for {}: {}", slug, e);
                let message = format!("Invalid JSON body: {}", e);
                return (StatusCode::BAD_REQUEST, Json(AgentCallResult::failure(message))).into_response();
            }
        }
    };

    if tool_request.prompt.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(AgentCallResult::failure("Prompt is required"))).into_response();
    }

    info!("Processing tool: {}", slug);
    match state.backend.try_call_tool(slug, &tool_request).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            error!("Tool {} failed: {}", slug, e);
            (error_status(&e), Json(AgentCallResult::failure(e.to_string()))).into_response()
        }
    }
}

async fn process_file(state: &RelayState, slug: &str, request: Request) -> Response {
    let bad_request = |message: String| {
        (StatusCode::BAD_REQUEST, Json(FileCallResult::failure(message))).into_response()
    };

    let mut multipart = match Multipart::from_request(request, &()).await {
        Ok(m) => m,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let mut upload = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(e.body_text()),
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(e) => return bad_request(e.body_text()),
        };

        let mut file = FileUpload::new(file_name, bytes.to_vec());
        if let Some(ct) = content_type {
            file = file.with_content_type(ct);
        }
        upload = Some(file);
        break;
    }

    let Some(upload) = upload else {
        return bad_request("File is required".to_string());
    };

    info!("Processing file tool: {} ({})", slug, upload.file_name);
    match state.backend.try_call_file_tool(slug, upload).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            error!("File tool {} failed: {}", slug, e);
            (error_status(&e), Json(FileCallResult::failure(e.to_string()))).into_response()
        }
    }
}

async fn lookup_tool(State(state): State<RelayStateArc>, Path(slug): Path<String>) -> Response {
    match state.backend.lookup_tool(&slug).await {
        Ok(lookup) => Json(lookup).into_response(),
        Err(e) => {
            error!("Lookup of {} failed: {}", slug, e);
            (
                error_status(&e),
                Json(json!({
                    "error": e.to_string(),
                    "slug": slug,
                    "exists": false,
                    "available_agents": [],
                })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Catalog Routes
// ============================================================================

pub fn catalog_routes() -> Router<RelayStateArc> {
    Router::new()
        .route("/api/catalog", get(list_catalog))
        .route("/api/catalog/:slug", get(get_catalog_tool))
        .route("/api/refresh-catalog", post(refresh_catalog))
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub archetype: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub q: Option<String>,
}

impl CatalogQuery {
    fn to_filter(&self) -> Result<CatalogFilter, String> {
        let mut filter = CatalogFilter::new();
        if let Some(category) = &self.category {
            filter = filter.with_category(ToolCategory::from_str(category).map_err(|e| e.to_string())?);
        }
        if let Some(archetype) = &self.archetype {
            filter = filter.with_archetype(ToolArchetype::from_str(archetype).map_err(|e| e.to_string())?);
        }
        if self.featured {
            filter = filter.featured();
        }
        if let Some(q) = &self.q {
            filter = filter.with_query(q.clone());
        }
        Ok(filter)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub tools: Vec<Tool>,
    pub total: usize,
    pub categories: Vec<ToolCategory>,
}

async fn list_catalog(State(state): State<RelayStateArc>, Query(query): Query<CatalogQuery>) -> Response {
    let filter = match query.to_filter() {
        Ok(f) => f,
        Err(message) => return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response(),
    };

    let catalog = state.catalog.snapshot();
    let tools = catalog.filter(&filter);
    Json(CatalogResponse {
        total: tools.len(),
        tools,
        categories: catalog.categories(),
    })
    .into_response()
}

async fn get_catalog_tool(State(state): State<RelayStateArc>, Path(slug): Path<String>) -> Response {
    match state.catalog.snapshot().get(&slug) {
        Some(tool) => Json(tool.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Tool not found: {}", slug) })),
        )
            .into_response(),
    }
}

async fn refresh_catalog(State(state): State<RelayStateArc>) -> Json<serde_json::Value> {
    let summary = state.refresh_catalog().await;
    Json(json!({ "fetched": summary.fetched, "total": summary.total }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<RelayStateArc> {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub tools: usize,
    pub uptime_secs: u64,
}

async fn health(State(state): State<RelayStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.context().base_url().to_string(),
        tools: state.catalog.snapshot().len(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderMap;
    use serde_json::Value;
    use webtools_core::{BackendClient, ExecutionContext, NoOpLogger, WebToolsConfig};

    use crate::server::build_router;

    async fn backend_list() -> Json<Value> {
        Json(json!({
            "agents": ["story-generator"],
            "tools": ["hex-to-rgb", "domain-checker"],
            "all": ["story-generator", "hex-to-rgb", "domain-checker"],
            "version": "2"
        }))
    }

    async fn backend_process(Path(slug): Path<String>, headers: HeaderMap, body: Bytes) -> Response {
        match slug.as_str() {
            "story-generator" => {
                let payload: Value = serde_json::from_slice(&body).unwrap();
                Json(json!({
                    "status": "success",
                    "agent_id": "story-generator",
                    "content": format!("Story: {}", payload["prompt"].as_str().unwrap_or_default()),
                    "usage": {"total_tokens": 7}
                }))
                .into_response()
            }
            "strict" => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": "prompt too long"}))).into_response(),
            "image-compressor" => {
                let multipart = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|ct| ct.starts_with("multipart/form-data"))
                    .unwrap_or(false);
                let body = String::from_utf8_lossy(&body);
                if !multipart || !body.contains("filename=\"cat.png\"") {
                    return (StatusCode::BAD_REQUEST, Json(json!({"detail": "file missing"}))).into_response();
                }
                Json(json!({"status": "success", "download_url": "/files/cat.min.png"})).into_response()
            }
            _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "Agent not found"}))).into_response(),
        }
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_backend() -> String {
        serve(
            Router::new()
                .route("/api/v1/agents/list", get(backend_list))
                .route("/api/v1/agents/process/:slug", post(backend_process)),
        )
        .await
    }

    async fn warming_backend() -> String {
        async fn warming_up() -> Response {
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"detail": "warming up"}))).into_response()
        }
        serve(Router::new().route("/api/v1/agents/list", get(warming_up))).await
    }

    async fn dead_backend() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    async fn spawn_relay(backend_url: &str) -> (String, Arc<RelayState>) {
        let config = WebToolsConfig::default().with_backend_url(backend_url);
        let state = Arc::new(RelayState::from_config(&config, Arc::new(NoOpLogger::new())));
        let base = serve(build_router(state.clone(), config.relay.max_upload_bytes)).await;
        (base, state)
    }

    fn relay_client(relay: &str) -> BackendClient {
        BackendClient::new(ExecutionContext::relay(relay), Arc::new(NoOpLogger::new()))
    }

    #[tokio::test]
    async fn test_text_tool_through_relay() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let result = relay_client(&relay).call_tool("story-generator", "a dragon", None).await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.content.as_deref(), Some("Story: a dragon"));
        assert_eq!(result.agent_id.as_deref(), Some("story-generator"));
        assert_eq!(result.usage, Some(json!({"total_tokens": 7})));
    }

    #[tokio::test]
    async fn test_relay_response_is_camel_case() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let body: Value = reqwest::Client::new()
            .post(format!("{}/api/tools/story-generator", relay))
            .json(&json!({"prompt": "x"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["agentId"], "story-generator");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/tools/story-generator", relay))
            .json(&json!({"prompt": "   "}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_upstream_status_is_mirrored() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let err = relay_client(&relay)
            .try_call_tool("strict", &ToolRequest::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "prompt too long");
    }

    #[tokio::test]
    async fn test_file_tool_through_relay() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let upload = FileUpload::new("cat.png", vec![1, 2, 3]).with_content_type("image/png");
        let result = relay_client(&relay).call_file_tool("image-compressor", upload).await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.download_url.as_deref(), Some("/files/cat.min.png"));
    }

    #[tokio::test]
    async fn test_json_body_without_content_type() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/tools/story-generator", relay))
            .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
            .body(r#"{"prompt": "a dragon"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["content"], "Story: a dragon");

        let response = reqwest::Client::new()
            .post(format!("{}/api/tools/story-generator", relay))
            .body(r#"{"prompt": "a dragon"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/tools/story-generator", relay))
            .header(header::CONTENT_TYPE, "application/json")
            .body(r#"{"prompt": "#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

        let response = reqwest::Client::new()
            .post(format!("{}/api/tools/story-generator", relay))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_multipart_without_file_is_rejected() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let form = reqwest::multipart::Form::new().text("note", "no file here");
        let response = reqwest::Client::new()
            .post(format!("{}/api/tools/image-compressor", relay))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "File is required");
    }

    #[tokio::test]
    async fn test_agent_list_passthrough_and_lookup() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;
        let client = relay_client(&relay);

        let list = client.list_agents().await.unwrap();
        assert_eq!(list.all.len(), 3);
        assert_eq!(list.extra.get("version"), Some(&json!("2")));

        let lookup: Value = reqwest::get(format!("{}/api/tools/hex-to-rgb", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(lookup["exists"], true);
        assert_eq!(lookup["available_agents"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let (relay, state) = spawn_relay(&dead_backend().await).await;

        let response = reqwest::get(format!("{}/api/agents/list", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["all"], json!([]));
        assert!(body["error"].as_str().unwrap().contains("Backend Connection Error"));

        let result = relay_client(&relay).call_tool("story-generator", "x", None).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("backend"));

        let summary = state.refresh_catalog().await;
        assert_eq!(summary.fetched, 0);
        assert_eq!(summary.total, 10);
    }

    #[tokio::test]
    async fn test_unreachable_backend_for_files_and_lookup() {
        let (relay, _) = spawn_relay(&dead_backend().await).await;

        let part = reqwest::multipart::Part::bytes(vec![1, 2, 3]).file_name("cat.png");
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = reqwest::Client::new()
            .post(format!("{}/api/tools/image-compressor", relay))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Backend Connection Error"));

        let response = reqwest::get(format!("{}/api/tools/hex-to-rgb", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["slug"], "hex-to-rgb");
        assert_eq!(body["exists"], false);
        assert_eq!(body["available_agents"], json!([]));
        assert!(body["error"].as_str().unwrap().contains("Backend Connection Error"));
    }

    #[tokio::test]
    async fn test_list_upstream_error_is_mirrored() {
        let (relay, _) = spawn_relay(&warming_backend().await).await;

        let response = reqwest::get(format!("{}/api/agents/list", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 503);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "warming up");
        assert_eq!(body["agents"], json!([]));
        assert_eq!(body["tools"], json!([]));
        assert_eq!(body["all"], json!([]));

        let response = reqwest::get(format!("{}/api/tools/hex-to-rgb", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 503);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "warming up");
        assert_eq!(body["exists"], false);
    }

    #[tokio::test]
    async fn test_refresh_endpoint_leaves_refresh_slug_free() {
        let (relay, _) = spawn_relay(&spawn_backend().await).await;

        let response = reqwest::get(format!("{}/api/catalog/refresh", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Tool not found: refresh");

        let summary: Value = reqwest::Client::new()
            .post(format!("{}/api/refresh-catalog", relay))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(summary, json!({"fetched": 3, "total": 11}));

        let tool: Tool = reqwest::get(format!("{}/api/catalog/domain-checker", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(tool.category, ToolCategory::Seo);
    }

    #[tokio::test]
    async fn test_catalog_merges_backend_tools_first() {
        let (relay, state) = spawn_relay(&spawn_backend().await).await;
        let summary = state.refresh_catalog().await;
        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.total, 11);

        let catalog: CatalogResponse = reqwest::get(format!("{}/api/catalog", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let slugs: Vec<_> = catalog.tools.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(&slugs[..4], &["story-generator", "hex-to-rgb", "domain-checker", "ai-story-generator"]);
        assert_eq!(catalog.total, 11);

        let seo: CatalogResponse = reqwest::get(format!("{}/api/catalog?category=seo", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let slugs: Vec<_> = seo.tools.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["domain-checker", "meta-tag-generator"]);
    }

    #[tokio::test]
    async fn test_catalog_lookup_and_bad_filter() {
        let (relay, _) = spawn_relay(&dead_backend().await).await;

        let response = reqwest::get(format!("{}/api/catalog/pdf-converter", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let tool: Tool = response.json().await.unwrap();
        assert_eq!(tool.archetype, ToolArchetype::File);

        let response = reqwest::get(format!("{}/api/catalog/nope", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);

        let response = reqwest::get(format!("{}/api/catalog?category=games", relay)).await.unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let featured: CatalogResponse = reqwest::get(format!("{}/api/catalog?featured=true&q=image", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(featured.total, 1);
        assert_eq!(featured.tools[0].slug, "image-compressor");
    }

    #[tokio::test]
    async fn test_health() {
        let (relay, _) = spawn_relay(&dead_backend().await).await;

        let health: HealthResponse = reqwest::get(format!("{}/api/health", relay))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.tools, 10);
        assert!(health.backend.ends_with("/api/v1"));
    }
}
