//! WebTools Core
//!
//! Tool catalog reconciliation and request normalization for the WebTools
//! front end. The agents backend is an external HTTP service; this crate
//! knows how to list its tools, classify them for the UI, and call them.
//!
//! ## Catalog
//!
//! The `registry` module turns backend tool identifiers into catalog entries
//! and merges them with the builtin dataset:
//!
//! ```rust,ignore
//! use webtools_core::registry::{builtin_tools, Catalog, Classifier, ToolLoader};
//!
//! let loader = ToolLoader::new(Classifier::default(), logger.clone());
//! let dynamic = loader.load(&client).await;
//! let catalog = Catalog::merge(builtin_tools(), dynamic);
//! ```
//!
//! ## Calling tools
//!
//! ```rust,ignore
//! use webtools_core::client::{BackendClient, ExecutionContext};
//!
//! let client = BackendClient::new(ExecutionContext::from_config(&config), logger);
//! let result = client.call_tool("story-generator", "A dragon in Lisbon", None).await;
//! if !result.success {
//!     eprintln!("{}", result.error.unwrap_or_default());
//! }
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod registry;
pub mod client;

// Re-export commonly used types
pub use types::{
    Tool, ToolCategory, ToolArchetype, ToolMetadata,
    AgentList, ToolLookup, ToolRequest, GenerationSettings, SettingsOverride,
    AgentCallResult, FileUpload, FileCallResult,
};

pub use logging::{Logger, SharedLogger, NoOpLogger, TracingLogger, MemoryLogger};

pub use config::{WebToolsConfig, RelaySettings, ConfigError, ConfigResult};

pub use registry::{
    Catalog, CatalogHandle, CatalogFilter, Classifier, ToolLoader, ToolSource,
    builtin_tools, format_title, derive_tags,
};

pub use client::{
    BackendClient, ExecutionContext, ResponseShape,
    ClientError, ClientErrorKind, ClientResult,
};
