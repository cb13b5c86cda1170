//! Configuration
//!
//! Sources, lowest precedence first:
//! - Built-in defaults (`WebToolsConfig::default()`)
//! - YAML file (`FileConfigProvider`)
//! - `BACKEND_URL` environment variable
//!
//! The relay applies its command-line flags on top.

mod error;
mod settings;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use settings::{
    WebToolsConfig, RelaySettings, ClassificationOverride, default_overrides,
    DEFAULT_BACKEND_URL, DEFAULT_API_PREFIX, DEFAULT_RELAY_BIND, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_FEATURED, DEFAULT_OVERRIDES, BACKEND_URL_ENV,
};
pub use file::{FileConfigProvider, CONFIG_PATH_ENV};
