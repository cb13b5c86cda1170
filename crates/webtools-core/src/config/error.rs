//! Configuration errors

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid backend URL '{url}': {message}")]
    InvalidBackendUrl { url: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
