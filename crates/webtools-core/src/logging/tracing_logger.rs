//! Logger that forwards to `tracing`

use super::traits::Logger;

/// Forwards messages to `tracing` events under a fixed target
///
/// The relay installs a `tracing-subscriber` at startup, so library logs end
/// up in the same stream as request traces.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    target: &'static str,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingLogger {
    pub fn new() -> Self {
        Self { target: "webtools" }
    }

    /// Create a logger with a custom target label
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }
}

// `tracing` macros need a literal target, so the label travels as a field.
impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(source = self.target, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(source = self.target, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(source = self.target, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(source = self.target, "{}", message);
    }
}
