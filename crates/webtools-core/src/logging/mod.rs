//! Logging abstraction used by the library
//!
//! The core crate never installs a global subscriber; callers hand a
//! `SharedLogger` to the components that log.

mod traits;
mod sinks;
mod tracing_logger;

pub use traits::{Logger, LogLevel, SharedLogger};
pub use sinks::{MemoryLogger, NoOpLogger};
pub use tracing_logger::TracingLogger;
