//! Agents backend client
//!
//! Builds process requests with default generation settings, sends them to
//! the backend directly or through the relay, and folds either response
//! dialect into `AgentCallResult` / `FileCallResult`.

mod error;
mod context;
mod normalize;
mod backend;

pub use error::{ClientError, ClientErrorKind, ClientResult};
pub use context::{ExecutionContext, ResponseShape};
pub use backend::BackendClient;
