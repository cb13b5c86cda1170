//! WebTools relay
//!
//! Sits between the browser and the agents backend. Forwards tool calls,
//! normalizing the backend's responses into the relay dialect, and serves the
//! merged tool catalog.

pub mod routes;
pub mod server;

pub use server::{build_router, run, RefreshSummary, RelayState};
