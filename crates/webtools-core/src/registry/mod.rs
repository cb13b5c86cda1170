//! Tool catalog
//!
//! ```text
//! backend ids ──► Classifier ──► ToolLoader ──► dynamic tools ─┐
//!                                                              ├─► Catalog::merge ──► CatalogHandle
//!                                      builtin_tools() ────────┘
//! ```

mod classifier;
mod builtin;
mod catalog;
mod loader;

pub use classifier::{Classifier, format_title, derive_tags, SEPARATOR};
pub use builtin::builtin_tools;
pub use catalog::{Catalog, CatalogFilter, CatalogHandle};
pub use loader::{ToolLoader, ToolSource};
