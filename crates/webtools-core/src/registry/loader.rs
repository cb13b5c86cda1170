//! Loading tools from the backend

use std::collections::HashSet;

use async_trait::async_trait;

use crate::client::ClientResult;
use crate::logging::SharedLogger;
use crate::{log_error, log_info, log_warn};
use crate::types::Tool;

use super::classifier::Classifier;

/// Something that can report tool identifiers
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// Source name for log lines
    fn name(&self) -> &str;

    /// Fetch the authoritative list of tool identifiers
    async fn fetch_tool_ids(&self) -> ClientResult<Vec<String>>;
}

/// Turns a `ToolSource` into classified catalog entries
pub struct ToolLoader {
    classifier: Classifier,
    logger: SharedLogger,
}

impl ToolLoader {
    pub fn new(classifier: Classifier, logger: SharedLogger) -> Self {
        Self { classifier, logger }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Fetch and classify; any failure yields an empty list
    pub async fn load(&self, source: &dyn ToolSource) -> Vec<Tool> {
        match source.fetch_tool_ids().await {
            Ok(ids) => {
                let tools = self.build_tools(&ids);
                log_info!(
                    self.logger,
                    "[ToolLoader] Loaded {} tools from {}",
                    tools.len(),
                    source.name()
                );
                tools
            }
            Err(e) => {
                log_error!(
                    self.logger,
                    "[ToolLoader] Failed to load tools from {}: {}",
                    source.name(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Classify identifiers, skipping blanks and repeats
    pub fn build_tools(&self, ids: &[String]) -> Vec<Tool> {
        let mut seen = HashSet::new();
        let mut tools = Vec::with_capacity(ids.len());

        for id in ids {
            match self.classifier.build_tool(id) {
                Some(tool) if seen.insert(tool.slug.clone()) => tools.push(tool),
                Some(tool) => {
                    log_warn!(self.logger, "[ToolLoader] Duplicate tool id: {}", tool.slug);
                }
                None => self.logger.warn("[ToolLoader] Skipping blank tool id"),
            }
        }

        tools
    }
}
