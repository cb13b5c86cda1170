//! Catalog entry types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display category of a tool
///
/// `General` is the fallback for identifiers no classification rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolCategory {
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "SEO")]
    Seo,
    Dev,
    Image,
    Converter,
    Writing,
    General,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 7] = [
        ToolCategory::Ai,
        ToolCategory::Seo,
        ToolCategory::Dev,
        ToolCategory::Image,
        ToolCategory::Converter,
        ToolCategory::Writing,
        ToolCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Ai => "AI",
            ToolCategory::Seo => "SEO",
            ToolCategory::Dev => "Dev",
            ToolCategory::Image => "Image",
            ToolCategory::Converter => "Converter",
            ToolCategory::Writing => "Writing",
            ToolCategory::General => "General",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolCategory {
    type Err = ParseToolEnumError;

    /// Case-insensitive, so `seo` and `SEO` both parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseToolEnumError::category(s))
    }
}

/// UI interaction pattern used to render a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolArchetype {
    /// Text in, text out
    Text,
    /// File in, file out
    File,
    /// Form in, result out
    Form,
}

impl ToolArchetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolArchetype::Text => "text",
            ToolArchetype::File => "file",
            ToolArchetype::Form => "form",
        }
    }
}

impl fmt::Display for ToolArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolArchetype {
    type Err = ParseToolEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ToolArchetype::Text),
            "file" => Ok(ToolArchetype::File),
            "form" => Ok(ToolArchetype::Form),
            _ => Err(ParseToolEnumError::archetype(s)),
        }
    }
}

/// Error returned when a category or archetype name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool {kind}: {value}")]
pub struct ParseToolEnumError {
    kind: &'static str,
    value: String,
}

impl ParseToolEnumError {
    fn category(value: &str) -> Self {
        Self { kind: "category", value: value.to_string() }
    }

    fn archetype(value: &str) -> Self {
        Self { kind: "archetype", value: value.to_string() }
    }
}

/// Classifier output for a single identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub category: ToolCategory,
    pub archetype: ToolArchetype,
    pub description: String,
    pub featured: bool,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// Display title
    pub title: String,
    /// Routing key; equal to `id`
    pub slug: String,
    pub description: String,
    pub category: ToolCategory,
    pub archetype: ToolArchetype,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Tool {
    /// Create a tool whose slug mirrors its id
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: ToolCategory,
        archetype: ToolArchetype,
    ) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            title: title.into(),
            description: description.into(),
            category,
            archetype,
            featured: false,
            tags: Vec::new(),
        }
    }

    /// Mark the tool as featured
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive match against title, description and tags
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}
