//! Merged tool catalog
//!
//! A `Catalog` is immutable once built. Views (by category, featured, search)
//! are computed by filtering and never reorder the underlying sequence.
//! Refreshing means building a new catalog and swapping it into a
//! `CatalogHandle`.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::types::{Tool, ToolArchetype, ToolCategory};

/// Filter for catalog views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Only tools in this category
    #[serde(default)]
    pub category: Option<ToolCategory>,
    /// Only tools with this archetype
    #[serde(default)]
    pub archetype: Option<ToolArchetype>,
    /// Only featured tools
    #[serde(default)]
    pub featured_only: bool,
    /// Case-insensitive text match on title, description and tags
    #[serde(default)]
    pub query: Option<String>,
}

impl CatalogFilter {
    /// Match everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: ToolCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_archetype(mut self, archetype: ToolArchetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Check if a tool passes every set criterion
    pub fn matches(&self, tool: &Tool) -> bool {
        if let Some(category) = self.category {
            if tool.category != category {
                return false;
            }
        }

        if let Some(archetype) = self.archetype {
            if tool.archetype != archetype {
                return false;
            }
        }

        if self.featured_only && !tool.featured {
            return false;
        }

        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => tool.matches_query(query),
            _ => true,
        }
    }
}

/// Ordered, slug-unique sequence of tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    tools: Vec<Tool>,
}

impl Catalog {
    /// Build a catalog from a single source
    ///
    /// Tools with a blank slug are dropped, as are later duplicates of a slug.
    pub fn new(tools: Vec<Tool>) -> Self {
        let mut seen = HashSet::new();
        let tools = tools
            .into_iter()
            .filter(|t| !t.slug.trim().is_empty())
            .filter(|t| seen.insert(t.slug.clone()))
            .collect();
        Self { tools }
    }

    /// Merge the builtin list with tools fetched from the backend
    ///
    /// Dynamic-wins-by-slug: fetched tools come first in fetched order, then
    /// static tools whose slug the backend did not report, in static order.
    /// Either side being empty returns the other unchanged.
    pub fn merge(static_tools: Vec<Tool>, dynamic_tools: Vec<Tool>) -> Self {
        let mut merged = Self::new(dynamic_tools);
        let known: HashSet<String> = merged.tools.iter().map(|t| t.slug.clone()).collect();

        let fallback = Self::new(static_tools);
        merged
            .tools
            .extend(fallback.tools.into_iter().filter(|t| !known.contains(&t.slug)));
        merged
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn into_tools(self) -> Vec<Tool> {
        self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up a tool by slug
    pub fn get(&self, slug: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Tools matching a filter, in catalog order
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<Tool> {
        self.tools.iter().filter(|t| filter.matches(t)).cloned().collect()
    }

    pub fn by_category(&self, category: ToolCategory) -> Vec<Tool> {
        self.filter(&CatalogFilter::new().with_category(category))
    }

    pub fn by_archetype(&self, archetype: ToolArchetype) -> Vec<Tool> {
        self.filter(&CatalogFilter::new().with_archetype(archetype))
    }

    pub fn featured(&self) -> Vec<Tool> {
        self.filter(&CatalogFilter::new().featured())
    }

    pub fn search(&self, query: &str) -> Vec<Tool> {
        self.filter(&CatalogFilter::new().with_query(query))
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<ToolCategory> {
        let mut seen = HashSet::new();
        self.tools
            .iter()
            .map(|t| t.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

/// Shared handle to the current catalog
///
/// Readers get a cheap `Arc` snapshot; `replace` swaps in a new catalog
/// without touching snapshots already handed out.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Current catalog
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read())
    }

    /// Replace the catalog wholesale, returning the previous one
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        std::mem::replace(&mut *self.current.write(), Arc::new(catalog))
    }
}
