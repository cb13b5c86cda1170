//! Heuristic classification of backend tool identifiers
//!
//! The backend only reports opaque slugs such as `ai-content-improver`. The
//! UI needs a category and an archetype for each, so slugs run through an
//! ordered keyword table; the first rule with a matching keyword wins and a
//! catch-all rule keeps the function total. Exact-match overrides sit in
//! front of the table for known slugs whose words collide with an earlier
//! rule (`domain-checker` would otherwise land on the `checker` rule).

use std::collections::{BTreeMap, HashSet};

use crate::config::{default_overrides, ClassificationOverride, WebToolsConfig, DEFAULT_FEATURED};
use crate::types::{Tool, ToolArchetype, ToolCategory, ToolMetadata};

/// Separator between words in a tool identifier
pub const SEPARATOR: char = '-';

/// How a rule picks the archetype
#[derive(Debug, Clone, Copy)]
enum ArchetypeRule {
    Always(ToolArchetype),
    /// `matched` if the identifier contains `keyword`, else `otherwise`
    IfContains {
        keyword: &'static str,
        matched: ToolArchetype,
        otherwise: ToolArchetype,
    },
}

impl ArchetypeRule {
    fn resolve(&self, id: &str) -> ToolArchetype {
        match *self {
            ArchetypeRule::Always(archetype) => archetype,
            ArchetypeRule::IfContains { keyword, matched, otherwise } => {
                if id.contains(keyword) {
                    matched
                } else {
                    otherwise
                }
            }
        }
    }
}

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
struct Rule {
    keywords: &'static [&'static str],
    category: ToolCategory,
    archetype: ArchetypeRule,
    /// `{name}` is replaced by the identifier with separators turned into spaces
    description: &'static str,
}

impl Rule {
    fn matches(&self, id: &str) -> bool {
        self.keywords.iter().any(|k| id.contains(k))
    }
}

/// Evaluated top to bottom
const RULES: &[Rule] = &[
    Rule {
        keywords: &["story", "poem", "backstory"],
        category: ToolCategory::Writing,
        archetype: ArchetypeRule::Always(ToolArchetype::Text),
        description: "Generate creative {name} with AI",
    },
    Rule {
        keywords: &["writer", "generator", "improver", "humanize"],
        category: ToolCategory::Ai,
        archetype: ArchetypeRule::Always(ToolArchetype::Text),
        description: "AI-powered {name} for content creation",
    },
    Rule {
        keywords: &["checker", "expander", "shortener"],
        category: ToolCategory::Ai,
        archetype: ArchetypeRule::Always(ToolArchetype::Text),
        description: "Advanced {name} tool",
    },
    Rule {
        keywords: &["hex", "rgb", "beautifier"],
        category: ToolCategory::Dev,
        archetype: ArchetypeRule::IfContains {
            keyword: "beautifier",
            matched: ToolArchetype::Text,
            otherwise: ToolArchetype::Form,
        },
        description: "Professional {name} for developers",
    },
    Rule {
        keywords: &["domain", "meta", "seo"],
        category: ToolCategory::Seo,
        archetype: ArchetypeRule::Always(ToolArchetype::Form),
        description: "Optimize your website with {name}",
    },
];

const FALLBACK: Rule = Rule {
    keywords: &[],
    category: ToolCategory::General,
    archetype: ArchetypeRule::Always(ToolArchetype::Text),
    description: "{name} tool",
};

/// Description template of the first rule for `category`
fn template_for(category: ToolCategory) -> &'static str {
    RULES
        .iter()
        .find(|r| r.category == category)
        .unwrap_or(&FALLBACK)
        .description
}

/// Maps identifiers to catalog metadata
///
/// The featured allow-list and the override table are data, not logic: both
/// come from configuration and are matched exactly against the identifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    featured: HashSet<String>,
    overrides: BTreeMap<String, ClassificationOverride>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURED.iter().copied()).with_overrides(default_overrides())
    }
}

impl Classifier {
    /// Create a classifier with a featured allow-list
    pub fn new<I, S>(featured: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            featured: featured.into_iter().map(Into::into).collect(),
            overrides: BTreeMap::new(),
        }
    }

    /// Classifier using the configured allow-list and overrides
    pub fn from_config(config: &WebToolsConfig) -> Self {
        Self::new(config.featured.iter().cloned()).with_overrides(config.overrides.clone())
    }

    /// Replace the exact-match override table
    pub fn with_overrides(mut self, overrides: BTreeMap<String, ClassificationOverride>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn is_featured(&self, id: &str) -> bool {
        self.featured.contains(id)
    }

    /// Classify an identifier. Total: unknown input gets General/text.
    pub fn classify(&self, id: &str) -> ToolMetadata {
        if let Some(fixed) = self.overrides.get(id) {
            return ToolMetadata {
                category: fixed.category,
                archetype: fixed.archetype,
                description: describe(template_for(fixed.category), id),
                featured: self.is_featured(id),
            };
        }

        let needle = id.to_lowercase();
        let rule = RULES
            .iter()
            .find(|r| r.matches(&needle))
            .unwrap_or(&FALLBACK);

        ToolMetadata {
            category: rule.category,
            archetype: rule.archetype.resolve(&needle),
            description: describe(rule.description, id),
            featured: self.is_featured(id),
        }
    }

    /// Build a full catalog entry; `None` for a blank identifier
    pub fn build_tool(&self, id: &str) -> Option<Tool> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        let metadata = self.classify(id);
        Some(Tool {
            id: id.to_string(),
            title: format_title(id),
            slug: id.to_string(),
            description: metadata.description,
            category: metadata.category,
            archetype: metadata.archetype,
            featured: metadata.featured,
            tags: derive_tags(id),
        })
    }
}

fn describe(template: &str, id: &str) -> String {
    let name = id.replace(SEPARATOR, " ");
    template.replace("{name}", name.trim()).trim().to_string()
}

/// `hex-to-rgb` becomes `Hex To Rgb`
pub fn format_title(id: &str) -> String {
    id.split(SEPARATOR)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Identifier segments in order, empty segments dropped
pub fn derive_tags(id: &str) -> Vec<String> {
    id.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
