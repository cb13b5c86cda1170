//! Builtin tool dataset
//!
//! Shipped with the binary so the catalog is never empty, even when the
//! backend cannot be reached. Backend results take precedence on merge.

use once_cell::sync::Lazy;

use crate::types::{Tool, ToolArchetype, ToolCategory};

static BUILTIN_TOOLS: Lazy<Vec<Tool>> = Lazy::new(|| {
    vec![
        // AI
        Tool::new(
            "ai-story-generator",
            "AI Story Generator",
            "Generate creative stories using AI with customizable themes and styles",
            ToolCategory::Ai,
            ToolArchetype::Text,
        )
        .featured()
        .with_tags(["ai", "creative", "writing"]),
        Tool::new(
            "ai-content-improver",
            "AI Content Improver",
            "Enhance your content with AI-powered suggestions and improvements",
            ToolCategory::Ai,
            ToolArchetype::Text,
        )
        .featured()
        .with_tags(["ai", "content", "optimization"]),
        Tool::new(
            "plagiarism-checker",
            "Plagiarism Checker",
            "Check your content for plagiarism and get originality scores",
            ToolCategory::Ai,
            ToolArchetype::Text,
        )
        .with_tags(["ai", "plagiarism", "analysis"]),
        // SEO
        Tool::new(
            "meta-tag-generator",
            "Meta Tag Generator",
            "Generate SEO-optimized meta tags for your website",
            ToolCategory::Seo,
            ToolArchetype::Form,
        )
        .featured()
        .with_tags(["seo", "meta", "optimization"]),
        Tool::new(
            "domain-checker",
            "Domain Availability Checker",
            "Check domain availability across multiple TLDs instantly",
            ToolCategory::Seo,
            ToolArchetype::Form,
        )
        .with_tags(["seo", "domain", "availability"]),
        // Dev
        Tool::new(
            "code-beautifier",
            "Code Beautifier",
            "Format and beautify your code with syntax highlighting",
            ToolCategory::Dev,
            ToolArchetype::Text,
        )
        .featured()
        .with_tags(["dev", "code", "formatting"]),
        Tool::new(
            "hex-to-rgb",
            "Hex to RGB Converter",
            "Convert colors between Hex, RGB, and HSL formats",
            ToolCategory::Dev,
            ToolArchetype::Form,
        )
        .with_tags(["dev", "color", "converter"]),
        // Image
        Tool::new(
            "image-compressor",
            "Image Compressor",
            "Compress images without losing quality",
            ToolCategory::Image,
            ToolArchetype::File,
        )
        .featured()
        .with_tags(["image", "compression", "optimization"]),
        Tool::new(
            "image-resizer",
            "Image Resizer",
            "Resize images to specific dimensions or percentages",
            ToolCategory::Image,
            ToolArchetype::File,
        )
        .with_tags(["image", "resize", "dimensions"]),
        // Converter
        Tool::new(
            "pdf-converter",
            "PDF Converter",
            "Convert files to and from PDF format",
            ToolCategory::Converter,
            ToolArchetype::File,
        )
        .with_tags(["converter", "pdf", "document"]),
    ]
});

/// The builtin catalog, in display order
pub fn builtin_tools() -> Vec<Tool> {
    BUILTIN_TOOLS.clone()
}
