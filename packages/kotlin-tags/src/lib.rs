/*
 * Kotlin Tags - ctags-style declaration index for Kotlin sources
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Tag, TagKind, Span, errors)
 * - features/    : Vertical slices (parsing -> output)
 * - config/      : Versioned YAML configuration
 *
 * Tagging is token driven and tolerant of malformed input; tree-sitter is
 * only used to report grammar-level syntax errors next to the tags.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod features;
pub mod shared;

pub use config::{ConfigError, OutputFormat, TagsConfig};
pub use features::output::TagsOutput;
pub use features::parsing::{
    BatchResult, ExtractOptions, ExtractTagsUseCase, ExtractionResult, KotlinPlugin, LanguageId,
};
pub use shared::models::{Result, Span, Tag, TagKind, TagsError};
