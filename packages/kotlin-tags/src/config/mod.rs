//! Configuration
//!
//! `TagsConfig` is loaded from versioned YAML (`version: 1`) and can be
//! adjusted with builder methods; CLI flags are applied on top.

mod error;
mod tags_config;

pub use error::ConfigError;
pub use tags_config::{FieldConfig, OutputFormat, TagsConfig, CONFIG_VERSION};
