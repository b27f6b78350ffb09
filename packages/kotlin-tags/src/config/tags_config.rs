//! Tagging configuration (YAML schema v1)

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::ConfigError;
use crate::features::parsing::ExtractOptions;
use crate::shared::models::TagKind;

/// Current schema version
pub const CONFIG_VERSION: u32 = 1;

const SUPPORTED_VERSIONS: [u32; 1] = [CONFIG_VERSION];

fn default_true() -> bool {
    true
}

fn default_kinds() -> String {
    TagKind::ALL.iter().map(|k| k.letter()).collect()
}

/// Output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// u-ctags compatible tags file
    #[default]
    Tags,
    /// One JSON object per line
    Json,
    /// Human readable cross reference (`ctags -x`)
    Xref,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::Json => "json",
            Self::Xref => "xref",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension fields written per tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(default = "default_true")]
    pub line: bool,
    #[serde(default = "default_true")]
    pub scope: bool,
    /// Generic parameter list (`template:<T: Any>`)
    #[serde(default = "default_true")]
    pub template: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            line: true,
            scope: true,
            template: true,
        }
    }
}

/// Tagging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagsConfig {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Enabled kind letters, e.g. `picomTCv`
    #[serde(default = "default_kinds")]
    pub kinds: String,

    /// Tag declarations inside function bodies and lambdas
    #[serde(default)]
    pub include_locals: bool,

    /// Run the tree-sitter grammar to report syntax errors
    #[serde(default = "default_true")]
    pub validate_syntax: bool,

    /// Fail a file when any syntax issue is found
    #[serde(default)]
    pub strict: bool,

    #[serde(default = "default_true")]
    pub sort: bool,

    /// Also emit `package.Scope.name` tags
    #[serde(default)]
    pub qualified_tags: bool,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub fields: FieldConfig,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            kinds: default_kinds(),
            include_locals: false,
            validate_syntax: true,
            strict: false,
            sort: true,
            qualified_tags: false,
            format: OutputFormat::default(),
            fields: FieldConfig::default(),
        }
    }
}

impl TagsConfig {
    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let version = value.get("version").ok_or(ConfigError::MissingVersion)?;
        let supported = version
            .as_u64()
            .is_some_and(|v| SUPPORTED_VERSIONS.iter().any(|s| u64::from(*s) == v));
        if !supported {
            return Err(ConfigError::UnsupportedVersion {
                found: serde_yaml::to_string(version)?.trim().to_string(),
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config: TagsConfig = serde_yaml::from_value(value)?;
        config.enabled_kinds()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn enabled_kinds(&self) -> Result<BTreeSet<TagKind>, ConfigError> {
        parse_kind_letters(&self.kinds)
    }

    /// Apply a `--kinds` spec: `cim` replaces the set, `+T-v` edits it
    pub fn apply_kind_spec(&mut self, spec: &str) -> Result<(), ConfigError> {
        let spec = spec.trim();
        if !spec.starts_with(|c: char| c == '+' || c == '-') {
            let kinds = parse_kind_letters(spec)?;
            self.kinds = kinds.iter().map(|k| k.letter()).collect();
            return Ok(());
        }

        let mut kinds = self.enabled_kinds()?;
        let mut adding = true;
        for c in spec.chars() {
            match c {
                '+' => adding = true,
                '-' => adding = false,
                c if c.is_whitespace() => {}
                c => {
                    let kind = TagKind::from_letter(c).ok_or(ConfigError::UnknownKind(c))?;
                    if adding {
                        kinds.insert(kind);
                    } else {
                        kinds.remove(&kind);
                    }
                }
            }
        }
        self.kinds = kinds.iter().map(|k| k.letter()).collect();
        Ok(())
    }

    pub fn extract_options(&self) -> Result<ExtractOptions, ConfigError> {
        Ok(ExtractOptions {
            kinds: self.enabled_kinds()?,
            include_locals: self.include_locals,
        })
    }

    pub fn with_locals(mut self, include_locals: bool) -> Self {
        self.include_locals = include_locals;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_validation(mut self, validate_syntax: bool) -> Self {
        self.validate_syntax = validate_syntax;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_qualified_tags(mut self, qualified_tags: bool) -> Self {
        self.qualified_tags = qualified_tags;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

fn parse_kind_letters(letters: &str) -> Result<BTreeSet<TagKind>, ConfigError> {
    letters
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| TagKind::from_letter(c).ok_or(ConfigError::UnknownKind(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = TagsConfig::default()
            .with_locals(true)
            .with_format(OutputFormat::Json);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("format: json"));

        let loaded = TagsConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_loading_applies_defaults() {
        let yaml_content = r#"
version: 1
kinds: icm
strict: true
fields:
  template: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = TagsConfig::from_yaml(temp_file.path()).unwrap();
        assert!(config.strict);
        assert!(config.sort);
        assert!(config.validate_syntax);
        assert!(!config.fields.template);
        assert!(config.fields.scope);
        assert_eq!(
            config.enabled_kinds().unwrap().into_iter().collect::<Vec<_>>(),
            vec![TagKind::Interface, TagKind::Class, TagKind::Method]
        );
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = TagsConfig::from_yaml_str("strict: true\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = TagsConfig::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let result = TagsConfig::from_yaml_str("version: 1\nrecursive: true\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_unknown_kind_rejected() {
        let result = TagsConfig::from_yaml_str("version: 1\nkinds: cmx\n");
        assert!(matches!(result, Err(ConfigError::UnknownKind('x'))));
    }

    #[test]
    fn test_kind_spec_edit_and_replace() {
        let mut config = TagsConfig::default();
        config.apply_kind_spec("-vC").unwrap();
        assert_eq!(config.kinds, "picomT");

        config.apply_kind_spec("+C").unwrap();
        assert_eq!(config.kinds, "picomTC");

        config.apply_kind_spec("mc").unwrap();
        assert_eq!(config.kinds, "cm");

        assert!(matches!(
            config.apply_kind_spec("+q"),
            Err(ConfigError::UnknownKind('q'))
        ));
    }

    #[test]
    fn test_extract_options() {
        let config = TagsConfig::default().with_locals(true);
        let options = config.extract_options().unwrap();
        assert!(options.include_locals);
        assert_eq!(options.kinds.len(), TagKind::ALL.len());
    }
}
