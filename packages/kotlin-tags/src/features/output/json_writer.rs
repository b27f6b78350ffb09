//! JSON lines writer

use serde::Serialize;
use std::io::Write;

use super::tags_writer::escape_pattern;
use super::{TagEntry, TagWriter};
use crate::config::FieldConfig;
use crate::shared::models::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTag<'a> {
    #[serde(rename = "_type")]
    record_type: &'static str,
    name: &'a str,
    path: &'a str,
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'a str>,
}

/// One JSON object per line, u-ctags `--output-format=json` shaped
pub struct JsonWriter {
    fields: FieldConfig,
}

impl JsonWriter {
    pub fn new(fields: FieldConfig) -> Self {
        Self { fields }
    }

    fn record<'a>(&self, entry: &'a TagEntry<'_>) -> JsonTag<'a> {
        let tag = entry.tag;
        let scoped = self.fields.scope && tag.scope.is_some();
        JsonTag {
            record_type: "tag",
            name: &entry.name,
            path: entry.path,
            pattern: format!("/^{}$/", escape_pattern(&tag.pattern)),
            line: self.fields.line.then_some(tag.line),
            kind: tag.kind.name(),
            scope: tag.scope.as_deref().filter(|_| scoped),
            scope_kind: tag.scope_kind.map(|k| k.name()).filter(|_| scoped),
            template: tag.type_params.as_deref().filter(|_| self.fields.template),
        }
    }
}

impl TagWriter for JsonWriter {
    fn write(&self, out: &mut dyn Write, entries: &[TagEntry<'_>]) -> Result<()> {
        for entry in entries {
            serde_json::to_writer(&mut *out, &self.record(entry))?;
            writeln!(out)?;
        }
        Ok(())
    }
}
