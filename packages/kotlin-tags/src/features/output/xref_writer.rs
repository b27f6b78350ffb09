//! Cross reference writer (`ctags -x` layout)

use std::io::Write;

use super::{TagEntry, TagWriter};
use crate::shared::models::Result;

/// `name kind line file text` columns
pub struct XrefWriter;

impl XrefWriter {
    pub fn format_entry(entry: &TagEntry<'_>) -> String {
        format!(
            "{:<16} {:<10} {:>4} {:<16} {}",
            entry.name,
            entry.tag.kind.name(),
            entry.tag.line,
            entry.path,
            entry.tag.pattern.trim()
        )
    }
}

impl TagWriter for XrefWriter {
    fn write(&self, out: &mut dyn Write, entries: &[TagEntry<'_>]) -> Result<()> {
        for entry in entries {
            writeln!(out, "{}", Self::format_entry(entry))?;
        }
        Ok(())
    }
}
