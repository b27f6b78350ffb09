//! u-ctags compatible tags file writer

use std::io::Write;

use super::{TagEntry, TagWriter};
use crate::config::FieldConfig;
use crate::shared::models::Result;

const PROGRAM_NAME: &str = "ktags";

/// Writes the extended (format 2) tags file
pub struct TagsWriter {
    fields: FieldConfig,
    sorted: bool,
}

impl TagsWriter {
    pub fn new(fields: FieldConfig, sorted: bool) -> Self {
        Self { fields, sorted }
    }

    fn write_header(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "!_TAG_FILE_FORMAT\t2\t/extended format; --format=1 will not append ;\" to lines/"
        )?;
        writeln!(
            out,
            "!_TAG_FILE_SORTED\t{}\t/0=unsorted, 1=sorted, 2=foldcase/",
            u8::from(self.sorted)
        )?;
        writeln!(out, "!_TAG_PROGRAM_NAME\t{}\t//", PROGRAM_NAME)?;
        writeln!(out, "!_TAG_PROGRAM_VERSION\t{}\t//", env!("CARGO_PKG_VERSION"))?;
        Ok(())
    }

    /// One tag line without the trailing newline
    pub fn format_entry(&self, entry: &TagEntry<'_>) -> String {
        let tag = entry.tag;
        let mut line = format!(
            "{}\t{}\t/^{}$/;\"\t{}",
            entry.name,
            entry.path,
            escape_pattern(&tag.pattern),
            tag.kind.letter()
        );
        if self.fields.line {
            line.push_str(&format!("\tline:{}", tag.line));
        }
        if self.fields.scope {
            if let (Some(scope), Some(kind)) = (&tag.scope, tag.scope_kind) {
                line.push_str(&format!("\t{}:{}", kind.name(), scope));
            }
        }
        if self.fields.template {
            if let Some(params) = &tag.type_params {
                line.push_str(&format!("\ttemplate:{}", params));
            }
        }
        line
    }
}

impl TagWriter for TagsWriter {
    fn write(&self, out: &mut dyn Write, entries: &[TagEntry<'_>]) -> Result<()> {
        self.write_header(out)?;
        for entry in entries {
            writeln!(out, "{}", self.format_entry(entry))?;
        }
        Ok(())
    }
}

/// Escape a search pattern: `\` and `/` always, `$` only at the end
pub(super) fn escape_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '/' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    if escaped.ends_with('$') {
        escaped.insert(escaped.len() - 1, '\\');
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Span, Tag, TagKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_pattern() {
        assert_eq!(escape_pattern("a/b\\c"), "a\\/b\\\\c");
        assert_eq!(escape_pattern("val s = \"$x$\""), "val s = \"$x$\"");
        assert_eq!(escape_pattern("val price$"), "val price\\$");
    }

    #[test]
    fn test_format_entry_with_all_fields() {
        let tag = Tag::new("genericFunction1", TagKind::Method, Span::on_line(2, 16, 16))
            .with_pattern("    fun<T: Any> genericFunction1() = 41")
            .with_scope("Foo", TagKind::Interface)
            .with_type_params(Some("<T: Any>".to_string()));
        let entry = TagEntry::new(tag.name.clone(), "input.kt", &tag);

        let writer = TagsWriter::new(FieldConfig::default(), true);
        assert_eq!(
            writer.format_entry(&entry),
            "genericFunction1\tinput.kt\t/^    fun<T: Any> genericFunction1() = 41$/;\"\tm\tline:2\tinterface:Foo\ttemplate:<T: Any>"
        );
    }

    #[test]
    fn test_format_entry_respects_field_toggles() {
        let tag = Tag::new("a", TagKind::Constant, Span::on_line(7, 14, 1))
            .with_pattern("class Bar<T, U>(val a: T, val b: U): Foo<T>")
            .with_scope("Bar", TagKind::Class);
        let entry = TagEntry::new(tag.name.clone(), "input.kt", &tag);

        let fields = FieldConfig {
            line: false,
            scope: false,
            template: true,
        };
        let writer = TagsWriter::new(fields, true);
        assert_eq!(
            writer.format_entry(&entry),
            "a\tinput.kt\t/^class Bar<T, U>(val a: T, val b: U): Foo<T>$/;\"\tC"
        );
    }

    #[test]
    fn test_header_reflects_sorting() {
        let mut buf = Vec::new();
        TagsWriter::new(FieldConfig::default(), false)
            .write(&mut buf, &[])
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("!_TAG_FILE_FORMAT\t2\t"));
        assert!(lines[1].starts_with("!_TAG_FILE_SORTED\t0\t"));
        assert_eq!(lines[2], "!_TAG_PROGRAM_NAME\tktags\t//");
    }
}
