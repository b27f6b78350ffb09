//! Output Feature
//!
//! Renders extraction results as a tags file, JSON lines or a
//! cross reference listing.
//!
//! ## Structure
//! - `entry` - flattened, sortable view of all tags
//! - `tags_writer` - u-ctags compatible `tags` file
//! - `json_writer` - one JSON object per tag
//! - `xref_writer` - `ctags -x` style columns

mod entry;
mod json_writer;
mod tags_writer;
mod xref_writer;

pub use entry::TagEntry;
pub use json_writer::JsonWriter;
pub use tags_writer::TagsWriter;
pub use xref_writer::XrefWriter;

use std::io::Write;

use crate::config::{FieldConfig, OutputFormat, TagsConfig};
use crate::features::parsing::ExtractionResult;
use crate::shared::models::Result;

/// Writer for one output format
pub trait TagWriter {
    fn write(&self, out: &mut dyn Write, entries: &[TagEntry<'_>]) -> Result<()>;
}

/// Output settings resolved from `TagsConfig`
#[derive(Debug, Clone)]
pub struct TagsOutput {
    pub format: OutputFormat,
    pub sort: bool,
    pub qualified_tags: bool,
    pub fields: FieldConfig,
}

impl TagsOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            sort: true,
            qualified_tags: false,
            fields: FieldConfig::default(),
        }
    }

    pub fn from_config(config: &TagsConfig) -> Self {
        Self {
            format: config.format,
            sort: config.sort,
            qualified_tags: config.qualified_tags,
            fields: config.fields.clone(),
        }
    }

    /// Render every tag of `results` to `out`
    pub fn write<W: Write>(&self, out: &mut W, results: &[ExtractionResult]) -> Result<()> {
        let entries = self.entries(results);
        match self.format {
            OutputFormat::Tags => {
                TagsWriter::new(self.fields.clone(), self.sort).write(out, &entries)?
            }
            OutputFormat::Json => JsonWriter::new(self.fields.clone()).write(out, &entries)?,
            OutputFormat::Xref => XrefWriter.write(out, &entries)?,
        }
        out.flush()?;
        Ok(())
    }

    /// Flattened entries in output order
    pub fn entries<'a>(&self, results: &'a [ExtractionResult]) -> Vec<TagEntry<'a>> {
        let mut entries: Vec<TagEntry<'a>> = results
            .iter()
            .flat_map(|r| r.tags.iter().map(move |t| (r.file_path.as_str(), t)))
            .flat_map(|(path, tag)| {
                let qualified = self
                    .qualified_tags
                    .then(|| tag.qualified_name())
                    .filter(|q| *q != tag.name)
                    .map(|q| TagEntry::new(q, path, tag));
                std::iter::once(TagEntry::new(tag.name.clone(), path, tag)).chain(qualified)
            })
            .collect();

        if self.sort {
            entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageId;
    use crate::shared::models::{Span, Tag, TagKind};
    use pretty_assertions::assert_eq;

    fn results() -> Vec<ExtractionResult> {
        let mut second = ExtractionResult::new("b/Second.kt", LanguageId::Kotlin);
        second.add_tag(
            Tag::new("Second", TagKind::Class, Span::on_line(2, 6, 6))
                .with_pattern("class Second")
                .with_package(Some("demo".to_string())),
        );

        let mut first = ExtractionResult::new("a/First.kt", LanguageId::Kotlin);
        first.add_tag(
            Tag::new("run", TagKind::Method, Span::on_line(3, 8, 3))
                .with_pattern("    fun run() {}")
                .with_scope("First", TagKind::Class),
        );
        first.add_tag(
            Tag::new("First", TagKind::Class, Span::on_line(1, 6, 5)).with_pattern("class First {"),
        );
        vec![second, first]
    }

    fn names(entries: &[TagEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_entries_sorted_by_name() {
        let results = results();
        let output = TagsOutput::new(OutputFormat::Tags);
        assert_eq!(names(&output.entries(&results)), vec!["First", "Second", "run"]);
    }

    #[test]
    fn test_entries_unsorted_keep_input_order() {
        let results = results();
        let mut output = TagsOutput::new(OutputFormat::Tags);
        output.sort = false;
        assert_eq!(names(&output.entries(&results)), vec!["Second", "run", "First"]);
    }

    #[test]
    fn test_qualified_entries_added() {
        let results = results();
        let mut output = TagsOutput::new(OutputFormat::Tags);
        output.qualified_tags = true;
        assert_eq!(
            names(&output.entries(&results)),
            vec!["First", "First.run", "Second", "demo.Second", "run"]
        );
    }

    #[test]
    fn test_write_dispatches_on_format() {
        let results = results();
        let mut buf = Vec::new();
        TagsOutput::new(OutputFormat::Xref)
            .write(&mut buf, &results)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(!text.starts_with("!_TAG"));
    }
}
