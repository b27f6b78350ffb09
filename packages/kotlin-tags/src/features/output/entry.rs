//! Flattened tag entry

use crate::shared::models::Tag;

/// One output line: a tag under a (possibly qualified) name
#[derive(Debug, Clone)]
pub struct TagEntry<'a> {
    pub name: String,
    pub path: &'a str,
    pub tag: &'a Tag,
}

impl<'a> TagEntry<'a> {
    pub fn new(name: String, path: &'a str, tag: &'a Tag) -> Self {
        Self { name, path, tag }
    }

    /// Byte order on name, then file, then line
    pub fn sort_key(&self) -> (&str, &str, u32) {
        (self.name.as_str(), self.path, self.tag.line)
    }
}
