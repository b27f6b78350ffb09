//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use kotlin_tags::{ExtractTagsUseCase, ExtractionResult, TagsConfig, TagsOutput};

pub const GENERICS_FIXTURE: &str = include_str!("../fixtures/kotlin-generics.kt");

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Tag `source` as `input.kt` without the grammar check
pub fn extract(source: &str, config: TagsConfig) -> ExtractionResult {
    ExtractTagsUseCase::new(config.with_validation(false))
        .unwrap()
        .extract_source(source, "input.kt")
        .unwrap()
}

pub fn render(output: &TagsOutput, results: &[ExtractionResult]) -> String {
    let mut buf = Vec::new();
    output.write(&mut buf, results).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Tag lines without the `!_TAG_` header
pub fn tag_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.starts_with("!_TAG_")).collect()
}
