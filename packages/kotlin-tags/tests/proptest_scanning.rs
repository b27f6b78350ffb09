//! Property-based tests for scanner robustness
//!
//! The scanner must accept any input: malformed generics, stray braces
//! and unterminated literals produce issues, never panics.

use proptest::prelude::*;

use kotlin_tags::features::parsing::infrastructure::tokenize;
use kotlin_tags::{ExtractOptions, ExtractTagsUseCase, TagKind, TagsConfig};

/// Capitalized names never collide with Kotlin keywords
fn identifier() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,12}"
}

fn type_params() -> impl Strategy<Value = String> {
    prop::collection::vec(identifier(), 1..4).prop_map(|names| format!("<{}>", names.join(", ")))
}

fn declaration() -> impl Strategy<Value = String> {
    prop_oneof![
        (identifier(), type_params()).prop_map(|(n, t)| format!("class {n}{t}(val x: Int)")),
        (identifier(), type_params()).prop_map(|(n, t)| format!("fun {t} {n}() = 1")),
        identifier().prop_map(|n| format!("interface {n} {{")),
        identifier().prop_map(|n| format!("object {n} {{ }}")),
        identifier().prop_map(|n| format!("val {n} = \"{{\"")),
        Just("}".to_string()),
    ]
}

fn kotlin_source() -> impl Strategy<Value = String> {
    prop::collection::vec(declaration(), 0..12).prop_map(|lines| lines.join("\n"))
}

fn scan(source: &str) -> kotlin_tags::ExtractionResult {
    ExtractTagsUseCase::new(TagsConfig::default().with_validation(false))
        .unwrap()
        .extract_source(source, "Gen.kt")
        .unwrap()
}

proptest! {
    /// Arbitrary text never panics the tokenizer or the scanner
    #[test]
    fn prop_scanner_never_panics(source in "\\PC{0,200}") {
        let _ = tokenize(&source);
        let _ = scan(&source);
    }

    /// Tags and issues always point at lines that exist
    #[test]
    fn prop_positions_within_source(source in kotlin_source()) {
        let result = scan(&source);
        let max_line = source.matches('\n').count() as u32 + 1;
        for tag in &result.tags {
            prop_assert!(tag.line >= 1 && tag.line <= max_line);
            prop_assert!(!tag.name.is_empty());
        }
        for issue in &result.issues {
            prop_assert!(issue.span.start_line >= 1 && issue.span.start_line <= max_line);
        }
    }

    /// Every generated class declaration is tagged
    #[test]
    fn prop_classes_are_tagged(name in identifier(), params in type_params()) {
        let source = format!("class {name}{params}(val x: Int)\n");
        let result = scan(&source);
        let class = result.tags.iter().find(|t| t.kind == TagKind::Class);
        prop_assert_eq!(class.map(|t| t.name.as_str()), Some(name.as_str()));
        prop_assert_eq!(class.and_then(|t| t.type_params.as_deref()), Some(params.as_str()));
    }

    /// Disabled kinds never appear in the output
    #[test]
    fn prop_kind_filter_is_respected(source in kotlin_source()) {
        let mut config = TagsConfig::default().with_validation(false);
        config.apply_kind_spec("-C").unwrap();
        let result = ExtractTagsUseCase::new(config)
            .unwrap()
            .extract_source(&source, "Gen.kt")
            .unwrap();
        prop_assert!(result.tags.iter().all(|t| t.kind != TagKind::Constant));
        prop_assert!(ExtractOptions::default().is_enabled(TagKind::Constant));
    }
}
