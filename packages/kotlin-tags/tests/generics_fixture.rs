//! End-to-end tagging of the generics fixture

mod common;

use common::{extract, fixture_path, render, tag_lines, GENERICS_FIXTURE};
use kotlin_tags::features::parsing::IssueOrigin;
use kotlin_tags::{ExtractTagsUseCase, OutputFormat, TagsConfig, TagsOutput};
use pretty_assertions::assert_eq;

const LINE_7: &str = "class Bar<T, U>(val a: T, val b: U): Foo<T>";
const LINE_8: &str = "class Baz <T, U: Pair<String,Pair<Int, Double>>(val c: T, val d: U): Foo<T>";

#[test]
fn test_tags_file_for_fixture() {
    let config = TagsConfig::default();
    let result = extract(GENERICS_FIXTURE, config.clone());
    let text = render(&TagsOutput::from_config(&config), &[result]);

    let expected = vec![
        format!("Bar\tinput.kt\t/^{LINE_7}$/;\"\tc\tline:7\ttemplate:<T, U>"),
        format!("Baz\tinput.kt\t/^{LINE_8}$/;\"\tc\tline:8"),
        "Foo\tinput.kt\t/^interface Foo<T> {$/;\"\ti\tline:1\ttemplate:<T>".to_string(),
        format!("a\tinput.kt\t/^{LINE_7}$/;\"\tC\tline:7\tclass:Bar"),
        format!("b\tinput.kt\t/^{LINE_7}$/;\"\tC\tline:7\tclass:Bar"),
        format!("c\tinput.kt\t/^{LINE_8}$/;\"\tC\tline:8\tclass:Baz"),
        format!("d\tinput.kt\t/^{LINE_8}$/;\"\tC\tline:8\tclass:Baz"),
        "genericFunction1\tinput.kt\t/^    fun<T: Any> genericFunction1() = 41$/;\"\tm\tline:2\tinterface:Foo\ttemplate:<T: Any>".to_string(),
        "genericFunction2\tinput.kt\t/^    fun<T: Pair<String,Pair<Int, Double>>> genericFunction2() = 42$/;\"\tm\tline:3\tinterface:Foo\ttemplate:<T: Pair<String, Pair<Int, Double>>>".to_string(),
        "genericFunction3\tinput.kt\t/^    fun <T> genericFunction3() = 43$/;\"\tm\tline:4\tinterface:Foo\ttemplate:<T>".to_string(),
    ];

    assert_eq!(tag_lines(&text), expected);
    assert!(text.starts_with("!_TAG_FILE_FORMAT\t2\t"));
    assert!(text.contains("!_TAG_FILE_SORTED\t1\t"));
}

#[test]
fn test_fixture_diagnostic_points_at_unclosed_list() {
    let result = extract(GENERICS_FIXTURE, TagsConfig::default());

    assert_eq!(result.issues.len(), 1);
    let issue = &result.issues[0];
    assert_eq!(issue.origin, IssueOrigin::Scanner);
    assert_eq!(issue.span.start_line, 8);
    assert_eq!(&LINE_8[issue.span.start_col as usize..][..1], "<");
}

#[test]
fn test_fixture_from_disk_with_grammar_check() {
    let use_case = ExtractTagsUseCase::new(TagsConfig::default()).unwrap();
    let batch = use_case.extract_paths(&[fixture_path("kotlin-generics.kt")]);

    assert!(batch.is_success());
    assert_eq!(batch.tag_count(), 10);
    assert!(batch.issue_count() >= 1);
    assert!(batch.results[0].file_path.ends_with("kotlin-generics.kt"));
}

#[test]
fn test_strict_fixture_fails() {
    let config = TagsConfig::default().with_strict(true).with_validation(false);
    let use_case = ExtractTagsUseCase::new(config).unwrap();
    let batch = use_case.extract_paths(&[fixture_path("kotlin-generics.kt")]);

    assert!(!batch.is_success());
    assert!(batch.results.is_empty());
}

#[test]
fn test_json_lines_for_fixture() {
    let config = TagsConfig::default().with_format(OutputFormat::Json);
    let result = extract(GENERICS_FIXTURE, config.clone());
    let text = render(&TagsOutput::from_config(&config), &[result]);

    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 10);
    assert!(records.iter().all(|r| r["_type"] == "tag"));

    let baz = records.iter().find(|r| r["name"] == "Baz").unwrap();
    assert_eq!(baz["kind"], "class");
    assert!(baz.get("template").is_none());

    let d = records.iter().find(|r| r["name"] == "d").unwrap();
    assert_eq!(d["scope"], "Baz");
    assert_eq!(d["scopeKind"], "class");
}

#[test]
fn test_qualified_tags_for_fixture() {
    let config = TagsConfig::default().with_qualified_tags(true);
    let result = extract(GENERICS_FIXTURE, config.clone());
    let text = render(&TagsOutput::from_config(&config), &[result]);

    let names: Vec<&str> = tag_lines(&text)
        .iter()
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(names.len(), 17);
    assert!(names.contains(&"Foo.genericFunction2"));
    assert!(names.contains(&"Baz.d"));
}
