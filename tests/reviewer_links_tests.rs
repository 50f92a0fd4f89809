//! End-to-end runs of `tasting-audit links` against small fixture corpora.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_tasting-audit")
}

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("fixture has a parent")).expect("mkdir");
    fs::write(path, body).expect("fixture should be written");
}

/// Registry with a single reviewer `alice`.
fn corpus_with_alice() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "data/reviewers/index.json", r#"{"reviewers": ["alice"]}"#);
    write(
        dir.path(),
        "data/reviewers/alice.json",
        r#"{"displayName": "Alice A", "type": "expert"}"#,
    );
    dir
}

fn links(root: &Path) -> (Option<i32>, String) {
    let output: Output = Command::new(bin())
        .args(["links", "--root"])
        .arg(root)
        .env_remove("TASTING_AUDIT_ROOT")
        .output()
        .expect("links should run");
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
    )
}

#[test]
fn matching_contributor_passes() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/tastings/experts/alice/islay.json",
        r#"{"contributor": {"id": "alice", "name": "Alice A", "tier": "expert"}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(0));
    assert!(text.contains("OK:   "), "{text}");
    assert!(text.contains("islay.json"), "{text}");
    assert!(text.contains("Tasting->reviewer link checks: 1 file(s)"), "{text}");
}

#[test]
fn unknown_contributor_fails() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/tastings/experts/bob/one.json",
        r#"{"contributor": {"id": "bob"}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert!(text.contains("FAIL: "), "{text}");
    assert!(
        text.contains("  - contributor.id: 'bob' not found in data/reviewers/index.json"),
        "{text}"
    );
    assert!(!text.contains("link checks:"), "{text}");
}

#[test]
fn padded_contributor_id_is_not_found() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/tastings/experts/alice/one.json",
        r#"{"contributor": {"id": " alice "}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert!(
        text.contains("  - contributor.id: ' alice ' not found in data/reviewers/index.json"),
        "{text}"
    );
    assert!(!text.contains("OK:"), "{text}");
}

#[test]
fn name_mismatch_cites_both_values() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/tastings/experts/alice/one.json",
        r#"{"contributor": {"id": "alice", "name": "Alicia", "tier": "expert"}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert!(
        text.contains(
            "contributor.name: 'Alicia' does not match reviewer.displayName 'Alice A' for id 'alice'"
        ),
        "{text}"
    );
}

#[test]
fn one_document_reports_every_broken_rule_under_one_header() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/tastings/experts/alice/one.json",
        r#"{"contributor": {"id": "alice", "name": "Alicia", "tier": "consumer"}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert_eq!(text.matches("FAIL: ").count(), 1, "{text}");
    assert!(text.contains("  - contributor.name: "), "{text}");
    assert!(
        text.contains("  - contributor.tier: 'consumer' does not match reviewer.type 'expert' for id 'alice'"),
        "{text}"
    );
}

#[test]
fn failures_do_not_stop_the_scan() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/tastings/experts/a.json",
        r#"{"contributor": {"id": "ghost"}}"#,
    );
    write(
        dir.path(),
        "data/tastings/experts/b.json",
        r#"{"contributor": {"id": "alice"}}"#,
    );
    write(
        dir.path(),
        "data/tastings/experts/c.json",
        r#"{"contributor": {"id": ""}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    let a = text.find("a.json").expect("a.json reported");
    let b = text.find("OK:   ").expect("b.json passes");
    let c = text.find("must be a non-empty string").expect("c.json reported");
    assert!(a < b && b < c, "output should follow path order: {text}");
}

#[test]
fn documents_without_contributor_id_are_not_counted() {
    let dir = corpus_with_alice();
    write(dir.path(), "data/tastings/experts/none.json", r#"{"tasting": {}}"#);
    write(
        dir.path(),
        "data/tastings/experts/noid.json",
        r#"{"contributor": {"name": "Someone"}}"#,
    );
    write(
        dir.path(),
        "data/tastings/experts/nullid.json",
        r#"{"contributor": {"id": null}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(0));
    assert!(!text.contains("none.json"), "{text}");
    assert!(!text.contains("noid.json"), "{text}");
    assert!(!text.contains("nullid.json"), "{text}");
    assert!(text.contains("Tasting->reviewer link checks: 0 file(s)"), "{text}");
}

#[test]
fn consumer_tastings_are_out_of_scope() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/tastings/experts/alice/one.json",
        r#"{"contributor": {"id": "alice"}}"#,
    );
    write(
        dir.path(),
        "data/tastings/consumers/x.json",
        r#"{"contributor": {"id": "nobody"}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(0));
    assert!(!text.contains("x.json"), "{text}");
}

#[test]
fn empty_experts_tree_is_a_success() {
    let dir = corpus_with_alice();
    fs::create_dir_all(dir.path().join("data/tastings/experts")).expect("mkdir");

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(0));
    assert!(text.contains("No tasting JSON files found under"), "{text}");
    assert!(!text.contains("link checks:"), "{text}");
}

#[test]
fn missing_index_is_fatal() {
    let dir = TempDir::new().expect("tempdir");

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert!(text.contains("Missing reviewers index: "), "{text}");
}

#[test]
fn missing_reviewer_file_is_fatal_before_any_scan() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/reviewers/index.json",
        r#"{"reviewers": ["alice", {"id": "carol", "order": 2}]}"#,
    );
    write(
        dir.path(),
        "data/tastings/experts/alice/one.json",
        r#"{"contributor": {"id": "alice"}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert!(text.contains("Missing reviewer file for id 'carol'"), "{text}");
    assert!(text.contains("carol.json"), "{text}");
    assert!(!text.contains("OK:"), "{text}");
}

#[test]
fn invalid_index_entry_is_fatal() {
    let dir = corpus_with_alice();
    write(
        dir.path(),
        "data/reviewers/index.json",
        r#"{"reviewers": ["alice", {"order": 2}]}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert!(text.contains("Invalid reviewer id in index: "), "{text}");
}

#[test]
fn unparseable_tasting_is_a_document_failure() {
    let dir = corpus_with_alice();
    write(dir.path(), "data/tastings/experts/broken.json", "{");
    write(
        dir.path(),
        "data/tastings/experts/good.json",
        r#"{"contributor": {"id": "alice"}}"#,
    );

    let (code, text) = links(dir.path());

    assert_eq!(code, Some(2));
    assert!(text.contains("  - (document): unable to parse json"), "{text}");
    assert!(text.contains("good.json"), "{text}");
}
