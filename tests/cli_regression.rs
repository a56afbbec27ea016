// Regression tests: drive the real binary end to end and check that
// failures are rendered as miette diagnostics.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

const SAMPLE_JSON: &str =
    r#"{"key1":{"key1-1":"value1"},"key2":{"key2-2":{"key2-3":"value2"}},"key3":"value3"}"#;

fn write_fixture(name: &str, contents: &str) -> String {
    let path = format!("tests/{name}");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn cli_get_prints_the_resolved_value() {
    let file = write_fixture("cli_get.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("get").arg(&file).arg("key2.key2-2.key2-3");
    cmd.assert().success().stdout(contains("value2"));

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_get_honors_an_alternate_delimiter() {
    let file = write_fixture("cli_get_delim.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("get")
        .arg(&file)
        .arg("key1:key1-1")
        .arg("--delimiter")
        .arg(":");
    cmd.assert().success().stdout(contains("value1"));

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_exists_answers_and_sets_the_exit_code() {
    let file = write_fixture("cli_exists.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("exists").arg(&file).arg("key1.key1-1");
    cmd.assert().success().stdout(contains("true"));

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("exists").arg(&file).arg("key2.key5");
    cmd.assert().code(1).stdout(contains("false"));

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_set_prints_the_updated_document() {
    let file = write_fixture("cli_set.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("set").arg(&file).arg("key1.key1-1").arg("test");
    cmd.assert()
        .success()
        .stdout(contains(r#""key1-1": "test""#));

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_set_in_place_rewrites_the_file() {
    let file = write_fixture("cli_set_in_place.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("set")
        .arg(&file)
        .arg("key2.key2-2.test")
        .arg("42")
        .arg("--in-place");
    cmd.assert().success();

    let rewritten = fs::read_to_string(&file).unwrap();
    assert!(rewritten.contains(r#""test": 42"#));
    assert!(rewritten.contains(r#""key2-3": "value2""#));

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_remove_deletes_the_path() {
    let file = write_fixture("cli_remove.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("remove").arg(&file).arg("key3").arg("--in-place");
    cmd.assert().success();

    let rewritten = fs::read_to_string(&file).unwrap();
    assert!(!rewritten.contains("value3"));

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_keys_lists_top_level_keys_in_order() {
    let file = write_fixture("cli_keys.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("keys").arg(&file);
    cmd.assert()
        .success()
        .stdout(contains("key1\nkey2\nkey3"));

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_reports_miette_diagnostics_on_absent_paths() {
    let file = write_fixture("cli_absent.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("get").arg(&file).arg("key1.key3");
    cmd.assert().code(2).stderr(
        contains("pathstore::key_not_found")
            .or(contains("key not found")),
    );

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_reports_miette_diagnostics_on_undecodable_input() {
    let file = write_fixture("cli_bad.json", "this is not json");

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("get").arg(&file).arg("key1");
    cmd.assert().code(2).stderr(
        contains("pathstore::decode").or(contains("decode error")),
    );

    let _ = fs::remove_file(&file);
}

#[test]
fn cli_reports_type_conflicts_on_scalar_traversal() {
    let file = write_fixture("cli_conflict.json", SAMPLE_JSON);

    let mut cmd = Command::cargo_bin("pathstore").unwrap();
    cmd.arg("set").arg(&file).arg("key3.deeper").arg("x");
    cmd.assert().code(2).stderr(
        contains("pathstore::type_conflict").or(contains("type conflict")),
    );

    let _ = fs::remove_file(&file);
}
