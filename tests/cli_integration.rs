use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn trawl() -> Command {
    Command::cargo_bin("trawl").unwrap()
}

fn fixture_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("file1.txt"),
        "pattern here\nplain line\nanother pattern\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("subdir")).unwrap();
    fs::write(dir.path().join("subdir/nested.md"), "nested pattern\n").unwrap();
    fs::write(dir.path().join(".hidden.txt"), "pattern hidden\n").unwrap();
    dir
}

#[test]
fn file_search_prints_matches() {
    let dir = fixture_tree();

    trawl()
        .arg("file")
        .arg(dir.path().join("file1.txt"))
        .arg("pattern")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 match(es)"));
}

#[test]
fn file_search_missing_path_fails() {
    let dir = TempDir::new().unwrap();

    trawl()
        .arg("file")
        .arg(dir.path().join("absent.txt"))
        .arg("pattern")
        .assert()
        .failure();
}

#[test]
fn dir_search_recurses_and_skips_hidden() {
    let dir = fixture_tree();

    trawl()
        .arg("dir")
        .arg(dir.path())
        .arg("pattern")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("file1.txt")
                .and(predicate::str::contains("nested.md"))
                .and(predicate::str::contains(".hidden.txt").not()),
        );
}

#[test]
fn dir_search_json_output_is_structured() {
    let dir = fixture_tree();

    let output = trawl()
        .arg("dir")
        .arg(dir.path())
        .arg("pattern")
        .arg("--output-format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["pattern"], "pattern");
    assert_eq!(parsed["total_matches"], 3);
    assert_eq!(parsed["files_with_matches"], 2);
    assert!(parsed["results"].is_array());
}

#[test]
fn dir_search_respects_extension_filter() {
    let dir = fixture_tree();

    trawl()
        .arg("dir")
        .arg(dir.path())
        .arg("pattern")
        .arg("--extensions")
        .arg("md")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("nested.md")
                .and(predicate::str::contains("file1.txt").not()),
        );
}

#[test]
fn regex_search_with_case_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("code.rs"), "fn main() {}\nstruct Foo;\n").unwrap();

    trawl()
        .arg("dir")
        .arg(dir.path())
        .arg(r"fn \w+")
        .arg("--regex")
        .arg("--case-sensitive")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 match(es)"));
}

#[test]
fn invalid_regex_reports_pattern_error() {
    let dir = fixture_tree();

    trawl()
        .arg("dir")
        .arg(dir.path())
        .arg("[broken")
        .arg("--regex")
        .assert()
        .failure();
}

#[test]
fn log_flag_writes_a_log_file() {
    let dir = fixture_tree();
    let log_path = dir.path().join("run.log");

    trawl()
        .arg("--log")
        .arg(&log_path)
        .arg("file")
        .arg(dir.path().join("file1.txt"))
        .arg("pattern")
        .assert()
        .success();
    assert!(fs::metadata(&log_path).is_ok());
}

#[test]
fn completions_generate() {
    trawl()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("trawl"));
}
