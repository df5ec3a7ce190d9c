//! End-to-end tests of the `downlevel` binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CLASS_TREE: &str =
    r#"{"body": [{"node": "ClassDef", "name": "A", "body": [{"node": "Pass"}]}]}"#;

const STAR_IMPORT_TREE: &str = r#"{"body": [
  {"node": "ImportFrom", "module": "os", "names": [{"name": "*"}], "level": 0}
]}"#;

fn downlevel(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("downlevel").expect("downlevel binary");
    cmd.current_dir(dir)
        .env_remove("DOWNLEVEL_SOURCE_VERSION")
        .env_remove("DOWNLEVEL_TARGET_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    for (name, contents) in files {
        fs::write(td.path().join(name), contents).unwrap();
    }
    td
}

#[test]
fn transpile_prints_rewritten_source() {
    let temp = workspace(&[("a.json", CLASS_TREE)]);
    let out = downlevel(temp.path())
        .args(["transpile", "--fixers", "new_style_classes", "a.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "# -*- coding: utf-8 -*-\nclass A(object):\n    pass\n"
    );
}

#[test]
fn default_selection_adds_future_imports() {
    let temp = workspace(&[("a.json", CLASS_TREE)]);
    downlevel(temp.path())
        .args(["transpile", "a.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from __future__ import print_function\n"))
        .stdout(predicate::str::contains("class A(object):\n"));
}

#[test]
fn diff_compares_against_sibling_source() {
    let temp = workspace(&[
        ("a.json", CLASS_TREE),
        ("a.py", "#!/usr/bin/env python3\nclass A:\n    pass\n"),
    ]);
    downlevel(temp.path())
        .args(["transpile", "--fixers", "new_style_classes", "--diff", "a.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("diff --git a/a.py b/a.py"))
        .stdout(predicate::str::contains("-class A:\n"))
        .stdout(predicate::str::contains("+class A(object):\n"))
        .stdout(predicate::str::contains("+# -*- coding: utf-8 -*-\n"));
}

#[test]
fn in_place_rewrites_sibling_source() {
    let temp = workspace(&[
        ("a.json", CLASS_TREE),
        ("a.py", "#!/usr/bin/env python3\n# -*- coding: latin-1 -*-\nclass A:\n    pass\n"),
    ]);
    downlevel(temp.path())
        .args(["transpile", "--fixers", "new_style_classes", "--in-place", "a.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(
        fs::read_to_string(temp.path().join("a.py")).unwrap(),
        "#!/usr/bin/env python3\n# -*- coding: latin-1 -*-\nclass A(object):\n    pass\n"
    );
}

#[test]
fn emit_json_describes_each_module() {
    let temp = workspace(&[("a.json", CLASS_TREE)]);
    let out = downlevel(temp.path())
        .args(["transpile", "--fixers", "new_style_classes", "--emit", "json", "a.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value[0]["name"], "a");
    assert_eq!(value[0]["fixers_run"], serde_json::json!(["new_style_classes"]));
    assert_eq!(value[0]["tree"]["body"][0]["bases"][0]["id"], "object");
}

#[test]
fn diff_conflicts_with_in_place() {
    let temp = workspace(&[("a.json", CLASS_TREE)]);
    downlevel(temp.path())
        .args(["transpile", "--diff", "--in-place", "a.json"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn check_violation_exits_with_two() {
    let temp = workspace(&[("a.json", STAR_IMPORT_TREE)]);
    downlevel(temp.path())
        .args(["transpile", "a.json"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("transpile a.json"))
        .stderr(predicate::str::contains("no_star_imports"));
}

#[test]
fn first_failing_module_stops_the_run() {
    let temp = workspace(&[("a.json", CLASS_TREE), ("b.json", STAR_IMPORT_TREE)]);
    downlevel(temp.path())
        .args(["transpile", "--in-place", "a.json", "b.json"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("transpile b.json"));
    assert!(!temp.path().join("a.py").exists());
}

#[test]
fn unknown_fixer_is_a_config_error() {
    let temp = workspace(&[("a.json", CLASS_TREE)]);
    downlevel(temp.path())
        .args(["transpile", "--fixers", "nope", "a.json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown fixer 'nope'"));
}

#[test]
fn invalid_version_is_a_config_error() {
    let temp = workspace(&[("a.json", CLASS_TREE)]);
    downlevel(temp.path())
        .args(["transpile", "--target-version", "2.x", "a.json"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn missing_tree_file_names_the_path() {
    let temp = workspace(&[]);
    downlevel(temp.path())
        .args(["transpile", "absent.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn config_file_is_discovered_and_cli_overrides_it() {
    let temp = workspace(&[
        ("a.json", CLASS_TREE),
        (
            "downlevel.toml",
            "target_version = \"3.6\"\nfixers = \"new_style_classes\"\n",
        ),
    ]);
    downlevel(temp.path())
        .args(["transpile", "a.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class A:\n"));

    downlevel(temp.path())
        .args(["transpile", "--target-version", "2.7", "a.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class A(object):\n"));
}

#[test]
fn explicit_config_path_is_used() {
    let temp = workspace(&[
        ("a.json", CLASS_TREE),
        ("custom.toml", "fixers = [\"new_style_classes\"]\n"),
    ]);
    let out = downlevel(temp.path())
        .args(["transpile", "--config", "custom.toml", "a.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "# -*- coding: utf-8 -*-\nclass A(object):\n    pass\n"
    );
}

#[test]
fn transpile_requires_files() {
    let temp = workspace(&[]);
    downlevel(temp.path())
        .arg("transpile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FILES"));
}

#[test]
fn list_passes_shows_both_kinds() {
    let temp = workspace(&[]);
    downlevel(temp.path())
        .arg("list-passes")
        .assert()
        .success()
        .stdout(predicate::str::contains("no_star_imports"))
        .stdout(predicate::str::contains("unpacking_generalizations"));
}

#[test]
fn list_passes_json() {
    let temp = workspace(&[]);
    let out = downlevel(temp.path())
        .args(["list-passes", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let passes = value.as_array().unwrap();
    assert!(passes.iter().any(|p| p["kind"] == "checker"));
    assert!(passes.iter().any(|p| p["key"] == "new_style_classes"));
}

#[test]
fn explain_accepts_class_style_names() {
    let temp = workspace(&[]);
    downlevel(temp.path())
        .args(["explain", "NewStyleClassesFixer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Key:     new_style_classes"))
        .stdout(predicate::str::contains("Status:  runs for 3.6 -> 2.7"));
}

#[test]
fn explain_unknown_pass_lists_available() {
    let temp = workspace(&[]);
    downlevel(temp.path())
        .args(["explain", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Available passes"));
}
