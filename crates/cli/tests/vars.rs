//! Integration tests for the vars command.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn write(dir: &std::path::Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn fillin(root: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fillin"));
    cmd.env("XDG_CONFIG_HOME", root.join("xdg"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn vars_table_lists_each_variable_once() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write(
        root,
        "t.md",
        "# {{title}}\nDue {{date:due}}, review {{due+1w}}\n{{#tags}}{{.}}{{/tags}}\n{{bool:urgent}}",
    );

    fillin(root)
        .arg("vars")
        .arg(root.join("t.md"))
        .assert()
        .success()
        .stdout(predicates::str::contains("title"))
        .stdout(predicates::str::contains("due"))
        .stdout(predicates::str::contains("tags"))
        .stdout(predicates::str::contains("urgent"))
        .stdout(predicates::str::contains("date"))
        .stdout(predicates::str::contains("bool"))
        .stdout(predicates::str::contains("-- 4 variables --"));
}

#[test]
fn vars_json_round_trips_through_serde() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write(root, "t.md", "{{title}} {{date:due}} {{bool:urgent}}");

    let output = fillin(root)
        .arg("vars")
        .arg(root.join("t.md"))
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let fields: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let fields = fields.as_array().unwrap();
    assert_eq!(fields.len(), 3);

    assert_eq!(fields[0]["name"], "title");
    assert_eq!(fields[0]["kind"], "text");
    assert_eq!(fields[1]["name"], "due");
    assert_eq!(fields[1]["kind"], "date");
    assert_eq!(fields[2]["name"], "urgent");
    assert_eq!(fields[2]["kind"], "bool");
    assert_eq!(fields[2]["default"], false);
}

#[test]
fn vars_json_for_plain_text_is_an_empty_array() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write(root, "t.md", "no placeholders");

    let output = fillin(root)
        .arg("vars")
        .arg(root.join("t.md"))
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let fields: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(fields, serde_json::json!([]));
}

#[test]
fn vars_plain_text_prints_placeholder_note() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write(root, "t.md", "no placeholders");

    fillin(root)
        .arg("vars")
        .arg(root.join("t.md"))
        .assert()
        .success()
        .stdout(predicates::str::contains("(no variables)"));
}

#[test]
fn vars_surfaces_extraction_errors() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write(root, "t.md", "{{due+9z}}");

    fillin(root)
        .arg("vars")
        .arg(root.join("t.md"))
        .assert()
        .failure()
        .stdout(predicates::str::contains("FAIL fillin vars"))
        .stdout(predicates::str::contains("malformed offset"));
}
