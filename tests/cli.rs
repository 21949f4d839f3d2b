use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WORDS: &[&str] = &[
    "please", "login", "now", "greeting", "hello", "world", "sign", "in", "this", "is", "simply",
    "great",
];

fn workspace(source: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let dict = dir.path().join("dict");
    fs::create_dir(&dict).unwrap();
    fs::write(dict.join("en_US.aff"), "SET UTF-8\n").unwrap();
    fs::write(
        dict.join("en_US.dic"),
        format!("{}\n{}\n", WORDS.len(), WORDS.join("\n")),
    )
    .unwrap();
    fs::write(dir.path().join("app.js"), source).unwrap();
    dir
}

fn grammarchk(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("grammarchk").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--lang-dir")
        .arg(dir.join("dict"))
        .arg("--no-color");
    cmd
}

const SOURCE: &str = "// Please login now.\nconst greeting = 'Hello world';\n";

#[test]
fn reports_issues_and_fails() {
    let dir = workspace(SOURCE);
    grammarchk(dir.path())
        .arg("app.js")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("1:11"))
        .stdout(predicate::str::contains("Use \"sign in\" instead of \"login\"."))
        .stdout(predicate::str::contains("1 issue found in 1 file"));
}

#[test]
fn no_fail_exits_cleanly() {
    let dir = workspace(SOURCE);
    grammarchk(dir.path()).arg("app.js").arg("--no-fail").assert().success();
}

#[test]
fn clean_file_passes() {
    let dir = workspace("// Hello world.\nconst greeting = 'Hello';\n");
    grammarchk(dir.path())
        .arg(".")
        .assert()
        .success()
        .stdout(predicate::str::contains("No writing issues found"));
}

#[test]
fn json_output() {
    let dir = workspace(SOURCE);
    let output = grammarchk(dir.path())
        .args(["app.js", "--format", "json"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_issues"], 1);
    let issue = &json["issues"][0];
    assert_eq!(issue["rule"], "terminology");
    assert_eq!(issue["line"], 1);
    assert_eq!(issue["fix"]["text"], "sign in");
}

#[test]
fn fix_rewrites_file() {
    let dir = workspace(SOURCE);
    grammarchk(dir.path()).args(["app.js", "--fix"]).assert().success();

    let fixed = fs::read_to_string(dir.path().join("app.js")).unwrap();
    assert_eq!(fixed, "// Please sign in now.\nconst greeting = 'Hello world';\n");
}

#[test]
fn fix_deletion_leaves_single_spaces() {
    let dir = workspace("// This is simply great.\n");
    grammarchk(dir.path()).args(["app.js", "--fix"]).assert().success();

    let fixed = fs::read_to_string(dir.path().join("app.js")).unwrap();
    assert_eq!(fixed, "// This is great.\n");
}

#[test]
fn jsx_text_is_checked() {
    let dir = workspace("");
    fs::write(
        dir.path().join("page.jsx"),
        "export default () => <p>Please login now</p>;\n",
    )
    .unwrap();
    grammarchk(dir.path())
        .args(["page.jsx", "--no-fail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1:32"))
        .stdout(predicate::str::contains("Use \"sign in\" instead of \"login\"."));
}

#[test]
fn missing_dictionary_is_fatal() {
    let dir = workspace(SOURCE);
    grammarchk(dir.path())
        .args(["app.js", "--language", "xx_XX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xx_XX"));
}

#[test]
fn local_config_is_honored() {
    let dir = workspace(SOURCE);
    fs::write(dir.path().join(".grammarchk.toml"), "checkTerminology = false\n").unwrap();
    grammarchk(dir.path()).arg("app.js").assert().success();
}
