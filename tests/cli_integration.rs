//! Command-line interface.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn jsreshape(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jsreshape"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn jsreshape_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jsreshape"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

/// Helper to create a workspace with a couple of sources
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.js"), "_.each(items, show);\n").unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(
        dir.path().join("lib").join("b.js"),
        "function test() { var myA = 1, myB = 2; }\n",
    )
    .unwrap();
    fs::write(dir.path().join("lib").join("notes.txt"), "_.each(x, y)").unwrap();
    dir
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = jsreshape(dir.path(), &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["format", "rewrite", "search", "validate", "ast"] {
        assert!(stdout.contains(command), "missing {command}");
    }
}

#[test]
fn test_rewrite_prints_result() {
    let dir = setup_workspace();
    let output = jsreshape(
        dir.path(),
        &["rewrite", "a.js", "--rule", "_.each(a, b) -> a.forEach(b)"],
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "items.forEach(show);\n");
    // Not written back
    assert_eq!(
        fs::read_to_string(dir.path().join("a.js")).unwrap(),
        "_.each(items, show);\n"
    );
}

#[test]
fn test_rewrite_write_walks_directories() {
    let dir = setup_workspace();
    let output = jsreshape(
        dir.path(),
        &[
            "rewrite",
            ".",
            "--write",
            "--rule",
            "_.each(a, b) -> a.forEach(b)",
            "--rule",
            "var a = c, b = d; -> var a = c; var b = d;",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        fs::read_to_string(dir.path().join("a.js")).unwrap(),
        "items.forEach(show);\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("lib").join("b.js")).unwrap(),
        "function test() {\n    var myA = 1;\n    var myB = 2;\n}\n"
    );
    // Only *.js files are touched
    assert_eq!(
        fs::read_to_string(dir.path().join("lib").join("notes.txt")).unwrap(),
        "_.each(x, y)"
    );
}

#[test]
fn test_rewrite_uses_config_rules() {
    let dir = setup_workspace();
    fs::write(
        dir.path().join(".jsreshape.toml"),
        "rules = [\"_.each(a, b) -> a.forEach(b)\"]\n",
    )
    .unwrap();
    let output = jsreshape(dir.path(), &["rewrite", "a.js"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "items.forEach(show);\n");
}

#[test]
fn test_rewrite_without_rules_fails() {
    let dir = setup_workspace();
    let output = jsreshape(dir.path(), &["rewrite", "a.js"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No rules given"));
}

#[test]
fn test_rewrite_diff_leaves_files_alone() {
    let dir = setup_workspace();
    let output = jsreshape(
        dir.path(),
        &["rewrite", "a.js", "--diff", "--rule", "_.each(a, b) -> a.forEach(b)"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-_.each(items, show);"));
    assert!(stdout.contains("+items.forEach(show);"));
    assert_eq!(
        fs::read_to_string(dir.path().join("a.js")).unwrap(),
        "_.each(items, show);\n"
    );
}

#[test]
fn test_invalid_rule_is_reported() {
    let dir = setup_workspace();
    let output = jsreshape(dir.path(), &["rewrite", "a.js", "--rule", "f(a)"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("->"));
}

#[test]
fn test_format_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let output = jsreshape_stdin(
        dir.path(),
        &["format"],
        "var func = function(test){console.log( test );};",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "var func = function(test) {\n  console.log(test);\n};\n"
    );
}

#[test]
fn test_format_honours_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("style.toml"),
        "[format]\nquotes = \"double\"\n",
    )
    .unwrap();
    let output = jsreshape_stdin(
        dir.path(),
        &["format", "--config", "style.toml"],
        "log('hi')",
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "log(\"hi\");\n");
}

#[test]
fn test_search_json() {
    let dir = setup_workspace();
    let output = jsreshape(
        dir.path(),
        &["search", "a.js", "--pattern", "_.each(a, b)", "--json"],
    );
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let matches = &report[0]["matches"];
    assert_eq!(matches.as_array().unwrap().len(), 1);
    assert_eq!(matches[0]["bindings"]["a"]["name"], "items");
    assert_eq!(matches[0]["bindings"]["b"]["name"], "show");
}

#[test]
fn test_search_without_matches_fails() {
    let dir = setup_workspace();
    let output = jsreshape(dir.path(), &["search", "a.js", "--pattern", "nothing(a)"]);
    assert!(!output.status.success());
}

#[test]
fn test_validate_reports_locations() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.js"), "return 42;\n").unwrap();
    fs::write(dir.path().join("good.js"), "function f() { return 42; }\n").unwrap();

    let output = jsreshape(dir.path(), &["validate", "bad.js"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bad.js:1:7:"));
    assert!(stdout.contains("Illegal return statement"));

    let output = jsreshape(dir.path(), &["validate", "good.js"]);
    assert!(output.status.success());
}

#[test]
fn test_ast_prints_estree_json() {
    let dir = TempDir::new().unwrap();
    let output = jsreshape_stdin(dir.path(), &["ast"], "foo(1);");
    assert!(output.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["type"], "Program");
    assert_eq!(tree["body"][0]["type"], "ExpressionStatement");
    assert_eq!(tree["body"][0]["expression"]["callee"]["name"], "foo");
}

#[test]
fn test_write_requires_files() {
    let dir = TempDir::new().unwrap();
    let output = jsreshape_stdin(
        dir.path(),
        &["rewrite", "--write", "--rule", "f(a) -> g(a)"],
        "f(1);",
    );
    assert!(!output.status.success());
}
