//! Integration tests for `demystify rename`.

use std::process::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-q", "-p", "demystify-cli", "--bin", "demystify", "--"]);
    cmd
}

const SOURCE: &str = "var a = 'fooBar.baz';\nfunction f(a) { return a; }\nf(a);\n";

#[test]
fn test_rename_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.js");
    std::fs::write(&input, SOURCE).unwrap();

    let output = cargo_bin().arg("rename").arg(&input).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fooBarBaz$a"), "stdout: {stdout}");
    // The frequency pass labels `f` and the deshadowed parameter by their context.
    assert!(
        stdout.contains("function fooBarBaz$a$f(fooBarBaz$a$a1)"),
        "stdout: {stdout}"
    );
}

#[test]
fn test_rename_without_frequency_pass() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.js");
    std::fs::write(&input, SOURCE).unwrap();

    let output = cargo_bin()
        .arg("rename")
        .arg(&input)
        .arg("--no-frequency")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("function f(a1)"), "stdout: {stdout}");
    assert!(stdout.contains("f(fooBarBaz$a)"), "stdout: {stdout}");
}

#[test]
fn test_rename_to_file_with_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.js");
    let out = dir.path().join("out.js");
    std::fs::write(&input, SOURCE).unwrap();

    let output = cargo_bin()
        .args(["--json", "rename"])
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .args(["--report", "--rounds", "1", "--no-frequency"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("fooBarBaz$a"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let report: serde_json::Value = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|value| value.get("schema_version").is_some())
        .expect("report line on stderr");
    assert_eq!(report["rounds"].as_array().unwrap().len(), 1);
    assert_eq!(report["rounds"][0]["pairs"][0]["label"], "fooBarBaz");
    assert!(report["long_names"].as_array().unwrap().is_empty());
}

#[test]
fn test_rename_parse_error_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.js");
    std::fs::write(&input, "function (").unwrap();

    let output = cargo_bin().arg("rename").arg(&input).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEMYSTIFY_PARSE_ERROR"), "stderr: {stderr}");
}

#[test]
fn test_rename_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = cargo_bin()
        .arg("rename")
        .arg(dir.path().join("missing.js"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_version() {
    let output = cargo_bin().arg("version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("demystify "));
}
