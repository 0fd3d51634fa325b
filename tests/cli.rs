use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("safeload").unwrap();
    cmd.env("SAFELOAD_CLASSIFIER_URL", "http://127.0.0.1:1")
        .env("SAFELOAD_CONFIG", "/nonexistent/safeload.toml")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn inspect_prints_directory_metadata() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "0123456789").unwrap();
    std::fs::write(dir.path().join("b.txt"), "01234567890123456789").unwrap();

    let assert = cmd().arg("inspect").arg(dir.path()).assert().success();

    let summary: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(summary["loader"], "DirectoryLoader");
    assert_eq!(summary["source_type"], "dir");
    assert_eq!(summary["source_size"], 30);
    assert_eq!(summary["source_path"], dir.path().display().to_string());
}

#[test]
fn load_succeeds_without_classifier() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "alpha").unwrap();
    std::fs::write(dir.path().join("b.md"), "beta").unwrap();

    cmd()
        .args(["load", "--app-id", "cli-test", "--owner", "qa"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("a.txt\t5 chars"))
        .stdout(contains("b.md\t4 chars"));
}

#[test]
fn lazy_load_succeeds_without_classifier() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "alpha").unwrap();
    std::fs::write(dir.path().join("b.md"), "beta").unwrap();

    let assert = cmd()
        .args(["load", "--lazy", "--app-id", "cli-test", "--owner", "qa"])
        .arg(dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].ends_with("a.txt\t5 chars"));
    assert!(lines[1].ends_with("b.md\t4 chars"));
}

#[test]
fn load_rejects_blank_owner() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["load", "--app-id", "cli-test", "--owner", " "])
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn load_requires_app_id() {
    cmd()
        .args(["load", "--owner", "qa", "docs"])
        .assert()
        .failure()
        .stderr(contains("--app-id"));
}
