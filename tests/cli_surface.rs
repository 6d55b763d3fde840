//! End-to-end checks of the CLI surface that need no running server.

use assert_cmd::Command;
use std::fs;

fn ldg() -> Command {
    let mut cmd = Command::cargo_bin("ldg").expect("binary builds");
    // Keep the real environment out of credential resolution.
    cmd.env_remove("LINKDING_URL");
    cmd.env_remove("LINKDING_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package_version() {
    ldg()
        .arg("version")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_json_is_machine_readable() {
    let output = ldg().args(["version", "--json"]).output().expect("runs");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON on stdout");
    assert_eq!(value["name"], "ldg");
}

#[test]
fn unknown_extension_aborts_before_credentials() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("notes.txt"), "not an interchange file").expect("write");

    ldg()
        .env("LDG_CONFIG_DIR", dir.path())
        .arg("import")
        .arg(dir.path().join("notes.txt"))
        .assert()
        .failure()
        .code(6)
        .stderr(predicates::str::contains("Cannot determine format"));
}

#[test]
fn missing_credentials_exit_with_config_code() {
    let dir = tempfile::tempdir().expect("tempdir");

    ldg()
        .env("LDG_CONFIG_DIR", dir.path())
        .arg("list")
        .assert()
        .failure()
        .code(2)
        .stderr(predicates::str::contains("ldg configure"));
}

#[test]
fn dry_run_import_needs_no_server() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("config.json"),
        r#"{"server":"http://127.0.0.1:9","token":"t"}"#,
    )
    .expect("write config");

    let file = dir.path().join("bookmarks.json");
    fs::write(
        &file,
        r#"{
  "version": "1",
  "exported_at": "2024-01-01T00:00:00Z",
  "source": "linkding",
  "bookmarks": [
    {"url": "https://example.com/a", "title": "A"},
    {"url": "https://example.com/b", "title": "B"},
    {"url": ""}
  ]
}"#,
    )
    .expect("write import file");

    let output = ldg()
        .env("LDG_CONFIG_DIR", dir.path())
        .args(["--json", "import", "--dry-run"])
        .arg(&file)
        .output()
        .expect("runs");
    assert!(output.status.success(), "dry run must not touch the network");

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON on stdout");
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["report"]["added"], 2);
    assert_eq!(value["report"]["failed"], 1);
    assert_eq!(value["report"]["errors"][0]["line"], 3);
}

#[test]
fn json_restore_without_yes_is_refused() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("config.json"),
        r#"{"server":"http://127.0.0.1:9","token":"t"}"#,
    )
    .expect("write config");
    let file = dir.path().join("bookmarks.json");
    fs::write(
        &file,
        r#"{"version":"1","exported_at":"2024-01-01T00:00:00Z","source":"linkding","bookmarks":[]}"#,
    )
    .expect("write restore file");

    ldg()
        .env("LDG_CONFIG_DIR", dir.path())
        .args(["--json", "restore"])
        .arg(&file)
        .assert()
        .failure()
        .code(4)
        .stderr(predicates::str::contains("--yes"));
}

#[test]
fn json_delete_without_yes_is_refused() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("config.json"),
        r#"{"server":"http://127.0.0.1:9","token":"t"}"#,
    )
    .expect("write config");

    ldg()
        .env("LDG_CONFIG_DIR", dir.path())
        .args(["--json", "delete", "5"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicates::str::contains("--yes"));
}

#[test]
fn add_with_empty_url_is_a_validation_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    ldg()
        .env("LDG_CONFIG_DIR", dir.path())
        .args(["add", ""])
        .assert()
        .failure()
        .code(4)
        .stderr(predicates::str::contains("Required field missing: url"));
}

#[test]
fn completions_generate_for_bash() {
    ldg()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicates::str::contains("ldg"));
}
