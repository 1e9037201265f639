//! End-to-end tests that run the `sw` binary against a temp project.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("sql/updates")).unwrap();
    fs::write(
        root.join("sql/create.sql"),
        "CREATE TABLE player (id INTEGER, playername VARCHAR);",
    )
    .unwrap();

    let config = serde_json::json!({
        "root": root.display().to_string(),
        "versionFile": "%root%/version.json",
        "database": {
            "path": "%root%/server.duckdb",
            "createTablesPath": "%root%/sql/create.sql",
            "updateTablesFolder": "%root%/sql/updates"
        }
    });
    fs::write(root.join("server.config"), config.to_string()).unwrap();
    dir
}

fn add_update(root: &Path, name: &str, sql: &str) {
    fs::write(root.join("sql/updates").join(name), sql).unwrap();
}

fn sw(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sw"))
        .args(args)
        .env("SW_CONFIG", root.join("server.config"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn update_bootstraps_and_applies_scripts() {
    let dir = project();
    add_update(dir.path(), "1.0.1.sql", "ALTER TABLE player ADD COLUMN email VARCHAR;");
    add_update(dir.path(), "1.0.2.sql", "CREATE TABLE game_room (id INTEGER);");

    let output = sw(dir.path(), &["update"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    let out = stdout(&output);
    assert!(out.contains("Initialised database"));
    assert!(out.contains("2 updates applied (0.0.0 -> 1.0.2)"));

    let recorded: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("version.json")).unwrap())
            .unwrap();
    assert_eq!(recorded["database"], "1.0.2");
}

#[test]
fn second_update_reports_up_to_date() {
    let dir = project();
    add_update(dir.path(), "1.0.0.sql", "INSERT INTO player VALUES (1, 'ada');");

    assert!(sw(dir.path(), &["update"]).status.success());
    let output = sw(dir.path(), &["update"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Database is already up to date (1.0.0)"));
}

#[test]
fn failing_script_exits_non_zero() {
    let dir = project();
    add_update(dir.path(), "1.0.0.sql", "INSERT INTO no_such_table VALUES (1);");

    let output = sw(dir.path(), &["update"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Update 1 of 1 failed (1.0.0)").count(), 1);
}

#[test]
fn missing_config_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    let output = sw(dir.path(), &["status"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}

#[test]
fn status_lists_pending_updates() {
    let dir = project();
    add_update(dir.path(), "1.10.0.sql", "SELECT 1;");
    add_update(dir.path(), "1.2.0.sql", "SELECT 1;");

    let output = sw(dir.path(), &["status"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Recorded version: 0.0.0"));
    let first = out.find("1.2.0.sql").unwrap();
    let second = out.find("1.10.0.sql").unwrap();
    assert!(first < second);
}

#[test]
fn order_flag_overrides_config() {
    let dir = project();
    add_update(dir.path(), "1.10.0.sql", "SELECT 1;");
    add_update(dir.path(), "1.2.0.sql", "SELECT 1;");

    let output = sw(dir.path(), &["status", "--order", "lexicographic"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.find("1.10.0.sql").unwrap() < out.find("1.2.0.sql").unwrap());
}

#[test]
fn status_json_includes_settings() {
    let dir = project();
    add_update(dir.path(), "1.0.0.sql", "SELECT 1;");

    let output = sw(dir.path(), &["status", "--json"]);

    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(status["current_version"], "0.0.0");
    assert_eq!(status["up_to_date"], false);
    assert_eq!(status["pending"], serde_json::json!(["1.0.0.sql"]));
    assert_eq!(status["settings"]["update_order"], "semantic");
    assert_eq!(status["settings"]["marker_table"], "player");
}
