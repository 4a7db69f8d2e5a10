//! route-cli against a real route table on disk.

use std::path::Path;
use std::process::{Command, Output};

use route_host::store::{Route, RouteKind, RouteStore};
use tempfile::TempDir;

fn write_config(dir: &TempDir, routes_path: &Path) -> std::path::PathBuf {
    let config = dir.path().join("config.json");
    let body = serde_json::json!({ "storage": { "routes_path": routes_path } });
    std::fs::write(&config, body.to_string()).unwrap();
    config
}

fn route_cli(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_route-cli"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn add_appends_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let routes_path = dir.path().join("routes.json");
    let config = write_config(&dir, &routes_path);

    let out = route_cli(&config, &["add", "/go", "redirect", "https://example.com"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Added /go -> https://example.com"));

    assert_eq!(
        RouteStore::new(&routes_path).load(),
        vec![Route::new("/go", RouteKind::Redirect, "https://example.com")]
    );
}

#[test]
fn failed_save_does_not_report_added() {
    let dir = tempfile::tempdir().unwrap();
    let routes_path = dir.path().join("missing-dir").join("routes.json");
    let config = write_config(&dir, &routes_path);

    let out = route_cli(&config, &["add", "/go", "redirect", "https://example.com"]);
    assert!(!out.status.success());
    assert!(!String::from_utf8_lossy(&out.stdout).contains("Added"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to write"));
}

#[test]
fn check_flags_non_string_type() {
    let dir = tempfile::tempdir().unwrap();
    let routes_path = dir.path().join("routes.json");
    let config = write_config(&dir, &routes_path);
    std::fs::write(
        &routes_path,
        r#"{"routes":[{"path":"/go","type":"redirect","target":"/x"},{"path":"/bad","type":5,"target":"x"}]}"#,
    )
    .unwrap();

    let out = route_cli(&config, &["check"]);
    assert!(!out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("/bad: unknown route type \"5\""));
    assert!(!stdout.contains("/go:"));
}
