//! CLI integration tests
//!
//! Runs the built binary with a scrubbed environment so no local `.env` or
//! config file leaks in.

mod common;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use common::{MockData, MockServerFactory, TOKEN_PATH};
use predicates::prelude::*;
use std::process::Output;
use tempfile::TempDir;

/// Binary with an empty environment rooted in `dir`
fn isolated_cmd(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("vodkit-portal");
    cmd.env_clear()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path());
    cmd
}

async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("vodkit-portal");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    let mut cmd = cargo_bin_cmd!("vodkit-portal");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_server_help_lists_options() {
    let mut cmd = cargo_bin_cmd!("vodkit-portal");
    cmd.args(["server", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_resolve_without_credentials_fails() {
    let dir = TempDir::new().unwrap();
    let output = isolated_cmd(&dir).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CLIENT_ID"), "stderr: {}", stderr);
}

#[test]
fn test_server_without_credentials_refuses_to_start() {
    let dir = TempDir::new().unwrap();
    let mut cmd = isolated_cmd(&dir);
    cmd.args(["server", "--port", "0", "--host", "127.0.0.1"]);

    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Missing required configuration"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_dotenv_file_is_read() {
    let dir = TempDir::new().unwrap();
    // Credentials present but the subdomain is missing
    std::fs::write(
        dir.path().join(".env"),
        "CLIENT_ID=from-dotenv\nCLIENT_SECRET=from-dotenv\n",
    )
    .unwrap();

    let output = isolated_cmd(&dir).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CLIENT_SUBDOMAIN"), "stderr: {}", stderr);
}

#[tokio::test]
async fn test_resolve_prints_featured_vod() {
    let server = MockServerFactory::new().await;
    MockServerFactory::setup_token(&server, "cli-token", 3600).await;
    MockServerFactory::setup_assets(
        &server,
        "cli-token",
        vec![
            MockData::protected("Locked"),
            MockData::playable("Launch", "https://cdn.example/launch.m3u8"),
        ],
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut cmd = isolated_cmd(&dir);
    cmd.env("CLIENT_ID", "id")
        .env("CLIENT_SECRET", "secret")
        .env("CLIENT_SUBDOMAIN", "acme")
        .env("OAUTH_URL", format!("{}{}", server.uri(), TOKEN_PATH))
        .env("VOD_API_BASE_URL", server.uri());

    let output = run(cmd).await;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "Launch");
    assert_eq!(json["manifestUrl"], "https://cdn.example/launch.m3u8");
}

#[tokio::test]
async fn test_resolve_degraded_exit_code() {
    let server = MockServerFactory::new().await;
    MockServerFactory::setup_token(&server, "cli-token", 3600).await;
    MockServerFactory::setup_assets(&server, "cli-token", vec![MockData::protected("Locked")])
        .await;

    let dir = TempDir::new().unwrap();
    let mut cmd = isolated_cmd(&dir);
    cmd.env("CLIENT_ID", "id")
        .env("CLIENT_SECRET", "secret")
        .env("CLIENT_SUBDOMAIN", "acme")
        .env("OAUTH_URL", format!("{}{}", server.uri(), TOKEN_PATH))
        .env("VOD_API_BASE_URL", server.uri());

    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "{}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("No eligible asset"));
}

#[tokio::test]
async fn test_resolve_upstream_failure_exit_code() {
    let server = MockServerFactory::new().await;
    MockServerFactory::setup_token_failure(&server, 401).await;

    let dir = TempDir::new().unwrap();
    let mut cmd = isolated_cmd(&dir);
    cmd.env("CLIENT_ID", "id")
        .env("CLIENT_SECRET", "wrong")
        .env("CLIENT_SUBDOMAIN", "acme")
        .env("OAUTH_URL", format!("{}{}", server.uri(), TOKEN_PATH))
        .env("VOD_API_BASE_URL", server.uri());

    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("401"));
}
