//! Integration tests for the photoreport CLI
//!
//! Tests command-line functionality end to end: argument handling,
//! validation failures surfacing on stderr with a non-zero exit, and the
//! full generate flow against an in-process render server double.

use anyhow::Result;
use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Test helper to get the CLI binary path
fn get_cli_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop(); // Remove "deps" directory
    }
    path.push("photoreport");
    #[cfg(windows)]
    path.set_extension("exe");
    path
}

/// Test helper to create a temporary directory
fn setup_temp_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

/// Test helper to run CLI command and return output
fn run_cli_command(args: &[&str]) -> Result<std::process::Output> {
    let output = Command::new(get_cli_path()).args(args).output()?;
    Ok(output)
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\x89PNG\r\n\x1a\nfake image data").unwrap();
    path
}

async fn mock_generate(Json(payload): Json<Value>) -> Response {
    let photos = payload["photos"].as_array().cloned().unwrap_or_default();
    if photos.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No photos provided"})),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [("Content-Type", "application/pdf")],
        b"%PDF-1.7 rendered by the test double".to_vec(),
    )
        .into_response()
}

async fn mock_health() -> Response {
    Json(json!({"status": "ok", "logo_exists": false})).into_response()
}

/// Stand up the render server double on an ephemeral port and return its
/// base URL. The server lives on its own thread for the rest of the test
/// process.
fn spawn_mock_server() -> String {
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let app = Router::new()
                .route("/api/generate-pdf", post(mock_generate))
                .route("/api/health", get(mock_health));

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", rx.recv().unwrap())
}

#[test]
fn test_cli_generate_end_to_end() {
    let server = spawn_mock_server();
    let temp_dir = setup_temp_dir();
    let photo = write_png(temp_dir.path(), "wall.png");
    let output_path = temp_dir.path().join("inspection.pdf");

    let output = run_cli_command(&[
        "generate",
        "--server",
        &server,
        "--title",
        "Depot inspection",
        "--location",
        "North depot",
        "--system-ref",
        "SR-114",
        "--issued-by",
        "Maintenance",
        "--captions",
        "crack along the north wall",
        "--output",
        output_path.to_str().unwrap(),
        photo.to_str().unwrap(),
    ])
    .expect("CLI command should run");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Report saved to"),
        "Should show save message, got: {stdout}"
    );

    let content = std::fs::read(&output_path).expect("Output PDF should exist");
    assert!(
        content.starts_with(b"%PDF-"),
        "Saved file should carry PDF content"
    );
}

#[test]
fn test_cli_generate_blocks_on_empty_title() {
    let temp_dir = setup_temp_dir();
    let photo = write_png(temp_dir.path(), "wall.png");

    let output = run_cli_command(&[
        "generate",
        "--server",
        "http://127.0.0.1:9",
        "--title",
        "   ",
        "--location",
        "North depot",
        "--system-ref",
        "SR-114",
        "--issued-by",
        "Maintenance",
        photo.to_str().unwrap(),
    ])
    .expect("CLI command should run");

    assert!(!output.status.success(), "Command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Field \"Title\" is required"),
        "Should name the offending field, got: {stderr}"
    );
}

#[test]
fn test_cli_generate_requires_at_least_one_photo() {
    let output = run_cli_command(&[
        "generate",
        "--server",
        "http://127.0.0.1:9",
        "--title",
        "Depot inspection",
        "--location",
        "North depot",
        "--system-ref",
        "SR-114",
        "--issued-by",
        "Maintenance",
    ])
    .expect("CLI command should run");

    assert!(!output.status.success(), "Command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Add at least one photo to the report"),
        "Should report the missing photos, got: {stderr}"
    );
}

#[test]
fn test_cli_check_reports_status_and_logo_notice() {
    let server = spawn_mock_server();

    let output =
        run_cli_command(&["check", "--server", &server]).expect("CLI command should run");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("status ok"), "Should print server status");
    assert!(
        stdout.contains("Logo not found"),
        "Should surface the missing branding asset"
    );
}

#[test]
fn test_cli_check_fails_loudly_when_server_is_down() {
    let output = run_cli_command(&["check", "--server", "http://127.0.0.1:9"])
        .expect("CLI command should run");

    assert!(!output.status.success(), "Command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to reach server"),
        "Should explain the failure, got: {stderr}"
    );
}

#[test]
fn test_cli_help_lists_subcommands() {
    let output = run_cli_command(&["--help"]).expect("CLI command should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("check"));
}
