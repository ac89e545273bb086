use anyhow::{Context, Result};
use md2anki::infrastructure::AnkiConnectClient;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Markdown file living in its own temporary directory
#[allow(dead_code)]
pub struct MarkdownFixture {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl MarkdownFixture {
    pub fn new(content: &str) -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("notes.md");
        std::fs::write(&path, content).context("Failed to write markdown fixture")?;
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }
}

/// Client pointed at a mock AnkiConnect server
#[allow(dead_code)]
pub fn client_for(server: &ServerGuard) -> Result<AnkiConnectClient> {
    AnkiConnectClient::new(server.url(), Duration::from_secs(2))
}

/// Register a mock answering `action` with a successful envelope
#[allow(dead_code)]
pub fn mock_action(server: &mut ServerGuard, action: &str, result: Value) -> Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "action": action, "version": 6 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "result": result, "error": null }).to_string())
        .create()
}

/// Sample document mixing shallow headings and card headings
#[allow(dead_code)]
pub const SAMPLE_MARKDOWN: &str = "# Rust notes\n\nIntro text.\n\n## Ownership\n\n#### What is a borrow?\nA reference that does not own the value.\n\n##### What is a move?\nTransfer of ownership.\n";
