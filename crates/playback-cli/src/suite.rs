//! Loading recorded tests from disk.
//!
//! Accepts a saved suite (`{ "tests": [ { "name", "commands" } ] }`, extra
//! fields ignored) or a bare JSON array of commands.

use std::path::Path;

use anyhow::{Context, Result};
use playback_types::Command;
use serde::Deserialize;

/// One recorded test.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordedTest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub commands: Vec<Command>,
}

#[derive(Debug, Deserialize)]
struct Suite {
    tests: Vec<RecordedTest>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuiteFile {
    Suite(Suite),
    Commands(Vec<Command>),
}

/// Read every test in `path`.
pub fn load_suite(path: &Path) -> Result<Vec<RecordedTest>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "commands".to_string());
    let tests = parse_suite(&text, &fallback)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), tests = tests.len(), "loaded suite");
    Ok(tests)
}

/// Parse suite JSON. A bare command array becomes one test named `fallback_name`.
pub fn parse_suite(text: &str, fallback_name: &str) -> Result<Vec<RecordedTest>> {
    let file: SuiteFile = serde_json::from_str(text)?;
    Ok(match file {
        SuiteFile::Suite(suite) => suite.tests,
        SuiteFile::Commands(commands) => vec![RecordedTest {
            id: None,
            name: fallback_name.to_string(),
            commands,
        }],
    })
}
