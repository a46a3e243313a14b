//! End-to-end tests for the playback CLI, driven through `run`.

use std::io::Write as _;

use clap::{CommandFactory, Parser};
use playback_cli::config::CliConfig;
use playback_cli::{run, Cli};
use tempfile::NamedTempFile;

const SUITE: &str = r#"{
  "name": "shop",
  "tests": [
    {
      "id": "t1",
      "name": "checkout",
      "commands": [
        {"command": "open", "target": "/cart"},
        {"command": "while", "target": "${items} > 0"},
        {"command": "click", "target": "css=.remove"},
        {"command": "end"}
      ]
    },
    {
      "id": "t2",
      "name": "broken",
      "commands": [
        {"command": "if", "target": "true"},
        {"command": "click", "target": "id=x"}
      ]
    }
  ]
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn run_args(args: &[&str]) -> (anyhow::Result<bool>, String) {
    let cli = Cli::parse_from(std::iter::once("playback-tree").chain(args.iter().copied()));
    let mut out = Vec::new();
    let result = run(&cli, &CliConfig::default(), &mut out);
    (result, String::from_utf8(out).expect("utf8 output"))
}

#[test]
fn check_reports_each_test() {
    let file = write_temp(SUITE);
    let path = file.path().to_str().unwrap();

    let (result, out) = run_args(&["check", path]);
    assert!(!result.unwrap(), "broken test should fail the check");
    assert!(out.contains("ok     checkout (4 commands)"), "{}", out);
    assert!(out.contains("error  broken: incomplete block at if (command 0)"), "{}", out);
}

#[test]
fn graph_text_for_named_test() {
    let file = write_temp(SUITE);
    let path = file.path().to_str().unwrap();

    let (result, out) = run_args(&["graph", path, "--test", "checkout"]);
    assert!(result.unwrap());
    assert_eq!(
        out,
        "# checkout\n\
         0 open L0 next=1\n\
         1 while L0 right=2 left=3\n\
         2 click L1 next=1\n\
         3 end L0\n"
    );
}

#[test]
fn graph_json_output() {
    let file = write_temp(SUITE);
    let path = file.path().to_str().unwrap();

    let (result, out) = run_args(&["graph", path, "--test", "checkout", "--format", "json"]);
    assert!(result.unwrap());
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["name"], "checkout");
    assert_eq!(json[0]["nodes"][1]["right"], 2);
    assert_eq!(json[0]["nodes"][1]["left"], 3);
    assert_eq!(json[0]["nodes"][2]["next"], 1);
}

#[test]
fn graph_of_invalid_test_is_an_error() {
    let file = write_temp(SUITE);
    let path = file.path().to_str().unwrap();

    let (result, _) = run_args(&["graph", path, "--test", "broken"]);
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("incomplete block at if"), "{:#}", err);
}

#[test]
fn unknown_test_name() {
    let file = write_temp(SUITE);
    let path = file.path().to_str().unwrap();

    let (result, _) = run_args(&["graph", path, "--test", "nope"]);
    assert!(result.unwrap_err().to_string().contains("No test named 'nope'"));
}

#[test]
fn bare_command_array_uses_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("retry.json");
    std::fs::write(&path, r#"[{"command":"do"},{"command":"click"},{"command":"repeatIf"},{"command":"end"}]"#)
        .unwrap();

    let (result, out) = run_args(&["check", path.to_str().unwrap()]);
    assert!(result.unwrap());
    assert_eq!(out, "ok     retry (4 commands)\n");
}

#[test]
fn missing_file_is_an_error() {
    let (result, _) = run_args(&["check", "/nonexistent/suite.side"]);
    assert!(result.unwrap_err().to_string().contains("Failed to read"));
}

#[test]
fn config_file_sets_default_format() {
    let config_file = write_temp("format = \"json\"\n");
    let config = CliConfig::load(Some(config_file.path())).unwrap();
    let suite = write_temp(r#"[{"command":"open"}]"#);

    let cli = Cli::parse_from(["playback-tree", "graph", suite.path().to_str().unwrap()]);
    let mut out = Vec::new();
    assert!(run(&cli, &config, &mut out).unwrap());
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json[0]["nodes"][0]["name"], "open");
}

#[test]
fn command_is_named_after_the_binary() {
    let command = Cli::command();
    assert_eq!(command.get_name(), "playback-tree");
    command.debug_assert();
}
