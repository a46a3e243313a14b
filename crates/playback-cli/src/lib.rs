//! playback-tree: check recorded tests and inspect their playback graphs.
//!
//! ```bash
//! playback-tree check suite.side
//! playback-tree graph suite.side --test login --format json
//! ```

pub mod config;
pub mod suite;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use playback_tree::{build_tree, format_graph, GraphSummary};
use serde::Serialize;

use config::{CliConfig, OutputFormat};
use suite::{load_suite, RecordedTest};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "playback-tree", version, about)]
pub struct Cli {
    /// Config file (defaults to the per-user config location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate the control flow of every test in a file.
    Check {
        /// Saved suite or JSON command array.
        file: PathBuf,
    },
    /// Print the playback graph of each test in a file.
    Graph {
        /// Saved suite or JSON command array.
        file: PathBuf,
        /// Only print the test with this name.
        #[arg(long)]
        test: Option<String>,
        /// Output format (overrides the config file).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Serialize)]
struct NamedGraph<'t> {
    name: &'t str,
    #[serde(flatten)]
    graph: GraphSummary,
}

/// Run a parsed command line, writing results to `out`.
///
/// Returns `false` when `check` found a structurally invalid test.
pub fn run(cli: &Cli, config: &CliConfig, out: &mut dyn Write) -> Result<bool> {
    match &cli.command {
        CliCommand::Check { file } => check(&load_suite(file)?, out),
        CliCommand::Graph { file, test, format } => {
            let tests = load_suite(file)?;
            let selected: Vec<&RecordedTest> = match test {
                Some(name) => tests.iter().filter(|t| &t.name == name).collect(),
                None => tests.iter().collect(),
            };
            if selected.is_empty() {
                if let Some(name) = test {
                    bail!("No test named '{}' in {}", name, file.display());
                }
            }
            graph(&selected, format.unwrap_or(config.format), out)?;
            Ok(true)
        }
    }
}

fn check(tests: &[RecordedTest], out: &mut dyn Write) -> Result<bool> {
    let mut all_ok = true;
    for test in tests {
        match build_tree(&test.commands) {
            Ok(graph) => writeln!(out, "ok     {} ({} commands)", test.name, graph.len())?,
            Err(err) => {
                all_ok = false;
                tracing::debug!(test = %test.name, error = %err, "invalid control flow");
                writeln!(out, "error  {}: {}", test.name, err)?;
            }
        }
    }
    Ok(all_ok)
}

fn graph(tests: &[&RecordedTest], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let mut named = Vec::new();
    for test in tests {
        let graph = build_tree(&test.commands)
            .with_context(|| format!("Test '{}' has invalid control flow", test.name))?;
        match format {
            OutputFormat::Text => {
                writeln!(out, "# {}", test.name)?;
                let text = format_graph(&graph);
                if !text.is_empty() {
                    writeln!(out, "{}", text)?;
                }
            }
            OutputFormat::Json => named.push(NamedGraph {
                name: &test.name,
                graph: GraphSummary::from_graph(&graph),
            }),
        }
    }
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &named)?;
        writeln!(out)?;
    }
    Ok(())
}
