//! Graph case file parser and runner.
//!
//! Parses the `tests/graph/*.test` format:
//!
//! ```text
//! # test: if_click_end
//! # expect: ok
//! ---
//! if
//! click
//! end
//! ---
//! 0 if L0 right=1 left=2
//! 1 click L1 next=2
//! 2 end L0
//! ===
//! ```
//!
//! Input is one command name per line. With `# expect: error` the expected
//! section holds the error message. A `# skip: reason` header line skips the
//! case.

use std::fmt;

use playback_tree::{build_tree, format_graph};
use playback_types::Command;

use crate::{CaseResult, CaseSummary};

/// A single graph test case.
#[derive(Debug, Clone)]
pub struct GraphTestCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// Command names, in order.
    pub commands: Vec<String>,
    /// What building the graph should produce.
    pub expected: GraphExpectation,
    /// Reason to skip, from `# skip:`.
    pub skip: Option<String>,
}

/// What we expect from building a graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphExpectation {
    /// Expected graph rendered by `format_graph`.
    Ok(String),
    /// Expected error message.
    Error(String),
}

impl GraphExpectation {
    /// "a graph" or "an error", for failure reports.
    pub fn outcome(&self) -> &'static str {
        match self {
            GraphExpectation::Ok(_) => "a graph",
            GraphExpectation::Error(_) => "an error",
        }
    }
}

impl fmt::Display for GraphExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphExpectation::Ok(graph) => f.write_str(graph),
            GraphExpectation::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// Parse the *.test file format into test cases.
pub fn parse_graph_tests(content: &str) -> Vec<GraphTestCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = lines[i].trim().strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let start_line = i + 1;
        i += 1;

        // Header lines up to the first ---
        let mut expect_ok = true;
        let mut skip = None;
        while i < lines.len() && lines[i].trim() != "---" {
            let line = lines[i].trim();
            if let Some(expect) = line.strip_prefix("# expect:") {
                expect_ok = expect.trim() == "ok";
            } else if let Some(reason) = line.strip_prefix("# skip:") {
                skip = Some(reason.trim().to_string());
            }
            i += 1;
        }
        i += 1; // skip the ---

        // Commands until the next ---
        let mut commands = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            let command = lines[i].trim();
            if !command.is_empty() {
                commands.push(command.to_string());
            }
            i += 1;
        }
        i += 1; // skip the ---

        // Expected until ===
        let mut expected_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            expected_lines.push(lines[i].trim());
            i += 1;
        }
        i += 1; // skip the ===

        let expected_str = expected_lines.join("\n").trim().to_string();
        let expected = if expect_ok {
            GraphExpectation::Ok(expected_str)
        } else {
            GraphExpectation::Error(expected_str)
        };

        cases.push(GraphTestCase {
            name,
            line_number: start_line,
            commands,
            expected,
            skip,
        });
    }

    cases
}

impl GraphTestCase {
    /// Run this test case and return the result.
    pub fn run(&self) -> CaseResult {
        if let Some(reason) = &self.skip {
            return CaseResult::Skip {
                reason: reason.clone(),
            };
        }

        let commands = Command::sequence(self.commands.iter().map(String::as_str));
        let actual = match build_tree(&commands) {
            Ok(graph) => GraphExpectation::Ok(format_graph(&graph)),
            Err(err) => GraphExpectation::Error(err.to_string()),
        };

        match (normalize(&self.expected), normalize(&actual)) {
            (expected, actual) if expected == actual => CaseResult::Pass,
            (GraphExpectation::Ok(expected), GraphExpectation::Ok(actual))
            | (GraphExpectation::Error(expected), GraphExpectation::Error(actual)) => {
                CaseResult::Mismatch {
                    line: first_difference(&expected, &actual),
                    expected,
                    actual,
                }
            }
            (expected, actual) => CaseResult::WrongOutcome { expected, actual },
        }
    }
}

/// Collapse blank lines and surrounding whitespace so layout in the case file
/// does not matter.
fn normalize(expectation: &GraphExpectation) -> GraphExpectation {
    let squash = |s: &str| {
        s.lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    };
    match expectation {
        GraphExpectation::Ok(s) => GraphExpectation::Ok(squash(s)),
        GraphExpectation::Error(s) => GraphExpectation::Error(squash(s)),
    }
}

/// First output line (1-indexed) where the two texts disagree.
fn first_difference(expected: &str, actual: &str) -> usize {
    let mut expected = expected.lines();
    let mut actual = actual.lines();
    let mut line = 1;
    while let (Some(e), Some(a)) = (expected.next(), actual.next()) {
        if e != a {
            return line;
        }
        line += 1;
    }
    line
}

/// Run all graph test cases and return a summary.
pub fn run_graph_tests(cases: &[GraphTestCase]) -> CaseSummary {
    let mut summary = CaseSummary::new();

    for case in cases {
        let result = case.run();
        summary.record(&case.name, case.line_number, result);
    }

    summary
}
