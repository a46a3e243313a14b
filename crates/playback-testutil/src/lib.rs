//! Test utilities for playback trees.
//!
//! Provides the parser and runner for `tests/graph/*.test` case files:
//! a list of command names and the graph they are expected to link into
//! (or the error they are expected to raise).

pub mod graph;

use std::fmt;

use graph::GraphExpectation;

/// The result of running one graph case.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseResult {
    Pass,
    /// A graph was expected and the build failed, or the other way round.
    WrongOutcome {
        expected: GraphExpectation,
        actual: GraphExpectation,
    },
    /// Same outcome, different text. `line` is the first differing output
    /// line (1-indexed).
    Mismatch {
        expected: String,
        actual: String,
        line: usize,
    },
    Skip { reason: String },
}

impl CaseResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseResult::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(
            self,
            CaseResult::WrongOutcome { .. } | CaseResult::Mismatch { .. }
        )
    }
}

/// A failed case, with where it lives in its file.
#[derive(Debug, Clone)]
pub struct CaseFailure {
    pub name: String,
    pub line: usize,
    pub result: CaseResult,
}

/// Tally of a case file run.
#[derive(Debug, Default)]
pub struct CaseSummary {
    pub passed: usize,
    pub skipped: usize,
    pub failures: Vec<CaseFailure>,
}

impl CaseSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, result: CaseResult) {
        match result {
            CaseResult::Pass => self.passed += 1,
            CaseResult::Skip { .. } => self.skipped += 1,
            result => self.failures.push(CaseFailure {
                name: name.into(),
                line,
                result,
            }),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed() + self.skipped
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for CaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\n{} graph cases: {} passed, {} failed, {} skipped",
            self.total(),
            self.passed,
            self.failed(),
            self.skipped
        )?;

        for failure in &self.failures {
            writeln!(f, "\n{} (line {})", failure.name, failure.line)?;
            match &failure.result {
                CaseResult::WrongOutcome { expected, actual } => {
                    writeln!(f, "  expected {}, got {}", expected.outcome(), actual.outcome())?;
                    for line in actual.to_string().lines() {
                        writeln!(f, "    {}", line)?;
                    }
                }
                CaseResult::Mismatch {
                    expected,
                    actual,
                    line,
                } => {
                    writeln!(f, "  output differs from line {}", line)?;
                    write_marked(f, "expected", expected, *line)?;
                    write_marked(f, "actual", actual, *line)?;
                }
                CaseResult::Pass | CaseResult::Skip { .. } => {}
            }
        }
        Ok(())
    }
}

/// Print `text` indented, with `>` on line `mark`.
fn write_marked(f: &mut fmt::Formatter<'_>, label: &str, text: &str, mark: usize) -> fmt::Result {
    writeln!(f, "  {}:", label)?;
    for (i, line) in text.lines().enumerate() {
        let marker = if i + 1 == mark { '>' } else { ' ' };
        writeln!(f, "   {} {}", marker, line)?;
    }
    Ok(())
}
