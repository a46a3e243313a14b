//! Recorded commands.

use serde::{Deserialize, Serialize};

use crate::keyword::CommandKind;

/// Anything that can be placed in a playback tree.
///
/// The tree builder only looks at the name. Everything else a step carries
/// (targets, values, locators) is opaque and belongs to the engine that
/// executes it.
pub trait Step {
    /// Command name: a control-flow keyword or an arbitrary step identifier.
    fn name(&self) -> &str;

    /// Control-flow classification of this step.
    fn kind(&self) -> CommandKind {
        CommandKind::of(self.name())
    }
}

impl<T: Step + ?Sized> Step for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A single recorded test step.
///
/// Serialized the way recorded suites store it: the name lives under the
/// `command` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Identifier assigned by the recorder, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Command name (`click`, `if`, `end`, ...).
    #[serde(rename = "command", alias = "name")]
    pub name: String,
    /// Primary argument (locator or condition expression).
    #[serde(default)]
    pub target: String,
    /// Secondary argument.
    #[serde(default)]
    pub value: String,
    /// Free-form note attached by the author.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Command {
    /// Create a command with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            target: String::new(),
            value: String::new(),
            comment: String::new(),
        }
    }

    /// Set the target argument.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the value argument.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Build a command list from bare names. Handy in tests.
    pub fn sequence<I, S>(names: I) -> Vec<Command>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Command::new).collect()
    }
}

impl Step for Command {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Step for str {
    fn name(&self) -> &str {
        self
    }
}

impl Step for String {
    fn name(&self) -> &str {
        self
    }
}
