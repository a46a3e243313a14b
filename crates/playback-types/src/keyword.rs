//! Control-flow keywords and command classification.
//!
//! A recorded test is flat: blocks are delimited by marker commands rather
//! than by nesting in the data. These types name the markers.

use std::fmt;

/// A control-flow keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    ElseIf,
    Else,
    End,
    While,
    Times,
    Do,
    RepeatIf,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 8] = [
        Keyword::If,
        Keyword::ElseIf,
        Keyword::Else,
        Keyword::End,
        Keyword::While,
        Keyword::Times,
        Keyword::Do,
        Keyword::RepeatIf,
    ];

    /// Look up a keyword by its exact command name.
    ///
    /// Names are case-sensitive: `elseIf` is a keyword, `elseif` is an
    /// ordinary command.
    pub fn from_name(name: &str) -> Option<Keyword> {
        match name {
            "if" => Some(Keyword::If),
            "elseIf" => Some(Keyword::ElseIf),
            "else" => Some(Keyword::Else),
            "end" => Some(Keyword::End),
            "while" => Some(Keyword::While),
            "times" => Some(Keyword::Times),
            "do" => Some(Keyword::Do),
            "repeatIf" => Some(Keyword::RepeatIf),
            _ => None,
        }
    }

    /// The command name for this keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::ElseIf => "elseIf",
            Keyword::Else => "else",
            Keyword::End => "end",
            Keyword::While => "while",
            Keyword::Times => "times",
            Keyword::Do => "do",
            Keyword::RepeatIf => "repeatIf",
        }
    }

    /// Keywords whose block repeats: `while`, `times`, `do`.
    pub fn is_loop(&self) -> bool {
        matches!(self, Keyword::While | Keyword::Times | Keyword::Do)
    }

    /// `elseIf` and `else`, the arms that follow an `if`.
    pub fn is_branch_arm(&self) -> bool {
        matches!(self, Keyword::ElseIf | Keyword::Else)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords that always open a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opener {
    If,
    Do,
    Times,
}

/// Secondary arms of an `if` chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    ElseIf,
    Else,
}

/// Loop condition tests.
///
/// `while` is context dependent: inside a `do` block it is the post-condition
/// of that loop, anywhere else it opens a loop of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopTest {
    While,
    RepeatIf,
}

/// Structural role of a command, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Opening(Opener),
    BranchArm(Arm),
    LoopTest(LoopTest),
    BlockEnd,
    Ordinary,
}

impl CommandKind {
    /// Classify a command name.
    pub fn of(name: &str) -> CommandKind {
        match Keyword::from_name(name) {
            Some(keyword) => keyword.into(),
            None => CommandKind::Ordinary,
        }
    }

    /// The keyword behind this kind, if it is a control-flow kind.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            CommandKind::Opening(Opener::If) => Some(Keyword::If),
            CommandKind::Opening(Opener::Do) => Some(Keyword::Do),
            CommandKind::Opening(Opener::Times) => Some(Keyword::Times),
            CommandKind::BranchArm(Arm::ElseIf) => Some(Keyword::ElseIf),
            CommandKind::BranchArm(Arm::Else) => Some(Keyword::Else),
            CommandKind::LoopTest(LoopTest::While) => Some(Keyword::While),
            CommandKind::LoopTest(LoopTest::RepeatIf) => Some(Keyword::RepeatIf),
            CommandKind::BlockEnd => Some(Keyword::End),
            CommandKind::Ordinary => None,
        }
    }

    /// True for every kind except [`CommandKind::Ordinary`].
    pub fn is_control_flow(&self) -> bool {
        !matches!(self, CommandKind::Ordinary)
    }

    /// True for `else` and `elseIf`.
    pub fn is_branch_arm(&self) -> bool {
        matches!(self, CommandKind::BranchArm(_))
    }

    /// True for `end`.
    pub fn is_end(&self) -> bool {
        matches!(self, CommandKind::BlockEnd)
    }
}

impl From<Keyword> for CommandKind {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::If => CommandKind::Opening(Opener::If),
            Keyword::Do => CommandKind::Opening(Opener::Do),
            Keyword::Times => CommandKind::Opening(Opener::Times),
            Keyword::ElseIf => CommandKind::BranchArm(Arm::ElseIf),
            Keyword::Else => CommandKind::BranchArm(Arm::Else),
            Keyword::While => CommandKind::LoopTest(LoopTest::While),
            Keyword::RepeatIf => CommandKind::LoopTest(LoopTest::RepeatIf),
            Keyword::End => CommandKind::BlockEnd,
        }
    }
}

impl From<Arm> for Keyword {
    fn from(arm: Arm) -> Self {
        match arm {
            Arm::ElseIf => Keyword::ElseIf,
            Arm::Else => Keyword::Else,
        }
    }
}
