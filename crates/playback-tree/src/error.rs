//! Structural errors raised while building a playback tree.
//!
//! Every error aborts the build. Indices refer to positions in the input
//! command sequence.

use std::fmt;

use playback_types::Keyword;
use thiserror::Error;

/// Why a build was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A block was still open when the sequence ran out.
    #[error("incomplete block at {keyword} (command {index})")]
    MalformedBlock { keyword: Keyword, index: usize },

    /// A keyword appeared where its enclosing block does not allow it.
    #[error("{reason} (command {index})")]
    MisplacedKeyword {
        keyword: Keyword,
        index: usize,
        reason: Misplacement,
    },

    /// The arms of an `if` chain are in an invalid order.
    #[error("{reason} (block closed at command {index})")]
    InvalidElseOrder { index: usize, reason: ElseOrder },
}

impl TreeError {
    /// Position in the input sequence the error points at.
    ///
    /// For [`TreeError::MalformedBlock`] this is the unmatched opener; for
    /// [`TreeError::InvalidElseOrder`] it is the `end` closing the block.
    pub fn index(&self) -> usize {
        match self {
            TreeError::MalformedBlock { index, .. }
            | TreeError::MisplacedKeyword { index, .. }
            | TreeError::InvalidElseOrder { index, .. } => *index,
        }
    }

    /// The keyword the error is about, when there is a single one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TreeError::MalformedBlock { keyword, .. }
            | TreeError::MisplacedKeyword { keyword, .. } => Some(*keyword),
            TreeError::InvalidElseOrder { .. } => None,
        }
    }
}

/// Detail for [`TreeError::MisplacedKeyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misplacement {
    /// `else` or `elseIf` whose innermost block is not an `if`.
    ElseOutsideIf,
    /// `repeatIf` whose innermost block is not a `do`.
    RepeatIfWithoutDo,
    /// `end` with no block open.
    EndWithoutOpening,
}

impl fmt::Display for Misplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Misplacement::ElseOutsideIf => write!(f, "an else / elseIf used outside of an if block"),
            Misplacement::RepeatIfWithoutDo => write!(f, "a repeatIf used without a do block"),
            Misplacement::EndWithoutOpening => write!(f, "use of end without an opening keyword"),
        }
    }
}

/// Detail for [`TreeError::InvalidElseOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElseOrder {
    /// More than one `else` in a single `if` block.
    TooManyElse,
    /// An `elseIf` after the block's `else`.
    ElseIfAfterElse,
}

impl fmt::Display for ElseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElseOrder::TooManyElse => write!(f, "too many else commands used"),
            ElseOrder::ElseIfAfterElse => write!(f, "incorrect command order of elseIf / else"),
        }
    }
}
