//! Block kinds shared by both passes.

use playback_types::{Keyword, Opener};

/// Keyword that opened a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    If,
    Do,
    Times,
    /// A `while` that opens its own loop, as opposed to the post-condition
    /// of a `do` block.
    While,
}

impl BlockKind {
    pub fn keyword(self) -> Keyword {
        match self {
            BlockKind::If => Keyword::If,
            BlockKind::Do => Keyword::Do,
            BlockKind::Times => Keyword::Times,
            BlockKind::While => Keyword::While,
        }
    }

    /// Loops that test their condition before the body: `while` and `times`.
    pub fn is_pre_condition_loop(self) -> bool {
        matches!(self, BlockKind::While | BlockKind::Times)
    }
}

impl From<Opener> for BlockKind {
    fn from(opener: Opener) -> Self {
        match opener {
            Opener::If => BlockKind::If,
            Opener::Do => BlockKind::Do,
            Opener::Times => BlockKind::Times,
        }
    }
}
