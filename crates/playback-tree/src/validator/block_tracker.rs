//! Open-block tracking for validation.
//!
//! Tracks which blocks enclose the command being validated. Unlike the
//! linker's stack this one remembers where each block opened, so errors can
//! point at the culprit and the else-order check knows where its `if` began.

use crate::block::BlockKind;

/// A block opened during validation and not yet closed.
#[derive(Debug, Clone)]
pub(crate) struct OpenBlock {
    pub kind: BlockKind,
    /// Index of the opening command.
    pub index: usize,
    /// Level of the opening command; its body sits one deeper.
    pub level: usize,
}

/// Stack of open blocks, innermost last.
#[derive(Debug, Default)]
pub(crate) struct BlockTracker {
    frames: Vec<OpenBlock>,
}

impl BlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a block whose opening command sits at `level`.
    pub fn open(&mut self, kind: BlockKind, index: usize, level: usize) {
        self.frames.push(OpenBlock { kind, index, level });
    }

    /// Close the innermost block.
    pub fn close(&mut self) -> Option<OpenBlock> {
        self.frames.pop()
    }

    pub fn innermost(&self) -> Option<&OpenBlock> {
        self.frames.last()
    }

    pub fn innermost_kind(&self) -> Option<BlockKind> {
        self.innermost().map(|frame| frame.kind)
    }

    /// Number of open blocks.
    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
