//! Structural validation: the first of the two build passes.
//!
//! Scans the commands left to right, creates one node per command and
//! assigns each node its nesting level. Fails on the first structural
//! problem:
//!
//! - **Unclosed blocks**: an opener with no matching `end`
//! - **Misplaced keywords**: `else`/`elseIf` outside an `if`, `repeatIf`
//!   outside a `do`, `end` with nothing open
//! - **Arm order**: two `else` commands between an `if` and its `end`, or an
//!   `elseIf` after the `else` (nested blocks count too)

mod block_tracker;

use playback_types::{Arm, CommandKind, Keyword, LoopTest, Step};

use crate::block::BlockKind;
use crate::error::{ElseOrder, Misplacement, TreeError};
use crate::node::CommandNode;

use block_tracker::BlockTracker;

/// One validation run over a command sequence.
pub(crate) struct ValidationPass<'a, C> {
    commands: &'a [C],
    blocks: BlockTracker,
    level: usize,
    nodes: Vec<CommandNode<'a, C>>,
}

impl<'a, C: Step> ValidationPass<'a, C> {
    pub fn new(commands: &'a [C]) -> Self {
        Self {
            commands,
            blocks: BlockTracker::new(),
            level: 0,
            nodes: Vec::with_capacity(commands.len()),
        }
    }

    /// Validate every command and return the leveled nodes in input order.
    pub fn run(mut self) -> Result<Vec<CommandNode<'a, C>>, TreeError> {
        let commands = self.commands;
        for (index, command) in commands.iter().enumerate() {
            self.visit(index, command)?;
        }

        if let Some(block) = self.blocks.innermost() {
            return Err(TreeError::MalformedBlock {
                keyword: block.kind.keyword(),
                index: block.index,
            });
        }

        Ok(self.nodes)
    }

    fn visit(&mut self, index: usize, command: &'a C) -> Result<(), TreeError> {
        match command.kind() {
            CommandKind::Opening(opener) => self.open_block(opener.into(), index, command),
            CommandKind::LoopTest(LoopTest::While) => {
                if self.blocks.innermost_kind() == Some(BlockKind::Do) {
                    // Post-condition of the enclosing do loop.
                    self.push_node(command, self.level);
                } else {
                    self.open_block(BlockKind::While, index, command);
                }
            }
            CommandKind::LoopTest(LoopTest::RepeatIf) => {
                if self.blocks.innermost_kind() != Some(BlockKind::Do) {
                    return Err(misplaced(Keyword::RepeatIf, index, Misplacement::RepeatIfWithoutDo));
                }
                self.push_node(command, self.level);
            }
            CommandKind::BranchArm(arm) => {
                let level = match self.blocks.innermost() {
                    Some(block) if block.kind == BlockKind::If => block.level,
                    _ => return Err(misplaced(arm.into(), index, Misplacement::ElseOutsideIf)),
                };
                // Arms sit level with their `if`; the arm's body stays one deeper.
                self.push_node(command, level);
            }
            CommandKind::BlockEnd => {
                let Some(block) = self.blocks.close() else {
                    return Err(misplaced(Keyword::End, index, Misplacement::EndWithoutOpening));
                };
                if block.kind == BlockKind::If {
                    let arms = arms_in(&self.commands[block.index..index]);
                    check_arm_order(&arms, index)?;
                }
                self.level = block.level;
                self.push_node(command, self.level);
            }
            CommandKind::Ordinary => self.push_node(command, self.level),
        }
        Ok(())
    }

    fn open_block(&mut self, kind: BlockKind, index: usize, command: &'a C) {
        self.blocks.open(kind, index, self.level);
        self.push_node(command, self.level);
        self.level += 1;
    }

    fn push_node(&mut self, command: &'a C, level: usize) {
        self.nodes.push(CommandNode::new(command, level));
    }
}

fn misplaced(keyword: Keyword, index: usize, reason: Misplacement) -> TreeError {
    TreeError::MisplacedKeyword {
        keyword,
        index,
        reason,
    }
}

/// Every `elseIf`/`else` in `segment`, nested blocks included.
fn arms_in<C: Step>(segment: &[C]) -> Vec<Arm> {
    segment
        .iter()
        .filter_map(|command| match command.kind() {
            CommandKind::BranchArm(arm) => Some(arm),
            _ => None,
        })
        .collect()
}

/// At most one `else`, and if present it is the last arm.
fn check_arm_order(arms: &[Arm], end_index: usize) -> Result<(), TreeError> {
    let elses = arms.iter().filter(|arm| **arm == Arm::Else).count();
    let reason = if elses > 1 {
        ElseOrder::TooManyElse
    } else if elses == 1 && arms.last() != Some(&Arm::Else) {
        ElseOrder::ElseIfAfterElse
    } else {
        return Ok(());
    };
    Err(TreeError::InvalidElseOrder {
        index: end_index,
        reason,
    })
}
