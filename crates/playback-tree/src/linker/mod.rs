//! Pointer resolution: the second build pass.
//!
//! Walks the validated nodes in order and wires each one to its successors.
//! Block context is rebuilt here from scratch; nothing is carried over from
//! validation except the levels.
//!
//! Wiring by command:
//!
//! | command | wiring |
//! |---------|--------|
//! | `do` | `next` = body |
//! | `if`, `elseIf` | `right` = body, `left` = next arm or `end` |
//! | `else` | `next` = body |
//! | `while`, `times` | `right` = body, `left` = loop `end` |
//! | `while` closing a `do` | `right` = the `do`, `left` = loop `end` |
//! | `end` | `next` = following node, or the enclosing block's `end` |
//! | anything else | `next` = following node, the chain's `end`, or the loop header |
//!
//! The last node is never wired.

mod lookup;

use playback_types::{Arm, CommandKind, LoopTest, Opener, Step};

use crate::block::BlockKind;
use crate::node::{CommandNode, NodeId};

use lookup::{first_end_node_at_level, first_node_at_level};

/// A block as seen by the linker.
#[derive(Debug, Clone, Copy)]
struct LinkFrame {
    kind: BlockKind,
    level: usize,
    node: NodeId,
}

/// Pointers computed for one node before they are written back.
#[derive(Debug, Default)]
struct Wiring {
    next: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Wiring {
    fn next(next: Option<NodeId>) -> Self {
        Self {
            next,
            ..Self::default()
        }
    }

    fn branch(right: NodeId, left: Option<NodeId>) -> Self {
        Self {
            next: None,
            left,
            right: Some(right),
        }
    }
}

/// One linking run over validated nodes.
pub(crate) struct LinkingPass<'a, C> {
    nodes: Vec<CommandNode<'a, C>>,
    frames: Vec<LinkFrame>,
}

impl<'a, C: Step> LinkingPass<'a, C> {
    pub fn new(nodes: Vec<CommandNode<'a, C>>) -> Self {
        Self {
            nodes,
            frames: Vec::new(),
        }
    }

    /// Wire every node and hand the nodes back.
    pub fn run(mut self) -> Vec<CommandNode<'a, C>> {
        for index in 0..self.nodes.len() {
            self.link(index);
        }
        self.nodes
    }

    fn link(&mut self, index: usize) {
        let Some(following) = self.nodes.get(index + 1) else {
            return;
        };
        let following_kind = following.command.kind();
        let following_id = NodeId(index + 1);

        let node = &self.nodes[index];
        let id = NodeId(index);
        let level = node.level;

        let wiring = match node.command.kind() {
            CommandKind::Opening(Opener::Do) => {
                self.enter(BlockKind::Do, level, id);
                Wiring::next(Some(following_id))
            }
            CommandKind::Opening(Opener::If) => {
                self.enter(BlockKind::If, level, id);
                Wiring::branch(following_id, first_node_at_level(&self.nodes, index, level))
            }
            CommandKind::BranchArm(Arm::Else) => Wiring::next(Some(following_id)),
            CommandKind::BranchArm(Arm::ElseIf) => {
                Wiring::branch(following_id, first_node_at_level(&self.nodes, index, level))
            }
            CommandKind::LoopTest(LoopTest::While) => match self.innermost() {
                Some(frame) if frame.kind == BlockKind::Do => {
                    // Post-condition: repeat through the `do` header, which
                    // falls through to the body again.
                    Wiring::branch(
                        frame.node,
                        first_end_node_at_level(&self.nodes, index, frame.level),
                    )
                }
                _ => self.enter_loop(BlockKind::While, index, level),
            },
            CommandKind::Opening(Opener::Times) => self.enter_loop(BlockKind::Times, index, level),
            CommandKind::BlockEnd => {
                self.frames.pop();
                match self.innermost() {
                    Some(frame) if following_kind.is_control_flow() => {
                        Wiring::next(first_end_node_at_level(&self.nodes, index, frame.level))
                    }
                    Some(_) => Wiring::next(Some(following_id)),
                    None => Wiring::default(),
                }
            }
            CommandKind::Ordinary | CommandKind::LoopTest(LoopTest::RepeatIf) => {
                match self.innermost() {
                    Some(frame)
                        if frame.kind == BlockKind::If
                            && (following_kind.is_branch_arm() || following_kind.is_end()) =>
                    {
                        // Last step of an arm: skip the remaining arms.
                        Wiring::next(first_end_node_at_level(&self.nodes, index, frame.level))
                    }
                    Some(frame)
                        if frame.kind.is_pre_condition_loop() && following_kind.is_control_flow() =>
                    {
                        // Back to the loop header to test the condition again.
                        Wiring::next(Some(frame.node))
                    }
                    _ => Wiring::next(Some(following_id)),
                }
            }
        };

        let node = &mut self.nodes[index];
        node.next = wiring.next;
        node.left = wiring.left;
        node.right = wiring.right;
        tracing::trace!(index, name = node.command.name(), link = ?node.link(), "linked");
    }

    fn innermost(&self) -> Option<LinkFrame> {
        self.frames.last().copied()
    }

    fn enter(&mut self, kind: BlockKind, level: usize, node: NodeId) {
        self.frames.push(LinkFrame { kind, level, node });
    }

    /// Open a loop that tests before its body (`while`, `times`).
    fn enter_loop(&mut self, kind: BlockKind, index: usize, level: usize) -> Wiring {
        self.enter(kind, level, NodeId(index));
        Wiring::branch(
            NodeId(index + 1),
            first_end_node_at_level(&self.nodes, index, level),
        )
    }
}
