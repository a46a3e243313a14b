//! Graph nodes.
//!
//! Nodes live in one arena owned by the graph and refer to each other by
//! [`NodeId`]. A node's id equals the index of its command in the input.

use std::fmt;

/// Index of a node in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Position of the node (and its command) in the sequence.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One step of the playback graph.
///
/// Exactly one wiring shape is populated once a graph is built: `next` alone,
/// `left` together with `right`, or nothing at all (terminal).
#[derive(Debug)]
pub struct CommandNode<'a, C: ?Sized> {
    /// The command this node executes. Borrowed from the input sequence.
    pub command: &'a C,
    /// Nesting depth; 0 at top level.
    pub level: usize,
    /// Unconditional continuation.
    pub next: Option<NodeId>,
    /// Branch not taken, or loop exit.
    pub left: Option<NodeId>,
    /// Branch taken, loop body entry, or loop repeat.
    pub right: Option<NodeId>,
}

impl<'a, C: ?Sized> CommandNode<'a, C> {
    pub(crate) fn new(command: &'a C, level: usize) -> Self {
        Self {
            command,
            level,
            next: None,
            left: None,
            right: None,
        }
    }

    /// How an engine leaves this node.
    pub fn link(&self) -> Link {
        match (self.next, self.left, self.right) {
            (Some(next), _, _) => Link::Next(next),
            (None, Some(left), Some(right)) => Link::Branch { left, right },
            _ => Link::Terminal,
        }
    }

    /// True if the engine has to evaluate a condition here.
    pub fn is_branch(&self) -> bool {
        matches!(self.link(), Link::Branch { .. })
    }
}

// Manual impl: a derive would require `C: Clone`.
impl<C: ?Sized> Clone for CommandNode<'_, C> {
    fn clone(&self) -> Self {
        Self {
            command: self.command,
            level: self.level,
            next: self.next,
            left: self.left,
            right: self.right,
        }
    }
}

/// Outgoing wiring of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Continue at this node.
    Next(NodeId),
    /// Evaluate the node's condition: `right` when it holds, `left` otherwise.
    Branch { left: NodeId, right: NodeId },
    /// Playback ends after this node.
    Terminal,
}

impl Link {
    /// Every node this link can lead to.
    pub fn targets(&self) -> impl Iterator<Item = NodeId> {
        let (a, b) = match *self {
            Link::Next(next) => (Some(next), None),
            Link::Branch { left, right } => (Some(right), Some(left)),
            Link::Terminal => (None, None),
        };
        a.into_iter().chain(b)
    }
}
