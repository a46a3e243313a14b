//! PlaybackTree: builds the executable graph for one recorded test.
//!
//! ```text
//! commands ──► ValidationPass ──► leveled nodes ──► LinkingPass ──► PlaybackGraph
//!               (levels, errors)                     (next/left/right)
//! ```
//!
//! Both passes keep their state in locals of a single `build` call, so a
//! tree can be built any number of times, from any number of threads.

use std::fmt;

use playback_types::Step;

use crate::error::TreeError;
use crate::linker::LinkingPass;
use crate::node::{CommandNode, Link, NodeId};
use crate::validator::ValidationPass;

/// Builder for the playback graph of a command sequence.
#[derive(Debug)]
pub struct PlaybackTree<'a, C> {
    commands: &'a [C],
}

impl<'a, C: Step> PlaybackTree<'a, C> {
    /// Wrap a command sequence. Nothing is checked until [`build`](Self::build).
    pub fn new(commands: &'a [C]) -> Self {
        Self { commands }
    }

    /// The commands this tree was created from.
    pub fn commands(&self) -> &'a [C] {
        self.commands
    }

    /// Validate the sequence and link it into a graph.
    ///
    /// Either the whole graph is returned or an error; a partially linked
    /// graph is never exposed.
    pub fn build(&self) -> Result<PlaybackGraph<'a, C>, TreeError> {
        let span = tracing::debug_span!("build", commands = self.commands.len());
        let _enter = span.enter();

        let nodes = ValidationPass::new(self.commands).run().inspect_err(|err| {
            tracing::debug!(error = %err, "structural validation failed");
        })?;
        let nodes = LinkingPass::new(nodes).run();

        tracing::debug!(nodes = nodes.len(), "playback graph built");
        Ok(PlaybackGraph { nodes })
    }
}

/// Build the playback graph for `commands` in one call.
pub fn build_tree<C: Step>(commands: &[C]) -> Result<PlaybackGraph<'_, C>, TreeError> {
    PlaybackTree::new(commands).build()
}

/// A linked playback graph.
///
/// Holds one node per input command, in input order. The graph never changes
/// after it is built and can be shared across threads when `C` is `Sync`.
pub struct PlaybackGraph<'a, C> {
    nodes: Vec<CommandNode<'a, C>>,
}

impl<'a, C: Step> PlaybackGraph<'a, C> {
    /// The first node, where playback starts. `None` for an empty test.
    pub fn entry(&self) -> Option<NodeRef<'_, 'a, C>> {
        self.get(NodeId(0))
    }

    /// Cursor at `id`, if it exists.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, 'a, C>> {
        self.nodes.get(id.0).map(|node| NodeRef {
            graph: self,
            id,
            node,
        })
    }

    /// Raw node at `id`.
    pub fn node(&self, id: NodeId) -> Option<&CommandNode<'a, C>> {
        self.nodes.get(id.0)
    }

    /// All nodes in input order.
    pub fn nodes(&self) -> &[CommandNode<'a, C>] {
        &self.nodes
    }

    /// Cursors over every node in input order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_, 'a, C>> {
        self.nodes.iter().enumerate().map(move |(index, node)| NodeRef {
            graph: self,
            id: NodeId(index),
            node,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<C: Step> fmt::Debug for PlaybackGraph<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes.iter().map(|node| (node.command.name(), node.level, node.link())))
            .finish()
    }
}

/// A position in a [`PlaybackGraph`], for engines walking it.
pub struct NodeRef<'g, 'a, C> {
    graph: &'g PlaybackGraph<'a, C>,
    id: NodeId,
    node: &'g CommandNode<'a, C>,
}

impl<'g, 'a, C: Step> NodeRef<'g, 'a, C> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn command(&self) -> &'a C {
        self.node.command
    }

    pub fn level(&self) -> usize {
        self.node.level
    }

    pub fn node(&self) -> &'g CommandNode<'a, C> {
        self.node
    }

    pub fn link(&self) -> Link {
        self.node.link()
    }

    /// Unconditional continuation.
    pub fn next(&self) -> Option<NodeRef<'g, 'a, C>> {
        self.follow(self.node.next)
    }

    /// Where to go when the condition does not hold.
    pub fn left(&self) -> Option<NodeRef<'g, 'a, C>> {
        self.follow(self.node.left)
    }

    /// Where to go when the condition holds.
    pub fn right(&self) -> Option<NodeRef<'g, 'a, C>> {
        self.follow(self.node.right)
    }

    fn follow(&self, id: Option<NodeId>) -> Option<NodeRef<'g, 'a, C>> {
        id.and_then(|id| self.graph.get(id))
    }
}

// Manual impls: derives would require `C: Clone`.
impl<C> Clone for NodeRef<'_, '_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for NodeRef<'_, '_, C> {}

impl<C: Step> fmt::Debug for NodeRef<'_, '_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.node.command.name())
            .field("level", &self.node.level)
            .field("link", &self.node.link())
            .finish()
    }
}

impl<C> PartialEq for NodeRef<'_, '_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playback_types::{Command, Keyword};

    #[test]
    fn empty_sequence_has_no_entry() {
        let commands: Vec<Command> = Vec::new();
        let graph = build_tree(&commands).unwrap();
        assert!(graph.is_empty());
        assert!(graph.entry().is_none());
    }

    #[test]
    fn cursor_follows_branches() {
        let commands = Command::sequence(["if", "click", "end"]);
        let graph = build_tree(&commands).unwrap();

        let entry = graph.entry().unwrap();
        assert_eq!(entry.command().name, "if");
        assert!(entry.next().is_none());

        let taken = entry.right().unwrap();
        assert_eq!(taken.command().name, "click");
        assert_eq!(taken.level(), 1);

        let not_taken = entry.left().unwrap();
        assert_eq!(not_taken.id(), NodeId(2));
        assert_eq!(taken.next(), Some(not_taken));
        assert_eq!(not_taken.link(), Link::Terminal);
    }

    #[test]
    fn build_is_repeatable() {
        let commands = Command::sequence(["while", "type", "end"]);
        let tree = PlaybackTree::new(&commands);
        let first = tree.build().unwrap();
        let second = tree.build().unwrap();
        let links = |g: &PlaybackGraph<'_, Command>| g.iter().map(|n| n.link()).collect::<Vec<_>>();
        assert_eq!(links(&first), links(&second));
    }

    #[test]
    fn failed_build_returns_only_the_error() {
        let commands = Command::sequence(["do", "click"]);
        let err = PlaybackTree::new(&commands).build().unwrap_err();
        assert_eq!(
            err,
            TreeError::MalformedBlock {
                keyword: Keyword::Do,
                index: 0
            }
        );
    }

    #[test]
    fn nodes_borrow_the_input_commands() {
        let commands = Command::sequence(["open", "click"]);
        let graph = build_tree(&commands).unwrap();
        for (node, command) in graph.nodes().iter().zip(&commands) {
            assert!(std::ptr::eq(node.command, command));
        }
    }

    #[test]
    fn graph_is_shareable_across_threads() {
        let commands = Command::sequence(["times", "click", "end"]);
        let graph = build_tree(&commands).unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let entry = graph.entry().unwrap();
                    assert_eq!(entry.right().unwrap().next(), Some(entry));
                });
            }
        });
    }
}
