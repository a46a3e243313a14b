//! Forward searches over the leveled node list.
//!
//! Both searches start after `from` and stop at the end of the list; running
//! off the end is a plain `None`.

use playback_types::Step;

use crate::node::{CommandNode, NodeId};

/// Nearest later node at `level`, whatever its kind.
///
/// From an `if` or `elseIf` this finds the next arm of the chain or, failing
/// that, the chain's `end`.
pub(super) fn first_node_at_level<C: Step + ?Sized>(
    nodes: &[CommandNode<'_, C>],
    from: usize,
    level: usize,
) -> Option<NodeId> {
    find_after(nodes, from, |node| node.level == level)
}

/// Nearest later `end` at `level`, skipping sibling arms.
pub(super) fn first_end_node_at_level<C: Step + ?Sized>(
    nodes: &[CommandNode<'_, C>],
    from: usize,
    level: usize,
) -> Option<NodeId> {
    find_after(nodes, from, |node| node.level == level && node.command.kind().is_end())
}

fn find_after<'a, C, F>(nodes: &[CommandNode<'a, C>], from: usize, pred: F) -> Option<NodeId>
where
    C: ?Sized,
    F: Fn(&CommandNode<'a, C>) -> bool,
{
    nodes
        .iter()
        .enumerate()
        .skip(from + 1)
        .find(|(_, node)| pred(*node))
        .map(|(index, _)| NodeId(index))
}
