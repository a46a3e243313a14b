//! Plain renderings of a playback graph, for snapshots and tooling.
//!
//! The text form is one line per node:
//!
//! ```text
//! 0 if L0 right=1 left=2
//! 1 click L1 next=2
//! 2 end L0
//! ```

use playback_types::Step;
use serde::Serialize;

use crate::node::Link;
use crate::tree::PlaybackGraph;

/// Render a graph as text, one node per line.
pub fn format_graph<C: Step>(graph: &PlaybackGraph<'_, C>) -> String {
    graph
        .iter()
        .map(|node| {
            let head = format!("{} {} L{}", node.id(), node.command().name(), node.level());
            match node.link() {
                Link::Next(next) => format!("{head} next={next}"),
                Link::Branch { left, right } => format!("{head} right={right} left={left}"),
                Link::Terminal => head,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serializable snapshot of a whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub nodes: Vec<NodeSummary>,
}

/// Serializable snapshot of one node. Links are node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub index: usize,
    pub name: String,
    pub level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<usize>,
}

impl GraphSummary {
    pub fn from_graph<C: Step>(graph: &PlaybackGraph<'_, C>) -> Self {
        let nodes = graph
            .iter()
            .map(|node| {
                let raw = node.node();
                NodeSummary {
                    index: node.id().index(),
                    name: node.command().name().to_string(),
                    level: node.level(),
                    next: raw.next.map(|id| id.index()),
                    left: raw.left.map(|id| id.index()),
                    right: raw.right.map(|id| id.index()),
                }
            })
            .collect();
        Self { nodes }
    }
}
