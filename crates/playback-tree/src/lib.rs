//! playback-tree: the control-flow core of test playback.
//!
//! A recorded test is a flat list of steps. Some steps are markers
//! (`if`/`elseIf`/`else`/`end`, `while`, `times`, `do`/`repeatIf`) that give the
//! list block structure. This crate turns such a list into a graph an engine
//! can walk:
//!
//! - **Validator**: one pass that checks block structure and assigns every
//!   step a nesting level
//! - **Linker**: one pass over the leveled nodes that wires `next`, `left`
//!   and `right` pointers
//! - **PlaybackTree**: runs both passes and hands out the finished graph
//!
//! Nothing here executes steps or evaluates conditions. An engine follows
//! `next` unconditionally and picks `right` (taken) or `left` (not taken)
//! at branch nodes.
//!
//! ```
//! use playback_tree::{build_tree, Link};
//! use playback_types::Command;
//!
//! let commands = Command::sequence(["if", "click", "end"]);
//! let graph = build_tree(&commands)?;
//! let entry = graph.entry().expect("non-empty");
//! assert!(matches!(entry.link(), Link::Branch { .. }));
//! # Ok::<(), playback_tree::TreeError>(())
//! ```

mod block;
pub mod error;
pub mod format;
mod linker;
pub mod node;
pub mod tree;
mod validator;

pub use error::{ElseOrder, Misplacement, TreeError};
pub use format::{format_graph, GraphSummary, NodeSummary};
pub use node::{CommandNode, Link, NodeId};
pub use tree::{build_tree, NodeRef, PlaybackGraph, PlaybackTree};
