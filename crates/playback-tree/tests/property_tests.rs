//! Property tests over generated, well-nested command sequences.

use playback_tree::{build_tree, Link, NodeId, TreeError};
use playback_types::{Command, Keyword};
use proptest::prelude::*;

/// A block-structured test, flattened into commands by [`flatten`].
#[derive(Debug, Clone)]
enum Block {
    Step(&'static str),
    If {
        arms: Vec<Vec<Block>>,
        otherwise: Option<Vec<Block>>,
    },
    While(Vec<Block>),
    Times(Vec<Block>),
    Do {
        body: Vec<Block>,
        repeat_if: bool,
    },
}

fn block() -> impl Strategy<Value = Block> {
    let leaf = prop_oneof![Just("open"), Just("click"), Just("type"), Just("assert")]
        .prop_map(Block::Step);
    leaf.prop_recursive(5, 48, 4, |inner| {
        let body = prop::collection::vec(inner, 0..4);
        prop_oneof![
            (prop::collection::vec(body.clone(), 1..4), prop::option::of(body.clone()))
                .prop_map(|(arms, otherwise)| Block::If { arms, otherwise }),
            body.clone().prop_map(Block::While),
            body.clone().prop_map(Block::Times),
            (body, any::<bool>()).prop_map(|(body, repeat_if)| Block::Do { body, repeat_if }),
        ]
    })
}

fn program() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(block(), 0..6).prop_map(|blocks| {
        let mut names = Vec::new();
        flatten_all(&blocks, false, Arms::Any, &mut names);
        names
    })
}

/// Which arms an `if` may record without breaking the order rule of an
/// enclosing `if`, whose span covers everything nested inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Arms {
    /// Inside an `else` body: a later `elseIf` or `else` would follow it.
    IfOnly,
    /// Inside an `if`/`elseIf` body: only `elseIf` may come before the outer arms.
    ElseIfOnly,
    Any,
}

/// `in_do` marks the direct body of a `do`, where a `while` would read as
/// the loop's post-condition; such loops are recorded as `times` instead.
fn flatten(block: &Block, in_do: bool, allowed: Arms, out: &mut Vec<&'static str>) {
    match block {
        Block::Step(name) => out.push(*name),
        Block::If { arms, otherwise } => {
            let arm_count = if allowed == Arms::IfOnly { 1 } else { arms.len() };
            for (i, arm) in arms.iter().take(arm_count).enumerate() {
                out.push(if i == 0 { "if" } else { "elseIf" });
                flatten_all(arm, false, allowed.min(Arms::ElseIfOnly), out);
            }
            if let Some(otherwise) = otherwise.as_ref().filter(|_| allowed == Arms::Any) {
                out.push("else");
                flatten_all(otherwise, false, Arms::IfOnly, out);
            }
            out.push("end");
        }
        Block::While(blocks) => {
            out.push(if in_do { "times" } else { "while" });
            flatten_all(blocks, false, allowed, out);
            out.push("end");
        }
        Block::Times(blocks) => {
            out.push("times");
            flatten_all(blocks, false, allowed, out);
            out.push("end");
        }
        Block::Do { body: blocks, repeat_if } => {
            out.push("do");
            flatten_all(blocks, true, allowed, out);
            out.push(if *repeat_if { "repeatIf" } else { "while" });
            out.push("end");
        }
    }
}

fn flatten_all(blocks: &[Block], in_do: bool, allowed: Arms, out: &mut Vec<&'static str>) {
    for block in blocks {
        flatten(block, in_do, allowed, out);
    }
}

proptest! {
    #[test]
    fn one_node_per_command_in_order(names in program()) {
        let commands = Command::sequence(names.iter().copied());
        let graph = build_tree(&commands).unwrap();

        prop_assert_eq!(graph.len(), names.len());
        for (node, name) in graph.iter().zip(&names) {
            prop_assert_eq!(node.command().name.as_str(), *name);
        }
    }

    #[test]
    fn wiring_shape_is_exclusive_and_in_bounds(names in program()) {
        let commands = Command::sequence(names.iter().copied());
        let graph = build_tree(&commands).unwrap();

        for node in graph.nodes() {
            prop_assert!(!(node.next.is_some() && (node.left.is_some() || node.right.is_some())));
            prop_assert_eq!(node.left.is_some(), node.right.is_some());
            for target in node.link().targets() {
                prop_assert!(target.index() < graph.len());
            }
        }
        if let Some(last) = graph.iter().last() {
            prop_assert_eq!(last.link(), Link::Terminal);
        }
    }

    #[test]
    fn top_level_blocks_start_and_end_at_level_zero(names in program()) {
        let commands = Command::sequence(names.iter().copied());
        let graph = build_tree(&commands).unwrap();

        let mut depth = 0usize;
        for node in graph.iter() {
            let keyword = Keyword::from_name(node.command().name.as_str());
            if keyword == Some(Keyword::End) {
                depth -= 1;
            }
            if depth == 0 {
                prop_assert_eq!(node.level(), 0);
            }
            if matches!(keyword, Some(Keyword::If | Keyword::Do | Keyword::Times))
                || (keyword == Some(Keyword::While) && !is_do_post_condition(&graph, node.id()))
            {
                depth += 1;
            }
        }
    }

    #[test]
    fn branch_nodes_enter_the_following_node(names in program()) {
        let commands = Command::sequence(names.iter().copied());
        let graph = build_tree(&commands).unwrap();

        for node in graph.iter() {
            if let Link::Branch { right, .. } = node.link() {
                if !is_do_post_condition(&graph, node.id()) {
                    prop_assert_eq!(right, NodeId(node.id().index() + 1));
                }
            }
        }
    }

    #[test]
    fn unclosed_prefix_is_malformed(
        names in program(),
        opener in prop_oneof![Just("if"), Just("while"), Just("times")],
    ) {
        let mut all = vec![opener];
        all.extend(names);
        let commands = Command::sequence(all);
        let err = build_tree(&commands).unwrap_err();

        let malformed = matches!(err, TreeError::MalformedBlock { .. });
        prop_assert!(malformed, "expected an incomplete block, got {:?}", err);
        prop_assert_eq!(err.index(), 0);
        prop_assert_eq!(err.keyword().map(|k| k.as_str()), Some(opener));
    }
}

/// A `while` whose `right` points back at an earlier `do`.
fn is_do_post_condition(graph: &playback_tree::PlaybackGraph<'_, Command>, id: NodeId) -> bool {
    graph
        .get(id)
        .and_then(|node| node.right())
        .is_some_and(|target| target.id() < id && target.command().name == "do")
}
