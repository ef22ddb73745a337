//! Structural fingerprints.
//!
//! A [`Position`] records, for a node and each of its ancestors up to (but
//! excluding) the `body` element, how many element siblings precede it. Two
//! positions from different trees are compared purely by their counts; the
//! node references only serve the graft search, which needs the ancestor at
//! each level.

use crate::dom::{NodeId, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PosLevel {
    pub nodes_before: usize,
    pub node: NodeId,
}

/// Ancestor-level counts, leaf level first.
pub(crate) type Position = Vec<PosLevel>;

/// The position of `node`: one level per ancestor below `body`, each counting
/// the element siblings before it.
pub(crate) fn position(tree: &Tree, node: NodeId) -> Position {
    let mut levels = Vec::new();
    let mut cur = node;
    loop {
        if tree.is_tag(cur, "body") {
            break;
        }
        let Some(parent) = tree.parent(cur) else { break };
        let before = tree
            .children(parent)
            .iter()
            .take_while(|&&sib| sib != cur)
            .filter(|&&sib| tree.is_element(sib))
            .count();
        levels.push(PosLevel { nodes_before: before, node: cur });
        cur = parent;
    }
    levels
}

/// Depth equality: same ancestor-chain length.
pub(crate) fn depth_equal(a: &Position, b: &Position) -> bool { a.len() == b.len() }

/// Full equality: depth plus identical counts at every level.
pub(crate) fn equal(a: &Position, b: &Position) -> bool {
    depth_equal(a, b) && a.iter().zip(b).all(|(x, y)| x.nodes_before == y.nodes_before)
}
