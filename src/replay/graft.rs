//! Finding where a replayed run attaches to the output tree.

use super::Action;
use crate::dom::{NodeId, Tree, node_equal};
use crate::position::{Position, depth_equal, equal, position};

/// Locate the graft point for a run: a node already in the output (the append
/// point) and the prototype's ancestor it stands for. The ancestors strictly
/// between the prototype leaf and that ancestor are the shells the replayer
/// rebuilds around the run.
///
/// Insert runs may only attach where the output position matches the
/// prototype's exactly, searching the whole built body rightmost-first. Every
/// other run attaches along the rightmost frontier, the growing edge of the
/// output. The output body itself is always the last candidate and always
/// matches the prototype's body, so a run under `<body>` cannot fail to find
/// a home.
pub(crate) fn graft_point(
    out: &Tree,
    out_body: NodeId,
    src: &Tree,
    proto: NodeId,
    action: Action,
    pos: &Position,
) -> Option<(NodeId, NodeId)> {
    let mut candidates = if action == Action::Insert {
        let mut found = Vec::new();
        for level in pos {
            matching_nodes(out, out_body, src, level.node, pos.len(), &mut found);
        }
        found
    } else {
        out.frontier()
    };
    candidates.push(out_body);

    for cand in candidates {
        let cand_pos = position(out, cand);
        let mut anc = proto;
        while src.parent(anc).is_some() && !src.is_tag(anc, "html") {
            if leaves_equal(out, cand, &cand_pos, src, anc, action) {
                return Some((cand, anc));
            }
            match src.parent(anc) {
                Some(parent) => anc = parent,
                None => break,
            }
        }
    }
    None
}

/// Collect nodes in the built output equal to `target`, scanning elements at
/// most `depth` levels deep, later siblings before earlier ones and children
/// before their parent.
fn matching_nodes(
    out: &Tree,
    node: NodeId,
    src: &Tree,
    target: NodeId,
    depth: usize,
    found: &mut Vec<NodeId>,
) {
    if depth > 0 {
        for &child in out.children(node).iter().rev() {
            if out.is_element(child) {
                matching_nodes(out, child, src, target, depth - 1, found);
            }
        }
    }
    if node_equal(out.kind(node), src.kind(target)) {
        found.push(node);
    }
}

fn leaves_equal(
    out: &Tree,
    cand: NodeId,
    cand_pos: &Position,
    src: &Tree,
    anc: NodeId,
    action: Action,
) -> bool {
    if !out.is_element(cand) || !src.is_element(anc) {
        return false;
    }
    if out.is_tag(cand, "body") && src.is_tag(anc, "body") {
        return true;
    }
    if !node_equal(out.kind(cand), src.kind(anc)) {
        return false;
    }
    let anc_pos = position(src, anc);
    if action == Action::Insert {
        return equal(cand_pos, &anc_pos);
    }
    if !depth_equal(cand_pos, &anc_pos) {
        return false;
    }
    // a candidate behind the desired slot would graft the run before content
    // the walk has already passed
    match (cand_pos.first(), anc_pos.first()) {
        (Some(c), Some(a)) => c.nodes_before >= a.nodes_before,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::Config;
    use crate::dom::parse_fragment;

    fn parse(raw: &str) -> Tree { parse_fragment(raw, &Config::default()).unwrap() }

    #[test]
    fn frontier_run_lands_on_matching_ancestor() {
        let out = parse("<ul><li>A</li></ul>");
        let out_body = out.body().unwrap();
        let src = parse("<ul><li>A</li><li>B</li></ul>");
        let src_body = src.body().unwrap();
        let src_ul = src.children(src_body)[0];
        let src_li_b = src.children(src_ul)[1];
        let text_b = src.children(src_li_b)[0];

        let pos = position(&src, text_b);
        let (point, ancestor) =
            graft_point(&out, out_body, &src, text_b, Action::Delete, &pos).unwrap();
        // the existing ul is the deepest structure both versions share
        assert_eq!(point, out.children(out_body)[0]);
        assert_eq!(ancestor, src_ul);
    }

    #[test]
    fn insert_requires_exact_position() {
        let out = parse("<ul><li>A</li></ul>");
        let out_body = out.body().unwrap();
        let out_ul = out.children(out_body)[0];
        let src = parse("<ul><li>A</li><li>B</li></ul>");
        let src_body = src.body().unwrap();
        let src_ul = src.children(src_body)[0];
        let src_li_b = src.children(src_ul)[1];
        let text_b = src.children(src_li_b)[0];

        let pos = position(&src, text_b);
        let (point, ancestor) =
            graft_point(&out, out_body, &src, text_b, Action::Insert, &pos).unwrap();
        // the first li of the output is at position 0, the prototype li at 1,
        // so the match falls through to the ul
        assert_eq!(point, out_ul);
        assert_eq!(ancestor, src_ul);
    }

    #[test]
    fn body_is_the_longstop() {
        let out = parse("");
        let out_body = out.body().unwrap();
        let src = parse("<p>x</p>");
        let src_body = src.body().unwrap();
        let p = src.children(src_body)[0];
        let text = src.children(p)[0];

        let pos = position(&src, text);
        let (point, ancestor) =
            graft_point(&out, out_body, &src, text, Action::Insert, &pos).unwrap();
        assert_eq!(point, out_body);
        assert_eq!(ancestor, src_body);
    }
}
