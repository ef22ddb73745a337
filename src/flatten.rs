//! Flattening a tree into diffable atomic units.

use crate::dom::{NodeId, NodeKind, Tree};
use crate::position::{Position, position};

/// Placeholder letter for an empty text leaf, so the node is never invisible
/// to the diff.
pub(crate) const EMPTY_TEXT_SENTINEL: char = '\u{200b}';

/// One atomic diffable unit: a leaf node reference, its structural position,
/// and for text leaves a single scalar of its content.
#[derive(Debug, Clone)]
pub(crate) struct TreeRune {
    pub leaf: NodeId,
    pub letter: Option<char>,
    pub pos: Position,
}

/// Flatten a tree in document order: one rune per Unicode scalar of each text
/// leaf, one opaque rune per non-text leaf. Internal nodes contribute nothing
/// of their own; they are implied by their descendants' positions and rebuilt
/// by the replayer when needed.
pub(crate) fn flatten(tree: &Tree) -> Vec<TreeRune> {
    let mut runes = Vec::with_capacity(1024);
    collect(tree, tree.root(), &mut runes);
    runes
}

fn collect(tree: &Tree, id: NodeId, runes: &mut Vec<TreeRune>) {
    if !tree.is_leaf(id) {
        for &child in tree.children(id) {
            collect(tree, child, runes);
        }
        return;
    }
    let pos = position(tree, id);
    match tree.kind(id) {
        NodeKind::Text { content } if content.is_empty() => {
            runes.push(TreeRune { leaf: id, letter: Some(EMPTY_TEXT_SENTINEL), pos });
        }
        NodeKind::Text { content } => {
            runes.extend(content.chars().map(|letter| TreeRune {
                leaf: id,
                letter: Some(letter),
                pos: pos.clone(),
            }));
        }
        _ => runes.push(TreeRune { leaf: id, letter: None, pos }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::Config;
    use crate::dom::parse_fragment;

    fn parse(raw: &str) -> Tree { parse_fragment(raw, &Config::default()).unwrap() }

    fn letters(runes: &[TreeRune]) -> String {
        runes.iter().filter_map(|r| r.letter).collect()
    }

    #[test]
    fn one_rune_per_scalar_in_document_order() {
        let tree = parse("<ul><li>A</li><li>中文</li></ul>");
        let runes = flatten(&tree);
        // head shell leaf + three text scalars
        assert_eq!(runes.len(), 4);
        assert_eq!(runes[0].letter, None);
        assert_eq!(letters(&runes), "A中文");
        assert_eq!(runes[1].pos.len(), 3);
        assert_eq!(runes[2].pos[1].nodes_before, 1);
        assert_eq!(runes[2].leaf, runes[3].leaf);
    }

    #[test]
    fn non_text_leaves_are_single_opaque_runes() {
        let tree = parse(r#"x<img src="a.png">"#);
        let runes = flatten(&tree);
        assert_eq!(runes.len(), 3); // head, 'x', img
        assert_eq!(runes[2].letter, None);
        assert!(tree.is_tag(runes[2].leaf, "img"));
    }

    #[test]
    fn empty_text_leaf_emits_sentinel() {
        let (mut tree, body) = crate::dom::Tree::synthetic();
        let text = tree.orphan(NodeKind::Text { content: String::new() });
        tree.append_child(body, text);
        let runes = flatten(&tree);
        assert_eq!(runes.last().unwrap().letter, Some(EMPTY_TEXT_SENTINEL));
    }
}
