//! Rune-level equality between two flattened versions, and the granularity
//! pass that coarsens the raw edit script.

use log::debug;

use crate::alignment::{Change, EqualityOracle, merge_granular};
use crate::dom::{Tree, shape_equal};
use crate::flatten::TreeRune;
use crate::position::depth_equal;

/// Both flattened versions plus their trees, packaged as the oracle the
/// alignment layer diffs through.
pub(crate) struct DiffSource<'a> {
    pub base_tree: &'a Tree,
    pub base: &'a [TreeRune],
    pub edited_tree: &'a Tree,
    pub edited: &'a [TreeRune],
}

impl EqualityOracle for DiffSource<'_> {
    /// Two runes match when their letters do not disagree, their positions
    /// have the same depth, and their leaf plus immediate parent have the same
    /// shape. Sibling counts are deliberately left out so content that merely
    /// shifted sideways still matches.
    fn equal(&self, i: usize, j: usize) -> bool {
        let a = &self.base[i];
        let b = &self.edited[j];

        if let (Some(x), Some(y)) = (a.letter, b.letter)
            && x != y
        {
            return false;
        }
        if !depth_equal(&a.pos, &b.pos) {
            return false;
        }
        if !shape_equal(self.base_tree.kind(a.leaf), self.edited_tree.kind(b.leaf)) {
            return false;
        }
        match (self.base_tree.parent(a.leaf), self.edited_tree.parent(b.leaf)) {
            (None, None) => true,
            (Some(pa), Some(pb)) => {
                shape_equal(self.base_tree.kind(pa), self.edited_tree.kind(pb))
            }
            _ => false,
        }
    }
}

/// Coarsen the raw edit script: within each group of changes that stay inside
/// one pair of matching text leaves, merge changes separated by at most
/// `granularity` matching runes. Merging never crosses a leaf boundary, so
/// markup in between is unaffected.
pub(crate) fn granular_pass(
    granularity: usize,
    source: &DiffSource<'_>,
    changes: Vec<Change>,
) -> Vec<Change> {
    if granularity == 0 || changes.len() < 2 {
        return changes;
    }

    let same_leaves = |prev: &Change, cur: &Change| {
        let (Some(pa), Some(pb)) = (source.base.get(prev.a), source.edited.get(prev.b)) else {
            return false;
        };
        let (Some(ca), Some(cb)) = (source.base.get(cur.a), source.edited.get(cur.b)) else {
            return false;
        };
        ca.leaf == pa.leaf
            && cb.leaf == pb.leaf
            && source.base_tree.kind(ca.leaf).is_text()
            && source.edited_tree.kind(cb.leaf).is_text()
            && shape_equal(source.base_tree.kind(ca.leaf), source.edited_tree.kind(cb.leaf))
    };

    let mut out = Vec::with_capacity(changes.len());
    let mut group: Vec<Change> = Vec::new();
    for change in changes {
        if let Some(prev) = group.last()
            && !same_leaves(prev, &change)
        {
            out.extend(merge_granular(granularity, std::mem::take(&mut group)));
        }
        group.push(change);
    }
    out.extend(merge_granular(granularity, group));

    debug!("granularity {granularity} pass left {} change(s)", out.len());
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::alignment::diff;
    use crate::config::Config;
    use crate::dom::parse_fragment;
    use crate::flatten::flatten;

    struct Pair {
        base_tree: Tree,
        base: Vec<TreeRune>,
        edited_tree: Tree,
        edited: Vec<TreeRune>,
    }

    impl Pair {
        fn new(base: &str, edited: &str) -> Self {
            let config = Config::default();
            let base_tree = parse_fragment(base, &config).unwrap();
            let edited_tree = parse_fragment(edited, &config).unwrap();
            let base = flatten(&base_tree);
            let edited = flatten(&edited_tree);
            Pair { base_tree, base, edited_tree, edited }
        }

        fn source(&self) -> DiffSource<'_> {
            DiffSource {
                base_tree: &self.base_tree,
                base: &self.base,
                edited_tree: &self.edited_tree,
                edited: &self.edited,
            }
        }
    }

    #[test]
    fn identical_fragments_diff_to_nothing() {
        let pair = Pair::new("<p>same</p>", "<p>same</p>");
        let source = pair.source();
        assert_eq!(diff(pair.base.len(), pair.edited.len(), &source), vec![]);
    }

    #[test]
    fn letters_in_different_wrappers_do_not_match() {
        let pair = Pair::new("abc", "<i>abc</i>");
        let source = pair.source();
        // index 0 is the head shell leaf on both sides
        assert!(source.equal(0, 0));
        assert!(!source.equal(1, 1));
    }

    #[test]
    fn shifted_identical_content_still_matches() {
        let pair = Pair::new("<ul><li>A</li><li>B</li></ul>", "<ul><li>B</li></ul>");
        let source = pair.source();
        // base 'B' sits in the second li, edited 'B' in the first; only depth
        // and shape count, so they compare equal.
        assert!(source.equal(2, 1));
    }

    #[test]
    fn granular_merges_within_one_text_leaf() {
        let pair = Pair::new("<p>hElLo</p>", "<p>Hello</p>");
        let source = pair.source();
        let raw = diff(pair.base.len(), pair.edited.len(), &source);
        assert!(raw.len() >= 2);

        let merged = granular_pass(3, &source, raw);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].del, 4);
        assert_eq!(merged[0].ins, 4);
    }

    #[test]
    fn granular_never_crosses_leaf_boundaries() {
        let pair = Pair::new("<p>ax</p><p>bx</p>", "<p>ay</p><p>by</p>");
        let source = pair.source();
        let raw = diff(pair.base.len(), pair.edited.len(), &source);
        let merged = granular_pass(5, &source, raw.clone());
        assert_eq!(merged.len(), raw.len());
    }
}
