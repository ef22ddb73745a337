//! Rebuilding a merged, marker-annotated document from the edit script.
//!
//! The replayer walks the rune sequences of both versions in step with the
//! changes, classifies every rune as copied, deleted, inserted or reformatted,
//! buffers same-leaf text runs, and grafts each run onto a fresh document
//! shell with the prototype's ancestors rebuilt around it. Deleted content
//! keeps the base version's markup, everything else takes the edited
//! version's.

mod graft;

use log::debug;

use crate::alignment::Change;
use crate::compare::DiffSource;
use crate::config::Config;
use crate::dom::{Attr, NodeId, NodeKind, Tree};
use crate::flatten::TreeRune;
use crate::position::Position;

/// What happens to one run of runes in the merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Copy,
    Delete,
    Insert,
    Reformat,
}

/// Which version a run's prototype nodes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Base,
    Edited,
}

/// Replay `changes` over both versions and return the merged tree.
pub(crate) fn replay(source: &DiffSource<'_>, changes: &[Change], config: &Config) -> Tree {
    let (out, body) = Tree::synthetic();
    let mut ctx = ReplayContext { config, source, out, body, buffer: None };

    let mut a_idx = 0;
    let mut b_idx = 0;
    for change in changes {
        while a_idx < change.a && b_idx < change.b {
            ctx.append(Action::Copy, Side::Base, &source.base[a_idx]);
            a_idx += 1;
            b_idx += 1;
        }
        if change.del == change.ins && change.del > 0 && letters_agree(source, change) {
            // same characters in different markup, a pure reformat
            for _ in 0..change.ins {
                ctx.append(Action::Reformat, Side::Edited, &source.edited[b_idx]);
                a_idx += 1;
                b_idx += 1;
            }
        } else {
            for _ in 0..change.del {
                ctx.append(Action::Delete, Side::Base, &source.base[a_idx]);
                a_idx += 1;
            }
            for _ in 0..change.ins {
                ctx.append(Action::Insert, Side::Edited, &source.edited[b_idx]);
                b_idx += 1;
            }
        }
    }
    while a_idx < source.base.len() && b_idx < source.edited.len() {
        ctx.append(Action::Copy, Side::Base, &source.base[a_idx]);
        a_idx += 1;
        b_idx += 1;
    }
    ctx.flush();
    ctx.out
}

fn letters_agree(source: &DiffSource<'_>, change: &Change) -> bool {
    (0..change.del)
        .all(|i| source.base[change.a + i].letter == source.edited[change.b + i].letter)
}

struct ReplayContext<'a> {
    config: &'a Config,
    source: &'a DiffSource<'a>,
    out: Tree,
    body: NodeId,
    buffer: Option<Run<'a>>,
}

/// A buffered run of consecutive text runes from one leaf with one action.
struct Run<'a> {
    action: Action,
    side: Side,
    leaf: NodeId,
    pos: &'a Position,
    text: String,
}

impl<'a> ReplayContext<'a> {
    fn tree_for(&self, side: Side) -> &'a Tree {
        match side {
            Side::Base => self.source.base_tree,
            Side::Edited => self.source.edited_tree,
        }
    }

    fn append(&mut self, action: Action, side: Side, rune: &'a TreeRune) {
        let tree = self.tree_for(side);
        if suppressed(tree, rune.leaf) {
            return;
        }
        let is_text = tree.kind(rune.leaf).is_text();
        let text: String = rune.letter.map(String::from).unwrap_or_default();
        if let Some(run) = &mut self.buffer
            && run.side == side
            && run.action == action
            && run.leaf == rune.leaf
            && is_text
            && !text.is_empty()
        {
            run.text.push_str(&text);
            return;
        }
        self.flush();
        if is_text {
            self.buffer = Some(Run { action, side, leaf: rune.leaf, pos: &rune.pos, text });
            return;
        }
        self.materialize(action, side, rune.leaf, "", &rune.pos);
    }

    fn flush(&mut self) {
        if let Some(run) = self.buffer.take() {
            self.materialize(run.action, run.side, run.leaf, &run.text, run.pos);
        }
    }

    /// Clone the run's leaf (with `text` overriding a text leaf's content),
    /// wrap it in a marker span unless it is a plain copy, rebuild the
    /// prototype's ancestor shells around it and attach the result at the
    /// graft point.
    fn materialize(&mut self, action: Action, side: Side, leaf: NodeId, text: &str, pos: &Position) {
        let src = self.tree_for(side);
        let Some((append_point, proto_ancestor)) =
            graft::graft_point(&self.out, self.body, src, leaf, action, pos)
        else {
            debug!("no graft point for a {action:?} run, dropping it");
            return;
        };

        let mut new_node = self.out.adopt_shape(src, leaf);
        if let NodeKind::Text { content } = self.out.kind_mut(new_node) {
            text.clone_into(content);
        }
        if let Some(attrs) = self.marker_attrs(action) {
            let span = self.out.orphan(NodeKind::element_with_attrs("span", attrs));
            self.out.append_child(span, new_node);
            new_node = span;
        }
        let mut cur = src.parent(leaf);
        while let Some(anc) = cur {
            if anc == proto_ancestor {
                break;
            }
            let shell = self.out.adopt_shape(src, anc);
            self.out.append_child(shell, new_node);
            new_node = shell;
            cur = src.parent(anc);
        }
        self.out.append_child(append_point, new_node);
    }

    fn marker_attrs(&self, action: Action) -> Option<Vec<Attr>> {
        match action {
            Action::Copy => None,
            Action::Insert => Some(self.config.inserted_span.clone()),
            Action::Delete => Some(self.config.deleted_span.clone()),
            Action::Reformat => Some(self.config.reformatted_span.clone()),
        }
    }
}

/// Runes for the synthetic document scaffolding never materialize; their
/// counterparts already exist in the output shell.
fn suppressed(tree: &Tree, leaf: NodeId) -> bool {
    match tree.kind(leaf) {
        NodeKind::Document | NodeKind::Doctype { .. } => true,
        kind => kind.is_tag("html") || kind.is_tag("head") || kind.is_tag("body"),
    }
}
