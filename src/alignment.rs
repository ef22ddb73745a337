//! Generic sequence alignment.
//!
//! The primitive is deliberately oblivious to trees and runes: it sees two
//! sequence lengths and an equality oracle over index pairs, and returns a
//! minimal edit script as [`Change`] runs. The oracle indirection (instead of
//! `PartialEq` items) is what lets the engine plug in structural equality
//! without materializing comparable values.

mod myers;

pub(crate) use myers::diff;

/// Answers whether position `i` of sequence A equals position `j` of
/// sequence B.
pub(crate) trait EqualityOracle {
    fn equal(&self, i: usize, j: usize) -> bool;
}

/// One maximal edit run: starting cursors into both sequences, plus how many
/// units are deleted from A and inserted from B at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Change {
    pub a: usize,
    pub b: usize,
    pub del: usize,
    pub ins: usize,
}

/// Merge neighboring changes separated by a matching gap of at most
/// `granularity` units into single larger runs. The gap units end up inside
/// both the delete and the insert span, trading minimality for legibility.
/// Changes must be ordered by ascending positions, as [`diff`] returns them.
pub(crate) fn merge_granular(granularity: usize, changes: Vec<Change>) -> Vec<Change> {
    if granularity == 0 || changes.len() < 2 {
        return changes;
    }
    let mut merged: Vec<Change> = Vec::with_capacity(changes.len());
    for change in changes {
        if let Some(last) = merged.last_mut() {
            let gap = change.a - (last.a + last.del);
            if gap <= granularity {
                last.del = change.a + change.del - last.a;
                last.ins = change.b + change.ins - last.b;
                continue;
            }
        }
        merged.push(change);
    }
    merged
}

/// Accumulates unit-level edit events into maximal [`Change`] runs.
///
/// Adjacent deletes and inserts not separated by a matching unit fold into a
/// single run; a matching unit closes the run.
#[derive(Debug)]
pub(crate) struct ScriptBuilder {
    changes: Vec<Change>,
    a_cursor: usize,
    b_cursor: usize,
    open: bool,
}

impl ScriptBuilder {
    pub(crate) fn new() -> Self {
        ScriptBuilder { changes: Vec::new(), a_cursor: 0, b_cursor: 0, open: false }
    }

    pub(crate) fn equal(&mut self, count: usize) {
        if count > 0 {
            self.a_cursor += count;
            self.b_cursor += count;
            self.open = false;
        }
    }

    pub(crate) fn delete(&mut self, count: usize) {
        if count > 0 {
            self.run().del += count;
            self.a_cursor += count;
        }
    }

    pub(crate) fn insert(&mut self, count: usize) {
        if count > 0 {
            self.run().ins += count;
            self.b_cursor += count;
        }
    }

    fn run(&mut self) -> &mut Change {
        if !self.open {
            self.changes.push(Change { a: self.a_cursor, b: self.b_cursor, del: 0, ins: 0 });
            self.open = true;
        }
        let last = self.changes.len() - 1;
        &mut self.changes[last]
    }

    pub(crate) fn finish(self, len_a: usize, len_b: usize) -> Vec<Change> {
        debug_assert_eq!(self.a_cursor, len_a, "edit script must cover sequence A");
        debug_assert_eq!(self.b_cursor, len_b, "edit script must cover sequence B");
        self.changes
    }
}
