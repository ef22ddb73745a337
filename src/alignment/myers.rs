//! Myers' diff algorithm, divide and conquer variant.
//!
//! * time: `O((N+M)D)`
//! * space `O(N+M)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it. Based on the implementation by Brandon Williams as adapted
//! in [similar](https://github.com/mitsuhiko/similar), reworked to compare
//! through an [`EqualityOracle`] rather than `PartialEq` items.

use std::ops::{Index, IndexMut, Range};

use super::{Change, EqualityOracle, ScriptBuilder};

/// Diff two sequences of lengths `n` and `m` through `oracle` and return the
/// edit script as ordered, non-overlapping change runs.
pub(crate) fn diff(n: usize, m: usize, oracle: &impl EqualityOracle) -> Vec<Change> {
    let max_d = (n + m).div_ceil(2) + 1;
    let mut vf = V::new(max_d);
    let mut vb = V::new(max_d);
    let mut builder = ScriptBuilder::new();

    conquer(oracle, 0..n, 0..m, &mut vf, &mut vb, &mut builder);

    builder.finish(n, m)
}

// A D-path is a path which starts at (0,0) that has exactly D non-diagonal
// edges. All D-paths consist of a (D - 1)-path followed by a non-diagonal edge
// and then a possibly empty sequence of diagonal edges called a snake.

/// `V` contains the endpoints of the furthest reaching `D-paths`. For each
/// recorded endpoint `(x,y)` in diagonal `k`, we only need to retain `x`
/// because `y` can be computed from `x - k`. In other words, `V` is an array of
/// integers where `V[k]` contains the row index of the endpoint of the furthest
/// reaching path in diagonal `k`.
///
/// We can't use a traditional Vec to represent `V` since we use `k` as an index
/// and it can take on negative values. So instead `V` is represented as a
/// light-weight wrapper around a Vec plus an `offset` which is the maximum
/// value `k` can take on in order to map negative `k`'s back to a value >= 0.
#[derive(Debug)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        // max_d should fit in isize for the algorithm to work correctly
        let offset = isize::try_from(max_d).unwrap_or(isize::MAX);
        Self { offset, v: vec![0; 2 * max_d] }
    }

    fn len(&self) -> usize { self.v.len() }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &Self::Output {
        let idx = usize::try_from(index + self.offset).unwrap_or(usize::MAX);
        &self.v[idx.min(self.v.len().saturating_sub(1))]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        let idx = usize::try_from(index + self.offset).unwrap_or(usize::MAX);
        let len = self.v.len();
        &mut self.v[idx.min(len.saturating_sub(1))]
    }
}

fn split_at(range: Range<usize>, at: usize) -> (Range<usize>, Range<usize>) {
    (range.start..at, at..range.end)
}

fn common_prefix_len(
    oracle: &impl EqualityOracle,
    a_range: Range<usize>,
    b_range: Range<usize>,
) -> usize {
    a_range
        .zip(b_range)
        .take_while(|&(i, j)| oracle.equal(i, j))
        .count()
}

fn common_suffix_len(
    oracle: &impl EqualityOracle,
    a_range: Range<usize>,
    b_range: Range<usize>,
) -> usize {
    a_range
        .rev()
        .zip(b_range.rev())
        .take_while(|&(i, j)| oracle.equal(i, j))
        .count()
}

/// A `Snake` is a sequence of diagonal edges in the edit graph. Normally
/// a snake has a start and end point (and it is possible for a snake to have
/// a length of zero, meaning the start and end points are the same) however
/// we do not need the end point which is why it's not tracked here.
///
/// The divide part of a divide-and-conquer strategy. A D-path has D+1 snakes
/// some of which may be empty. The divide step requires finding the ceil(D/2) +
/// 1 or middle snake of an optimal D-path. The idea for doing so is to
/// simultaneously run the basic algorithm in both the forward and reverse
/// directions until furthest reaching forward and reverse paths starting at
/// opposing corners 'overlap'.
fn find_middle_snake(
    oracle: &impl EqualityOracle,
    a_range: Range<usize>,
    b_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)> {
    let n = a_range.len();
    let m = b_range.len();

    // By Lemma 1 in the paper, the optimal edit script length is odd or even as
    // `delta` is odd or even.
    let delta = isize::try_from(n).unwrap_or(isize::MAX) - isize::try_from(m).unwrap_or(isize::MAX);
    let odd = delta & 1 == 1;

    // The initial point at (0, -1)
    vf[1] = 0;
    // The initial point at (N, M+1)
    vb[1] = 0;

    let d_max = (n + m).div_ceil(2) + 1;
    assert!(vf.len() >= d_max);
    assert!(vb.len() >= d_max);

    let d_max_isize = isize::try_from(d_max).unwrap_or(isize::MAX);
    for d in 0..d_max_isize {
        // Forward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = usize::try_from(isize::try_from(x).unwrap_or(isize::MAX) - k).unwrap_or(0);

            // The coordinate of the start of a snake
            let (x0, y0) = (x, y);
            // While the sequences agree, keep moving through the graph with no
            // cost
            if x < n && y < m {
                x += common_prefix_len(
                    oracle,
                    a_range.start + x..a_range.end,
                    b_range.start + y..b_range.end,
                );
            }

            // This is the new best x value
            vf[k] = x;

            // Only check for connections from the forward search when N - M is
            // odd and when there is a reciprocal k line coming from the other
            // direction.
            if odd && (k - delta).abs() <= (d - 1) && vf[k] + vb[-(k - delta)] >= n {
                // Return the snake
                return Some((x0 + a_range.start, y0 + b_range.start));
            }
        }

        // Backward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = usize::try_from(isize::try_from(x).unwrap_or(isize::MAX) - k).unwrap_or(0);

            if x < n && y < m {
                let advance = common_suffix_len(
                    oracle,
                    a_range.start..a_range.start + n - x,
                    b_range.start..b_range.start + m - y,
                );
                x += advance;
                y += advance;
            }

            // This is the new best x value
            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                // Return the snake
                return Some((n - x + a_range.start, m - y + b_range.start));
            }
        }
    }

    None
}

fn conquer(
    oracle: &impl EqualityOracle,
    mut a_range: Range<usize>,
    mut b_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    builder: &mut ScriptBuilder,
) {
    // Check for common prefix
    let prefix_len = common_prefix_len(oracle, a_range.clone(), b_range.clone());
    builder.equal(prefix_len);
    a_range.start += prefix_len;
    b_range.start += prefix_len;

    // Check for common suffix
    let suffix_len = common_suffix_len(oracle, a_range.clone(), b_range.clone());
    a_range.end -= suffix_len;
    b_range.end -= suffix_len;

    if a_range.is_empty() && b_range.is_empty() {
        // nothing left in the middle
    } else if b_range.is_empty() {
        builder.delete(a_range.len());
    } else if a_range.is_empty() {
        builder.insert(b_range.len());
    } else if let Some((x_start, y_start)) =
        find_middle_snake(oracle, a_range.clone(), b_range.clone(), vf, vb)
    {
        let (a_left, a_right) = split_at(a_range, x_start);
        let (b_left, b_right) = split_at(b_range, y_start);
        conquer(oracle, a_left, b_left, vf, vb, builder);
        conquer(oracle, a_right, b_right, vf, vb, builder);
    } else {
        builder.delete(a_range.len());
        builder.insert(b_range.len());
    }

    builder.equal(suffix_len);
}
