//! Coverage tracking over a discretized y-axis.
//!
//! The tree is built once, over the sorted unique y-values of the input
//! polygons: its leaves are the *elementary intervals* between consecutive
//! values and every internal node spans the union of its children. The
//! sweep then mutates it in place. Inserting the y-interval of a left edge
//! raises the coverage multiplicity of the nodes it spans, deleting the
//! interval of a right edge lowers it, and [`SegmentTree::contribution`]
//! reports the parts of a query interval that are currently *not* covered.
//! Those uncovered runs are exactly the vertical edges of the union's
//! boundary at the sweep's current abscissa.

use crate::num::{approx_eq, approx_le, approx_lt};

/// A y-interval with `lo < hi`.
#[derive(Clone, Copy, PartialEq, serde::Serialize)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Creates an interval; `lo` must be strictly below `hi`.
    pub fn new(lo: f64, hi: f64) -> Interval {
        debug_assert!(lo < hi, "degenerate interval [{lo}, {hi}]");
        Interval { lo, hi }
    }

    /// The lower bound.
    pub fn lo(self) -> f64 {
        self.lo
    }

    /// The upper bound.
    pub fn hi(self) -> f64 {
        self.hi
    }

    /// True when `outer` spans this whole interval (within tolerance).
    fn covered_by(self, outer: Interval) -> bool {
        approx_le(outer.lo, self.lo) && approx_le(self.hi, outer.hi)
    }

    /// True when the intervals overlap over a non-degenerate range.
    fn overlaps(self, other: Interval) -> bool {
        approx_lt(self.lo, other.hi) && approx_lt(other.lo, self.hi)
    }
}

impl std::fmt::Debug for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?}]", self.lo, self.hi)
    }
}

/// An index into the tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
struct NodeIdx(usize);

#[derive(Clone, Debug, serde::Serialize)]
struct Node {
    interval: Interval,
    left: Option<NodeIdx>,
    right: Option<NodeIdx>,
    /// Coverage multiplicity: how many stored intervals span this node
    /// entirely (without also spanning its parent).
    stack_count: u32,
    /// True when this node's interval is entirely covered, either directly
    /// or because both children are.
    covered: bool,
    /// True when this node or some descendant is covered.
    potent: bool,
}

/// Segment tree over the elementary intervals of a y-discretization.
///
/// The structure is immutable after construction; only the per-node
/// coverage state changes. Nodes live in an index-based arena so the tree
/// owns plain data, no pointer cycles.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SegmentTree {
    nodes: Vec<Node>,
    root: NodeIdx,
}

impl SegmentTree {
    /// Builds the tree over sorted, deduplicated y-values.
    ///
    /// Panics when fewer than two values are given: no elementary interval
    /// would exist. Callers discretizing at least one valid polygon always
    /// have two distinct ys.
    pub fn new(ys: &[f64]) -> SegmentTree {
        assert!(ys.len() >= 2, "need at least two y-values to span");
        let mut nodes = Vec::with_capacity(2 * ys.len());
        let root = Self::build(&mut nodes, ys, 0, ys.len() - 1);
        SegmentTree { nodes, root }
    }

    /// Builds the subtree spanning `[ys[b], ys[e]]` and returns its index.
    fn build(nodes: &mut Vec<Node>, ys: &[f64], b: usize, e: usize) -> NodeIdx {
        let (left, right) = if e - b == 1 {
            (None, None)
        } else {
            let m = (b + e) / 2;
            (
                Some(Self::build(nodes, ys, b, m)),
                Some(Self::build(nodes, ys, m, e)),
            )
        };
        nodes.push(Node {
            interval: Interval::new(ys[b], ys[e]),
            left,
            right,
            stack_count: 0,
            covered: false,
            potent: false,
        });
        NodeIdx(nodes.len() - 1)
    }

    /// Raises the coverage of every maximal node lying inside `interval`.
    pub fn insert(&mut self, interval: Interval) {
        self.insert_at(self.root, interval);
    }

    fn insert_at(&mut self, idx: NodeIdx, interval: Interval) {
        let (span, left, right) = self.links(idx);
        if span.covered_by(interval) {
            self.nodes[idx.0].stack_count += 1;
        } else {
            if let Some(l) = left {
                if self.nodes[l.0].interval.overlaps(interval) {
                    self.insert_at(l, interval);
                }
            }
            if let Some(r) = right {
                if self.nodes[r.0].interval.overlaps(interval) {
                    self.insert_at(r, interval);
                }
            }
        }
        self.update(idx);
    }

    /// Lowers the coverage raised by a matching [`SegmentTree::insert`].
    ///
    /// Inserts and removals need not use the same decomposition: a span
    /// covered in one piece may be uncovered piecewise, and vice versa
    /// (polygons with a straight left side and a stepped right side do
    /// exactly that). A removal that only partially overlaps a counted
    /// node first demotes that node's multiplicity to its children; a
    /// removal spanning an uncounted node descends instead. Removing
    /// coverage that was never inserted is a precondition violation (the
    /// sweep only removes what it inserted).
    pub fn remove(&mut self, interval: Interval) {
        self.remove_at(self.root, interval);
    }

    fn remove_at(&mut self, idx: NodeIdx, interval: Interval) {
        let (span, left, right) = self.links(idx);
        if span.covered_by(interval) {
            if self.nodes[idx.0].stack_count > 0 {
                self.nodes[idx.0].stack_count -= 1;
            } else if let (Some(l), Some(r)) = (left, right) {
                // The multiplicity lives deeper; both children lie inside
                // the removed interval too, so push the removal down.
                self.remove_at(l, interval);
                self.remove_at(r, interval);
            } else {
                debug_assert!(false, "removing an interval that was never inserted");
            }
        } else {
            if self.nodes[idx.0].stack_count > 0 {
                if let (Some(l), Some(r)) = (left, right) {
                    self.demote(idx, l, r);
                }
            }
            if let Some(l) = left {
                if self.nodes[l.0].interval.overlaps(interval) {
                    self.remove_at(l, interval);
                }
            }
            if let Some(r) = right {
                if self.nodes[r.0].interval.overlaps(interval) {
                    self.remove_at(r, interval);
                }
            }
        }
        self.update(idx);
    }

    /// Pushes a node's own coverage down one level, so a removal that
    /// overlaps only part of its span can reach the part that stays
    /// covered.
    fn demote(&mut self, idx: NodeIdx, left: NodeIdx, right: NodeIdx) {
        self.nodes[idx.0].stack_count -= 1;
        self.nodes[left.0].stack_count += 1;
        self.nodes[right.0].stack_count += 1;
        self.update(left);
        self.update(right);
    }

    /// Appends the maximal uncovered runs of `interval` to `runs`.
    ///
    /// The traversal is left-to-right, so a run contiguous with the last
    /// entry of `runs` extends it instead of pushing a new one.
    pub fn contribution(&self, interval: Interval, runs: &mut Vec<Interval>) {
        self.contribution_at(self.root, interval, runs);
    }

    fn contribution_at(&self, idx: NodeIdx, interval: Interval, runs: &mut Vec<Interval>) {
        let node = &self.nodes[idx.0];
        if node.covered {
            return;
        }
        if !node.potent {
            // Nothing anywhere below this node is covered, so the whole
            // overlap with the query is exterior. Leaves always take this
            // branch (for them potent and covered coincide).
            let run = Interval::new(
                node.interval.lo.max(interval.lo),
                node.interval.hi.min(interval.hi),
            );
            match runs.last_mut() {
                Some(last) if approx_eq(last.hi, run.lo) => last.hi = run.hi,
                _ => runs.push(run),
            }
            return;
        }
        if let Some(l) = node.left {
            if self.nodes[l.0].interval.overlaps(interval) {
                self.contribution_at(l, interval, runs);
            }
        }
        if let Some(r) = node.right {
            if self.nodes[r.0].interval.overlaps(interval) {
                self.contribution_at(r, interval, runs);
            }
        }
    }

    /// Recomputes the derived coverage bits of a node from its count and
    /// children. Called on the way out of every insert/remove descent.
    fn update(&mut self, idx: NodeIdx) {
        let (_, left, right) = self.links(idx);
        let children_covered = match (left, right) {
            (Some(l), Some(r)) => self.nodes[l.0].covered && self.nodes[r.0].covered,
            _ => false,
        };
        let child_potent = left.is_some_and(|l| self.nodes[l.0].potent)
            || right.is_some_and(|r| self.nodes[r.0].potent);

        let node = &mut self.nodes[idx.0];
        node.covered = node.stack_count > 0 || children_covered;
        node.potent = node.covered || child_potent;
    }

    fn links(&self, idx: NodeIdx) -> (Interval, Option<NodeIdx>, Option<NodeIdx>) {
        let node = &self.nodes[idx.0];
        (node.interval, node.left, node.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(lo: f64, hi: f64) -> Interval {
        Interval::new(lo, hi)
    }

    fn uncovered(tree: &SegmentTree, query: Interval) -> Vec<Interval> {
        let mut runs = Vec::new();
        tree.contribution(query, &mut runs);
        runs
    }

    #[test]
    fn build_over_four_ys_has_three_leaves() {
        let tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0]);
        let leaves = tree.nodes.iter().filter(|n| n.left.is_none()).count();
        assert_eq!(leaves, 3);
        assert_eq!(tree.nodes.len(), 5);
        assert_eq!(tree.nodes[tree.root.0].interval, iv(0.0, 3.0));
    }

    #[test]
    fn two_ys_build_a_single_leaf() {
        let mut tree = SegmentTree::new(&[0.0, 1.0]);
        assert_eq!(tree.nodes.len(), 1);

        tree.insert(iv(0.0, 1.0));
        assert!(uncovered(&tree, iv(0.0, 1.0)).is_empty());
        tree.remove(iv(0.0, 1.0));
        assert_eq!(uncovered(&tree, iv(0.0, 1.0)), vec![iv(0.0, 1.0)]);
    }

    #[test]
    fn empty_tree_contributes_the_whole_query() {
        let tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(uncovered(&tree, iv(0.0, 3.0)), vec![iv(0.0, 3.0)]);
        // A partial query is clipped, not expanded to node boundaries.
        assert_eq!(uncovered(&tree, iv(1.0, 2.0)), vec![iv(1.0, 2.0)]);
    }

    #[test]
    fn inserted_spans_stop_contributing() {
        let mut tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0]);
        tree.insert(iv(0.0, 2.0));
        assert_eq!(uncovered(&tree, iv(0.0, 3.0)), vec![iv(2.0, 3.0)]);

        tree.insert(iv(2.0, 3.0));
        assert!(uncovered(&tree, iv(0.0, 3.0)).is_empty());

        tree.remove(iv(0.0, 2.0));
        assert_eq!(uncovered(&tree, iv(0.0, 3.0)), vec![iv(0.0, 2.0)]);
    }

    #[test]
    fn overlapping_inserts_stack() {
        let mut tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0]);
        tree.insert(iv(0.0, 3.0));
        tree.insert(iv(1.0, 2.0));
        tree.remove(iv(0.0, 3.0));
        // The doubly-covered middle is still covered.
        assert_eq!(
            uncovered(&tree, iv(0.0, 3.0)),
            vec![iv(0.0, 1.0), iv(2.0, 3.0)]
        );
    }

    #[test]
    fn contiguous_uncovered_runs_merge() {
        let mut tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        tree.insert(iv(1.0, 2.0));
        tree.remove(iv(1.0, 2.0));
        // All leaves are uncovered again; they must come back as one run.
        assert_eq!(uncovered(&tree, iv(0.0, 4.0)), vec![iv(0.0, 4.0)]);
    }

    #[test]
    fn piecewise_removal_of_a_single_tall_span() {
        let mut tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0]);
        tree.insert(iv(0.0, 3.0));

        // The coverage is counted at the root; removing a piece must
        // demote it so the rest stays covered.
        tree.remove(iv(0.0, 1.0));
        assert_eq!(uncovered(&tree, iv(0.0, 3.0)), vec![iv(0.0, 1.0)]);

        tree.remove(iv(1.0, 3.0));
        assert_eq!(uncovered(&tree, iv(0.0, 3.0)), vec![iv(0.0, 3.0)]);
    }

    #[test]
    fn one_piece_removal_of_piecewise_coverage() {
        let mut tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0]);
        tree.insert(iv(0.0, 2.0));
        tree.insert(iv(2.0, 3.0));

        // [1, 3] spans a node counted nowhere; the removal must descend
        // to where the pieces were counted.
        tree.remove(iv(1.0, 3.0));
        assert_eq!(uncovered(&tree, iv(0.0, 3.0)), vec![iv(1.0, 3.0)]);
    }

    #[test]
    fn disjoint_uncovered_runs_stay_separate() {
        let mut tree = SegmentTree::new(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        tree.insert(iv(1.0, 3.0));
        assert_eq!(
            uncovered(&tree, iv(0.0, 4.0)),
            vec![iv(0.0, 1.0), iv(3.0, 4.0)]
        );
    }
}
