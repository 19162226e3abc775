//! The plane sweep that emits the vertical edges of the union's contour.
//!
//! Vertical edges of all inputs are visited in increasing x. Left edges
//! first report which part of their span was exterior so far, then cover
//! it; right edges first uncover their span, then report which part became
//! exterior. The reported runs are flushed as output edges whenever the
//! abscissa or the edge kind changes, oriented so the union's interior
//! stays on the correct side.

use ordered_float::NotNan;

use crate::edge::VerticalEdge;
use crate::num::approx_eq;
use crate::polygon::Polygon;
use crate::segment_tree::{Interval, SegmentTree};

/// Extracts the vertical edges of every polygon, in ring order.
pub(crate) fn vertical_edges(polygons: &[Polygon]) -> Vec<VerticalEdge> {
    let mut edges = Vec::new();
    for polygon in polygons {
        for pair in polygon.vertices().windows(2) {
            if approx_eq(pair[0].x, pair[1].x) {
                edges.push(VerticalEdge::new(pair[0].x, pair[0].y, pair[1].y));
            }
        }
    }
    edges
}

/// The sorted, deduplicated y-values of all polygon vertices: the sweep's
/// y-discretization.
pub(crate) fn unique_ys(polygons: &[Polygon]) -> Vec<f64> {
    let mut ys: Vec<NotNan<f64>> = polygons
        .iter()
        .flat_map(|p| p.vertices())
        // unwrap: create_contour rejects non-finite input before this runs.
        .map(|v| NotNan::new(v.y).unwrap())
        .collect();
    ys.sort();

    let mut unique: Vec<f64> = Vec::with_capacity(ys.len());
    for y in ys {
        let y = y.into_inner();
        if !unique.last().is_some_and(|&last| approx_eq(last, y)) {
            unique.push(y);
        }
    }
    unique
}

/// Orders edges for the sweep: by x, left edges before right edges at the
/// same x, then by their bottom end.
///
/// Left-before-right matters: at a shared abscissa the left edge must take
/// its contribution before covering its span, and the right edge must
/// uncover before taking its own, so coincident boundaries cancel instead
/// of duplicating.
pub(crate) fn sort_vertical_edges(edges: &mut [VerticalEdge]) {
    edges.sort_by(|a, b| {
        if !approx_eq(a.x, b.x) {
            return a.x.total_cmp(&b.x);
        }
        if a.is_left() != b.is_left() {
            return if a.is_left() {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            };
        }
        a.bottom().total_cmp(&b.bottom())
    });
}

/// Runs the sweep over sorted edges, returning the vertical edges of the
/// union's contour in emission order.
pub(crate) fn sweep(tree: &mut SegmentTree, edges: &[VerticalEdge]) -> Vec<VerticalEdge> {
    let mut contour_edges = Vec::new();
    let mut runs: Vec<Interval> = Vec::new();

    for (i, edge) in edges.iter().enumerate() {
        let span = Interval::new(edge.bottom(), edge.top());
        if edge.is_left() {
            tree.contribution(span, &mut runs);
            tree.insert(span);
        } else {
            tree.remove(span);
            tree.contribution(span, &mut runs);
        }

        let flush = match edges.get(i + 1) {
            Some(next) => next.is_left() != edge.is_left() || !approx_eq(next.x, edge.x),
            None => true,
        };
        if flush {
            for run in runs.drain(..) {
                // Right edges of the output go bottom-up (interior to the
                // left), left edges top-down.
                contour_edges.push(if edge.is_right() {
                    VerticalEdge::new(edge.x, run.lo(), run.hi())
                } else {
                    VerticalEdge::new(edge.x, run.hi(), run.lo())
                });
            }
        }
    }
    contour_edges
}
