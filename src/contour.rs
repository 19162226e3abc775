//! From sweep output to closed polygons.
//!
//! The sweep produces only the vertical edges of the union's boundary. At
//! every y-level those edges' endpoints come in pairs joined by exactly one
//! horizontal stretch of boundary, which recovers the horizontal edges. A
//! connectivity walk then stitches the interleaved edge sequence into
//! closed counter-clockwise rings.

use crate::edge::{Edge, HorizontalEdge, VerticalEdge};
use crate::geom::Vertex;
use crate::num::approx_eq;
use crate::polygon::{BBox, Polygon};
use crate::Error;

/// The boolean union of a polygon collection: disjoint closed
/// counter-clockwise rectilinear polygons bounding the union's interior.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Contour {
    polygons: Vec<Polygon>,
}

impl Contour {
    /// The member polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Number of member polygons.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// True when the contour has no polygons.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// True when any member polygon contains `(x, y)`.
    ///
    /// As with [`Polygon::contains`], points exactly on a boundary give
    /// unspecified results.
    pub fn contains(&self, x: f64, y: f64) -> Result<bool, Error> {
        for polygon in &self.polygons {
            if polygon.contains(x, y)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The bounding box enclosing every member polygon.
    ///
    /// Fails with `Error::InvalidBBox` for an empty contour.
    pub fn bbox(&self) -> Result<BBox, Error> {
        let mut boxes = self.polygons.iter().map(Polygon::bbox);
        let first = boxes.next().ok_or(Error::InvalidBBox)??;
        boxes.try_fold(first, |acc, b| Ok(acc.enclosing(&b?)))
    }
}

impl From<Vec<Polygon>> for Contour {
    fn from(polygons: Vec<Polygon>) -> Contour {
        Contour { polygons }
    }
}

impl std::ops::Index<usize> for Contour {
    type Output = Polygon;

    fn index(&self, index: usize) -> &Polygon {
        &self.polygons[index]
    }
}

/// Derives the contour's horizontal edges from its vertical ones.
///
/// Endpoints of the verticals are sorted by y then x; consecutive pairs at
/// each level bound one horizontal edge. The horizontal continues the walk
/// from whichever paired endpoint is the *end* vertex of its vertical (a
/// left edge at its bottom, a right edge at its top), and it is attached to
/// that vertical: the returned `horizontals[i]` is the edge following
/// `verticals[i]` around some ring.
pub(crate) fn horizontals_from(verticals: &[VerticalEdge]) -> Result<Vec<HorizontalEdge>, Error> {
    let mut endpoints: Vec<(Vertex, usize)> = Vec::with_capacity(2 * verticals.len());
    for (i, v) in verticals.iter().enumerate() {
        endpoints.push((v.begin(), i));
        endpoints.push((v.end(), i));
    }
    endpoints.sort_by(|(a, _), (b, _)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut horizontals: Vec<Option<HorizontalEdge>> = vec![None; verticals.len()];
    for pair in endpoints.chunks_exact(2) {
        let (p1, i1) = pair[0];
        let (p2, i2) = pair[1];

        let p1_is_end = approx_eq(p1.y, verticals[i1].end().y);
        let (edge, follows) = if p1_is_end {
            (HorizontalEdge::new(p1.y, p1.x, p2.x), i1)
        } else {
            (HorizontalEdge::new(p1.y, p2.x, p1.x), i2)
        };
        if horizontals[follows].is_some() {
            return Err(Error::EdgeCountMismatch);
        }
        horizontals[follows] = Some(edge);
    }
    horizontals
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(Error::EdgeCountMismatch)
}

/// Walks the interleaved edge sequence into closed rings.
///
/// The edges are laid out as `[v0, h0, v1, h1, ...]` with each horizontal
/// starting where its vertical ends. The walk follows connectivity rather
/// than index order: from the current edge it moves to the unused edge
/// beginning at the current end, closing a ring whenever the walk returns
/// to the starting vertex, and restarting from the first unused edge until
/// none remain.
pub(crate) fn finalize_contour(
    verticals: &[VerticalEdge],
    horizontals: &[HorizontalEdge],
) -> Result<Contour, Error> {
    if verticals.len() != horizontals.len() {
        return Err(Error::EdgeCountMismatch);
    }
    for (v, h) in verticals.iter().zip(horizontals) {
        if !h.begin().approx_eq(v.end()) {
            return Err(Error::DisconnectedEdge);
        }
    }

    let mut all: Vec<Edge> = Vec::with_capacity(2 * verticals.len());
    for (v, h) in verticals.iter().zip(horizontals) {
        all.push(Edge::Vertical(*v));
        all.push(Edge::Horizontal(*h));
    }

    if all.is_empty() {
        return Ok(Contour::default());
    }

    let mut polygons = Vec::new();
    let mut used = vec![false; all.len()];
    let mut order: Vec<usize> = Vec::new();
    let mut n_used = 0;
    let mut current = 0;
    let mut start = all[0];

    while n_used < all.len() {
        let segment = all[current];
        order.push(current);
        used[current] = true;
        n_used += 1;

        if segment.end().approx_eq(start.begin()) {
            if order.is_empty() {
                return Err(Error::EmptyPolygon);
            }
            let ring: Vec<Vertex> = order.iter().map(|&k| all[k].begin()).collect();
            let polygon = Polygon::new(ring)
                .close()
                .map_err(|_| Error::ClosingFailure)?;
            polygons.push(polygon);
            order.clear();

            if let Some(next) = used.iter().position(|&u| !u) {
                current = next;
                start = all[next];
            }
            continue;
        }

        match all
            .iter()
            .enumerate()
            .find(|&(j, e)| j != current && !used[j] && e.begin().approx_eq(segment.end()))
        {
            Some((j, _)) => current = j,
            None => return Err(Error::DisconnectedEdge),
        }
    }

    Ok(Contour { polygons })
}
