//! Axis-aligned directed edges.
//!
//! A counter-clockwise Manhattan polygon decomposes into vertical and
//! horizontal edges. The direction of an edge tells which side the polygon
//! interior is on: a vertical edge traversed top-to-bottom has the interior
//! to its right (a *left* edge of the polygon), bottom-to-top to its left
//! (a *right* edge). Horizontal edges distinguish bottom from top the same
//! way.

use crate::geom::Vertex;

/// A vertical edge at abscissa `x`, directed from `y0` to `y1`.
#[derive(Clone, Copy, PartialEq, serde::Serialize)]
pub struct VerticalEdge {
    /// Abscissa of the edge.
    pub x: f64,
    /// Ordinate of the begin vertex.
    pub y0: f64,
    /// Ordinate of the end vertex.
    pub y1: f64,
}

impl VerticalEdge {
    /// Creates a vertical edge directed from `(x, y0)` to `(x, y1)`.
    pub fn new(x: f64, y0: f64, y1: f64) -> VerticalEdge {
        VerticalEdge { x, y0, y1 }
    }

    /// The vertex the edge starts at.
    pub fn begin(self) -> Vertex {
        Vertex::new(self.x, self.y0)
    }

    /// The vertex the edge ends at.
    pub fn end(self) -> Vertex {
        Vertex::new(self.x, self.y1)
    }

    /// True for a top-to-bottom edge: the interior of a counter-clockwise
    /// polygon lies to its right.
    pub fn is_left(self) -> bool {
        self.y0 > self.y1
    }

    /// True for a bottom-to-top edge, with the interior to its left.
    pub fn is_right(self) -> bool {
        !self.is_left()
    }

    /// The larger ordinate.
    pub fn top(self) -> f64 {
        self.y0.max(self.y1)
    }

    /// The smaller ordinate.
    pub fn bottom(self) -> f64 {
        self.y0.min(self.y1)
    }
}

impl std::fmt::Debug for VerticalEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x: {:?} [{:?} -> {:?}]", self.x, self.y0, self.y1)
    }
}

/// A horizontal edge at ordinate `y`, directed from `x0` to `x1`.
#[derive(Clone, Copy, PartialEq, serde::Serialize)]
pub struct HorizontalEdge {
    /// Ordinate of the edge.
    pub y: f64,
    /// Abscissa of the begin vertex.
    pub x0: f64,
    /// Abscissa of the end vertex.
    pub x1: f64,
}

impl HorizontalEdge {
    /// Creates a horizontal edge directed from `(x0, y)` to `(x1, y)`.
    pub fn new(y: f64, x0: f64, x1: f64) -> HorizontalEdge {
        HorizontalEdge { y, x0, x1 }
    }

    /// The vertex the edge starts at.
    pub fn begin(self) -> Vertex {
        Vertex::new(self.x0, self.y)
    }

    /// The vertex the edge ends at.
    pub fn end(self) -> Vertex {
        Vertex::new(self.x1, self.y)
    }

    /// True when directed in the sense of growing x (a bottom edge of a
    /// counter-clockwise polygon).
    pub fn is_left_to_right(self) -> bool {
        self.x0 < self.x1
    }

    /// True when directed in the sense of shrinking x (a top edge).
    pub fn is_right_to_left(self) -> bool {
        !self.is_left_to_right()
    }

    /// The smaller abscissa.
    pub fn left(self) -> f64 {
        self.x0.min(self.x1)
    }

    /// The larger abscissa.
    pub fn right(self) -> f64 {
        self.x0.max(self.x1)
    }
}

impl std::fmt::Debug for HorizontalEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "y: {:?} [{:?} -> {:?}]", self.y, self.x0, self.x1)
    }
}

/// Either edge kind, with the shared begin/end accessors.
///
/// The sweep itself stays monomorphic over [`VerticalEdge`]; this variant
/// only shows up when walking the mixed edge sequence into closed rings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Edge {
    /// A vertical edge.
    Vertical(VerticalEdge),
    /// A horizontal edge.
    Horizontal(HorizontalEdge),
}

impl Edge {
    /// The vertex the edge starts at.
    pub fn begin(self) -> Vertex {
        match self {
            Edge::Vertical(v) => v.begin(),
            Edge::Horizontal(h) => h.begin(),
        }
    }

    /// The vertex the edge ends at.
    pub fn end(self) -> Vertex {
        match self {
            Edge::Vertical(v) => v.end(),
            Edge::Horizontal(h) => h.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_orientation_predicates() {
        let down = VerticalEdge::new(1.0, 2.0, 0.0);
        assert!(down.is_left());
        assert!(!down.is_right());
        assert_eq!(down.top(), 2.0);
        assert_eq!(down.bottom(), 0.0);
        assert_eq!(down.begin(), Vertex::new(1.0, 2.0));
        assert_eq!(down.end(), Vertex::new(1.0, 0.0));

        let up = VerticalEdge::new(1.0, 0.0, 2.0);
        assert!(up.is_right());
    }

    #[test]
    fn horizontal_orientation_predicates() {
        let rightward = HorizontalEdge::new(0.5, 0.0, 3.0);
        assert!(rightward.is_left_to_right());
        assert_eq!(rightward.left(), 0.0);
        assert_eq!(rightward.right(), 3.0);

        let leftward = HorizontalEdge::new(0.5, 3.0, 0.0);
        assert!(leftward.is_right_to_left());
        assert_eq!(leftward.begin(), Vertex::new(3.0, 0.5));
        assert_eq!(leftward.end(), Vertex::new(0.0, 0.5));
    }

    #[test]
    fn tagged_edge_exposes_shared_accessors() {
        let v = Edge::Vertical(VerticalEdge::new(1.0, 0.0, 2.0));
        let h = Edge::Horizontal(HorizontalEdge::new(2.0, 1.0, 4.0));
        assert_eq!(v.end(), h.begin());
    }
}
