#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod contour;
mod edge;
mod geom;
mod num;
mod polygon;
mod segment_tree;
mod sweep;

pub use contour::Contour;
pub use edge::{Edge, HorizontalEdge, VerticalEdge};
pub use geom::{squared_distance, squared_distance_to_segment, Vector, Vertex};
pub use num::{approx_eq, approx_le, approx_lt, EPSILON};
pub use polygon::{BBox, Polygon};
pub use segment_tree::{Interval, SegmentTree};

/// The ways contour creation and the polygon predicates can fail.
///
/// Every failure is synchronous and final; nothing is retried.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// An input vertex coordinate was NaN or infinite.
    NonFiniteInput,
    /// An input polygon has non-positive signed area. Clockwise rings are
    /// rejected, not reoriented.
    WrongOrientation,
    /// Auto-closing an open input produced a non-Manhattan ring.
    NonManhattanAfterClose,
    /// The number of contour verticals and horizontals disagree.
    EdgeCountMismatch,
    /// An edge does not start where its predecessor ends.
    DisconnectedEdge,
    /// The edge walk tried to close an empty ring.
    EmptyPolygon,
    /// Closing a walked ring failed the Manhattan check.
    ClosingFailure,
    /// [`Polygon::contains`] was invoked on a non-closed polygon.
    ContainsOnOpenPolygon,
    /// A bounding box with `xmin > xmax` or `ymin > ymax`.
    InvalidBBox,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Error::NonFiniteInput => "input coordinates must be finite",
            Error::WrongOrientation => "polygons must be oriented counter-clockwise",
            Error::NonManhattanAfterClose => "closing resulted in a non-Manhattan polygon",
            Error::EdgeCountMismatch => "vertical and horizontal edge counts differ",
            Error::DisconnectedEdge => "edge does not connect to its predecessor",
            Error::EmptyPolygon => "got an empty polygon",
            Error::ClosingFailure => "could not close the walked ring",
            Error::ContainsOnOpenPolygon => "contains only works with closed polygons",
            Error::InvalidBBox => "invalid bounding box",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}

/// Computes the boolean union of a collection of rectilinear polygons.
///
/// Every input must be Manhattan and counter-clockwise; open rings are
/// closed automatically. The result is a [`Contour`]: disjoint, closed,
/// counter-clockwise polygons whose interior is the union of the inputs'
/// interiors.
///
/// An empty input yields an empty contour. A single polygon is validated,
/// closed and returned without sweeping.
pub fn create_contour(polygons: &[Polygon]) -> Result<Contour, Error> {
    if polygons.is_empty() {
        return Ok(Contour::default());
    }

    // Reject non-finite coordinates up front; the sort-key conversions
    // below cannot fail afterwards.
    if polygons
        .iter()
        .flat_map(|p| p.vertices())
        .any(|v| !v.is_finite())
    {
        return Err(Error::NonFiniteInput);
    }

    // Orientation is measured on the closed form; an open ring's signed
    // area misses the closing segment.
    let closed: Vec<Polygon> = polygons
        .iter()
        .map(Polygon::close)
        .collect::<Result<_, _>>()?;
    if closed.iter().any(|p| !p.is_counter_clockwise()) {
        return Err(Error::WrongOrientation);
    }

    if let [single] = closed.as_slice() {
        return Ok(Contour::from(vec![single.clone()]));
    }

    let mut edges = sweep::vertical_edges(&closed);
    sweep::sort_vertical_edges(&mut edges);
    let mut tree = SegmentTree::new(&sweep::unique_ys(&closed));

    let verticals = sweep::sweep(&mut tree, &edges);
    let horizontals = contour::horizontals_from(&verticals)?;
    contour::finalize_contour(&verticals, &horizontals)
}
