//! Rectilinear closed polygons and their bounding boxes.

use crate::geom::{squared_distance_to_segment, Vertex};
use crate::num::approx_eq;
use crate::Error;

/// An ordered ring of vertices describing a simple rectilinear polygon.
///
/// A polygon is *Manhattan* when every consecutive vertex pair differs in
/// exactly one coordinate, *closed* when its first vertex equals its last,
/// and correctly oriented when its signed area is positive
/// (counter-clockwise). Construction does not validate any of this; the
/// predicates below and [`crate::create_contour`] do.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Polygon {
    vertices: Vec<Vertex>,
}

impl Polygon {
    /// Creates a polygon from a vertex ring.
    pub fn new(vertices: Vec<Vertex>) -> Polygon {
        Polygon { vertices }
    }

    /// The vertices of the ring, in order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of stored vertices (the closing duplicate counts).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed area by the shoelace formula, positive for counter-clockwise
    /// rings.
    ///
    /// The sum runs over the stored consecutive pairs only, so an open ring
    /// yields a different value than its closed form; close first when the
    /// exact value matters.
    pub fn signed_area(&self) -> f64 {
        let mut area = 0.0;
        for pair in self.vertices.windows(2) {
            area += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
        }
        area * 0.5
    }

    /// True when the signed area is strictly positive.
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// True when every consecutive vertex pair is axis-aligned.
    pub fn is_manhattan(&self) -> bool {
        self.vertices
            .windows(2)
            .all(|pair| approx_eq(pair[0].x, pair[1].x) || approx_eq(pair[0].y, pair[1].y))
    }

    /// True when the first vertex equals the last (within tolerance).
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => first.approx_eq(*last),
            _ => false,
        }
    }

    /// Returns the closed form of this polygon.
    ///
    /// An already-closed ring is returned as is. Otherwise the first vertex
    /// is appended; if the resulting ring is not Manhattan the closure is
    /// invalid and `Error::NonManhattanAfterClose` is returned.
    pub fn close(&self) -> Result<Polygon, Error> {
        if self.is_closed() {
            return Ok(self.clone());
        }
        let first = *self.vertices.first().ok_or(Error::EmptyPolygon)?;
        let mut vertices = self.vertices.clone();
        vertices.push(first);
        let closed = Polygon { vertices };
        if !closed.is_manhattan() {
            return Err(Error::NonManhattanAfterClose);
        }
        Ok(closed)
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// Requires the closed form. The result is unspecified for points lying
    /// exactly on an edge; callers must not depend on boundary behavior.
    pub fn contains(&self, x: f64, y: f64) -> Result<bool, Error> {
        if !self.is_closed() {
            return Err(Error::ContainsOnOpenPolygon);
        }
        let v = &self.vertices;
        let mut odd = false;
        let mut j = v.len() - 1;
        for i in 0..v.len() {
            if (v[i].y < y && v[j].y >= y) || (v[j].y < y && v[i].y >= y) {
                if v[i].x + (y - v[i].y) / (v[j].y - v[i].y) * (v[j].x - v[i].x) < x {
                    odd = !odd;
                }
            }
            j = i;
        }
        Ok(odd)
    }

    /// The axis-aligned bounding box of the ring.
    ///
    /// Fails with `Error::InvalidBBox` for an empty polygon.
    pub fn bbox(&self) -> Result<BBox, Error> {
        let mut xmin = f64::MAX;
        let mut ymin = f64::MAX;
        let mut xmax = f64::MIN;
        let mut ymax = f64::MIN;
        for v in &self.vertices {
            xmin = xmin.min(v.x);
            ymin = ymin.min(v.y);
            xmax = xmax.max(v.x);
            ymax = ymax.max(v.y);
        }
        BBox::new(xmin, ymin, xmax, ymax)
    }

    /// Minimum squared distance from `point` to any segment of the ring.
    pub fn squared_distance_to_point(&self, point: Vertex) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| squared_distance_to_segment(point, pair[0], pair[1]))
            .fold(f64::MAX, f64::min)
    }

    /// True when both rings carry the same multiset of vertices.
    ///
    /// The closing duplicate is stripped before comparing, so a ring and a
    /// rotation or reversal of it compare equal. Comparison is vertex-wise
    /// with tolerance after sorting by x, then y.
    pub fn same_vertices(&self, other: &Polygon) -> bool {
        let a = self.sorted_vertices();
        let b = other.sorted_vertices();
        a.len() == b.len() && a.iter().zip(&b).all(|(p, q)| p.approx_eq(*q))
    }

    fn sorted_vertices(&self) -> Vec<Vertex> {
        let mut count = self.vertices.len();
        if self.is_closed() {
            count -= 1;
        }
        let mut sorted = self.vertices[..count].to_vec();
        sorted.sort_by(|a, b| {
            if approx_eq(a.x, b.x) {
                a.y.total_cmp(&b.y)
            } else {
                a.x.total_cmp(&b.x)
            }
        });
        sorted
    }
}

impl std::fmt::Display for Polygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "POLYGON (")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", v.x, v.y)?;
        }
        write!(f, ")")
    }
}

impl From<Vec<Vertex>> for Polygon {
    fn from(vertices: Vec<Vertex>) -> Polygon {
        Polygon { vertices }
    }
}

impl From<Vec<(f64, f64)>> for Polygon {
    fn from(coords: Vec<(f64, f64)>) -> Polygon {
        Polygon {
            vertices: coords.into_iter().map(Vertex::from).collect(),
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl BBox {
    /// Creates a box, failing with `Error::InvalidBBox` unless
    /// `xmin <= xmax` and `ymin <= ymax`.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<BBox, Error> {
        if xmin > xmax || ymin > ymax {
            return Err(Error::InvalidBBox);
        }
        Ok(BBox {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Smallest abscissa.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Smallest ordinate.
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// Largest abscissa.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Largest ordinate.
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// The center point of the box.
    pub fn center(&self) -> Vertex {
        Vertex::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// True when `(x, y)` lies inside or on the box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    /// True when the two boxes overlap (sharing a border counts).
    pub fn intersects(&self, other: &BBox) -> bool {
        self.xmin <= other.xmax
            && other.xmin <= self.xmax
            && self.ymin <= other.ymax
            && other.ymin <= self.ymax
    }

    /// The smallest box enclosing both.
    pub fn enclosing(&self, other: &BBox) -> BBox {
        BBox {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from(vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ])
    }

    #[test]
    fn signed_area_of_the_unit_square_is_one() {
        assert_eq!(unit_square().signed_area(), 1.0);
        assert!(unit_square().is_counter_clockwise());
    }

    #[test]
    fn clockwise_ring_has_negative_area() {
        let cw = Polygon::from(vec![
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.0, 0.0),
        ]);
        assert_eq!(cw.signed_area(), -1.0);
        assert!(!cw.is_counter_clockwise());
    }

    #[test]
    fn manhattan_and_closed_predicates() {
        let p = unit_square();
        assert!(p.is_manhattan());
        assert!(p.is_closed());

        let diagonal = Polygon::from(vec![(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(!diagonal.is_manhattan());

        let open = Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(!open.is_closed());
    }

    #[test]
    fn closing_an_open_ring_appends_the_first_vertex() {
        let open = Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let closed = open.close().unwrap();
        assert!(closed.is_closed());
        assert_eq!(closed.len(), 5);
        assert!(closed.same_vertices(&unit_square()));
    }

    #[test]
    fn closing_can_fail_the_manhattan_check() {
        // Closing demands a diagonal segment back to (0, 0).
        let open = Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(open.close(), Err(Error::NonManhattanAfterClose));
    }

    #[test]
    fn contains_uses_ray_parity() {
        let p = unit_square();
        assert!(p.contains(0.5, 0.5).unwrap());
        assert!(!p.contains(1.5, 0.5).unwrap());
        assert!(!p.contains(0.5, -0.5).unwrap());

        let open = Polygon::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(open.contains(0.5, 0.5), Err(Error::ContainsOnOpenPolygon));
    }

    #[test]
    fn contains_in_a_concave_ring() {
        // A "U" shape: the notch between the prongs is outside.
        let u = Polygon::from(vec![
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 2.0),
            (2.0, 2.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ]);
        assert!(u.contains(0.5, 1.5).unwrap());
        assert!(!u.contains(1.5, 1.5).unwrap());
        assert!(u.contains(1.5, 0.5).unwrap());
    }

    #[test]
    fn bbox_spans_the_ring() {
        let b = unit_square().bbox().unwrap();
        assert_eq!((b.xmin(), b.ymin(), b.xmax(), b.ymax()), (0.0, 0.0, 1.0, 1.0));
        assert_eq!(b.width(), 1.0);
        assert_eq!(b.center(), Vertex::new(0.5, 0.5));

        assert_eq!(Polygon::new(Vec::new()).bbox(), Err(Error::InvalidBBox));
    }

    #[test]
    fn bbox_helpers() {
        let a = BBox::new(0.0, 0.0, 2.0, 2.0).unwrap();
        let b = BBox::new(1.0, 1.0, 3.0, 3.0).unwrap();
        let c = BBox::new(5.0, 5.0, 6.0, 6.0).unwrap();

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(1.0, 1.0));
        assert!(!a.contains(2.5, 1.0));

        let e = a.enclosing(&c);
        assert_eq!((e.xmin(), e.ymax()), (0.0, 6.0));

        assert_eq!(BBox::new(1.0, 0.0, 0.0, 1.0), Err(Error::InvalidBBox));
    }

    #[test]
    fn same_vertices_ignores_rotation_and_direction() {
        let rotated = Polygon::from(vec![
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
            (1.0, 0.0),
        ]);
        assert!(unit_square().same_vertices(&rotated));

        let other = Polygon::from(vec![
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        assert!(!unit_square().same_vertices(&other));
    }

    #[test]
    fn squared_distance_to_point() {
        let p = unit_square();
        assert_eq!(p.squared_distance_to_point(Vertex::new(2.0, 0.5)), 1.0);
        assert_eq!(p.squared_distance_to_point(Vertex::new(0.5, 0.5)), 0.25);
    }

    #[test]
    fn display_is_wkt_like() {
        let p = Polygon::from(vec![(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(p.to_string(), "POLYGON (0 0, 1 0)");
    }
}
