use std::borrow::Borrow;

use anyhow::{Result, bail};
use itertools::Itertools;

use crate::Coord;
use crate::geometry::DTransformation;
use crate::geometry::geo_enums::GeoPosition;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Shape, TouchesWith, Transformable};
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;
use crate::geometry::primitives::edge::EdgeIntersection;
use crate::geometry::primitives::point::cross;

/// A Simple Polygon is a closed shape with a finite number of vertices and edges,
/// which does not intersect itself and contains no holes.
/// [read more](https://en.wikipedia.org/wiki/Simple_polygon)
///
/// Vertices are stored unclosed and normalized to counterclockwise order;
/// the closing edge is implicit. All containment and intersection predicates
/// are exact over the integer coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SPolygon {
    /// Vertices of the contour, counterclockwise, without the closing duplicate
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    /// Twice the enclosed area, exact and positive
    pub double_area: i128,
}

impl SPolygon {
    /// Create a new simple polygon from a vertex list. An explicitly closed
    /// contour (first vertex repeated at the end) is accepted and unclosed.
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            bail!("simple polygon must have at least 3 points: {points:?}");
        }
        if points.iter().unique().count() != points.len() {
            bail!("simple polygon should not contain duplicate points: {points:?}");
        }

        let double_area = match Self::signed_double_area(&points) {
            0 => bail!("simple polygon has no area: {points:?}"),
            a if a < 0 => {
                //vertices should always be ordered counterclockwise (positive area)
                points.reverse();
                -a
            }
            a => a,
        };

        let bbox = Self::generate_bounding_box(&points);

        let polygon = SPolygon {
            vertices: points,
            bbox,
            double_area,
        };
        if polygon.is_self_intersecting() {
            bail!(
                "simple polygon should not intersect itself: {:?}",
                polygon.vertices
            );
        }
        Ok(polygon)
    }

    /// Exact test whether any two non-adjacent edges cross transversally.
    fn is_self_intersecting(&self) -> bool {
        let n = self.n_vertices();
        (0..n).any(|i| {
            ((i + 1)..n)
                .filter(|&j| j != i + 1 && !(i == 0 && j == n - 1))
                .any(|j| self.edge(i).intersection_with(&self.edge(j)) == EdgeIntersection::Proper)
        })
    }

    /// Axis-aligned rectangle with its bottom-left corner at the origin.
    pub fn rectangle(width: Coord, height: Coord) -> Result<Self> {
        SPolygon::new(vec![
            Point(0, 0),
            Point(width, 0),
            Point(width, height),
            Point(0, height),
        ])
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive, clockwise = negative
    pub fn signed_double_area(points: &[Point]) -> i128 {
        let mut sigma: i128 = 0;
        for i in 0..points.len() {
            let j = (i + 1) % points.len();
            let (x_i, y_i) = (points[i].0 as i128, points[i].1 as i128);
            let (x_j, y_j) = (points[j].0 as i128, points[j].1 as i128);
            sigma += (y_i + y_j) * (x_i - x_j);
        }
        sigma
    }

    pub fn generate_bounding_box(points: &[Point]) -> Rect {
        let (mut x_min, mut y_min) = (Coord::MAX, Coord::MAX);
        let (mut x_max, mut y_max) = (Coord::MIN, Coord::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Exact test whether `point` lies on the contour.
    pub fn on_boundary(&self, point: &Point) -> bool {
        self.edge_iter().any(|e| e.contains_point(point))
    }

    /// Returns a point guaranteed to lie strictly inside the polygon,
    /// as an exact rational: (numerator pair, denominator).
    ///
    /// Based on the classic interior-point construction: take the strictly
    /// convex corner at the lowest-leftmost vertex and either the centroid of
    /// its ear triangle or the midpoint towards the deepest intruding vertex.
    pub fn interior_point(&self) -> ((i128, i128), i128) {
        let n = self.n_vertices();
        let i_v = (0..n)
            .min_by_key(|&i| (self.vertices[i].1, self.vertices[i].0))
            .expect("polygon has no vertices");
        let v = self.vertices[i_v];
        let u = self.vertices[(i_v + n - 1) % n];
        let w = self.vertices[(i_v + 1) % n];

        debug_assert!(
            cross(u, v, w) != 0,
            "degenerate corner at lowest-leftmost vertex"
        );

        //vertices of the polygon inside the closed ear triangle (u, v, w)
        let in_ear = |p: Point| -> bool {
            if p == u || p == v || p == w {
                return false;
            }
            //triangle orientation: polygon is CCW, so (u, v, w) is CCW as well
            cross(u, v, p) >= 0 && cross(v, w, p) >= 0 && cross(w, u, p) >= 0
        };

        let intruder = self
            .vertices
            .iter()
            .filter(|&&p| in_ear(p))
            .max_by_key(|&&p| (cross(u, w, p)).abs());

        match intruder {
            None => {
                //ear is empty: its centroid is interior
                (
                    (
                        (u.0 + v.0 + w.0) as i128,
                        (u.1 + v.1 + w.1) as i128,
                    ),
                    3,
                )
            }
            Some(&q) => {
                //segment v-q lies in the interior, take its midpoint
                (((v.0 + q.0) as i128, (v.1 + q.1) as i128), 2)
            }
        }
    }

    /// Exact position of a rational point `num / den` with respect to the polygon.
    /// Ray casting with all comparisons scaled by `den`.
    fn position_of_rational(&self, (num_x, num_y): (i128, i128), den: i128) -> GeoPosition {
        debug_assert!(den > 0);
        let mut inside = false;
        for e in self.edge_iter() {
            let (x1, y1) = (e.start.0 as i128 * den, e.start.1 as i128 * den);
            let (x2, y2) = (e.end.0 as i128 * den, e.end.1 as i128 * den);

            //boundary check on the scaled segment
            let c = (x2 - x1) * (num_y - y1) - (y2 - y1) * (num_x - x1);
            if c == 0
                && num_x >= x1.min(x2)
                && num_x <= x1.max(x2)
                && num_y >= y1.min(y2)
                && num_y <= y1.max(y2)
            {
                return GeoPosition::Boundary;
            }

            //half-open crossing rule handles rays through vertices
            if (y1 > num_y) != (y2 > num_y) {
                let t = (num_x - x1) * (y2 - y1) - (num_y - y1) * (x2 - x1);
                if (y2 > y1 && t < 0) || (y2 < y1 && t > 0) {
                    inside = !inside;
                }
            }
        }
        match inside {
            true => GeoPosition::Interior,
            false => GeoPosition::Exterior,
        }
    }

    /// True iff any pair of edges crosses transversally, i.e. the interiors
    /// of the two polygons necessarily overlap.
    pub fn proper_crossing_with(&self, other: &SPolygon) -> bool {
        if !self.bbox.overlaps(&other.bbox) {
            return false;
        }
        self.edge_iter().any(|e1| {
            other
                .edge_iter()
                .any(|e2| e1.intersection_with(&e2) == EdgeIntersection::Proper)
        })
    }

    /// True iff some pair of collinear overlapping edges runs in the same
    /// direction. Both contours are counterclockwise, so aligned edges put
    /// both interiors on the same side of the shared line: the interiors
    /// overlap in a neighborhood of the shared segment.
    fn aligned_edge_overlap_with(&self, other: &SPolygon) -> bool {
        self.edge_iter().any(|e1| {
            other.edge_iter().any(|e2| {
                e1.intersection_with(&e2) == EdgeIntersection::Overlap && {
                    let dot = (e1.end.0 - e1.start.0) as i128 * (e2.end.0 - e2.start.0) as i128
                        + (e1.end.1 - e1.start.1) as i128 * (e2.end.1 - e2.start.1) as i128;
                    dot > 0
                }
            })
        })
    }

    /// True iff the boundaries of the two polygons share at least one point.
    pub fn boundary_contact_with(&self, other: &SPolygon) -> bool {
        if !self.bbox.overlaps(&other.bbox) {
            return false;
        }
        self.edge_iter().any(|e1| {
            other
                .edge_iter()
                .any(|e2| e1.intersection_with(&e2) != EdgeIntersection::None)
        })
    }

    /// True iff `other` lies entirely within `self` (boundary contact allowed).
    pub fn contains_polygon(&self, other: &SPolygon) -> bool {
        if self.bbox.relation_to(other.bbox) != crate::geometry::geo_enums::GeoRelation::Surrounding
        {
            return false;
        }
        if self.proper_crossing_with(other) {
            return false;
        }
        if other
            .vertices
            .iter()
            .any(|v| self.position_of(v) == GeoPosition::Exterior)
        {
            return false;
        }
        //all vertices inside or on the boundary: the interior sample settles
        //the case where every vertex touches the contour
        let (num, den) = other.interior_point();
        self.position_of_rational(num, den) != GeoPosition::Exterior
    }
}

impl Shape for SPolygon {
    fn centroid(&self) -> (f64, f64) {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let area = self.area();
        let (mut c_x, mut c_y) = (0.0, 0.0);

        for i in 0..self.n_vertices() {
            let j = (i + 1) % self.n_vertices();
            let (x_i, y_i) = (self.vertices[i].0 as f64, self.vertices[i].1 as f64);
            let (x_j, y_j) = (self.vertices[j].0 as f64, self.vertices[j].1 as f64);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        (c_x / (6.0 * area), c_y / (6.0 * area))
    }

    fn area(&self) -> f64 {
        self.double_area as f64 / 2.0
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }

    fn position_of(&self, point: &Point) -> GeoPosition {
        if !self.bbox.collides_with(point) {
            return GeoPosition::Exterior;
        }
        self.position_of_rational((point.0 as i128, point.1 as i128), 1)
    }
}

impl SPolygon {
    /// Convenience wrapper over [`Shape::position_of`].
    pub fn position_of(&self, point: &Point) -> GeoPosition {
        Shape::position_of(self, point)
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, dt: &DTransformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            vertices,
            bbox,
            double_area,
        } = self;

        vertices.iter_mut().for_each(|p| {
            p.transform(dt);
        });

        *bbox = SPolygon::generate_bounding_box(vertices);
        //rigid transforms preserve orientation; rotation rounding can nudge the area
        *double_area = SPolygon::signed_double_area(vertices);

        self
    }
}

impl CollidesWith<Point> for SPolygon {
    /// Strict interior containment. Boundary points do not collide.
    fn collides_with(&self, point: &Point) -> bool {
        self.position_of(point) == GeoPosition::Interior
    }
}

impl CollidesWith<SPolygon> for SPolygon {
    /// Exact interior-overlap test. Boundary contact alone is not a collision.
    fn collides_with(&self, other: &SPolygon) -> bool {
        if !self.bbox.overlaps(&other.bbox) {
            return false;
        }
        if self.proper_crossing_with(other) {
            return true;
        }
        if self.aligned_edge_overlap_with(other) {
            return true;
        }
        if other
            .vertices
            .iter()
            .any(|v| self.position_of(v) == GeoPosition::Interior)
            || self
                .vertices
                .iter()
                .any(|v| other.position_of(v) == GeoPosition::Interior)
        {
            return true;
        }
        //all contact is on boundaries; interior samples settle full or partial
        //coincidence (e.g. one polygon stacked exactly on the other)
        let (num, den) = self.interior_point();
        if other.position_of_rational(num, den) == GeoPosition::Interior {
            return true;
        }
        let (num, den) = other.interior_point();
        self.position_of_rational(num, den) == GeoPosition::Interior
    }
}

impl TouchesWith<SPolygon> for SPolygon {
    /// Boundaries share at least one point, interiors are disjoint.
    fn touches(&self, other: &SPolygon) -> bool {
        self.boundary_contact_with(other) && !self.collides_with(other)
    }
}

impl DistanceTo<Point> for SPolygon {
    fn sq_distance_to(&self, point: &Point) -> f64 {
        match self.position_of(point) {
            GeoPosition::Interior | GeoPosition::Boundary => 0.0,
            GeoPosition::Exterior => self
                .edge_iter()
                .map(|edge| edge.sq_distance_to(point))
                .min_by(|a, b| a.partial_cmp(b).expect("distance is NaN"))
                .expect("polygon has no edges"),
        }
    }

    fn distance_to(&self, point: &Point) -> f64 {
        self.sq_distance_to(point).sqrt()
    }
}

impl DistanceTo<SPolygon> for SPolygon {
    /// Minimum distance between the two contours (reported value).
    /// Zero when the polygons collide or touch.
    fn sq_distance_to(&self, other: &SPolygon) -> f64 {
        if self.collides_with(other) || self.touches(other) {
            return 0.0;
        }
        let a_to_b = other
            .vertices
            .iter()
            .map(|v| DistanceTo::<Point>::sq_distance_to(self, v));
        let b_to_a = self
            .vertices
            .iter()
            .map(|v| DistanceTo::<Point>::sq_distance_to(other, v));
        a_to_b
            .chain(b_to_a)
            .min_by(|a, b| a.partial_cmp(b).expect("distance is NaN"))
            .expect("polygon has no vertices")
    }

    fn distance_to(&self, other: &SPolygon) -> f64 {
        DistanceTo::<SPolygon>::sq_distance_to(self, other).sqrt()
    }
}

impl<T> From<T> for SPolygon
where
    T: Borrow<Rect>,
{
    fn from(r: T) -> Self {
        let r = r.borrow();
        SPolygon::new(r.corners().to_vec()).expect("valid rect is a valid polygon")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: Coord, dx: Coord, dy: Coord) -> SPolygon {
        let mut sq = SPolygon::rectangle(size, size).unwrap();
        sq.translate(dx, dy);
        sq
    }

    #[test]
    fn closed_input_is_unclosed_and_normalized_ccw() {
        //clockwise, explicitly closed
        let p = SPolygon::new(vec![
            Point(0, 0),
            Point(0, 10),
            Point(10, 10),
            Point(10, 0),
            Point(0, 0),
        ])
        .unwrap();
        assert_eq!(p.n_vertices(), 4);
        assert_eq!(p.double_area, 200);
        assert!(SPolygon::signed_double_area(&p.vertices) > 0);
    }

    #[test]
    fn degenerate_input_is_rejected() {
        assert!(SPolygon::new(vec![Point(0, 0), Point(10, 0)]).is_err());
        assert!(SPolygon::new(vec![Point(0, 0), Point(10, 0), Point(20, 0)]).is_err());
        assert!(
            SPolygon::new(vec![Point(0, 0), Point(10, 0), Point(10, 0), Point(0, 10)]).is_err()
        );
        //self-intersecting contour
        assert!(
            SPolygon::new(vec![Point(0, 0), Point(12, 0), Point(0, 10), Point(6, 14)]).is_err()
        );
    }

    #[test]
    fn point_position() {
        let p = SPolygon::rectangle(10, 10).unwrap();
        assert_eq!(p.position_of(&Point(1, 1)), GeoPosition::Interior);
        assert_eq!(p.position_of(&Point(3, 3)), GeoPosition::Interior);
        assert_eq!(p.position_of(&Point(11, 11)), GeoPosition::Exterior);
        assert_eq!(p.position_of(&Point(11, 12)), GeoPosition::Exterior);
        //boundary counts as outside the interior
        assert_eq!(p.position_of(&Point(0, 5)), GeoPosition::Boundary);
        assert_eq!(p.position_of(&Point(10, 10)), GeoPosition::Boundary);
        assert!(p.collides_with(&Point(1, 1)));
        assert!(!p.collides_with(&Point(0, 5)));
    }

    #[test]
    fn touching_squares_do_not_collide() {
        let a = square(10, 0, 0);
        let b = square(10, 10, 0);
        assert!(!a.collides_with(&b));
        assert!(a.touches(&b));

        let c = square(10, 5, 0);
        assert!(a.collides_with(&c));
        assert!(!a.touches(&c));

        let d = square(10, 20, 20);
        assert!(!a.collides_with(&d));
        assert!(!a.touches(&d));
    }

    #[test]
    fn band_overlap_with_collinear_sides_collides() {
        //same x-span, y-spans overlapping in a 66x10 band: no edge pair
        //crosses properly and every vertex lies on the other contour, yet
        //the interiors overlap
        let mut a = SPolygon::rectangle(66, 96).unwrap();
        a.translate(86, 0);
        let mut b = SPolygon::rectangle(66, 66).unwrap();
        b.translate(86, 86);

        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
        assert!(!a.touches(&b));

        //stacked with a single shared edge the interiors stay disjoint
        let mut c = SPolygon::rectangle(66, 66).unwrap();
        c.translate(86, 96);
        assert!(!a.collides_with(&c));
        assert!(a.touches(&c));
    }

    #[test]
    fn coincident_squares_collide() {
        let a = square(10, 0, 0);
        let b = square(10, 0, 0);
        assert!(a.collides_with(&b));
        assert!(!a.touches(&b));
    }

    #[test]
    fn corner_contact_is_touching() {
        let a = square(10, 0, 0);
        let b = square(10, 10, 10);
        assert!(!a.collides_with(&b));
        assert!(a.touches(&b));
    }

    #[test]
    fn containment() {
        let outer = square(100, 0, 0);
        let inner = square(10, 40, 40);
        assert!(outer.contains_polygon(&inner));
        assert!(!inner.contains_polygon(&outer));
        //collision implies interior overlap even under containment
        assert!(outer.collides_with(&inner));
    }

    #[test]
    fn interior_point_is_interior() {
        let shapes = [
            SPolygon::rectangle(10, 10).unwrap(),
            SPolygon::new(vec![Point(0, 0), Point(40, 10), Point(20, 40)]).unwrap(),
            //concave: arrowhead
            SPolygon::new(vec![
                Point(0, 0),
                Point(40, 0),
                Point(20, 10),
                Point(20, 40),
            ])
            .unwrap(),
        ];
        for s in shapes {
            let (num, den) = s.interior_point();
            assert_eq!(
                s.position_of_rational(num, den),
                GeoPosition::Interior,
                "interior point of {:?}",
                s.vertices
            );
        }
    }

    #[test]
    fn polygon_distance_between_separated_squares() {
        let a = square(10, 0, 0);
        let b = square(10, 15, 0);
        let d: f64 = DistanceTo::<SPolygon>::distance_to(&a, &b);
        assert!((d - 5.0).abs() < 1e-9);
    }
}
