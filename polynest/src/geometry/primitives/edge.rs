use anyhow::Result;
use anyhow::ensure;

use crate::Coord;
use crate::geometry::DTransformation;
use crate::geometry::Rational;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Transformable};
use crate::geometry::primitives::Point;
use crate::geometry::primitives::point::cross;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

/// Exact classification of how two edges meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeIntersection {
    /// No common point
    None,
    /// The interiors cross transversally
    Proper,
    /// Exactly one common point, on the boundary of at least one edge
    Touching,
    /// Collinear edges sharing more than a single point
    Overlap,
}

impl Edge {
    pub fn try_new(start: Point, end: Point) -> Result<Self> {
        ensure!(start != end, "degenerate edge, {start:?} == {end:?}");
        Ok(Edge { start, end })
    }

    pub fn reverse(mut self) -> Self {
        std::mem::swap(&mut self.start, &mut self.end);
        self
    }

    pub fn x_min(&self) -> Coord {
        Coord::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> Coord {
        Coord::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> Coord {
        Coord::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> Coord {
        Coord::max(self.start.1, self.end.1)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Exact test whether `point` lies on the closed segment.
    pub fn contains_point(&self, point: &Point) -> bool {
        cross(self.start, self.end, *point) == 0
            && point.0 >= self.x_min()
            && point.0 <= self.x_max()
            && point.1 >= self.y_min()
            && point.1 <= self.y_max()
    }

    /// Exact intersection classification between two segments.
    pub fn intersection_with(&self, other: &Edge) -> EdgeIntersection {
        if self.x_min().max(other.x_min()) > self.x_max().min(other.x_max())
            || self.y_min().max(other.y_min()) > self.y_max().min(other.y_max())
        {
            //bounding boxes do not overlap
            return EdgeIntersection::None;
        }

        let d1 = cross(other.start, other.end, self.start);
        let d2 = cross(other.start, other.end, self.end);
        let d3 = cross(self.start, self.end, other.start);
        let d4 = cross(self.start, self.end, other.end);

        if ((d1 > 0 && d2 < 0) || (d1 < 0 && d2 > 0))
            && ((d3 > 0 && d4 < 0) || (d3 < 0 && d4 > 0))
        {
            return EdgeIntersection::Proper;
        }

        if d1 == 0 && d2 == 0 && d3 == 0 && d4 == 0 {
            //collinear with overlapping bounding boxes: project on the dominant axis
            let vertical = self.start.0 == self.end.0;
            let (lo, hi) = match vertical {
                true => (
                    self.y_min().max(other.y_min()),
                    self.y_max().min(other.y_max()),
                ),
                false => (
                    self.x_min().max(other.x_min()),
                    self.x_max().min(other.x_max()),
                ),
            };
            return match lo == hi {
                true => EdgeIntersection::Touching,
                false => EdgeIntersection::Overlap,
            };
        }

        let endpoint_contact = (d1 == 0 && other.contains_point(&self.start))
            || (d2 == 0 && other.contains_point(&self.end))
            || (d3 == 0 && self.contains_point(&other.start))
            || (d4 == 0 && self.contains_point(&other.end));

        match endpoint_contact {
            true => EdgeIntersection::Touching,
            false => EdgeIntersection::None,
        }
    }

    /// Signed horizontal distance from `point` to the segment, measured along
    /// the x-axis at the point's y-coordinate. Reports `None` when the
    /// horizontal projection does not land within the segment's y-span.
    pub fn horizontal_distance_to(&self, point: &Point) -> Option<Rational> {
        let Point(px, py) = *point;
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;

        if py < self.y_min() || py > self.y_max() {
            return None;
        }
        if y1 == y2 {
            //horizontal segment: distance to the nearest endpoint
            let d1 = px - x1;
            let d2 = px - x2;
            let d = if d1.abs() <= d2.abs() { d1 } else { d2 };
            return Some(Rational::from_integer(d as i128));
        }
        //x-coordinate of the segment at height py, exact rational
        let num = (px - x1) as i128 * (y2 - y1) as i128 - (py - y1) as i128 * (x2 - x1) as i128;
        let den = (y2 - y1) as i128;
        Some(Rational::new(num, den))
    }

    /// Signed vertical distance from `point` to the segment, measured along
    /// the y-axis at the point's x-coordinate. Reports `None` when the
    /// vertical projection does not land within the segment's x-span.
    pub fn vertical_distance_to(&self, point: &Point) -> Option<Rational> {
        let Point(px, py) = *point;
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;

        if px < self.x_min() || px > self.x_max() {
            return None;
        }
        if x1 == x2 {
            //vertical segment: distance to the nearest endpoint
            let d1 = py - y1;
            let d2 = py - y2;
            let d = if d1.abs() <= d2.abs() { d1 } else { d2 };
            return Some(Rational::from_integer(d as i128));
        }
        let num = (py - y1) as i128 * (x2 - x1) as i128 - (px - x1) as i128 * (y2 - y1) as i128;
        let den = (x2 - x1) as i128;
        Some(Rational::new(num, den))
    }

    /// Returns the closest point on the closed segment to the given point (reported value).
    pub fn closest_point_on_edge(&self, point: &Point) -> (f64, f64) {
        //from https://stackoverflow.com/a/6853926
        let (x1, y1) = (self.start.0 as f64, self.start.1 as f64);
        let (x2, y2) = (self.end.0 as f64, self.end.1 as f64);
        let (x, y) = (point.0 as f64, point.1 as f64);

        let a = x - x1;
        let b = y - y1;
        let c = x2 - x1;
        let d = y2 - y1;

        let dot = a * c + b * d;
        let len_sq = c * c + d * d;
        let param = if len_sq != 0.0 { dot / len_sq } else { -1.0 };

        match param {
            p if p < 0.0 => (x1, y1),
            p if p > 1.0 => (x2, y2),
            p => (x1 + p * c, y1 + p * d),
        }
    }
}

impl Transformable for Edge {
    fn transform(&mut self, dt: &DTransformation) -> &mut Self {
        let Edge { start, end } = self;
        start.transform(dt);
        end.transform(dt);
        self
    }
}

impl DistanceTo<Point> for Edge {
    #[inline(always)]
    fn distance_to(&self, point: &Point) -> f64 {
        self.sq_distance_to(point).sqrt()
    }

    #[inline(always)]
    fn sq_distance_to(&self, point: &Point) -> f64 {
        let (xx, yy) = self.closest_point_on_edge(point);
        let (dx, dy) = (point.0 as f64 - xx, point.1 as f64 - yy);
        dx * dx + dy * dy
    }
}

impl CollidesWith<Edge> for Edge {
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        self.intersection_with(other) != EdgeIntersection::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Edge {
        Edge::try_new(Point(x1, y1), Point(x2, y2)).unwrap()
    }

    #[test]
    fn proper_crossing_vs_touching() {
        assert_eq!(
            e(0, 0, 10, 10).intersection_with(&e(0, 10, 10, 0)),
            EdgeIntersection::Proper
        );
        //shared endpoint
        assert_eq!(
            e(0, 0, 10, 0).intersection_with(&e(10, 0, 10, 10)),
            EdgeIntersection::Touching
        );
        //endpoint in the interior of the other edge
        assert_eq!(
            e(0, 0, 10, 0).intersection_with(&e(5, 0, 5, 10)),
            EdgeIntersection::Touching
        );
        //collinear overlap
        assert_eq!(
            e(0, 0, 10, 0).intersection_with(&e(5, 0, 15, 0)),
            EdgeIntersection::Overlap
        );
        //collinear, single shared endpoint
        assert_eq!(
            e(0, 0, 10, 0).intersection_with(&e(10, 0, 20, 0)),
            EdgeIntersection::Touching
        );
        assert_eq!(
            e(0, 0, 10, 0).intersection_with(&e(0, 1, 10, 1)),
            EdgeIntersection::None
        );
    }

    #[test]
    fn axis_distances_match_reference_vectors() {
        let seg = e(0, 0, 10, 10);
        let p2 = Point(10, 0);

        assert_eq!(
            seg.horizontal_distance_to(&p2),
            Some(Rational::from_integer(10))
        );
        assert_eq!(
            seg.vertical_distance_to(&p2),
            Some(Rational::from_integer(-10))
        );
        assert_eq!(
            seg.vertical_distance_to(&Point(10, 20)),
            Some(Rational::from_integer(10))
        );

        let seg2 = e(0, 0, 0, 40);
        let p4 = Point(80, 0);
        assert_eq!(
            seg2.horizontal_distance_to(&p4),
            Some(Rational::from_integer(80))
        );
        //point is unrelated to the segment in the vertical direction
        assert_eq!(seg2.vertical_distance_to(&p4), None);
    }
}
