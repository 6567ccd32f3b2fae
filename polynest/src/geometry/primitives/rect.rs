use anyhow::Result;
use anyhow::ensure;

use crate::Coord;
use crate::geometry::geo_enums::GeoRelation;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;

///Axis-aligned rectangle in the integer coordinate space
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct Rect {
    pub x_min: Coord,
    pub y_min: Coord,
    pub x_max: Coord,
    pub y_max: Coord,
}

impl Rect {
    pub fn try_new(x_min: Coord, y_min: Coord, x_max: Coord, y_max: Coord) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Returns the geometric relation between `self` and another [`Rect`].
    #[inline(always)]
    pub fn relation_to(&self, other: Rect) -> GeoRelation {
        if !self.overlaps(&other) {
            return GeoRelation::Disjoint;
        }
        if self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
        {
            return GeoRelation::Surrounding;
        }
        if self.x_min >= other.x_min
            && self.y_min >= other.y_min
            && self.x_max <= other.x_max
            && self.y_max <= other.y_max
        {
            return GeoRelation::Enclosed;
        }
        GeoRelation::Intersecting
    }

    /// True when the closed rectangles share at least one point.
    #[inline(always)]
    pub fn overlaps(&self, other: &Rect) -> bool {
        Coord::max(self.x_min, other.x_min) <= Coord::min(self.x_max, other.x_max)
            && Coord::max(self.y_min, other.y_min) <= Coord::min(self.y_max, other.y_max)
    }

    /// Returns the four corners, counterclockwise starting at the bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_max, self.y_min),
            Point(self.x_max, self.y_max),
            Point(self.x_min, self.y_max),
        ]
    }

    /// Returns the four edges, in the same order as [Rect::corners].
    pub fn edges(&self) -> [Edge; 4] {
        let c = self.corners();
        [
            Edge {
                start: c[0],
                end: c[1],
            },
            Edge {
                start: c[1],
                end: c[2],
            },
            Edge {
                start: c[2],
                end: c[3],
            },
            Edge {
                start: c[3],
                end: c[0],
            },
        ]
    }

    pub fn width(&self) -> Coord {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> Coord {
        self.y_max - self.y_min
    }

    /// Exact area; widths at the 10^6 scale overflow i64 when multiplied.
    pub fn area(&self) -> i128 {
        self.width() as i128 * self.height() as i128
    }

    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) as f64 / 2.0,
            (self.y_min + self.y_max) as f64 / 2.0,
        )
    }

    /// Returns the largest rectangle contained in both `a` and `b`.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = Coord::max(a.x_min, b.x_min);
        let y_min = Coord::max(a.y_min, b.y_min);
        let x_max = Coord::min(a.x_max, b.x_max);
        let y_max = Coord::min(a.y_max, b.y_max);
        (x_min < x_max && y_min < y_max).then_some(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Returns the smallest rectangle containing both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: Coord::min(a.x_min, b.x_min),
            y_min: Coord::min(a.y_min, b.y_min),
            x_max: Coord::max(a.x_max, b.x_max),
            y_max: Coord::max(a.y_max, b.y_max),
        }
    }
}

impl CollidesWith<Point> for Rect {
    /// Closed containment: boundary points collide.
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}
