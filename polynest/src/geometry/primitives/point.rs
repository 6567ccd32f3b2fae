use std::fmt::{Display, Formatter};

use crate::Coord;
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::{DistanceTo, Transformable};

/// Geometric primitive representing a point in the integer coordinate space
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub struct Point(pub Coord, pub Coord);

impl Point {
    pub fn x(&self) -> Coord {
        self.0
    }

    pub fn y(&self) -> Coord {
        self.1
    }
}

/// Exact 2D cross product of `b - a` and `c - a`.
/// Positive when `a`→`b`→`c` turns counterclockwise, zero when collinear.
/// Computed in i128: products of scaled coordinates exceed the i64 range.
#[inline(always)]
pub fn cross(a: Point, b: Point, c: Point) -> i128 {
    let (abx, aby) = ((b.0 - a.0) as i128, (b.1 - a.1) as i128);
    let (acx, acy) = ((c.0 - a.0) as i128, (c.1 - a.1) as i128);
    abx * acy - aby * acx
}

/// Exact dot product of `b - a` and `c - a` in i128.
#[inline(always)]
pub fn dot(a: Point, b: Point, c: Point) -> i128 {
    let (abx, aby) = ((b.0 - a.0) as i128, (b.1 - a.1) as i128);
    let (acx, acy) = ((c.0 - a.0) as i128, (c.1 - a.1) as i128);
    abx * acx + aby * acy
}

impl Transformable for Point {
    fn transform(&mut self, dt: &DTransformation) -> &mut Self {
        let Point(x, y) = *self;
        *self = dt.apply(Point(x, y));
        self
    }
}

impl DistanceTo<Point> for Point {
    fn distance_to(&self, other: &Point) -> f64 {
        self.sq_distance_to(other).sqrt()
    }

    fn sq_distance_to(&self, other: &Point) -> f64 {
        let dx = (self.0 - other.0) as f64;
        let dy = (self.1 - other.1) as f64;
        dx * dx + dy * dy
    }
}

impl From<Point> for (Coord, Coord) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from(p: (Coord, Coord)) -> Self {
        Point(p.0, p.1)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
