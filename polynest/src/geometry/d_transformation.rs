use std::fmt::Display;

use ordered_float::NotNan;

use crate::Coord;
use crate::geometry::primitives::Point;

/// [Proper rigid transformation](https://en.wikipedia.org/wiki/Rigid_transformation),
/// decomposed into a rotation about the origin followed by an integer translation.
///
/// The translation component is exact. The rotation is applied in f64 and the
/// result rounded back to the integer grid; every feasibility predicate
/// downstream operates on the rounded coordinates, so rounding never leaks
/// into accept/reject decisions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
pub struct DTransformation {
    /// The rotation in radians
    pub rotation: NotNan<f64>,
    /// The translation in the x and y-axis
    pub translation: (Coord, Coord),
}

impl DTransformation {
    pub fn new(rotation: f64, translation: (Coord, Coord)) -> Self {
        Self {
            rotation: NotNan::new(rotation).expect("rotation is NaN"),
            translation,
        }
    }

    pub const fn empty() -> Self {
        const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
        Self {
            rotation: _0,
            translation: (0, 0),
        }
    }

    pub fn from_translation(translation: (Coord, Coord)) -> Self {
        Self {
            rotation: NotNan::new(0.0).expect("0.0 is not NaN"),
            translation,
        }
    }

    pub fn from_rotation(rotation: f64) -> Self {
        Self::new(rotation, (0, 0))
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.into()
    }

    pub fn translation(&self) -> (Coord, Coord) {
        self.translation
    }

    /// Appends an additional exact translation.
    pub fn translated_by(mut self, dx: Coord, dy: Coord) -> Self {
        self.translation = (self.translation.0 + dx, self.translation.1 + dy);
        self
    }

    /// Applies `self` to a point: rotation about the origin, then translation.
    pub fn apply(&self, p: Point) -> Point {
        let Point(x, y) = p;
        let (rx, ry) = match self.rotation.into_inner() {
            0.0 => (x, y),
            r => {
                let (sin, cos) = r.sin_cos();
                let (xf, yf) = (x as f64, y as f64);
                (
                    (cos * xf - sin * yf).round() as Coord,
                    (sin * xf + cos * yf).round() as Coord,
                )
            }
        };
        Point(rx + self.translation.0, ry + self.translation.1)
    }
}

impl Display for DTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r: {:.3}°, t: ({}, {})",
            self.rotation.to_degrees(),
            self.translation.0,
            self.translation.1
        )
    }
}
