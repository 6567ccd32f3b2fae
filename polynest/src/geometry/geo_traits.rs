use crate::Coord;
use crate::geometry::DTransformation;
use crate::geometry::primitives::{Point, Rect};

/// Trait for types that can detect collisions between `Self` and `T`.
/// A shared boundary point alone does not count as a collision, interiors must meet.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can detect boundary contact without interior overlap.
pub trait TouchesWith<T> {
    fn touches(&self, other: &T) -> bool;
}

/// Trait for types that can compute the minimum distance between `Self` and `T`.
/// Distances are reported values, not feasibility predicates, hence `f64`.
pub trait DistanceTo<T> {
    /// Minimum distance between two primitives. Will be 0 in case of a collision.
    fn distance_to(&self, other: &T) -> f64;

    /// Squared version of [DistanceTo::distance_to]
    fn sq_distance_to(&self, other: &T) -> f64;
}

/// Trait for types that can be modified by a [`DTransformation`].
pub trait Transformable: Clone {
    /// Applies a transformation to `self`.
    fn transform(&mut self, dt: &DTransformation) -> &mut Self;

    /// Applies a transformation to a clone.
    fn transform_clone(&self, dt: &DTransformation) -> Self {
        let mut clone = self.clone();
        clone.transform(dt);
        clone
    }

    /// Translates `self` by an exact integer offset.
    fn translate(&mut self, dx: Coord, dy: Coord) -> &mut Self {
        self.transform(&DTransformation::from_translation((dx, dy)))
    }
}

/// Trait for shared properties of geometric primitives.
pub trait Shape {
    /// Geometric center of the shape (reported value)
    fn centroid(&self) -> (f64, f64);

    /// Area of the interior of the shape (reported value)
    fn area(&self) -> f64;

    /// Bounding box of the shape
    fn bbox(&self) -> Rect;

    /// Classifies a point with respect to the shape.
    /// Boundary points are classified as [`crate::geometry::geo_enums::GeoPosition::Boundary`],
    /// not as interior.
    fn position_of(&self, point: &Point) -> crate::geometry::geo_enums::GeoPosition;
}
