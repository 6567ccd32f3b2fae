use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::geo_traits::DistanceTo;
use crate::geometry::primitives::Point;

/// Circle with a floating point center and radius.
/// Purely a reported measure (never used in feasibility decisions).
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Circle {
    pub center: (f64, f64),
    pub radius: f64,
}

impl Circle {
    /// Computes an enclosing circle of a set of points: seeded by the furthest
    /// pair on the convex hull, then grown to admit any stragglers.
    pub fn bounding_circle(points: &[Point]) -> Circle {
        let hull = convex_hull_from_points(points.to_vec());

        let (p1, p2) = hull
            .iter()
            .tuple_combinations()
            .max_by_key(|(p1, p2)| OrderedFloat(p1.sq_distance_to(p2)))
            .expect("bounding circle of fewer than 2 points");

        let mut center = (
            (p1.0 + p2.0) as f64 / 2.0,
            (p1.1 + p2.1) as f64 / 2.0,
        );
        let mut radius = p1.distance_to(p2) / 2.0;

        //grow the circle for any point still outside (Ritter's scheme)
        for p in points {
            let d = ((p.0 as f64 - center.0).powi(2) + (p.1 as f64 - center.1).powi(2)).sqrt();
            if d > radius {
                let new_radius = (radius + d) / 2.0;
                let shift = (d - new_radius) / d;
                center = (
                    center.0 + (p.0 as f64 - center.0) * shift,
                    center.1 + (p.1 as f64 - center.1) * shift,
                );
                radius = new_radius;
            }
        }

        Circle { center, radius }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn triangle_bounding_circle() {
        let points = [Point(0, 10), Point(10, 0), Point(0, -10)];
        let c = Circle::bounding_circle(&points);
        assert!(approx_eq!(f64, c.center.0, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, c.center.1, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, c.radius, 10.0, epsilon = 1e-9));
    }

    #[test]
    fn all_points_within_radius() {
        let points = [
            Point(0, 0),
            Point(100, 20),
            Point(40, 90),
            Point(-30, 60),
            Point(10, -70),
        ];
        let c = Circle::bounding_circle(&points);
        for p in points {
            let d = ((p.0 as f64 - c.center.0).powi(2) + (p.1 as f64 - c.center.1).powi(2)).sqrt();
            //relative tolerance as the reference implementation verifies
            assert!(d <= c.radius || (1.0 - d / c.radius).abs() <= 1e-3);
        }
    }
}
