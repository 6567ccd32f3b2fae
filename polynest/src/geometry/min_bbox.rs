use anyhow::{Result, ensure};

use crate::Coord;
use crate::geometry::Rational;
use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::primitives::{Point, SPolygon};

/// Minimum-area bounding rectangle of a convex hull, found by the rotating
/// calipers theorem: the optimal rectangle shares an orientation with one of
/// the hull's edges.
///
/// The rotation into each candidate frame uses the edge's own direction
/// vector instead of trigonometry, so candidate areas are ranked as exact
/// rationals. Width/height/center are derived f64 views for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct MinBbox {
    /// Direction vector of the hull edge the rectangle is aligned with
    pub axis: (Coord, Coord),
    /// Exact area of the rectangle
    pub area_exact: Rational,
    pub width: f64,
    pub height: f64,
    pub center: (f64, f64),
}

impl MinBbox {
    pub fn area(&self) -> f64 {
        ratio_to_f64(self.area_exact)
    }

    /// Rotation angle that would bring the rectangle's axis onto the x-axis.
    pub fn alignment_rotation(&self) -> f64 {
        -(self.axis.1 as f64).atan2(self.axis.0 as f64)
    }
}

/// Computes the minimum-area bounding box of the polygon's convex hull.
pub fn min_area_bbox(shape: &SPolygon) -> Result<MinBbox> {
    let hull = convex_hull_from_points(shape.vertices.clone());
    ensure!(hull.len() >= 3, "degenerate hull: {hull:?}");

    let mut best: Option<MinBbox> = None;

    for i in 0..hull.len() {
        let p = hull[i];
        let q = hull[(i + 1) % hull.len()];
        let (dx, dy) = ((q.0 - p.0) as i128, (q.1 - p.1) as i128);
        let len_sq = dx * dx + dy * dy;

        //coordinates in the frame rotated by the edge direction, scaled by |edge|
        let (mut u_min, mut u_max) = (i128::MAX, i128::MIN);
        let (mut v_min, mut v_max) = (i128::MAX, i128::MIN);
        for &Point(x, y) in &hull {
            let u = x as i128 * dx + y as i128 * dy;
            let v = -(x as i128) * dy + y as i128 * dx;
            u_min = u_min.min(u);
            u_max = u_max.max(u);
            v_min = v_min.min(v);
            v_max = v_max.max(v);
        }

        let area = Rational::new((u_max - u_min) * (v_max - v_min), len_sq);

        if best.as_ref().is_none_or(|b| area < b.area_exact) {
            let len = (len_sq as f64).sqrt();
            let (c_u, c_v) = (
                (u_min + u_max) as f64 / 2.0,
                (v_min + v_max) as f64 / 2.0,
            );
            best = Some(MinBbox {
                axis: ((q.0 - p.0), (q.1 - p.1)),
                area_exact: area,
                width: (u_max - u_min) as f64 / len,
                height: (v_max - v_min) as f64 / len,
                //rotate the frame center back into world coordinates
                center: (
                    (c_u * dx as f64 - c_v * dy as f64) / len_sq as f64,
                    (c_u * dy as f64 + c_v * dx as f64) / len_sq as f64,
                ),
            });
        }
    }

    Ok(best.expect("hull has at least 3 edges"))
}

fn ratio_to_f64(r: Rational) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;

    /// Brute-force reference: rotate the polygon into every edge frame (f64)
    /// and take the smallest axis-aligned bounding box area.
    fn ref_min_area(shape: &SPolygon) -> f64 {
        let mut min_area = f64::MAX;
        for e in shape.edge_iter() {
            let angle = -((e.end.1 - e.start.1) as f64).atan2((e.end.0 - e.start.0) as f64);
            let (sin, cos) = angle.sin_cos();
            let (mut x_min, mut x_max) = (f64::MAX, f64::MIN);
            let (mut y_min, mut y_max) = (f64::MAX, f64::MIN);
            for &Point(x, y) in &shape.vertices {
                let (xf, yf) = (x as f64, y as f64);
                let xr = cos * xf - sin * yf;
                let yr = sin * xf + cos * yf;
                x_min = x_min.min(xr);
                x_max = x_max.max(xr);
                y_min = y_min.min(yr);
                y_max = y_max.max(yr);
            }
            min_area = min_area.min((x_max - x_min) * (y_max - y_min));
        }
        min_area
    }

    #[test]
    fn scaled_triangle_matches_reference() {
        let u = |n: Coord| n * 1_000_000;
        let poly =
            SPolygon::new(vec![Point(u(0), u(0)), Point(u(4), u(1)), Point(u(2), u(4))]).unwrap();

        let bb = min_area_bbox(&poly).unwrap();
        let reference = ref_min_area(&poly);

        assert!((bb.area() - reference).abs() <= 500e6);
        //the optimal box can never beat the triangle itself
        assert!(bb.area() >= poly.area());
    }

    #[test]
    fn square_is_its_own_min_bbox() {
        let sq = SPolygon::rectangle(1_000_000, 1_000_000).unwrap();
        let bb = min_area_bbox(&sq).unwrap();
        assert_eq!(bb.area_exact, Rational::from_integer(1_000_000_000_000));
    }

    #[test]
    fn rotated_rect_recovers_true_area() {
        //a 3-4-5 scaled rectangle rotated onto lattice points:
        //corners (0,0), (4000,3000), (1000,7000), (-3000,4000)
        let poly = SPolygon::new(vec![
            Point(0, 0),
            Point(4000, 3000),
            Point(1000, 7000),
            Point(-3000, 4000),
        ])
        .unwrap();
        let bb = min_area_bbox(&poly).unwrap();
        //sides 5000 x 5000
        assert_eq!(bb.area_exact, Rational::from_integer(25_000_000));
        let aabb_area = poly.bbox.area() as f64;
        assert!(bb.area() <= aabb_area);
    }
}
