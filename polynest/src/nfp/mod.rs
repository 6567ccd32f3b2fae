//! No-fit polygon computation for convex shapes and union of placed piles.
//!
//! The NFP of a stationary polygon S and an orbiting polygon O is the locus
//! of positions of a reference vertex on O such that O touches S externally
//! without overlapping it. For convex S and O it equals the Minkowski sum
//! S ⊕ (−O), shifted to the orbiter's reference vertex.

use std::cmp::Ordering;

use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;

use crate::Coord;
use crate::geometry::primitives::{Point, SPolygon};
use crate::geometry::primitives::point::cross;

/// Result of a no-fit polygon computation.
#[derive(Clone, Debug)]
pub struct Nfp {
    /// The no-fit region boundary
    pub shape: SPolygon,
    /// Vertex on the orbiter (at its input position) that NFP boundary
    /// points refer to; `boundary_point - reference_vertex` is the
    /// translation bringing the orbiter into touching contact.
    pub reference_vertex: Point,
}

impl Nfp {
    /// Translation placing the orbiter's reference vertex on `boundary_point`.
    pub fn translation_for(&self, boundary_point: Point) -> (Coord, Coord) {
        (
            boundary_point.0 - self.reference_vertex.0,
            boundary_point.1 - self.reference_vertex.1,
        )
    }
}

/// The reference vertex convention: top-most, then right-most vertex.
pub fn reference_vertex(shape: &SPolygon) -> Point {
    *shape
        .vertices
        .iter()
        .max_by_key(|p| (p.1, p.0))
        .expect("polygon has no vertices")
}

/// Removes collinear and duplicate vertices from a contour.
/// Ill-defined angular ordering in the Minkowski walk stems from these.
pub fn strip_collinear(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        if cur != prev && cross(prev, cur, next) != 0 {
            out.push(cur);
        }
    }
    out
}

/// Computes the no-fit polygon of a convex `stationary` and a convex
/// `orbiter`, both at their current absolute positions.
///
/// Returns an error for degenerate input (zero area after collinear removal)
/// or non-convex input; callers treat that the same as "no candidate found".
pub fn no_fit_polygon(stationary: &SPolygon, orbiter: &SPolygon) -> Result<Nfp> {
    let s = strip_collinear(&stationary.vertices);
    let o = strip_collinear(&orbiter.vertices);
    ensure!(
        s.len() >= 3 && o.len() >= 3,
        "degenerate NFP input: {} and {} vertices after collinear removal",
        s.len(),
        o.len()
    );
    ensure!(
        is_convex(&s) && is_convex(&o),
        "NFP engine only handles convex/convex pairs"
    );

    //reflect the orbiter through the origin; the reflection of a CCW contour
    //remains CCW with negated edge vectors
    let o_reflected = o.iter().map(|p| Point(-p.0, -p.1)).collect_vec();

    let sum = minkowski_sum_convex(&s, &o_reflected);

    let v_ref = reference_vertex(orbiter);
    let shifted = sum
        .iter()
        .map(|p| Point(p.0 + v_ref.0, p.1 + v_ref.1))
        .collect_vec();

    let shape = SPolygon::new(strip_collinear(&shifted))
        .context("NFP boundary degenerated")?;

    Ok(Nfp {
        shape,
        reference_vertex: v_ref,
    })
}

/// Merges a pile of polygons with one more polygon into their union.
/// Touching contours are coalesced; a result of more than one polygon means
/// the union is disconnected.
pub fn merge(pile: &[SPolygon], new: &SPolygon) -> Result<Vec<SPolygon>> {
    use geo::BooleanOps;

    let mut acc = geo_types::MultiPolygon::new(vec![to_geo(new)]);
    for p in pile {
        acc = acc.union(&geo_types::MultiPolygon::new(vec![to_geo(p)]));
    }

    let mut out = Vec::with_capacity(acc.0.len());
    for poly in acc.iter() {
        let points = poly
            .exterior()
            .points()
            .map(|p| Point(p.x().round() as Coord, p.y().round() as Coord))
            .dedup()
            .collect_vec();
        out.push(SPolygon::new(points).context("union produced a degenerate contour")?);
    }
    if out.is_empty() {
        bail!("union produced no polygons");
    }
    Ok(out)
}

fn to_geo(sp: &SPolygon) -> geo_types::Polygon<f64> {
    geo_types::Polygon::new(
        sp.vertices
            .iter()
            .map(|p| (p.0 as f64, p.1 as f64))
            .collect(),
        vec![],
    )
}

fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    (0..n).all(|i| cross(points[i], points[(i + 1) % n], points[(i + 2) % n]) > 0)
}

/// Minkowski sum of two convex CCW contours by the classic angular edge merge.
fn minkowski_sum_convex(a: &[Point], b: &[Point]) -> Vec<Point> {
    let a = rotate_to_bottom_left(a);
    let b = rotate_to_bottom_left(b);
    let (n, m) = (a.len(), b.len());

    let mut result = Vec::with_capacity(n + m);
    let mut cur = Point(a[0].0 + b[0].0, a[0].1 + b[0].1);
    let (mut i, mut j) = (0, 0);

    while i < n || j < m {
        result.push(cur);
        let take_a = match (i < n, j < m) {
            (true, false) => true,
            (false, true) => false,
            (true, true) => {
                let ea = edge_vec(&a, i);
                let eb = edge_vec(&b, j);
                angle_cmp(ea, eb) != Ordering::Greater
            }
            (false, false) => unreachable!(),
        };
        let (dx, dy) = match take_a {
            true => {
                let e = edge_vec(&a, i);
                i += 1;
                e
            }
            false => {
                let e = edge_vec(&b, j);
                j += 1;
                e
            }
        };
        cur = Point(cur.0 + dx, cur.1 + dy);
    }
    //the edge vectors sum to zero, so `cur` has arrived back at the start
    debug_assert_eq!(cur, result[0]);
    result
}

fn edge_vec(points: &[Point], i: usize) -> (Coord, Coord) {
    let p = points[i];
    let q = points[(i + 1) % points.len()];
    (q.0 - p.0, q.1 - p.1)
}

fn rotate_to_bottom_left(points: &[Point]) -> Vec<Point> {
    let start = points
        .iter()
        .position_min_by_key(|p| (p.1, p.0))
        .expect("empty contour");
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[start..]);
    rotated.extend_from_slice(&points[..start]);
    rotated
}

/// Orders edge vectors by polar angle in [0, 2π), exactly.
fn angle_cmp(a: (Coord, Coord), b: (Coord, Coord)) -> Ordering {
    let half = |(x, y): (Coord, Coord)| -> u8 {
        //half 0: angle in [0, π), half 1: [π, 2π)
        match y > 0 || (y == 0 && x > 0) {
            true => 0,
            false => 1,
        }
    };
    half(a).cmp(&half(b)).then_with(|| {
        let c = a.0 as i128 * b.1 as i128 - a.1 as i128 * b.0 as i128;
        //positive cross: a turns to b counterclockwise, so a comes first
        c.cmp(&0).reverse()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::{Shape, TouchesWith, Transformable};

    #[test]
    fn nfp_of_two_unit_squares_is_double_square() {
        let s = SPolygon::rectangle(10, 10).unwrap();
        let o = SPolygon::rectangle(10, 10).unwrap();
        let nfp = no_fit_polygon(&s, &o).unwrap();
        //Minkowski sum of a 10x10 square with its reflection spans 20x20
        assert_eq!(nfp.shape.bbox.width(), 20);
        assert_eq!(nfp.shape.bbox.height(), 20);
    }

    #[test]
    fn every_nfp_vertex_induces_touching_contact() {
        let stationary =
            SPolygon::new(vec![Point(10, 10), Point(40, 10), Point(40, 40), Point(10, 40)])
                .unwrap();
        let orbiter =
            SPolygon::new(vec![Point(80, 50), Point(120, 50), Point(100, 70)]).unwrap();

        let nfp = no_fit_polygon(&stationary, &orbiter).unwrap();

        for v in &nfp.shape.vertices {
            let (dx, dy) = nfp.translation_for(*v);
            let mut moved = orbiter.clone();
            moved.translate(dx, dy);
            assert!(
                moved.touches(&stationary),
                "vertex {v} does not induce touching contact"
            );
        }
    }

    #[test]
    fn non_convex_input_is_rejected() {
        let s = SPolygon::rectangle(10, 10).unwrap();
        let concave = SPolygon::new(vec![
            Point(0, 0),
            Point(40, 0),
            Point(20, 10),
            Point(20, 40),
        ])
        .unwrap();
        assert!(no_fit_polygon(&s, &concave).is_err());
    }

    #[test]
    fn merge_coalesces_touching_rectangles() {
        let a = SPolygon::rectangle(10, 15).unwrap();
        let mut b = SPolygon::rectangle(15, 15).unwrap();
        b.translate(10, 0);

        let merged = merge(&[a], &b).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].area(), 25.0 * 15.0);
    }

    #[test]
    fn merge_keeps_disjoint_pieces_apart() {
        let a = SPolygon::rectangle(10, 10).unwrap();
        let mut b = SPolygon::rectangle(10, 10).unwrap();
        b.translate(100, 100);

        let merged = merge(&[a], &b).unwrap();
        assert_eq!(merged.len(), 2);
    }
}
