use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::Coord;
use crate::geometry::primitives::{Point, SPolygon};

/// Whether to strictly inflate or deflate when offsetting a shape.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeModifyMode {
    /// Offset the shape outward (superset of the original).
    Inflate,
    /// Offset the shape inward (subset of the original).
    Deflate,
}

/// Offsets a [`SPolygon`] by `distance`, inward or outward depending on the
/// [`ShapeModifyMode`]. Used to enforce a minimum clearance between items:
/// shapes are inflated by half the clearance before placement.
///
/// Relies on the [`geo_buffer`](https://crates.io/crates/geo-buffer) crate;
/// the buffered coordinates are rounded back onto the integer grid (outward
/// rounding error is bounded by one grid unit, negligible at the coordinate
/// scale callers are expected to use).
pub fn offset_shape(sp: &SPolygon, mode: ShapeModifyMode, distance: Coord) -> Result<SPolygon> {
    ensure!(distance > 0, "offset distance must be positive: {distance}");
    let offset = match mode {
        ShapeModifyMode::Inflate => distance as f64,
        ShapeModifyMode::Deflate => -(distance as f64),
    };

    let geo_poly = geo_types::Polygon::new(
        sp.vertices
            .iter()
            .map(|p| (p.0 as f64, p.1 as f64))
            .collect(),
        vec![],
    );

    let buffered = geo_buffer::buffer_polygon(&geo_poly, offset);

    //an offset of a connected polygon can split when deflating; keep the
    //largest resulting piece
    let largest = buffered
        .iter()
        .max_by_key(|p| {
            NotNan::new(geo_poly_area(p)).expect("buffered polygon area is NaN")
        })
        .context("offset produced no polygons")?;

    let points = largest
        .exterior()
        .points()
        .map(|p| Point(p.x().round() as Coord, p.y().round() as Coord))
        .dedup()
        .collect_vec();

    SPolygon::new(points)
}

fn geo_poly_area(p: &geo_types::Polygon<f64>) -> f64 {
    use geo::Area;
    p.unsigned_area()
}
