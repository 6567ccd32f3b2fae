use crate::Coord;
use crate::geometry::primitives::{Point, SPolygon};

/// Arc-length parameterization of a polygon contour.
///
/// Caches the cumulative perimeter at every vertex so that a point at any
/// normalized parameter `t ∈ [0, 1]` can be resolved in O(log n).
/// Lengths are f64; the cache produces probe positions, never feasibility
/// decisions.
#[derive(Clone, Debug)]
pub struct EdgeCache {
    vertices: Vec<Point>,
    /// `cumulative[i]` is the perimeter length up to vertex `i`;
    /// the last entry is the full perimeter
    cumulative: Vec<f64>,
}

impl EdgeCache {
    pub fn new(shape: &SPolygon) -> Self {
        let vertices = shape.vertices.clone();
        let mut cumulative = Vec::with_capacity(vertices.len() + 1);
        let mut acc = 0.0;
        cumulative.push(acc);
        for e in shape.edge_iter() {
            acc += e.length();
            cumulative.push(acc);
        }
        EdgeCache {
            vertices,
            cumulative,
        }
    }

    pub fn perimeter(&self) -> f64 {
        *self.cumulative.last().expect("cache is never empty")
    }

    /// Normalized arc-length parameter of every vertex, in contour order.
    pub fn vertex_params(&self) -> impl Iterator<Item = f64> + '_ {
        let total = self.perimeter();
        self.cumulative[..self.vertices.len()]
            .iter()
            .map(move |c| c / total)
    }

    /// Point on the contour at normalized arc-length `t`, rounded onto the
    /// integer grid. `t = 0` and `t = 1` both resolve to the first vertex.
    pub fn point_at(&self, t: f64) -> Point {
        let target = t.clamp(0.0, 1.0) * self.perimeter();
        //index of the edge containing the target length
        let i = self
            .cumulative
            .partition_point(|&c| c <= target)
            .saturating_sub(1);
        if i >= self.vertices.len() {
            return self.vertices[0];
        }
        let a = self.vertices[i];
        let b = self.vertices[(i + 1) % self.vertices.len()];
        let seg_len = self.cumulative[i + 1] - self.cumulative[i];
        let frac = match seg_len > 0.0 {
            true => (target - self.cumulative[i]) / seg_len,
            false => 0.0,
        };
        Point(
            (a.0 as f64 + frac * (b.0 - a.0) as f64).round() as Coord,
            (a.1 as f64 + frac * (b.1 - a.1) as f64).round() as Coord,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_contour_parameterization() {
        let sq = SPolygon::rectangle(100, 100).unwrap();
        let cache = EdgeCache::new(&sq);

        assert_eq!(cache.perimeter(), 400.0);
        assert_eq!(cache.point_at(0.0), sq.vertex(0));
        assert_eq!(cache.point_at(1.0), sq.vertex(0));
        //halfway around the contour is the opposite corner
        assert_eq!(cache.point_at(0.5), sq.vertex(2));
        //an eighth of the perimeter is the middle of the first edge
        assert_eq!(cache.point_at(0.125), Point(50, 0));
    }

    #[test]
    fn vertex_params_match_point_at() {
        let poly = SPolygon::new(vec![Point(0, 0), Point(40, 10), Point(20, 40)]).unwrap();
        let cache = EdgeCache::new(&poly);
        for (i, t) in cache.vertex_params().collect::<Vec<_>>().iter().enumerate() {
            assert_eq!(cache.point_at(*t), poly.vertex(i));
        }
    }
}
