use std::cmp::Reverse;

use anyhow::Result;
use itertools::Itertools;
use log::debug;

use crate::Coord;
use crate::entities::{Bin, Item, PlacedItem};
use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::min_bbox::min_area_bbox;
use crate::geometry::primitives::{Point, SPolygon};
use crate::geometry::{DTransformation, Rational};
use crate::nfp::no_fit_polygon;
use crate::placer::{BLPlacerConfig, EdgeCache, Placer};

/// Bottom-left placement: every item starts at the bin's top-right corner and
/// is slid down, then left, repeatedly until it comes to rest. Additional
/// start positions are probed on the no-fit polygons against every placed
/// item. The winning rest position minimizes the pair
/// (bounding box y_min, x_min), compared exactly.
#[derive(Clone)]
pub struct BottomLeftPlacer {
    bin: Bin,
    config: BLPlacerConfig,
    items: Vec<PlacedItem>,
}

impl BottomLeftPlacer {
    pub fn new(bin: Bin, config: BLPlacerConfig) -> Self {
        BottomLeftPlacer {
            bin,
            config,
            items: vec![],
        }
    }

    /// A position is feasible when the item is inside the bin and its
    /// interior is disjoint from every placed item. Boundary contact is fine.
    fn is_feasible(&self, shape: &SPolygon) -> bool {
        self.bin.encloses(shape)
            && self.items.iter().all(|pi| !pi.shape.collides_with(shape))
    }

    /// Slides the item down, then left, until neither direction moves it.
    fn slide_to_rest(&self, item: &mut Item) {
        loop {
            let down = self.slide_down_distance(item.shape());
            if down > 0 {
                item.translate(0, -down);
            }
            let left = self.slide_left_distance(item.shape());
            if left > 0 {
                item.translate(-left, 0);
            }
            if down == 0 && left == 0 {
                break;
            }
        }
    }

    /// Maximal downward slide: the exact minimum over vertical projection
    /// distances against every placed item blocking the path, clamped by the
    /// bin floor. The rational minimum is floored onto the integer grid.
    fn slide_down_distance(&self, shape: &SPolygon) -> Coord {
        let wall_y = self.bin.bbox().y_min;
        let wall = (shape.bbox.y_min - wall_y).max(0);
        let Ok(path) = down_poly(shape, wall_y) else {
            return 0;
        };

        let mut limit = Rational::from_integer(wall as i128);
        for pi in &self.items {
            let o = &pi.shape;
            if !path.bbox.overlaps(&o.bbox)
                || !(path.collides_with(o) || path.boundary_contact_with(o))
            {
                continue;
            }
            //contact counts: a zero distance clamps the slide at the moment
            //of touching instead of falling through to a penetrating pair
            for e in o.edge_iter() {
                for v in &shape.vertices {
                    if let Some(d) = e.vertical_distance_to(v)
                        && d >= Rational::from_integer(0)
                    {
                        limit = limit.min(d);
                    }
                }
            }
            for e in shape.edge_iter() {
                for v in &o.vertices {
                    if let Some(d) = e.vertical_distance_to(v)
                        && d <= Rational::from_integer(0)
                    {
                        limit = limit.min(-d);
                    }
                }
            }
        }
        rational_to_slide(limit)
    }

    /// Mirror image of [`Self::slide_down_distance`] along the x-axis.
    fn slide_left_distance(&self, shape: &SPolygon) -> Coord {
        let wall_x = self.bin.bbox().x_min;
        let wall = (shape.bbox.x_min - wall_x).max(0);
        let Ok(path) = left_poly(shape, wall_x) else {
            return 0;
        };

        let mut limit = Rational::from_integer(wall as i128);
        for pi in &self.items {
            let o = &pi.shape;
            if !path.bbox.overlaps(&o.bbox)
                || !(path.collides_with(o) || path.boundary_contact_with(o))
            {
                continue;
            }
            for e in o.edge_iter() {
                for v in &shape.vertices {
                    if let Some(d) = e.horizontal_distance_to(v)
                        && d >= Rational::from_integer(0)
                    {
                        limit = limit.min(d);
                    }
                }
            }
            for e in shape.edge_iter() {
                for v in &o.vertices {
                    if let Some(d) = e.horizontal_distance_to(v)
                        && d <= Rational::from_integer(0)
                    {
                        limit = limit.min(-d);
                    }
                }
            }
        }
        rational_to_slide(limit)
    }

    /// Absolute translations worth trying for the trial item, on top of its
    /// current rotation: the bin's top-right corner plus probes along the
    /// no-fit polygon against every placed item.
    fn candidate_starts(&self, trial: &Item) -> Vec<(Coord, Coord)> {
        let bbox = trial.shape().bbox;
        let bin_bbox = self.bin.bbox();
        let mut starts = vec![(bin_bbox.x_max - bbox.x_max, bin_bbox.y_max - bbox.y_max)];

        let Some(trial_hull) = hull_of(trial.shape()) else {
            return starts;
        };
        for pi in &self.items {
            let Some(obstacle_hull) = hull_of(&pi.shape) else {
                continue;
            };
            let Ok(nfp) = no_fit_polygon(&obstacle_hull, &trial_hull) else {
                continue;
            };
            for v in &nfp.shape.vertices {
                starts.push(nfp.translation_for(*v));
            }
            let res = self.config.probe_resolution;
            if res > 1 {
                let cache = EdgeCache::new(&nfp.shape);
                for k in 1..res {
                    let p = cache.point_at(k as f64 / res as f64);
                    starts.push(nfp.translation_for(p));
                }
            }
        }
        starts
    }
}

impl Placer for BottomLeftPlacer {
    fn pack(&mut self, item: &Item) -> Option<DTransformation> {
        let pre_align = match self.config.calipers_pre_align {
            true => min_area_bbox(item.shape())
                .map(|bb| bb.alignment_rotation())
                .unwrap_or(0.0),
            false => 0.0,
        };

        let rotations = match self.config.rotations.is_empty() {
            true => &[0.0][..],
            false => &self.config.rotations,
        };

        //winner key: (bbox y_min, bbox x_min), compared exactly
        let mut best: Option<((Coord, Coord), Item)> = None;

        for &rot in rotations {
            let mut trial = item.clone();
            trial.set_transformation(DTransformation::from_rotation(pre_align + rot));

            for (dx, dy) in self.candidate_starts(&trial) {
                let mut cand = trial.clone();
                cand.translate(dx, dy);
                if !self.is_feasible(cand.shape()) {
                    continue;
                }
                self.slide_to_rest(&mut cand);
                if !self.is_feasible(cand.shape()) {
                    continue;
                }
                let key = (cand.shape().bbox.y_min, cand.shape().bbox.x_min);
                if best.as_ref().is_none_or(|(k, _)| key < *k) {
                    best = Some((key, cand));
                }
            }
        }

        match best {
            Some((_, winner)) => {
                let d_transf = winner.d_transf();
                debug!("[BL] placed item {} at {}", item.id, d_transf);
                self.items.push(PlacedItem {
                    item_id: item.id,
                    d_transf,
                    shape: winner.shape().clone(),
                });
                Some(d_transf)
            }
            None => {
                debug!("[BL] no feasible position for item {}", item.id);
                None
            }
        }
    }

    fn clear_items(&mut self) {
        self.items.clear();
    }

    fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    fn bin(&self) -> &Bin {
        &self.bin
    }
}

/// The item's silhouette extended down to the bin floor: the region the item
/// sweeps when sliding straight down.
///
/// Built from the bottom-facing chain of the contour (leftmost to rightmost
/// vertex, along the bottom) plus the two floor corner points.
pub fn down_poly(shape: &SPolygon, wall_y: Coord) -> Result<SPolygon> {
    let v = &shape.vertices;
    let start = v
        .iter()
        .position_min_by_key(|p| (p.0, p.1))
        .expect("polygon has no vertices");
    let end = v
        .iter()
        .position_min_by_key(|p| (Reverse(p.0), p.1))
        .expect("polygon has no vertices");

    let mut points = chain(v, start, end);
    points.push(Point(v[end].0, wall_y));
    points.push(Point(v[start].0, wall_y));
    SPolygon::new(points.into_iter().dedup().collect())
}

/// The item's silhouette extended left to the bin wall: the region the item
/// sweeps when sliding straight left.
pub fn left_poly(shape: &SPolygon, wall_x: Coord) -> Result<SPolygon> {
    let v = &shape.vertices;
    let start = v
        .iter()
        .position_min_by_key(|p| (Reverse(p.1), p.0))
        .expect("polygon has no vertices");
    let end = v
        .iter()
        .position_min_by_key(|p| (p.1, p.0))
        .expect("polygon has no vertices");

    let mut points = chain(v, start, end);
    points.push(Point(wall_x, v[end].1));
    points.push(Point(wall_x, v[start].1));
    SPolygon::new(points.into_iter().dedup().collect())
}

/// Vertices from `from` to `to` inclusive, walking the contour forward.
fn chain(vertices: &[Point], from: usize, to: usize) -> Vec<Point> {
    let n = vertices.len();
    let mut out = vec![vertices[from]];
    let mut i = from;
    while i != to {
        i = (i + 1) % n;
        out.push(vertices[i]);
    }
    out
}

fn hull_of(shape: &SPolygon) -> Option<SPolygon> {
    SPolygon::new(convex_hull_from_points(shape.vertices.clone())).ok()
}

/// Floors a non-negative slide distance onto the integer grid; an item never
/// moves past the exact contact point.
fn rational_to_slide(limit: Rational) -> Coord {
    match limit > Rational::from_integer(0) {
        true => limit.floor().to_integer() as Coord,
        false => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ItemId;
    use crate::geometry::geo_traits::{Shape, TouchesWith, Transformable};

    fn rect_item(id: ItemId, w: Coord, h: Coord) -> Item {
        Item::new(id, SPolygon::rectangle(w, h).unwrap())
    }

    #[test]
    fn first_item_comes_to_rest_in_the_corner() {
        let bin = Bin::new_rectangle(100, 100).unwrap();
        let mut placer = BottomLeftPlacer::new(bin, BLPlacerConfig::default());

        let dt = placer.pack(&rect_item(0, 10, 20)).unwrap();
        assert_eq!(dt.translation(), (0, 0));
        assert_eq!(placer.items()[0].shape.bbox.x_min, 0);
        assert_eq!(placer.items()[0].shape.bbox.y_min, 0);
    }

    #[test]
    fn second_item_rests_against_the_first() {
        let bin = Bin::new_rectangle(100, 100).unwrap();
        let mut placer = BottomLeftPlacer::new(bin, BLPlacerConfig::default());

        placer.pack(&rect_item(0, 10, 10)).unwrap();
        let dt = placer.pack(&rect_item(1, 10, 10)).unwrap();

        //bottom row fills before anything stacks
        assert_eq!(dt.translation(), (10, 0));
        let [a, b] = placer.items() else { panic!() };
        assert!(a.shape.touches(&b.shape));
    }

    #[test]
    fn full_bin_rejects_further_items() {
        let bin = Bin::new_rectangle(20, 20).unwrap();
        let mut placer = BottomLeftPlacer::new(bin, BLPlacerConfig::default());

        assert!(placer.pack(&rect_item(0, 20, 20)).is_some());
        assert!(placer.pack(&rect_item(1, 5, 5)).is_none());

        placer.clear_items();
        assert!(placer.pack(&rect_item(1, 5, 5)).is_some());
    }

    #[test]
    fn oversized_item_is_rejected_outright() {
        let bin = Bin::new_rectangle(20, 20).unwrap();
        let mut placer = BottomLeftPlacer::new(bin, BLPlacerConfig::default());
        assert!(placer.pack(&rect_item(0, 30, 5)).is_none());
        assert!(placer.items().is_empty());
    }

    #[test]
    fn down_poly_of_a_translated_rect() {
        let mut sq = SPolygon::rectangle(10, 10).unwrap();
        sq.translate(5, 5);
        let down = down_poly(&sq, 0).unwrap();
        //the swept region spans from the floor up to the rect's top of the bottom edge
        assert_eq!(down.bbox.x_min, 5);
        assert_eq!(down.bbox.x_max, 15);
        assert_eq!(down.bbox.y_min, 0);
        assert_eq!(down.bbox.y_max, 5);
        assert_eq!(down.area(), 50.0);
    }

    #[test]
    fn items_stack_in_a_narrow_bin() {
        let bin = Bin::new_rectangle(10, 40).unwrap();
        let mut placer = BottomLeftPlacer::new(bin, BLPlacerConfig::default());
        //each square comes to rest on top of the previous one
        for id in 0..4 {
            let dt = placer.pack(&rect_item(id, 10, 10)).unwrap();
            assert_eq!(dt.translation(), (0, 10 * id as Coord));
        }
        assert!(placer.pack(&rect_item(4, 10, 10)).is_none());
    }

    #[test]
    fn slide_rests_on_an_obstacle() {
        let bin = Bin::new_rectangle(100, 100).unwrap();
        let mut placer = BottomLeftPlacer::new(bin, BLPlacerConfig::default());
        //a full-width pedestal forces the next item on top of it
        placer.pack(&rect_item(0, 100, 10)).unwrap();
        let dt = placer.pack(&rect_item(1, 10, 10)).unwrap();
        assert_eq!(dt.translation(), (0, 10));
    }
}
