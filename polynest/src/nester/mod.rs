//! The nester: drives a placement strategy over as many bins as it takes.

use std::cmp::Reverse;

use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::Coord;
use crate::entities::{Item, Layout, PackGroup, PlacedItem};
use crate::geometry::shape_modification::{ShapeModifyMode, offset_shape};
use crate::geometry::geo_traits::Transformable;
use crate::placer::Placer;

/// Decides the order in which items are handed to the placer.
pub trait OrderingHeuristic {
    /// Returns the indices of `items` in placement order.
    fn order(&self, items: &[Item]) -> Vec<usize>;
}

/// Largest items first, measured by exact bounding box area.
/// Ties fall back to the input index, keeping runs reproducible.
pub struct DecreasingSize;

impl OrderingHeuristic for DecreasingSize {
    fn order(&self, items: &[Item]) -> Vec<usize> {
        (0..items.len())
            .sorted_by_key(|&i| (Reverse(items[i].shape().bbox.area()), i))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NesterConfig {
    /// Minimum distance to keep between any two placed items.
    /// Zero allows items to touch.
    pub min_clearance: Coord,
}

impl Default for NesterConfig {
    fn default() -> Self {
        NesterConfig { min_clearance: 0 }
    }
}

/// Packs a set of items into as few bins as possible.
///
/// Items are handed to the placer in heuristic order. Each item first tries
/// the most recently opened bin; if it does not fit there, a fresh bin is
/// opened for it, and if it does not fit in an empty bin either it is
/// reported as unplaceable.
pub struct Nester<P, H> {
    /// Placer for an empty bin, cloned whenever a new bin is opened
    placer_proto: P,
    heuristic: H,
    config: NesterConfig,
}

impl<P: Placer + Clone, H: OrderingHeuristic> Nester<P, H> {
    pub fn new(placer_proto: P, heuristic: H, config: NesterConfig) -> Self {
        Nester {
            placer_proto,
            heuristic,
            config,
        }
    }

    pub fn nest(&self, items: &[Item]) -> Result<PackGroup> {
        self.nest_with_progress(items, |_| {})
    }

    /// Like [`Self::nest`], reporting the number of unresolved items after
    /// each placement attempt. The callback observes progress only; it has no
    /// control over the run.
    pub fn nest_with_progress(
        &self,
        items: &[Item],
        mut progress: impl FnMut(usize),
    ) -> Result<PackGroup> {
        ensure!(
            self.placer_proto.items().is_empty(),
            "placer prototype must start from an empty bin"
        );
        info!(
            "[NEST] packing {} items into {}x{} bins (min clearance: {})",
            items.len(),
            self.placer_proto.bin().bbox().width(),
            self.placer_proto.bin().bbox().height(),
            self.config.min_clearance,
        );

        let order = self.heuristic.order(items);
        let mut remaining = order.len();

        let mut placers: Vec<P> = vec![];
        //layouts carry the original (uninflated) shapes per bin
        let mut layouts: Vec<Layout> = vec![];
        let mut unplaced = vec![];

        for idx in order {
            let item = &items[idx];
            let trial = self.prepare(item)?;

            let resolved = match placers.last_mut() {
                Some(placer) => placer.pack(&trial).map(|dt| (placers.len() - 1, dt)),
                None => None,
            };
            let resolved = resolved.or_else(|| {
                let mut fresh = self.placer_proto.clone();
                fresh.pack(&trial).map(|dt| {
                    layouts.push(Layout::new(fresh.bin().clone()));
                    placers.push(fresh);
                    (placers.len() - 1, dt)
                })
            });

            match resolved {
                Some((bin_idx, d_transf)) => {
                    debug!("[NEST] item {} -> bin {bin_idx} at {d_transf}", item.id);
                    layouts[bin_idx].place(PlacedItem {
                        item_id: item.id,
                        d_transf,
                        shape: item.shape_orig.transform_clone(&d_transf),
                    });
                }
                None => {
                    debug!("[NEST] item {} fits in no bin", item.id);
                    unplaced.push(item.id);
                }
            }
            remaining -= 1;
            progress(remaining);
        }

        let pack_group = PackGroup { layouts, unplaced };
        info!(
            "[NEST] done: {} items in {} bins, {} unplaced",
            pack_group.n_placed(),
            pack_group.layouts.len(),
            pack_group.unplaced.len()
        );
        debug_assert_eq!(pack_group.n_items(), items.len());
        Ok(pack_group)
    }

    /// Inflates the item's contour by half the minimum clearance, so that two
    /// touching inflated contours keep the original contours a full clearance
    /// apart. The transformation found for the inflated item applies
    /// unchanged to the original.
    fn prepare(&self, item: &Item) -> Result<Item> {
        match self.config.min_clearance {
            0 => Ok(item.clone()),
            c => {
                ensure!(c > 0, "min_clearance must be non-negative: {c}");
                //round up so an odd clearance is never undershot
                let inflated = offset_shape(&item.shape_orig, ShapeModifyMode::Inflate, (c + 1) / 2)
                    .with_context(|| format!("cannot inflate item {}", item.id))?;
                Ok(Item::new(item.id, inflated))
            }
        }
    }
}
