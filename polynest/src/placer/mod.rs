//! Placement strategies: fixing items into a single bin one at a time.

mod bottom_left;
mod edge_cache;

pub use bottom_left::BottomLeftPlacer;
pub use bottom_left::{down_poly, left_poly};
pub use edge_cache::EdgeCache;

use serde::{Deserialize, Serialize};

use crate::entities::{Bin, Item, PlacedItem};
use crate::geometry::DTransformation;

/// A placement strategy over a single bin.
///
/// Placers are stateful: every successful [`Placer::pack`] call commits the
/// item into the bin, and subsequent calls have to respect it.
pub trait Placer {
    /// Attempts to fix `item` into the bin. On success the item is committed
    /// and the transformation that placed it is returned; `None` means no
    /// feasible position exists in the current state.
    fn pack(&mut self, item: &Item) -> Option<DTransformation>;

    /// Removes all committed items, resetting the bin to empty.
    fn clear_items(&mut self);

    /// All items committed so far, in placement order.
    fn items(&self) -> &[PlacedItem];

    /// The bin this placer packs into.
    fn bin(&self) -> &Bin;
}

/// Configuration of the [`BottomLeftPlacer`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BLPlacerConfig {
    /// Rotation angles (radians) tried for every item
    pub rotations: Vec<f64>,
    /// Number of arc-length samples probed along each no-fit contour,
    /// in addition to its vertices
    pub probe_resolution: usize,
    /// Rotate items so the axis of their minimum-area bounding box is
    /// horizontal before applying the configured rotations
    pub calipers_pre_align: bool,
}

impl Default for BLPlacerConfig {
    fn default() -> Self {
        BLPlacerConfig {
            rotations: vec![0.0],
            probe_resolution: 16,
            calipers_pre_align: false,
        }
    }
}
