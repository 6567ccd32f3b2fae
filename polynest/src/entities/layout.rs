use crate::entities::{Bin, PlacedItem};
use crate::geometry::geo_traits::Shape;

/// A bin together with the items placed in it, in placement order.
#[derive(Clone, Debug)]
pub struct Layout {
    pub bin: Bin,
    pub placed_items: Vec<PlacedItem>,
}

impl Layout {
    pub fn new(bin: Bin) -> Self {
        Layout {
            bin,
            placed_items: vec![],
        }
    }

    pub fn place(&mut self, placed_item: PlacedItem) {
        self.placed_items.push(placed_item);
    }

    /// Fraction of the bin area covered by placed items (reported value).
    pub fn density(&self) -> f64 {
        let placed: f64 = self.placed_items.iter().map(|pi| pi.shape.area()).sum();
        placed / self.bin.area()
    }
}
