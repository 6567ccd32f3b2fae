use crate::entities::{ItemId, Layout};

/// The outcome of a nesting run: one layout per opened bin plus the items
/// that fit in no bin at all.
///
/// Every input item ends up in exactly one of the two, so
/// `n_placed() + unplaced.len()` equals the input count.
#[derive(Clone, Debug)]
pub struct PackGroup {
    pub layouts: Vec<Layout>,
    pub unplaced: Vec<ItemId>,
}

impl PackGroup {
    pub fn n_placed(&self) -> usize {
        self.layouts.iter().map(|l| l.placed_items.len()).sum()
    }

    pub fn n_items(&self) -> usize {
        self.n_placed() + self.unplaced.len()
    }
}
