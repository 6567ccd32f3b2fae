//! Entities that compose a nesting problem and its solution.

mod bin;
mod item;
mod layout;
mod pack_group;
mod placed_item;

pub use bin::Bin;
pub use item::Item;
pub use layout::Layout;
pub use pack_group::PackGroup;
pub use placed_item::PlacedItem;

/// Unique identifier of an item within a nesting run, assigned by the caller.
pub type ItemId = usize;
