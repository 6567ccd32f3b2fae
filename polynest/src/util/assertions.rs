//! Validity audits over layouts, used in debug assertions and tests.

use itertools::Itertools;

use crate::entities::{Layout, PackGroup};
use crate::geometry::geo_traits::CollidesWith;

/// Every placed item lies inside the bin and no two items overlap interiors.
/// Boundary contact between items is allowed.
pub fn layout_is_collision_free(layout: &Layout) -> bool {
    let inside = layout
        .placed_items
        .iter()
        .all(|pi| layout.bin.encloses(&pi.shape));
    let disjoint = layout
        .placed_items
        .iter()
        .tuple_combinations()
        .all(|(a, b)| !a.shape.collides_with(&b.shape));
    inside && disjoint
}

/// No placed item fully contains another.
pub fn no_item_containment(layout: &Layout) -> bool {
    layout
        .placed_items
        .iter()
        .tuple_combinations()
        .all(|(a, b)| !a.shape.contains_polygon(&b.shape) && !b.shape.contains_polygon(&a.shape))
}

/// All layouts of the pack group pass both audits and every input item is
/// accounted for exactly once.
pub fn pack_group_is_valid(pack_group: &PackGroup, n_input_items: usize) -> bool {
    pack_group.n_items() == n_input_items
        && pack_group
            .layouts
            .iter()
            .all(|l| layout_is_collision_free(l) && no_item_containment(l))
}
