use crate::entities::ItemId;
use crate::geometry::DTransformation;
use crate::geometry::primitives::SPolygon;

/// An item fixed into a layout: its identity, the transformation that placed
/// it and the resulting contour.
#[derive(Clone, Debug)]
pub struct PlacedItem {
    pub item_id: ItemId,
    pub d_transf: DTransformation,
    /// Contour of the item in bin coordinates
    pub shape: SPolygon,
}
