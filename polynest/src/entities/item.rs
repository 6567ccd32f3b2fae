use std::sync::Arc;

use crate::Coord;
use crate::entities::ItemId;
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::SPolygon;

/// An item to be placed: an immutable original shape plus the transformation
/// currently applied to it.
///
/// The transformed shape is recomputed eagerly on every mutation so that
/// `shape` is always consistent with `d_transf`.
#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    /// Contour of the item at its input position
    pub shape_orig: Arc<SPolygon>,
    /// Transformation currently applied to `shape_orig`
    d_transf: DTransformation,
    /// `shape_orig` with `d_transf` applied
    shape: SPolygon,
}

impl Item {
    pub fn new(id: ItemId, shape: SPolygon) -> Self {
        Item {
            id,
            shape: shape.clone(),
            shape_orig: Arc::new(shape),
            d_transf: DTransformation::empty(),
        }
    }

    /// The item's contour with its current transformation applied.
    pub fn shape(&self) -> &SPolygon {
        &self.shape
    }

    pub fn d_transf(&self) -> DTransformation {
        self.d_transf
    }

    /// Replaces the transformation and refreshes the transformed contour.
    pub fn set_transformation(&mut self, d_transf: DTransformation) {
        self.d_transf = d_transf;
        self.shape = self.shape_orig.transform_clone(&d_transf);
    }

    /// Appends an exact translation. The cached contour shifts in place,
    /// no rotation is re-applied.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        self.d_transf = self.d_transf.translated_by(dx, dy);
        self.shape.translate(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Point;

    #[test]
    fn cached_shape_tracks_the_transformation() {
        let mut item = Item::new(0, SPolygon::rectangle(10, 20).unwrap());
        assert_eq!(item.shape().bbox.x_min, 0);

        item.set_transformation(DTransformation::from_translation((5, 7)));
        assert_eq!(item.shape().bbox.x_min, 5);
        assert_eq!(item.shape().bbox.y_min, 7);

        item.translate(-5, -7);
        assert_eq!(item.shape().vertex(0), Point(0, 0));
        assert_eq!(item.d_transf().translation(), (0, 0));
        //the original is untouched
        assert_eq!(item.shape_orig.bbox.x_min, 0);
    }

    #[test]
    fn rotation_goes_through_the_original_shape() {
        let mut item = Item::new(1, SPolygon::rectangle(10, 20).unwrap());
        item.set_transformation(DTransformation::from_rotation(std::f64::consts::FRAC_PI_2));
        //a quarter turn swaps width and height
        assert_eq!(item.shape().bbox.width(), 20);
        assert_eq!(item.shape().bbox.height(), 10);

        item.set_transformation(DTransformation::empty());
        assert_eq!(item.shape(), item.shape_orig.as_ref());
    }
}
