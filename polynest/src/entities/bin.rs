use anyhow::{Result, ensure};

use crate::Coord;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Rect, SPolygon};

/// A container to place items into. Most bins are rectangles with the
/// bottom-left corner at the origin, but any simple polygon works.
#[derive(Clone, Debug)]
pub struct Bin {
    pub outer: SPolygon,
}

impl Bin {
    /// Rectangular bin of `width` x `height`, bottom-left at the origin.
    /// Non-positive dimensions are a hard error.
    pub fn new_rectangle(width: Coord, height: Coord) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "bin dimensions must be positive: {width} x {height}"
        );
        Ok(Bin {
            outer: SPolygon::rectangle(width, height)?,
        })
    }

    pub fn new(outer: SPolygon) -> Self {
        Bin { outer }
    }

    pub fn bbox(&self) -> Rect {
        self.outer.bbox
    }

    /// True iff `shape` fits entirely inside the bin (boundary contact allowed).
    pub fn encloses(&self, shape: &SPolygon) -> bool {
        self.outer.contains_polygon(shape)
    }

    pub fn area(&self) -> f64 {
        self.outer.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Transformable;

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert!(Bin::new_rectangle(0, 10).is_err());
        assert!(Bin::new_rectangle(10, -5).is_err());
        assert!(Bin::new_rectangle(210, 250).is_ok());
    }

    #[test]
    fn enclosure() {
        let bin = Bin::new_rectangle(100, 100).unwrap();
        let mut item = SPolygon::rectangle(100, 100).unwrap();
        //exact fit counts as enclosed
        assert!(bin.encloses(&item));
        item.translate(1, 0);
        assert!(!bin.encloses(&item));
    }
}
