pub mod convex_hull;

pub mod d_transformation;
pub mod geo_enums;
pub mod geo_traits;
pub mod min_bbox;
pub mod primitives;
pub mod shape_modification;

#[doc(inline)]
pub use d_transformation::DTransformation;

/// Exact fraction type used wherever integer division would lose precision
/// (axis-projection distances, calipers area ranking).
pub type Rational = num_rational::Ratio<i128>;
