//! Helper functions spanning the whole crate.

pub mod assertions;
