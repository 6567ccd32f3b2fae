//! Debug output surfaces. Only SVG for now.

pub mod svg;
