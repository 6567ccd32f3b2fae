//! `polynest` is a deterministic nesting engine for 2D irregular bin packing.
//!
//! A set of polygonal items is arranged into one or more rectangular (or
//! polygonal) bins such that no two items overlap. Placement decisions are
//! made in exact integer arithmetic: callers scale their coordinates by a
//! fixed multiplier (e.g. 10^6) before entry and inverse-scale the resulting
//! transforms. Floating point only appears in reported values (angles, areas
//! for logging, SVG output), never in feasibility decisions.

/// Entities modelling the nesting problem: items, bins, layouts and results
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Rendering polygons and pack groups to SVG for visual inspection
pub mod io;

/// No-fit polygon computation and polygon union
pub mod nfp;

/// Orchestration: item ordering and multi-bin allocation
pub mod nester;

/// Placement strategies, mapping one item at a time into a bin
pub mod placer;

/// Helper functions which do not belong to any specific module
pub mod util;

/// The coordinate type used throughout the engine.
/// All input geometry is expected in this integer space.
pub type Coord = i64;
