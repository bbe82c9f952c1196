//! Layout module orchestrator.
//!
//! The grid model lives in `grid`, the pure placement rules in `placement`.
//! Downstream code imports both through the re-exports below.

pub mod grid;
pub mod placement;

pub use grid::{GridCell, GridError, GridSettings, occupancy};
pub use placement::{
    Footprint, PlacementError, can_place, find_first_fit, fits_in_bounds, overlaps,
};
