//! Grid occupancy and multi-cell placement core for building mechanics
//!
//! World positions are snapped onto a fixed-size grid, placeable types
//! resolve their footprint for one of four orientations, and a controller
//! validates every footprint cell before committing a build so the grid
//! never holds a partial placement.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// World-space and grid coordinate types
pub mod math;
/// Placeable types, placed objects and the placement controller
pub mod placement;
/// Occupancy grid, cells and change notification
pub mod spatial;

pub use io::error::{BlockReason, GridError, Result};
pub use math::{GridPosition, WorldPoint};
pub use placement::{GridObject, Orientation, PlacedObjectType, PlacementController};
pub use spatial::GridMap;
