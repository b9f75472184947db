//! Spatial data structures
//!
//! This module contains the occupancy grid and its supporting pieces:
//! - The generic fixed-size grid with world-space conversion
//! - Cells holding a single occupant handle
//! - The listener registry used for change notifications

/// Grid cells with single-occupant semantics
pub mod cell;
/// Fixed-size grid storage and coordinate conversion
pub mod grid;
/// Subscriber registry for notifications
pub mod observers;

pub use cell::GridCell;
pub use grid::{CellChanged, GridMap};
pub use observers::{ListenerId, Observers};
