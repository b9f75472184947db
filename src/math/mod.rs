//! Coordinate types shared by the grid and the placement layer

/// World-space points and integer grid positions
pub mod vector;

pub use vector::{GridPosition, WorldPoint};
