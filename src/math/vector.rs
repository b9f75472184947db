//! World-space points and integer grid coordinates
//!
//! The grid lives on the horizontal `x`/`z` plane of a 3D world, so world
//! positions carry a `y` component that grid conversion ignores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A point (or offset) in continuous world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal axis mapped to grid `x`
    pub x: f64,
    /// Vertical axis, ignored by grid conversion
    pub y: f64,
    /// Horizontal axis mapped to grid `z`
    pub z: f64,
}

impl WorldPoint {
    /// The world origin
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a point from its three components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Check that every component is a finite number
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for WorldPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for WorldPoint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Integer cell coordinate on the grid plane
///
/// Positions are signed so footprints and conversions can describe cells
/// outside the grid; lookups decide whether such positions are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Column index
    pub x: i32,
    /// Row index
    pub z: i32,
}

impl GridPosition {
    /// Create a grid position
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Translate by another position treated as an offset
    ///
    /// Each axis saturates at the `i32` range. A saturated coordinate is never
    /// inside a grid, so it still reads as off the grid.
    pub const fn offset(self, by: Self) -> Self {
        Self::new(self.x.saturating_add(by.x), self.z.saturating_add(by.z))
    }

    /// Lift the position into the world `x`/`z` plane without scaling
    pub fn to_world_offset(self) -> WorldPoint {
        WorldPoint::new(f64::from(self.x), 0.0, f64::from(self.z))
    }
}

impl From<[i32; 2]> for GridPosition {
    fn from([x, z]: [i32; 2]) -> Self {
        Self::new(x, z)
    }
}

impl From<GridPosition> for [i32; 2] {
    fn from(position: GridPosition) -> Self {
        [position.x, position.z]
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.z)
    }
}
