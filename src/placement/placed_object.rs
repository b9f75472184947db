//! Runtime instances of placed objects and their lifecycle hooks

use std::fmt;

use crate::math::{GridPosition, WorldPoint};
use crate::placement::orientation::Orientation;
use crate::spatial::GridCell;

/// Cell type of the controller's grid, holding a placed-object handle
pub type GridObject = GridCell<PlacedObjectId>;

/// Non-owning handle to a placed object, stored in every cell it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacedObjectId(u64);

impl PlacedObjectId {
    /// Raw numeric value
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PlacedObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An object standing on the grid
///
/// The footprint is resolved once at creation and reused on removal, so a
/// later change to the type catalog cannot strand cells.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    id: PlacedObjectId,
    type_index: usize,
    type_name: String,
    anchor: WorldPoint,
    origin: GridPosition,
    orientation: Orientation,
    rotation_angle: f64,
    footprint: Vec<GridPosition>,
}

impl PlacedObject {
    pub(crate) const fn new(
        id: PlacedObjectId,
        type_index: usize,
        type_name: String,
        anchor: WorldPoint,
        origin: GridPosition,
        orientation: Orientation,
        rotation_angle: f64,
        footprint: Vec<GridPosition>,
    ) -> Self {
        Self {
            id,
            type_index,
            type_name,
            anchor,
            origin,
            orientation,
            rotation_angle,
            footprint,
        }
    }

    /// Handle stored in the occupied cells
    pub const fn id(&self) -> PlacedObjectId {
        self.id
    }

    /// Index of the definition in the controller's catalog
    pub const fn type_index(&self) -> usize {
        self.type_index
    }

    /// Name of the definition this object was built from
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// World-space anchor used to position the object's model
    pub const fn anchor(&self) -> WorldPoint {
        self.anchor
    }

    /// Grid cell the footprint was resolved from
    pub const fn origin(&self) -> GridPosition {
        self.origin
    }

    /// Orientation at the time of placement
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Model rotation about the vertical axis in degrees
    pub const fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Every cell this object occupies
    pub fn footprint(&self) -> &[GridPosition] {
        &self.footprint
    }
}

impl fmt::Display for PlacedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.id)
    }
}

/// Host callbacks bracketing a placed object's life
///
/// `spawned` runs after the object is committed to the grid. `destroy` runs
/// before its cells are cleared; returning an error aborts the removal and
/// leaves the object placed.
pub trait ObjectLifecycle {
    /// Called once the object occupies all its cells
    fn spawned(&mut self, object: &PlacedObject) {
        let _ = object;
    }

    /// Release whatever the host holds for `object`
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the object cannot be destroyed.
    fn destroy(&mut self, object: &PlacedObject) -> std::result::Result<(), String> {
        let _ = object;
        Ok(())
    }
}

/// Lifecycle that accepts everything and keeps no state
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLifecycle;

impl ObjectLifecycle for NoopLifecycle {}
