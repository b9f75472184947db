//! Placeable object definitions and build/remove orchestration

/// Build and remove orchestration with selection state
pub mod controller;
/// Discrete input actions and their outcomes
pub mod input;
/// Per-orientation footprint tables of placeable types
pub mod object_type;
/// Quarter-turn orientations
pub mod orientation;
/// Runtime placed objects and lifecycle hooks
pub mod placed_object;

pub use controller::{PlacementController, PlacementEvent, PlacementPreview};
pub use input::{ActionOutcome, InputAction};
pub use object_type::{OrientationTable, PlacedObjectType};
pub use orientation::Orientation;
pub use placed_object::{GridObject, NoopLifecycle, ObjectLifecycle, PlacedObject, PlacedObjectId};
