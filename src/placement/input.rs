//! Discrete input actions the host maps one-to-one onto controller calls

use crate::math::GridPosition;
use crate::placement::orientation::Orientation;
use crate::placement::placed_object::PlacedObjectId;

/// One discrete press from the input collaborator
///
/// Holding a button must not repeat the action; the host sends one action
/// per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Attempt to build the selected type under the cursor
    Primary,
    /// Attempt to remove whatever stands under the cursor
    Secondary,
    /// Advance the orientation of the current selection
    Rotate,
    /// Select catalog slot `n`; slot 0 is reserved for "nothing"
    SelectSlot(usize),
    /// Clear the selection
    Deselect,
}

/// What handling an [`InputAction`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A new object was committed to the grid
    Built {
        /// Handle of the new object
        id: PlacedObjectId,
        /// Clamped origin cell
        origin: GridPosition,
    },
    /// An object was destroyed and its cells cleared
    Removed {
        /// Handle of the removed object
        id: PlacedObjectId,
    },
    /// The selection orientation advanced
    Rotated(Orientation),
    /// The selection was set or cleared
    SelectionChanged(Option<usize>),
    /// Nothing applied: no selection, empty cell, or cursor off the grid
    Ignored,
}
