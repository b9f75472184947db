//! Grid cells holding at most one occupant handle

use std::fmt;

use crate::math::GridPosition;

/// A single grid cell that may be claimed by one occupant
///
/// The occupant is a non-owning handle; whoever created it manages its
/// lifetime. Cells are only reachable mutably through
/// [`GridMap::modify_cell`](crate::spatial::GridMap::modify_cell), so every
/// set or clear is announced to the grid's listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell<O> {
    position: GridPosition,
    occupant: Option<O>,
}

impl<O> GridCell<O> {
    /// Create an empty cell at `position`
    pub const fn new(position: GridPosition) -> Self {
        Self {
            position,
            occupant: None,
        }
    }

    /// Coordinate of this cell within its grid
    pub const fn position(&self) -> GridPosition {
        self.position
    }

    /// Store an occupant, replacing any previous one
    pub fn set_occupant(&mut self, occupant: O) {
        self.occupant = Some(occupant);
    }

    /// Remove the occupant, if any
    pub fn clear_occupant(&mut self) {
        self.occupant = None;
    }

    /// Current occupant
    pub const fn occupant(&self) -> Option<&O> {
        self.occupant.as_ref()
    }

    /// Whether something may be built on this cell
    pub const fn can_build(&self) -> bool {
        self.occupant.is_none()
    }
}

impl<O: fmt::Display> fmt::Display for GridCell<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)?;
        match &self.occupant {
            Some(occupant) => write!(f, "\n{occupant}"),
            None => Ok(()),
        }
    }
}
