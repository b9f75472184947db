//! Fixed-size occupancy grid with world-space conversion
//!
//! Cells are created once by a factory and live as long as the map. Mutable
//! access goes through [`GridMap::modify_cell`], which always fires a
//! [`CellChanged`] notification afterwards so listeners (rendering, debug
//! overlays) see every write, including writes that store the same value.

use ndarray::Array2;
use num_traits::{ToPrimitive, clamp};
use tracing::trace;

use crate::io::error::{GridError, Result, invalid_dimension};
use crate::math::{GridPosition, WorldPoint};
use crate::spatial::observers::{ListenerId, Observers};

/// Notification that the cell at `position` was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChanged {
    /// Coordinate of the written cell
    pub position: GridPosition,
}

/// Dense `width x height` grid of cells anchored at a world origin
pub struct GridMap<T> {
    width: usize,
    height: usize,
    cell_size: f64,
    origin: WorldPoint,
    // Indexed [x, z]
    cells: Array2<T>,
    listeners: Observers<CellChanged>,
}

impl<T> std::fmt::Debug for GridMap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridMap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cell_size", &self.cell_size)
            .field("origin", &self.origin)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<T> GridMap<T> {
    /// Create a grid and eagerly build every cell with `factory`
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if `width` or `height` is not
    /// positive, or `cell_size` is not a positive finite number.
    pub fn new(
        width: i32,
        height: i32,
        cell_size: f64,
        origin: WorldPoint,
        mut factory: impl FnMut(GridPosition) -> T,
    ) -> Result<Self> {
        if width <= 0 {
            return Err(invalid_dimension("width", &width));
        }
        if height <= 0 {
            return Err(invalid_dimension("height", &height));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(invalid_dimension("cell_size", &cell_size));
        }
        if !origin.is_finite() {
            return Err(invalid_dimension("origin", &origin));
        }

        let (width, height) = (width as usize, height as usize);
        let cells = Array2::from_shape_fn((width, height), |(x, z)| {
            factory(GridPosition::new(x as i32, z as i32))
        });

        Ok(Self {
            width,
            height,
            cell_size,
            origin,
            cells,
            listeners: Observers::new(),
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// World-space edge length of one cell
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World position of cell `(0, 0)`'s corner
    pub const fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Whether `position` addresses a cell of this grid
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.x >= 0
            && position.z >= 0
            && (position.x as usize) < self.width
            && (position.z as usize) < self.height
    }

    fn index(&self, position: GridPosition) -> Result<[usize; 2]> {
        if self.contains(position) {
            Ok([position.x as usize, position.z as usize])
        } else {
            Err(GridError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Look up a cell by grid coordinate
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `position` is outside the grid.
    pub fn cell(&self, position: GridPosition) -> Result<&T> {
        let index = self.index(position)?;
        self.cells.get(index).ok_or(GridError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        })
    }

    /// Look up the cell containing a world position
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the position maps outside the grid.
    pub fn cell_at_world(&self, world: WorldPoint) -> Result<&T> {
        self.cell(self.world_to_grid(world))
    }

    /// Mutate a cell and notify listeners that it changed
    ///
    /// The notification fires after `update` returns, whether or not the
    /// cell's value actually differs.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `position` is outside the grid;
    /// `update` is not called and nothing is notified in that case.
    pub fn modify_cell<R>(
        &mut self,
        position: GridPosition,
        update: impl FnOnce(&mut T) -> R,
    ) -> Result<R> {
        let index = self.index(position)?;
        let cell = self.cells.get_mut(index).ok_or(GridError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        })?;
        let result = update(cell);
        self.notify_changed(position);
        Ok(result)
    }

    /// Convert a world position to the grid coordinate containing it
    ///
    /// No bounds are enforced. Non-finite input saturates to the `i32` range
    /// and NaN maps to `i32::MAX`, past the far edge of any grid.
    pub fn world_to_grid(&self, world: WorldPoint) -> GridPosition {
        let relative = world - self.origin;
        GridPosition::new(
            axis_to_cell(relative.x, self.cell_size),
            axis_to_cell(relative.z, self.cell_size),
        )
    }

    /// World position of the corner of cell `position`
    ///
    /// Valid for any coordinate, including ones outside the grid.
    pub fn grid_to_world(&self, position: GridPosition) -> WorldPoint {
        self.origin + position.to_world_offset() * self.cell_size
    }

    /// Clamp each axis of `position` into the grid independently
    pub fn clamp_to_grid(&self, position: GridPosition) -> GridPosition {
        let max_x = self.width.saturating_sub(1).to_i32().unwrap_or(i32::MAX);
        let max_z = self.height.saturating_sub(1).to_i32().unwrap_or(i32::MAX);
        GridPosition::new(clamp(position.x, 0, max_x), clamp(position.z, 0, max_z))
    }

    /// Fire a [`CellChanged`] notification for `position`
    pub fn notify_changed(&mut self, position: GridPosition) {
        trace!(x = position.x, z = position.z, "grid cell changed");
        self.listeners.emit(&CellChanged { position });
    }

    /// Register a listener for cell change notifications
    pub fn subscribe(&mut self, listener: impl FnMut(&CellChanged) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a cell change listener
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Every valid coordinate, column by column
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<T> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..height).map(move |z| GridPosition::new(x, z)))
    }

    /// Every cell with its coordinate, column by column
    pub fn cells(&self) -> impl Iterator<Item = (GridPosition, &T)> {
        self.cells
            .indexed_iter()
            .map(|((x, z), cell)| (GridPosition::new(x as i32, z as i32), cell))
    }
}

fn axis_to_cell(relative: f64, cell_size: f64) -> i32 {
    let cell = (relative / cell_size).floor();
    cell.to_i32().unwrap_or(if cell.is_sign_negative() {
        i32::MIN
    } else {
        i32::MAX
    })
}
