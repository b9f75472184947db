//! Build and remove orchestration over the occupancy grid
//!
//! Placement is two-phase: every footprint cell is validated before any cell
//! is written, so a rejected build never leaves partial occupancy behind.
//! Removal destroys the object through the host lifecycle first and only
//! then clears its cells; a refused destroy leaves everything as it was.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::io::error::{BlockReason, GridError, Result};
use crate::math::{GridPosition, WorldPoint};
use crate::placement::input::{ActionOutcome, InputAction};
use crate::placement::object_type::PlacedObjectType;
use crate::placement::orientation::Orientation;
use crate::placement::placed_object::{
    GridObject, NoopLifecycle, ObjectLifecycle, PlacedObject, PlacedObjectId,
};
use crate::spatial::{GridMap, ListenerId, Observers};

/// Notifications emitted by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    /// A type was selected or the selection was cleared
    SelectionChanged {
        /// Selected catalog index, if any
        type_index: Option<usize>,
        /// Orientation the next build will use
        orientation: Orientation,
    },
    /// The orientation of the active selection advanced
    OrientationChanged {
        /// New orientation
        orientation: Orientation,
    },
    /// A build committed
    ObjectPlaced {
        /// Handle of the new object
        id: PlacedObjectId,
        /// Clamped origin cell
        origin: GridPosition,
    },
    /// A removal committed
    ObjectRemoved {
        /// Handle of the removed object
        id: PlacedObjectId,
    },
}

/// Where the current selection would land and whether it fits
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPreview {
    /// Catalog index of the selected type
    pub type_index: usize,
    /// Clamped origin cell
    pub origin: GridPosition,
    /// Orientation the build would use
    pub orientation: Orientation,
    /// World-space model anchor
    pub anchor: WorldPoint,
    /// Model rotation in degrees
    pub rotation_angle: f64,
    /// Cells the object would cover
    pub footprint: Vec<GridPosition>,
    /// First cell that fails validation, if any
    pub blocked: Option<(GridPosition, BlockReason)>,
}

impl PlacementPreview {
    /// Whether every footprint cell is free and on the grid
    pub const fn can_build(&self) -> bool {
        self.blocked.is_none()
    }

    fn into_error(self) -> Option<GridError> {
        self.blocked.map(|(cell, reason)| GridError::PlacementBlocked {
            origin: self.origin,
            cell,
            reason,
        })
    }
}

/// Selection state, placed-object registry and grid, driven one action at a time
pub struct PlacementController {
    grid: GridMap<GridObject>,
    catalog: Vec<PlacedObjectType>,
    selected: Option<usize>,
    orientation: Orientation,
    objects: BTreeMap<PlacedObjectId, PlacedObject>,
    next_id: u64,
    observers: Observers<PlacementEvent>,
    lifecycle: Box<dyn ObjectLifecycle>,
}

impl std::fmt::Debug for PlacementController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementController")
            .field("grid", &self.grid)
            .field("catalog", &self.catalog.len())
            .field("selected", &self.selected)
            .field("orientation", &self.orientation)
            .field("objects", &self.objects.len())
            .finish_non_exhaustive()
    }
}

impl PlacementController {
    /// Create a controller over `grid` with nothing selected
    pub fn new(grid: GridMap<GridObject>, catalog: Vec<PlacedObjectType>) -> Self {
        Self {
            grid,
            catalog,
            selected: None,
            orientation: Orientation::default(),
            objects: BTreeMap::new(),
            next_id: 1,
            observers: Observers::new(),
            lifecycle: Box::new(NoopLifecycle),
        }
    }

    /// Replace the host lifecycle hooks
    pub fn with_lifecycle(mut self, lifecycle: impl ObjectLifecycle + 'static) -> Self {
        self.lifecycle = Box::new(lifecycle);
        self
    }

    /// The occupancy grid
    pub const fn grid(&self) -> &GridMap<GridObject> {
        &self.grid
    }

    /// Mutable grid access for listener registration
    ///
    /// Cell writes made through this handle bypass the object registry.
    pub const fn grid_mut(&mut self) -> &mut GridMap<GridObject> {
        &mut self.grid
    }

    /// Placeable types, in selection order
    pub fn catalog(&self) -> &[PlacedObjectType] {
        &self.catalog
    }

    /// Selected catalog index
    pub const fn selection(&self) -> Option<usize> {
        self.selected
    }

    /// Selected type definition
    pub fn selected_type(&self) -> Option<&PlacedObjectType> {
        self.selected.and_then(|index| self.catalog.get(index))
    }

    /// Orientation the next build will use
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Register a listener for controller events
    pub fn subscribe(&mut self, listener: impl FnMut(&PlacementEvent) + 'static) -> ListenerId {
        self.observers.subscribe(listener)
    }

    /// Remove a controller event listener
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Select the catalog entry at `index`
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownObjectType`] if `index` is past the end of
    /// the catalog; the selection is left unchanged.
    pub fn select_type(&mut self, index: usize) -> Result<()> {
        if index >= self.catalog.len() {
            return Err(GridError::UnknownObjectType {
                index,
                available: self.catalog.len(),
            });
        }
        self.selected = Some(index);
        debug!(type_index = index, "selected object type");
        self.emit_selection();
        Ok(())
    }

    /// Clear the selection
    pub fn deselect(&mut self) {
        self.selected = None;
        debug!("cleared object type selection");
        self.emit_selection();
    }

    fn emit_selection(&mut self) {
        self.observers.emit(&PlacementEvent::SelectionChanged {
            type_index: self.selected,
            orientation: self.orientation,
        });
    }

    /// Advance the orientation if a type is selected
    pub fn rotate(&mut self) -> Option<Orientation> {
        self.selected?;
        self.orientation = self.orientation.next();
        debug!(orientation = %self.orientation, "rotated selection");
        self.observers.emit(&PlacementEvent::OrientationChanged {
            orientation: self.orientation,
        });
        Some(self.orientation)
    }

    /// Resolve where the current selection would be built for `world`
    ///
    /// Returns `None` without a selection or when `world` is not finite.
    pub fn preview(&self, world: WorldPoint) -> Option<PlacementPreview> {
        if !world.is_finite() {
            return None;
        }
        let type_index = self.selected?;
        let object_type = self.catalog.get(type_index)?;

        let origin = self.grid.clamp_to_grid(self.grid.world_to_grid(world));
        let footprint = object_type.footprint(origin, self.orientation);
        let blocked = first_blocked(&self.grid, &footprint);
        let anchor = self.grid.grid_to_world(origin)
            + object_type.anchor_offset(self.orientation, self.grid.cell_size());

        Some(PlacementPreview {
            type_index,
            origin,
            orientation: self.orientation,
            anchor,
            rotation_angle: object_type.rotation_angle(self.orientation),
            footprint,
            blocked,
        })
    }

    /// Snapped anchor for the selection, or `world` itself without one
    pub fn snapped_world_position(&self, world: WorldPoint) -> WorldPoint {
        self.preview(world).map_or(world, |preview| preview.anchor)
    }

    /// Model rotation of the selection in degrees, 0 without one
    pub fn placement_rotation(&self) -> f64 {
        self.selected_type()
            .map_or(0.0, |object_type| object_type.rotation_angle(self.orientation))
    }

    /// Check whether the selection could be built at `world` without building it
    ///
    /// # Errors
    ///
    /// Returns [`GridError::PlacementBlocked`] naming the first footprint cell
    /// that is occupied or off the grid, or [`GridError::NonFiniteCursor`] if
    /// `world` has a NaN or infinite component.
    pub fn can_build_at(&self, world: WorldPoint) -> Result<()> {
        if self.selected.is_some() {
            reject_non_finite(world)?;
        }
        match self.preview(world).and_then(PlacementPreview::into_error) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Build the selected type at the cell under `world`
    ///
    /// The position is clamped onto the grid before the footprint is
    /// resolved. Returns `Ok(None)` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::PlacementBlocked`] if any footprint cell is
    /// occupied or outside the grid, or [`GridError::NonFiniteCursor`] if
    /// `world` has a NaN or infinite component. No cell is modified in either
    /// case.
    pub fn try_build(&mut self, world: WorldPoint) -> Result<Option<PlacedObjectId>> {
        if self.selected.is_some() {
            reject_non_finite(world)?;
        }
        let Some(preview) = self.preview(world) else {
            return Ok(None);
        };
        if let Some((cell, reason)) = preview.blocked {
            debug!(
                origin = %preview.origin,
                cell = %cell,
                %reason,
                "placement rejected"
            );
            return Err(GridError::PlacementBlocked {
                origin: preview.origin,
                cell,
                reason,
            });
        }

        let type_name = self
            .catalog
            .get(preview.type_index)
            .map(|object_type| object_type.name().to_owned())
            .unwrap_or_default();
        let id = PlacedObjectId::new(self.next_id);
        self.next_id += 1;

        for &position in &preview.footprint {
            self.grid
                .modify_cell(position, |cell| cell.set_occupant(id))?;
        }

        let object = PlacedObject::new(
            id,
            preview.type_index,
            type_name,
            preview.anchor,
            preview.origin,
            preview.orientation,
            preview.rotation_angle,
            preview.footprint,
        );
        self.lifecycle.spawned(&object);
        debug!(
            id = id.get(),
            object_type = object.type_name(),
            origin = %preview.origin,
            orientation = %preview.orientation,
            "placed object"
        );
        self.objects.insert(id, object);

        self.observers.emit(&PlacementEvent::ObjectPlaced {
            id,
            origin: preview.origin,
        });
        Ok(Some(id))
    }

    /// Remove the object standing on the cell under `world`
    ///
    /// Positions off the grid (non-finite ones included) and empty cells are
    /// ignored and return `Ok(None)`; removal never clamps.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DestroyFailed`] if the lifecycle refuses to
    /// destroy the object. The object stays placed and its cells stay
    /// occupied in that case.
    pub fn try_remove(&mut self, world: WorldPoint) -> Result<Option<PlacedObjectId>> {
        let Ok(cell) = self.grid.cell_at_world(world) else {
            return Ok(None);
        };
        let Some(&id) = cell.occupant() else {
            return Ok(None);
        };
        let Some(object) = self.objects.get(&id) else {
            warn!(id = id.get(), cell = %cell.position(), "cell refers to an unknown object");
            return Ok(None);
        };

        if let Err(reason) = self.lifecycle.destroy(object) {
            warn!(id = id.get(), %reason, "object refused destruction");
            return Err(GridError::DestroyFailed { id, reason });
        }

        let Some(object) = self.objects.remove(&id) else {
            return Ok(None);
        };
        for &position in object.footprint() {
            self.grid.modify_cell(position, GridObject::clear_occupant)?;
        }
        debug!(id = id.get(), origin = %object.origin(), "removed object");

        self.observers.emit(&PlacementEvent::ObjectRemoved { id });
        Ok(Some(id))
    }

    /// Apply one input action at the cursor position `world`
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the action maps to.
    pub fn handle(&mut self, action: InputAction, world: WorldPoint) -> Result<ActionOutcome> {
        let outcome = match action {
            InputAction::Primary => match self.try_build(world)? {
                Some(id) => ActionOutcome::Built {
                    id,
                    origin: self
                        .objects
                        .get(&id)
                        .map_or_else(GridPosition::default, PlacedObject::origin),
                },
                None => ActionOutcome::Ignored,
            },
            InputAction::Secondary => self
                .try_remove(world)?
                .map_or(ActionOutcome::Ignored, |id| ActionOutcome::Removed { id }),
            InputAction::Rotate => self
                .rotate()
                .map_or(ActionOutcome::Ignored, ActionOutcome::Rotated),
            InputAction::SelectSlot(0) | InputAction::Deselect => {
                self.deselect();
                ActionOutcome::SelectionChanged(None)
            }
            InputAction::SelectSlot(slot) => {
                self.select_type(slot - 1)?;
                ActionOutcome::SelectionChanged(self.selected)
            }
        };
        Ok(outcome)
    }

    /// Look up a placed object by handle
    pub fn placed_object(&self, id: PlacedObjectId) -> Option<&PlacedObject> {
        self.objects.get(&id)
    }

    /// Object standing on the cell under `world`, if any
    pub fn object_at(&self, world: WorldPoint) -> Option<&PlacedObject> {
        let cell = self.grid.cell_at_world(world).ok()?;
        cell.occupant().and_then(|id| self.objects.get(id))
    }

    /// All placed objects in creation order
    pub fn placed_objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.values()
    }
}

fn reject_non_finite(world: WorldPoint) -> Result<()> {
    if world.is_finite() {
        Ok(())
    } else {
        debug!(%world, "placement rejected: cursor is not finite");
        Err(GridError::NonFiniteCursor { world })
    }
}

fn first_blocked(
    grid: &GridMap<GridObject>,
    footprint: &[GridPosition],
) -> Option<(GridPosition, BlockReason)> {
    footprint
        .iter()
        .find_map(|&position| match grid.cell(position) {
            Err(_) => Some((position, BlockReason::OutOfBounds)),
            Ok(cell) if !cell.can_build() => Some((position, BlockReason::Occupied)),
            Ok(_) => None,
        })
}
