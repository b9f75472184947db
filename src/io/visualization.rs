//! Text rendering and change capture for inspecting grid state

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use crate::math::GridPosition;
use crate::placement::PlacementController;
use crate::spatial::{GridMap, ListenerId};

/// Character for a free cell in [`ascii_map`]
pub const FREE_CELL_GLYPH: char = '.';

/// Glyph for a catalog entry: `A`, `B`, ... then `*` past `Z`
pub fn type_glyph(type_index: usize) -> char {
    u8::try_from(type_index)
        .ok()
        .filter(|&index| index < 26)
        .map_or('*', |index| char::from(b'A' + index))
}

/// Render occupancy as text, top row first, `z` growing upwards
pub fn ascii_map(controller: &PlacementController) -> String {
    let grid = controller.grid();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());

    for z in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let glyph = grid
                .cell(GridPosition::new(x, z))
                .ok()
                .and_then(|cell| cell.occupant())
                .and_then(|&id| controller.placed_object(id))
                .map_or(FREE_CELL_GLYPH, |object| type_glyph(object.type_index()));
            out.push(glyph);
        }
        out.push('\n');
    }

    out
}

/// Records every cell change notification a grid emits
///
/// Attach with [`ChangeCapture::attach`]; the capture shares its log with the
/// listener, so it keeps recording while the grid is borrowed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ChangeCapture {
    changes: Rc<RefCell<Vec<GridPosition>>>,
}

impl ChangeCapture {
    /// Subscribe a new capture to `grid`
    pub fn attach<T>(grid: &mut GridMap<T>) -> (Self, ListenerId) {
        let capture = Self::default();
        let log = Rc::clone(&capture.changes);
        let id = grid.subscribe(move |change| log.borrow_mut().push(change.position));
        (capture, id)
    }

    /// Positions notified so far, in order
    pub fn changes(&self) -> Vec<GridPosition> {
        self.changes.borrow().clone()
    }

    /// Number of notifications so far
    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    /// Whether nothing was notified yet
    pub fn is_empty(&self) -> bool {
        self.changes.borrow().is_empty()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.changes.borrow_mut().clear();
    }

    /// Summarize notifications as `x,z` pairs separated by spaces
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (index, position) in self.changes.borrow().iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{},{}", position.x, position.z);
        }
        out
    }
}
