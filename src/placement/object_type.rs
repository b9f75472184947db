//! Static definitions of placeable object types and their footprints
//!
//! A type carries one table per [`Orientation`]: the cells it covers relative
//! to its origin, the grid offset that moves the render anchor back onto the
//! covered cells after rotation, and the rotation angle itself.

use std::collections::HashSet;

use crate::io::error::{Result, invalid_catalog};
use crate::math::{GridPosition, WorldPoint};
use crate::placement::orientation::Orientation;

/// Footprint data for one orientation
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationTable {
    /// Cells covered, relative to the placement origin
    pub offsets: Vec<GridPosition>,
    /// Anchor correction in grid units
    pub rotation_offset: GridPosition,
    /// Rotation about the vertical axis in degrees
    pub angle: f64,
}

/// Definition of something that can be built on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObjectType {
    name: String,
    width: u32,
    height: u32,
    tables: [OrientationTable; 4],
}

impl PlacedObjectType {
    /// Define a solid `width x height` rectangle
    ///
    /// Quarter turns swap the covered extent; the rotation offsets keep the
    /// rotated model over the same cells the footprint claims.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCatalog`](crate::GridError::InvalidCatalog)
    /// if either side is zero or too large to address on a grid.
    pub fn rectangle(name: impl Into<String>, width: u32, height: u32) -> Result<Self> {
        let name = name.into();
        if width == 0 || height == 0 {
            return Err(invalid_catalog(&name, &"footprint sides must be positive"));
        }
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(invalid_catalog(&name, &"footprint is too large"));
        };

        let tables = Orientation::ALL.map(|orientation| {
            let (extent_x, extent_z) = if orientation.is_quarter_turn() {
                (h, w)
            } else {
                (w, h)
            };
            let offsets = (0..extent_x)
                .flat_map(|x| (0..extent_z).map(move |z| GridPosition::new(x, z)))
                .collect();
            let rotation_offset = match orientation {
                Orientation::Deg0 => GridPosition::new(0, 0),
                Orientation::Deg90 => GridPosition::new(0, w),
                Orientation::Deg180 => GridPosition::new(w, h),
                Orientation::Deg270 => GridPosition::new(h, 0),
            };
            OrientationTable {
                offsets,
                rotation_offset,
                angle: f64::from(orientation.degrees()),
            }
        });

        Ok(Self {
            name,
            width,
            height,
            tables,
        })
    }

    /// Define a type from explicit per-orientation tables
    ///
    /// Tables are given in [`Orientation::ALL`] order. The reported width and
    /// height are the extent of the unrotated footprint.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCatalog`](crate::GridError::InvalidCatalog)
    /// if a table is empty, repeats a cell, or covers a different number of
    /// cells than the unrotated table.
    pub fn from_tables(name: impl Into<String>, tables: [OrientationTable; 4]) -> Result<Self> {
        let name = name.into();
        let [base, ..] = &tables;
        let cardinality = base.offsets.len();

        for (orientation, table) in Orientation::ALL.iter().zip(&tables) {
            if table.offsets.is_empty() {
                return Err(invalid_catalog(
                    &name,
                    &format!("footprint for {orientation} is empty"),
                ));
            }
            if table.offsets.len() != cardinality {
                return Err(invalid_catalog(
                    &name,
                    &format!(
                        "footprint for {orientation} covers {} cells, expected {cardinality}",
                        table.offsets.len()
                    ),
                ));
            }
            let unique: HashSet<_> = table.offsets.iter().collect();
            if unique.len() != table.offsets.len() {
                return Err(invalid_catalog(
                    &name,
                    &format!("footprint for {orientation} repeats a cell"),
                ));
            }
        }

        let (width, height) = extent(&base.offsets);
        Ok(Self {
            name,
            width,
            height,
            tables,
        })
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unrotated extent along `x`
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Unrotated extent along `z`
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells covered in any orientation
    pub fn cell_count(&self) -> usize {
        self.table(Orientation::Deg0).offsets.len()
    }

    const fn table(&self, orientation: Orientation) -> &OrientationTable {
        let [deg0, deg90, deg180, deg270] = &self.tables;
        match orientation {
            Orientation::Deg0 => deg0,
            Orientation::Deg90 => deg90,
            Orientation::Deg180 => deg180,
            Orientation::Deg270 => deg270,
        }
    }

    /// Absolute cells covered when placed at `origin` facing `orientation`
    ///
    /// No bounds checks are made; callers validate each coordinate.
    pub fn footprint(&self, origin: GridPosition, orientation: Orientation) -> Vec<GridPosition> {
        self.table(orientation)
            .offsets
            .iter()
            .map(|&offset| origin.offset(offset))
            .collect()
    }

    /// Anchor correction for `orientation` in grid units
    pub const fn rotation_offset(&self, orientation: Orientation) -> GridPosition {
        self.table(orientation).rotation_offset
    }

    /// Rotation angle in degrees for `orientation`
    pub const fn rotation_angle(&self, orientation: Orientation) -> f64 {
        self.table(orientation).angle
    }

    /// World-space anchor correction for `orientation` on a grid with `cell_size`
    pub fn anchor_offset(&self, orientation: Orientation, cell_size: f64) -> WorldPoint {
        self.rotation_offset(orientation).to_world_offset() * cell_size
    }
}

fn extent(offsets: &[GridPosition]) -> (u32, u32) {
    let span = |axis: fn(&GridPosition) -> i32| {
        let min = offsets.iter().map(axis).min().unwrap_or(0);
        let max = offsets.iter().map(axis).max().unwrap_or(0);
        u32::try_from(i64::from(max) - i64::from(min) + 1).unwrap_or(u32::MAX)
    };
    (span(|p| p.x), span(|p| p.z))
}
