//! Error types for grid construction, lookups, placement and file input/output

use crate::math::{GridPosition, WorldPoint};
use crate::placement::PlacedObjectId;
use std::fmt;
use std::path::PathBuf;

/// Why a footprint cell rejected a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The cell already holds another placed object
    Occupied,
    /// The footprint reaches past the edge of the grid
    OutOfBounds,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied => write!(f, "occupied"),
            Self::OutOfBounds => write!(f, "outside the grid"),
        }
    }
}

/// Main error type for all grid and placement operations
#[derive(Debug)]
pub enum GridError {
    /// Grid dimensions or cell size are not strictly positive
    InvalidDimension {
        /// Name of the rejected parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
    },

    /// Coordinate lies outside `[0, width) x [0, height)`
    OutOfBounds {
        /// Requested coordinate
        position: GridPosition,
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
    },

    /// At least one footprint cell is occupied or unreachable
    ///
    /// No grid state is mutated when this is returned.
    PlacementBlocked {
        /// Clamped origin cell of the attempted placement
        origin: GridPosition,
        /// First footprint cell that failed validation
        cell: GridPosition,
        /// Why that cell failed
        reason: BlockReason,
    },

    /// Cursor position has a NaN or infinite component
    NonFiniteCursor {
        /// Rejected world position
        world: WorldPoint,
    },

    /// Selection index does not name an entry of the type catalog
    UnknownObjectType {
        /// Requested catalog index
        index: usize,
        /// Number of entries in the catalog
        available: usize,
    },

    /// The lifecycle hook refused to destroy a placed object
    DestroyFailed {
        /// Object that stays placed
        id: PlacedObjectId,
        /// Reason reported by the hook
        reason: String,
    },

    /// Object type definition is malformed
    InvalidCatalog {
        /// Name of the offending type
        name: String,
        /// Description of the problem
        reason: String,
    },

    /// Catalog file is not valid JSON for the expected schema
    CatalogParse {
        /// Path of the catalog file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Input script line could not be understood
    InvalidScript {
        /// One-based line number
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// Failed to save the occupancy image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { parameter, value } => {
                write!(f, "Invalid grid dimension '{parameter}' = '{value}': must be positive")
            }
            Self::OutOfBounds {
                position,
                width,
                height,
            } => {
                write!(f, "Cell ({position}) is outside the {width}x{height} grid")
            }
            Self::PlacementBlocked {
                origin,
                cell,
                reason,
            } => {
                write!(
                    f,
                    "Cannot build here! Placement at ({origin}) blocked: cell ({cell}) is {reason}"
                )
            }
            Self::NonFiniteCursor { world } => {
                write!(f, "Cannot build here! Cursor {world} is not a finite position")
            }
            Self::UnknownObjectType { index, available } => {
                write!(
                    f,
                    "Object type {index} does not exist (catalog has {available} entries)"
                )
            }
            Self::DestroyFailed { id, reason } => {
                write!(f, "Failed to destroy placed object {id}: {reason}")
            }
            Self::InvalidCatalog { name, reason } => {
                write!(f, "Invalid object type '{name}': {reason}")
            }
            Self::CatalogParse { path, source } => {
                write!(f, "Failed to parse catalog '{}': {source}", path.display())
            }
            Self::InvalidScript { line, reason } => {
                write!(f, "Invalid script line {line}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogParse { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    /// Whether the error is a recoverable rejection rather than a failure
    ///
    /// Hosts surface these to the player instead of aborting.
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::PlacementBlocked { .. }
                | Self::OutOfBounds { .. }
                | Self::NonFiniteCursor { .. }
                | Self::DestroyFailed { .. }
        )
    }
}

/// Create an invalid dimension error
pub fn invalid_dimension(parameter: &'static str, value: &impl ToString) -> GridError {
    GridError::InvalidDimension {
        parameter,
        value: value.to_string(),
    }
}

/// Create an invalid catalog error
pub fn invalid_catalog(name: &impl ToString, reason: &impl ToString) -> GridError {
    GridError::InvalidCatalog {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid script error
pub fn invalid_script(line: usize, reason: &impl ToString) -> GridError {
    GridError::InvalidScript {
        line,
        reason: reason.to_string(),
    }
}
