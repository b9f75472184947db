//! Loading placeable type catalogs from JSON
//!
//! A catalog is a JSON array. Each entry is either a rectangle
//! (`{"name": "house", "width": 2, "height": 1}`) or explicit tables for the
//! four orientations in rotation order:
//!
//! ```json
//! {"name": "corner", "tables": [
//!   {"offsets": [[0, 0], [1, 0], [0, 1]], "rotation_offset": [0, 0], "angle": 0},
//!   ...
//! ]}
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::io::error::{GridError, Result, invalid_catalog};
use crate::math::GridPosition;
use crate::placement::{OrientationTable, PlacedObjectType};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeDefinition {
    Rectangle {
        name: String,
        width: u32,
        height: u32,
    },
    Tables {
        name: String,
        tables: [TableDefinition; 4],
    },
}

#[derive(Debug, Deserialize)]
struct TableDefinition {
    offsets: Vec<[i32; 2]>,
    #[serde(default)]
    rotation_offset: [i32; 2],
    #[serde(default)]
    angle: f64,
}

impl From<TableDefinition> for OrientationTable {
    fn from(table: TableDefinition) -> Self {
        Self {
            offsets: table.offsets.into_iter().map(GridPosition::from).collect(),
            rotation_offset: GridPosition::from(table.rotation_offset),
            angle: table.angle,
        }
    }
}

impl TypeDefinition {
    fn build(self) -> Result<PlacedObjectType> {
        match self {
            Self::Rectangle {
                name,
                width,
                height,
            } => PlacedObjectType::rectangle(name, width, height),
            Self::Tables { name, tables } => {
                PlacedObjectType::from_tables(name, tables.map(OrientationTable::from))
            }
        }
    }
}

/// Built-in catalog used when no file is given
///
/// # Errors
///
/// Never fails for the built-in definitions; the `Result` mirrors
/// [`PlacedObjectType::rectangle`].
pub fn default_catalog() -> Result<Vec<PlacedObjectType>> {
    Ok(vec![
        PlacedObjectType::rectangle("Block", 1, 1)?,
        PlacedObjectType::rectangle("House", 2, 1)?,
        PlacedObjectType::rectangle("Hall", 3, 2)?,
    ])
}

/// Parse a catalog from JSON text
///
/// `source` names the origin of the text in error messages.
///
/// # Errors
///
/// Returns an error if:
/// - The text is not a JSON array of type definitions
/// - The catalog is empty
/// - A definition fails footprint validation
pub fn parse_catalog(json: &str, source: &Path) -> Result<Vec<PlacedObjectType>> {
    let definitions: Vec<TypeDefinition> =
        serde_json::from_str(json).map_err(|e| GridError::CatalogParse {
            path: source.to_path_buf(),
            source: e,
        })?;

    if definitions.is_empty() {
        return Err(invalid_catalog(
            &source.display(),
            &"catalog contains no object types",
        ));
    }

    definitions.into_iter().map(TypeDefinition::build).collect()
}

/// Read and parse a catalog file
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_catalog`] fails.
pub fn load_catalog(path: &Path) -> Result<Vec<PlacedObjectType>> {
    let json = std::fs::read_to_string(path).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "catalog read",
        source: e,
    })?;
    parse_catalog(&json, path)
}
