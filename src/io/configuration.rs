//! Default grid settings and output constants

// Grid defaults used when the command line does not override them
/// Default number of columns
pub const DEFAULT_GRID_WIDTH: i32 = 10;
/// Default number of rows
pub const DEFAULT_GRID_HEIGHT: i32 = 10;
/// Default world-space edge length of a cell
pub const DEFAULT_CELL_SIZE: f64 = 10.0;

/// Fixed seed for reproducible scatter runs
pub const DEFAULT_SEED: u64 = 42;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: i32 = 10_000;

/// Message shown to the player when a build is rejected
pub const REJECTION_MESSAGE: &str = "Cannot build here!";

// Output settings
/// Suffix added to exported occupancy image filenames
pub const OUTPUT_SUFFIX: &str = "_occupancy";
/// Pixels per grid cell in exported images
pub const PIXELS_PER_CELL: u32 = 8;
/// Color of free cells in exported images
pub const FREE_CELL_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Colors cycled through per catalog entry in exported images
pub const TYPE_PALETTE: [[u8; 4]; 6] = [
    [214, 69, 65, 255],
    [65, 131, 215, 255],
    [46, 204, 113, 255],
    [241, 196, 15, 255],
    [155, 89, 182, 255],
    [230, 126, 34, 255],
];
