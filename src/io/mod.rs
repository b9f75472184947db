//! Input/output: errors, defaults, catalogs, scripts and exports

/// JSON catalogs of placeable types
pub mod catalog;
/// Command-line host
pub mod cli;
/// Default settings and output constants
pub mod configuration;
/// Error types
pub mod error;
/// PNG occupancy export
pub mod image;
/// Input script parsing
pub mod script;
/// Text rendering and change capture
pub mod visualization;
