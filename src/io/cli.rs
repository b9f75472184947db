//! Command-line host replaying input scripts against a placement controller

use crate::io::catalog::{default_catalog, load_catalog};
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SEED, MAX_GRID_DIMENSION,
    OUTPUT_SUFFIX, REJECTION_MESSAGE,
};
use crate::io::error::{Result, invalid_dimension};
use crate::io::image::export_occupancy_png;
use crate::io::script::{ScriptStep, load_script};
use crate::io::visualization::{ChangeCapture, ascii_map};
use crate::math::{GridPosition, WorldPoint};
use crate::placement::{ActionOutcome, GridObject, InputAction, PlacementController};
use crate::spatial::GridMap;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "gridplace")]
#[command(
    author,
    version,
    about = "Replay building input against a grid placement controller"
)]
/// Command-line arguments for the placement host
pub struct Cli {
    /// Input script to replay (see `io::script` for the format)
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: i32,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: i32,

    /// World-space edge length of a cell
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: f64,

    /// World `x` of the grid origin
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_x: f64,

    /// World `z` of the grid origin
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub origin_z: f64,

    /// JSON catalog of placeable types (built-in catalog if omitted)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Attempt this many random builds after the script
    #[arg(short = 'n', long, default_value_t = 0)]
    pub scatter: usize,

    /// Random seed for reproducible scatter runs
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Write the final occupancy as a PNG image
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the final occupancy as text
    #[arg(short, long)]
    pub ascii: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub const fn log_level(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }

    /// Output path for the occupancy image
    ///
    /// Falls back to `<script>_occupancy.png` next to the script when only a
    /// script is given.
    pub fn image_path(&self) -> Option<PathBuf> {
        self.output
            .clone()
            .or_else(|| self.script.as_deref().map(output_path_for))
    }
}

/// Occupancy image path derived from an input path
pub fn output_path_for(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// Tally of what a session did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Actions dispatched
    pub actions: usize,
    /// Objects built
    pub built: usize,
    /// Objects removed
    pub removed: usize,
    /// Builds or removals rejected
    pub rejected: usize,
    /// Actions that had no effect
    pub ignored: usize,
    /// Cell change notifications observed
    pub cell_changes: usize,
}

impl SessionReport {
    fn record(&mut self, outcome: &ActionOutcome) {
        self.actions += 1;
        match outcome {
            ActionOutcome::Built { .. } => self.built += 1,
            ActionOutcome::Removed { .. } => self.removed += 1,
            ActionOutcome::Ignored => self.ignored += 1,
            ActionOutcome::Rotated(_) | ActionOutcome::SelectionChanged(_) => {}
        }
    }
}

/// Drives one controller through a script and optional random scatter
pub struct Session {
    cli: Cli,
    controller: PlacementController,
    capture: ChangeCapture,
    report: SessionReport,
}

impl Session {
    /// Build the grid and catalog described by the command line
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A grid dimension exceeds the supported maximum or is not positive
    /// - The catalog file cannot be loaded
    pub fn new(cli: Cli) -> Result<Self> {
        if cli.width > MAX_GRID_DIMENSION {
            return Err(invalid_dimension("width", &cli.width));
        }
        if cli.height > MAX_GRID_DIMENSION {
            return Err(invalid_dimension("height", &cli.height));
        }

        let catalog = match &cli.catalog {
            Some(path) => load_catalog(path)?,
            None => default_catalog()?,
        };
        let origin = WorldPoint::new(cli.origin_x, 0.0, cli.origin_z);
        let mut grid = GridMap::new(
            cli.width,
            cli.height,
            cli.cell_size,
            origin,
            GridObject::new,
        )?;
        let (capture, _) = ChangeCapture::attach(&mut grid);

        info!(
            width = cli.width,
            height = cli.height,
            cell_size = cli.cell_size,
            types = catalog.len(),
            "grid ready"
        );

        Ok(Self {
            cli,
            controller: PlacementController::new(grid, catalog),
            capture,
            report: SessionReport::default(),
        })
    }

    /// Controller state after the session so far
    pub const fn controller(&self) -> &PlacementController {
        &self.controller
    }

    /// Replay the script, scatter, then write the requested outputs
    ///
    /// # Errors
    ///
    /// Returns an error if the script cannot be loaded, an action fails for
    /// a reason other than a player-facing rejection, or an output cannot be
    /// written.
    pub fn run(&mut self) -> Result<SessionReport> {
        if let Some(path) = self.cli.script.clone() {
            let steps = load_script(&path)?;
            info!(script = %path.display(), steps = steps.len(), "replaying script");
            for step in steps {
                self.apply(step)?;
            }
        }

        if self.cli.scatter > 0 {
            self.scatter(self.cli.scatter, self.cli.seed)?;
        }

        self.report.cell_changes = self.capture.len();

        if let Some(path) = self.cli.image_path() {
            export_occupancy_png(&self.controller, &path)?;
            info!(output = %path.display(), "exported occupancy image");
        }

        if self.cli.ascii {
            // Allow print for the requested text map
            #[allow(clippy::print_stdout)]
            {
                print!("{}", ascii_map(&self.controller));
            }
        }

        info!(
            actions = self.report.actions,
            built = self.report.built,
            removed = self.report.removed,
            rejected = self.report.rejected,
            ignored = self.report.ignored,
            cell_changes = self.report.cell_changes,
            "session finished"
        );
        Ok(self.report)
    }

    /// Dispatch one script step, counting player-facing rejections
    ///
    /// # Errors
    ///
    /// Propagates errors that are not rejections, such as an unknown slot.
    pub fn apply(&mut self, step: ScriptStep) -> Result<()> {
        match self.controller.handle(step.action, step.cursor) {
            Ok(outcome) => {
                if let ActionOutcome::Rotated(orientation) = outcome {
                    info!(line = step.line, %orientation, at = %step.cursor, "rotated");
                }
                self.report.record(&outcome);
                Ok(())
            }
            Err(error) if error.is_rejection() => {
                self.report.actions += 1;
                self.report.rejected += 1;
                warn!(line = step.line, at = %step.cursor, %error, "{REJECTION_MESSAGE}");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Attempt `attempts` builds of random types and orientations
    ///
    /// # Errors
    ///
    /// Propagates errors that are not rejections.
    pub fn scatter(&mut self, attempts: usize, seed: u64) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        let types = self.controller.catalog().len();
        let grid = self.controller.grid();
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        if types == 0 {
            return Ok(());
        }

        for attempt in 0..attempts {
            let slot = rng.random_range(1..=types);
            self.apply(ScriptStep {
                line: attempt + 1,
                action: InputAction::SelectSlot(slot),
                cursor: WorldPoint::ZERO,
            })?;

            let cell = GridPosition::new(rng.random_range(0..width), rng.random_range(0..height));
            let cursor = self.controller.grid().grid_to_world(cell)
                + WorldPoint::new(0.5, 0.0, 0.5) * self.controller.grid().cell_size();
            for _ in 0..rng.random_range(0..4) {
                self.controller.rotate();
            }

            self.apply(ScriptStep {
                line: attempt + 1,
                action: InputAction::Primary,
                cursor,
            })?;
        }

        Ok(())
    }
}
