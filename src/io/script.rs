//! Plain-text input scripts replayed against a controller
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! select 2        # catalog slot, 0 deselects
//! rotate
//! build 35 0 35   # world x y z (or just x z)
//! remove 35 35
//! deselect
//! ```
//!
//! Commands without a position reuse the last position seen, the way a
//! cursor stays where it was between key presses.

use std::path::Path;

use crate::io::error::{GridError, Result, invalid_script};
use crate::math::WorldPoint;
use crate::placement::InputAction;

/// One parsed script command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    /// One-based source line
    pub line: usize,
    /// Action to dispatch
    pub action: InputAction,
    /// Cursor position at the time of the action
    pub cursor: WorldPoint,
}

/// Parse a whole script
///
/// # Errors
///
/// Returns [`GridError::InvalidScript`] for the first line with an unknown
/// command, a malformed number, or the wrong number of arguments.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    let mut cursor = WorldPoint::ZERO;
    let mut steps = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut words = content.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let action = match command.as_str() {
            "build" | "place" => {
                cursor = parse_position(&args, line)?;
                InputAction::Primary
            }
            "remove" | "destroy" => {
                cursor = parse_position(&args, line)?;
                InputAction::Secondary
            }
            "rotate" => {
                expect_no_args(&args, line)?;
                InputAction::Rotate
            }
            "deselect" => {
                expect_no_args(&args, line)?;
                InputAction::Deselect
            }
            "select" => match args.as_slice() {
                [slot] => InputAction::SelectSlot(
                    slot.parse()
                        .map_err(|e| invalid_script(line, &format!("bad slot '{slot}': {e}")))?,
                ),
                _ => return Err(invalid_script(line, &"select takes exactly one slot")),
            },
            other => return Err(invalid_script(line, &format!("unknown command '{other}'"))),
        };

        steps.push(ScriptStep {
            line,
            action,
            cursor,
        });
    }

    Ok(steps)
}

/// Read and parse a script file
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_script`] fails.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path).map_err(|e| GridError::FileSystem {
        path: path.to_path_buf(),
        operation: "script read",
        source: e,
    })?;
    parse_script(&text)
}

fn expect_no_args(args: &[&str], line: usize) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(invalid_script(line, &"command takes no arguments"))
    }
}

fn parse_position(args: &[&str], line: usize) -> Result<WorldPoint> {
    let numbers = args
        .iter()
        .map(|arg| {
            arg.parse::<f64>()
                .map_err(|e| invalid_script(line, &format!("bad coordinate '{arg}': {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    match numbers.as_slice() {
        &[x, z] => Ok(WorldPoint::new(x, 0.0, z)),
        &[x, y, z] => Ok(WorldPoint::new(x, y, z)),
        _ => Err(invalid_script(
            line,
            &"expected a world position as 'x z' or 'x y z'",
        )),
    }
}
