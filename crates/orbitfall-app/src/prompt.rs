//! Interactive initial conditions read from a line-oriented input.
//!
//! Generic over `BufRead`/`Write` so tests can drive it with in-memory buffers.

use std::io::{BufRead, Write};

use tracing::warn;

use orbitfall_core::error::InputError;
use orbitfall_core::types::{Position, Velocity};

/// Attempts per value before giving up.
pub const MAX_ATTEMPTS: usize = 3;

/// Ask for a number, accepting an empty line as `default`.
///
/// Invalid entries are reported and asked again, up to [`MAX_ATTEMPTS`] times.
pub fn read_line_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: f64,
) -> Result<f64, InputError> {
    let mut line = String::new();

    for _ in 0..MAX_ATTEMPTS {
        write!(output, "{prompt} [{default}]: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(InputError::Closed {
                prompt: prompt.to_string(),
            });
        }

        let entry = line.trim();
        if entry.is_empty() {
            return Ok(default);
        }
        match entry.parse::<f64>() {
            Ok(value) if value.is_finite() => return Ok(value),
            _ => {
                let err = InputError::NotANumber {
                    prompt: prompt.to_string(),
                    input: entry.to_string(),
                };
                warn!(%err, "rejected input");
                writeln!(output, "{err}, try again")?;
            }
        }
    }

    Err(InputError::Exhausted {
        prompt: prompt.to_string(),
    })
}

/// Ask for the asteroid's starting position (m) and velocity (m/s).
/// `defaults` is `[x, y, vx, vy]`.
pub fn prompt_initial_state<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    body: &str,
    defaults: [f64; 4],
) -> Result<(Position, Velocity), InputError> {
    let labels = ["x position (m)", "y position (m)", "x velocity (m/s)", "y velocity (m/s)"];
    let mut values = [0.0; 4];
    for ((value, label), default) in values.iter_mut().zip(labels).zip(defaults) {
        *value = read_line_with_default(input, output, &format!("{body} {label}"), default)?;
    }
    let [x, y, vx, vy] = values;
    Ok((Position::new(x, y), Velocity::new(vx, vy)))
}
