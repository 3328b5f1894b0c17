//! Commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible control actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Suppress ticks until resumed.
    Pause,
    /// Resume ticking after a pause.
    Resume,
    /// Flip between paused and running.
    TogglePause,
    /// Destroy everything and respawn the configured roster.
    Restart,
    /// Set wall-clock speed multiplier (1.0 = normal). Clamped to [0.25, 8.0].
    SetTimeScale { scale: f64 },
}
