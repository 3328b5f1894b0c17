//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Where the simulation loop currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Between ticks, waiting for the host to trigger the next one.
    #[default]
    Idle,
    /// Systems are running for the current tick.
    Ticking,
    /// Ticks are suppressed until resumed.
    Paused,
}

/// Result of evaluating one gravitating pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityOutcome {
    /// Velocity and position of the influenced body were updated.
    Applied,
    /// The bodies were closer than the distance guard; nothing changed.
    Singular,
    /// One of the bodies no longer exists.
    Missing,
}
