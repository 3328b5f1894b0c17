//! Events emitted by the simulation during a tick.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Things that happened during a tick, for logging and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Two bodies overlapped.
    Collision { first: String, second: String },
    /// A body exploded into debris.
    Explosion {
        body: String,
        position: Position,
        debris_spawned: u32,
    },
    /// Debris particles reached the end of their lifetime.
    DebrisExpired { count: u32 },
    /// A gravitating pair was skipped because the bodies coincided.
    SingularitySkipped { influenced: String, influencer: String },
    /// The roster was rebuilt from configuration.
    Restarted,
}
