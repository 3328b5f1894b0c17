//! Simulation snapshot: the visible state handed to the host after each tick.

use serde::{Deserialize, Serialize};

use crate::components::Tint;
use crate::enums::SimPhase;
use crate::events::SimEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub time_scale: f64,
    /// Surviving roster bodies in declaration order.
    pub bodies: Vec<BodyView>,
    pub debris: DebrisView,
    /// Live debris particles, in world iteration order.
    pub particles: Vec<ParticleView>,
    /// Events raised during this tick.
    pub events: Vec<SimEvent>,
}

/// A gravitating body for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub name: String,
    pub position: Position,
    pub velocity: Velocity,
    pub radius: f64,
    pub mass: f64,
    pub tint: Tint,
}

/// Aggregate debris state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DebrisView {
    /// Debris particles alive after this tick.
    pub active: u32,
    /// Particles spawned since the last restart.
    pub spawned_total: u64,
    /// Particles removed after expiring since the last restart.
    pub expired_total: u64,
}

/// One live debris particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Position,
    pub remaining_ticks: i32,
}

impl SimSnapshot {
    pub fn body(&self, name: &str) -> Option<&BodyView> {
        self.bodies.iter().find(|b| b.name == name)
    }
}
