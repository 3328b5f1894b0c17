//! Snapshot system: queries the ECS world and builds a SimSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use orbitfall_core::components::{Debris, PhysicalProperties, Tint};
use orbitfall_core::enums::SimPhase;
use orbitfall_core::events::SimEvent;
use orbitfall_core::state::*;
use orbitfall_core::types::{Position, SimTime, Velocity};

use crate::roster::Roster;

/// Running debris totals kept by the engine between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebrisTotals {
    pub spawned: u64,
    pub expired: u64,
}

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    roster: &Roster,
    time: &SimTime,
    phase: SimPhase,
    time_scale: f64,
    totals: DebrisTotals,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let particles = build_particles(world);

    SimSnapshot {
        time: *time,
        phase,
        time_scale,
        bodies: build_bodies(world, roster),
        debris: DebrisView {
            active: particles.len() as u32,
            spawned_total: totals.spawned,
            expired_total: totals.expired,
        },
        particles,
        events,
    }
}

/// BodyView list in roster order.
fn build_bodies(world: &World, roster: &Roster) -> Vec<BodyView> {
    roster
        .bodies()
        .filter_map(|(name, entity)| {
            let mut query = world
                .query_one::<(&Position, &Velocity, &PhysicalProperties, &Tint)>(entity)
                .ok()?;
            let (pos, vel, props, tint) = query.get()?;
            Some(BodyView {
                name: name.to_string(),
                position: *pos,
                velocity: *vel,
                radius: props.radius,
                mass: props.mass,
                tint: *tint,
            })
        })
        .collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    let mut q = world.query::<(&Position, &Debris)>();
    q.iter()
        .map(|(_, (pos, debris))| ParticleView {
            position: *pos,
            remaining_ticks: debris.remaining_ticks,
        })
        .collect()
}
