//! Pairwise Newtonian gravity with semi-implicit Euler integration.
//!
//! Pairs are applied one at a time in roster order, so a later pair sees
//! positions already updated by earlier pairs in the same tick.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::warn;

use orbitfall_core::canvas::Canvas;
use orbitfall_core::components::{PhysicalProperties, Visual};
use orbitfall_core::coords::CoordinateMapper;
use orbitfall_core::enums::GravityOutcome;
use orbitfall_core::events::SimEvent;
use orbitfall_core::types::{Position, Velocity};

use crate::roster::Roster;

/// Constants for one gravity pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    /// Simulated seconds per tick.
    pub dt: f64,
    /// Gravitational constant.
    pub g: f64,
    /// Separations below this are skipped.
    pub min_distance: f64,
}

/// Acceleration of a body at `p1` toward a mass `mass2` at `p2`:
/// `a = -G * mass2 * (p1 - p2) / R^3`.
///
/// Returns `None` when the separation is below `min_distance` (or not a number).
pub fn gravitational_acceleration(
    p1: DVec2,
    p2: DVec2,
    mass2: f64,
    g: f64,
    min_distance: f64,
) -> Option<DVec2> {
    let offset = p1 - p2;
    let r = offset.length();
    if !(r >= min_distance) {
        return None;
    }
    Some(offset * (-g * mass2 / (r * r * r)))
}

/// Pull `influenced` toward `influencer` for one step and move its circle.
/// Only `influenced` is mutated.
pub fn apply_gravity(
    world: &mut World,
    influenced: Entity,
    influencer: Entity,
    params: GravityParams,
    mapper: &CoordinateMapper,
    canvas: &mut dyn Canvas,
) -> GravityOutcome {
    let (source_pos, source_mass) = {
        let Ok(pos) = world.get::<&Position>(influencer) else {
            return GravityOutcome::Missing;
        };
        let Ok(props) = world.get::<&PhysicalProperties>(influencer) else {
            return GravityOutcome::Missing;
        };
        (pos.as_dvec2(), props.mass)
    };

    let Ok((pos, vel, visual)) =
        world.query_one_mut::<(&mut Position, &mut Velocity, Option<&Visual>)>(influenced)
    else {
        return GravityOutcome::Missing;
    };

    let Some(acceleration) = gravitational_acceleration(
        pos.as_dvec2(),
        source_pos,
        source_mass,
        params.g,
        params.min_distance,
    ) else {
        return GravityOutcome::Singular;
    };

    // Velocity first, then position from the new velocity.
    let old = pos.as_dvec2();
    let new_vel = vel.as_dvec2() + acceleration * params.dt;
    let new_pos = old + new_vel * params.dt;
    *vel = Velocity::from(new_vel);
    *pos = Position::from(new_pos);

    if let Some(visual) = visual {
        canvas.move_circle(visual.handle, mapper.delta_to_display(new_pos - old));
    }

    GravityOutcome::Applied
}

/// Apply every gravity pair in roster order. Bodies named by no pair as the
/// influenced side do not move.
pub fn run(
    world: &mut World,
    roster: &Roster,
    params: GravityParams,
    mapper: &CoordinateMapper,
    canvas: &mut dyn Canvas,
    events: &mut Vec<SimEvent>,
) {
    for pair in roster.gravity_pairs() {
        let outcome = apply_gravity(world, pair.first, pair.second, params, mapper, canvas);
        if outcome == GravityOutcome::Singular {
            let influenced = roster.name_of(pair.first).unwrap_or_default().to_string();
            let influencer = roster.name_of(pair.second).unwrap_or_default().to_string();
            warn!(%influenced, %influencer, "bodies coincide, skipping gravity pair");
            events.push(SimEvent::SingularitySkipped {
                influenced,
                influencer,
            });
        }
    }
}

