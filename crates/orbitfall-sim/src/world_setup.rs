//! Entity spawn factories for setting up the simulation world.
//!
//! Every spawned entity gets its circle on the canvas at the same time,
//! and owns that circle through its `Visual` component.

use hecs::{Entity, World};

use orbitfall_core::canvas::Canvas;
use orbitfall_core::components::*;
use orbitfall_core::config::{BodySpec, SimConfig};
use orbitfall_core::coords::CoordinateMapper;
use orbitfall_core::types::{Position, Velocity};

use crate::roster::Roster;

/// Spawn every configured body and resolve the configured pairs.
pub fn spawn_roster(
    world: &mut World,
    config: &SimConfig,
    mapper: &CoordinateMapper,
    canvas: &mut dyn Canvas,
) -> Roster {
    let bodies = config
        .bodies
        .iter()
        .map(|spec| (spec.name.clone(), spawn_body(world, spec, mapper, canvas)))
        .collect();
    Roster::new(bodies, config)
}

/// Spawn a single gravitating body.
pub fn spawn_body(
    world: &mut World,
    spec: &BodySpec,
    mapper: &CoordinateMapper,
    canvas: &mut dyn Canvas,
) -> Entity {
    let position = spec.position();
    let visual = draw(canvas, mapper, position, spec.radius, spec.tint);

    world.spawn((
        Body {
            name: spec.name.clone(),
        },
        position,
        spec.velocity(),
        PhysicalProperties {
            radius: spec.radius,
            mass: spec.mass,
        },
        spec.tint,
        visual,
    ))
}

/// Spawn one massless debris particle.
pub fn spawn_debris(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    radius: f64,
    tint: Tint,
    lifetime_ticks: i32,
    mapper: &CoordinateMapper,
    canvas: &mut dyn Canvas,
) -> Entity {
    let visual = draw(canvas, mapper, position, radius, tint);

    world.spawn((
        Debris {
            remaining_ticks: lifetime_ticks,
        },
        position,
        velocity,
        PhysicalProperties { radius, mass: 0.0 },
        tint,
        visual,
    ))
}

fn draw(
    canvas: &mut dyn Canvas,
    mapper: &CoordinateMapper,
    position: Position,
    radius: f64,
    tint: Tint,
) -> Visual {
    let handle = canvas.create_circle(
        mapper.to_display(position),
        mapper.radii_to_display(radius),
        tint,
    );
    Visual { handle }
}
