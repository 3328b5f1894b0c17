//! Explosion handler: turns a body into a burst of debris.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use orbitfall_core::canvas::Canvas;
use orbitfall_core::components::{PhysicalProperties, Tint, Visual};
use orbitfall_core::config::DebrisSettings;
use orbitfall_core::coords::CoordinateMapper;
use orbitfall_core::types::{Position, Velocity};

use crate::systems::cleanup;
use crate::world_setup;

/// What an explosion produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionReport {
    pub position: Position,
    pub debris_spawned: u32,
}

/// Spawn `settings.count` debris at the body's position, each flying off
/// at a uniformly random angle and speed, then destroy the body's circle.
///
/// The body stays in the world; removing it from the roster is up to the
/// caller. Returns `None` if the entity is gone or has already exploded.
pub fn explode(
    world: &mut World,
    entity: Entity,
    settings: &DebrisSettings,
    rng: &mut ChaCha8Rng,
    mapper: &CoordinateMapper,
    canvas: &mut dyn Canvas,
) -> Option<ExplosionReport> {
    let (position, radius, tint) = {
        let mut query = world
            .query_one::<(&Position, &PhysicalProperties, &Tint, &Visual)>(entity)
            .ok()?;
        let (pos, props, tint, _visual) = query.get()?;
        (*pos, props.radius, *tint)
    };

    let debris_radius = radius / settings.radius_divisor;
    for _ in 0..settings.count {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(settings.min_speed..=settings.max_speed);
        world_setup::spawn_debris(
            world,
            position,
            Velocity::from_polar(speed, angle),
            debris_radius,
            tint,
            settings.lifetime_ticks,
            mapper,
            canvas,
        );
    }

    cleanup::release_visual(world, entity, canvas);
    debug!(?position, count = settings.count, "body exploded");

    Some(ExplosionReport {
        position,
        debris_spawned: settings.count,
    })
}
