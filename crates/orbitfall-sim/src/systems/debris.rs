//! Debris lifecycle: ballistic motion, aging and expiry.
//!
//! Debris ignores gravity. Each tick it moves by velocity * dt, loses
//! one tick of life, and is removed with its circle once life reaches 0.

use hecs::{Entity, World};

use orbitfall_core::canvas::Canvas;
use orbitfall_core::components::{Debris, Visual};
use orbitfall_core::coords::CoordinateMapper;
use orbitfall_core::types::{Position, Velocity};

use crate::systems::cleanup;

/// Advance and age all debris. Returns how many particles expired.
pub fn run(
    world: &mut World,
    dt: f64,
    mapper: &CoordinateMapper,
    canvas: &mut dyn Canvas,
    despawn_buffer: &mut Vec<Entity>,
) -> u32 {
    despawn_buffer.clear();

    for (entity, (pos, vel, debris, visual)) in
        world.query_mut::<(&mut Position, &Velocity, &mut Debris, Option<&Visual>)>()
    {
        let delta = vel.as_dvec2() * dt;
        *pos = Position::from(pos.as_dvec2() + delta);
        if let Some(visual) = visual {
            canvas.move_circle(visual.handle, mapper.delta_to_display(delta));
        }

        debris.remaining_ticks -= 1;
        if debris.remaining_ticks <= 0 {
            despawn_buffer.push(entity);
        }
    }

    let expired = despawn_buffer.len() as u32;
    for entity in despawn_buffer.drain(..) {
        cleanup::despawn_with_visual(world, entity, canvas);
    }
    expired
}

/// Number of live debris particles.
pub fn count(world: &World) -> u32 {
    let mut q = world.query::<&Debris>();
    q.iter().count() as u32
}
