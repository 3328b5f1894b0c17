//! Cleanup helpers: the single place visuals are released.
//!
//! `Visual` is removed from the entity before its circle is destroyed,
//! so a second release finds nothing and cannot destroy the handle twice.

use hecs::{Entity, World};

use orbitfall_core::canvas::Canvas;
use orbitfall_core::components::Visual;

/// Destroy an entity's circle, leaving the entity itself in place.
/// Returns false if it had no visual left.
pub fn release_visual(world: &mut World, entity: Entity, canvas: &mut dyn Canvas) -> bool {
    match world.remove_one::<Visual>(entity) {
        Ok(visual) => {
            canvas.destroy_circle(visual.handle);
            true
        }
        Err(_) => false,
    }
}

/// Destroy an entity's circle and despawn it.
pub fn despawn_with_visual(world: &mut World, entity: Entity, canvas: &mut dyn Canvas) {
    release_visual(world, entity, canvas);
    let _ = world.despawn(entity);
}

/// Remove every entity in the world along with its visual.
/// Uses a pre-allocated buffer to avoid allocation.
pub fn clear(world: &mut World, canvas: &mut dyn Canvas, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.iter().map(|entity_ref| entity_ref.entity()));

    for entity in despawn_buffer.drain(..) {
        despawn_with_visual(world, entity, canvas);
    }
}
