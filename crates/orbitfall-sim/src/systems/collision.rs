//! Collision detection between roster bodies.

use hecs::World;

use orbitfall_core::components::PhysicalProperties;
use orbitfall_core::types::Position;

use crate::roster::Pair;

/// True iff the circles overlap: center distance strictly below the sum of radii.
pub fn collides(p1: Position, r1: f64, p2: Position, r2: f64) -> bool {
    p1.range_to(&p2) < r1 + r2
}

/// Check the given pairs and return those in contact, in pair order.
/// Pairs whose bodies no longer exist are skipped.
pub fn run(world: &World, pairs: &[Pair]) -> Vec<Pair> {
    pairs
        .iter()
        .filter(|pair| {
            let (Some(a), Some(b)) = (extent(world, pair.first), extent(world, pair.second))
            else {
                return false;
            };
            collides(a.0, a.1, b.0, b.1)
        })
        .copied()
        .collect()
}

fn extent(world: &World, entity: hecs::Entity) -> Option<(Position, f64)> {
    let pos = *world.get::<&Position>(entity).ok()?;
    let props = world.get::<&PhysicalProperties>(entity).ok()?;
    Some((pos, props.radius))
}
