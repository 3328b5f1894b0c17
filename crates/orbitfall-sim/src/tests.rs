//! Tests for the simulation engine, gravity, collisions, explosions and debris.

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use orbitfall_core::canvas::RecordingCanvas;
use orbitfall_core::commands::SimCommand;
use orbitfall_core::components::*;
use orbitfall_core::config::{BodySpec, DebrisSettings, SimConfig};
use orbitfall_core::constants::*;
use orbitfall_core::coords::CoordinateMapper;
use orbitfall_core::enums::{GravityOutcome, SimPhase};
use orbitfall_core::events::SimEvent;
use orbitfall_core::types::{Position, Velocity};

use crate::engine::SimulationEngine;
use crate::systems::gravity::{self, GravityParams};
use crate::systems::{collision, debris, explosion};
use crate::world_setup;

// ---- Helpers ----

fn mapper() -> CoordinateMapper {
    SimConfig::default().mapper().unwrap()
}

fn params(dt: f64) -> GravityParams {
    GravityParams {
        dt,
        g: G,
        min_distance: MIN_GRAVITY_DISTANCE,
    }
}

fn spawn(
    world: &mut World,
    canvas: &mut RecordingCanvas,
    name: &str,
    position: Position,
    velocity: Velocity,
    radius: f64,
    mass: f64,
) -> Entity {
    let spec = BodySpec {
        name: name.into(),
        x: position.x,
        y: position.y,
        vx: velocity.x,
        vy: velocity.y,
        radius,
        mass,
        tint: Tint::GRAY,
    };
    world_setup::spawn_body(world, &spec, &mapper(), canvas)
}

fn position_of(world: &World, entity: Entity) -> Position {
    *world.get::<&Position>(entity).unwrap()
}

fn velocity_of(world: &World, entity: Entity) -> Velocity {
    *world.get::<&Velocity>(entity).unwrap()
}

fn engine(config: SimConfig) -> (SimulationEngine, RecordingCanvas) {
    let mut canvas = RecordingCanvas::new();
    let engine = SimulationEngine::new(config, &mut canvas).unwrap();
    (engine, canvas)
}

/// Reference roster with everything at rest and the asteroid parked
/// beside the moon, overlapping it. No gravity, so nothing drifts apart.
fn touching_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.gravity_pairs.clear();
    config
        .set_initial_state(MOON, Position::new(MOON_ORBIT_RADIUS, 0.0), Velocity::default())
        .unwrap();
    config
        .set_initial_state(
            ASTEROID,
            Position::new(MOON_ORBIT_RADIUS + 5e6, 0.0),
            Velocity::default(),
        )
        .unwrap();
    config
}

fn is_finite(pos: Position) -> bool {
    pos.x.is_finite() && pos.y.is_finite()
}

// ---- Gravity ----

#[test]
fn test_acceleration_points_toward_influencer() {
    let source = DVec2::new(2.0e8, -1.0e8);
    let samples = [
        DVec2::new(0.0, 0.0),
        DVec2::new(5.0e8, 5.0e8),
        DVec2::new(-3.0e8, 1.0e7),
        DVec2::new(2.0e8, -1.0e8 + 1.0e6),
    ];

    for p in samples {
        let a = gravity::gravitational_acceleration(p, source, EARTH_MASS, G, MIN_GRAVITY_DISTANCE)
            .unwrap();
        let toward = (source - p).normalize();
        assert!(a.dot(toward) > 0.0, "Acceleration at {p} points away");
        assert!(
            a.normalize().perp_dot(toward).abs() < 1e-9,
            "Acceleration at {p} is not along the line of centers"
        );

        let r = source.distance(p);
        let expected = G * EARTH_MASS / (r * r);
        assert!((a.length() - expected).abs() / expected < 1e-12);
    }
}

#[test]
fn test_acceleration_guard() {
    let p = DVec2::new(1.0, 2.0);
    assert_eq!(
        gravity::gravitational_acceleration(p, p, EARTH_MASS, G, MIN_GRAVITY_DISTANCE),
        None
    );
    assert_eq!(
        gravity::gravitational_acceleration(p, p + DVec2::new(0.5, 0.0), EARTH_MASS, G, 1.0),
        None
    );
    assert!(gravity::gravitational_acceleration(p, p + DVec2::X, EARTH_MASS, G, 1.0).is_some());
}

#[test]
fn test_apply_gravity_semi_implicit_update() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let start = Position::new(1.0e8, 0.0);
    let satellite = spawn(&mut world, &mut canvas, "sat", start, Velocity::new(0.0, 1500.0), 1e6, 1.0);
    let primary = spawn(&mut world, &mut canvas, "primary", Position::default(), Velocity::default(), 1e7, EARTH_MASS);

    let dt = 3600.0;
    let outcome = gravity::apply_gravity(&mut world, satellite, primary, params(dt), &mapper, &mut canvas);
    assert_eq!(outcome, GravityOutcome::Applied);

    let a = -G * EARTH_MASS / (1.0e8 * 1.0e8);
    let expected_vel = DVec2::new(a * dt, 1500.0);
    let expected_pos = start.as_dvec2() + expected_vel * dt;

    let vel = velocity_of(&world, satellite).as_dvec2();
    let pos = position_of(&world, satellite).as_dvec2();
    assert!(vel.distance(expected_vel) < 1e-9, "velocity {vel} != {expected_vel}");
    assert!(pos.distance(expected_pos) < 1e-3, "position {pos} != {expected_pos}");

    // Influencer untouched
    assert_eq!(position_of(&world, primary), Position::default());
    assert_eq!(velocity_of(&world, primary), Velocity::default());

    // Circle followed the body
    let handle = world.get::<&Visual>(satellite).unwrap().handle;
    let center = canvas.get(handle).unwrap().center;
    let expected_center = mapper.to_display(Position::from(expected_pos));
    assert!(center.distance(expected_center) < 1e-6);
}

#[test]
fn test_apply_gravity_slows_recession() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let body = spawn(&mut world, &mut canvas, "body", Position::new(3.0e8, 4.0e8), Velocity::new(600.0, 800.0), 1e6, 0.0);
    let primary = spawn(&mut world, &mut canvas, "primary", Position::default(), Velocity::default(), 1e7, EARTH_MASS);

    let radial = |world: &World| {
        let p = position_of(world, body).as_dvec2();
        velocity_of(world, body).as_dvec2().dot(p.normalize())
    };

    let before = radial(&world);
    gravity::apply_gravity(&mut world, body, primary, params(DT), &mapper, &mut canvas);
    let after = radial(&world);
    assert!(after < before, "Outward speed should drop: {before} -> {after}");
}

#[test]
fn test_apply_gravity_coincident_bodies_is_singular() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let here = Position::new(1.0e8, 1.0e8);
    let a = spawn(&mut world, &mut canvas, "a", here, Velocity::new(10.0, 0.0), 1e6, 1e20);
    let b = spawn(&mut world, &mut canvas, "b", here, Velocity::default(), 1e6, 1e20);

    let outcome = gravity::apply_gravity(&mut world, a, b, params(DT), &mapper, &mut canvas);
    assert_eq!(outcome, GravityOutcome::Singular);
    assert_eq!(position_of(&world, a), here);
    assert_eq!(velocity_of(&world, a), Velocity::new(10.0, 0.0));
}

#[test]
fn test_apply_gravity_missing_entity() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let a = spawn(&mut world, &mut canvas, "a", Position::new(1e8, 0.0), Velocity::default(), 1e6, 1.0);
    let b = spawn(&mut world, &mut canvas, "b", Position::default(), Velocity::default(), 1e6, 1e20);
    world.despawn(b).unwrap();

    let outcome = gravity::apply_gravity(&mut world, a, b, params(DT), &mapper, &mut canvas);
    assert_eq!(outcome, GravityOutcome::Missing);
}

// ---- Collision ----

#[test]
fn test_collides_boundary_is_exclusive() {
    let origin = Position::new(0.0, 0.0);
    assert!(collision::collides(origin, 5.0, Position::new(9.0, 0.0), 5.0));
    assert!(!collision::collides(origin, 5.0, Position::new(10.0, 0.0), 5.0));
    assert!(!collision::collides(origin, 5.0, Position::new(0.0, 10.5), 5.0));
    assert!(!collision::collides(origin, 5.0, Position::new(60.0, 80.0), 5.0));
}

#[test]
fn test_collides_is_symmetric() {
    let points = [
        Position::new(0.0, 0.0),
        Position::new(3.0, 4.0),
        Position::new(-7.5, 2.0),
        Position::new(1e8, -1e8),
    ];
    let radii = [0.5, 2.5, 5.0, 1e8];

    for &p1 in &points {
        for &p2 in &points {
            for &r1 in &radii {
                for &r2 in &radii {
                    assert_eq!(
                        collision::collides(p1, r1, p2, r2),
                        collision::collides(p2, r2, p1, r1)
                    );
                }
            }
        }
    }
}

// ---- Explosion ----

#[test]
fn test_explode_spawns_debris() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let here = Position::new(2.0e8, 1.0e8);
    let body = spawn(&mut world, &mut canvas, "body", here, Velocity::new(5.0, 5.0), 1.0e7, 1e22);

    let settings = DebrisSettings::default();
    let report =
        explosion::explode(&mut world, body, &settings, &mut rng, &mapper, &mut canvas).unwrap();
    assert_eq!(report.debris_spawned, 50);
    assert_eq!(report.position, here);
    assert_eq!(debris::count(&world), 50);

    let mut q = world.query::<(&Position, &Velocity, &PhysicalProperties, &Tint, &Debris)>();
    for (_, (pos, vel, props, tint, debris)) in q.iter() {
        assert_eq!(*pos, here);
        assert_eq!(props.mass, 0.0);
        assert_eq!(props.radius, 1.0e6);
        assert_eq!(*tint, Tint::GRAY);
        assert_eq!(debris.remaining_ticks, DEBRIS_LIFETIME_TICKS);
        let speed = vel.speed();
        assert!(
            (DEBRIS_MIN_SPEED - 1e-6..=DEBRIS_MAX_SPEED + 1e-6).contains(&speed),
            "Debris speed {speed} out of range"
        );
    }
    drop(q);

    // Body's circle is gone, the body itself is left to the caller
    assert!(world.get::<&Visual>(body).is_err());
    assert!(world.contains(body));
    assert_eq!(canvas.destroyed_count(), 1);
    assert_eq!(canvas.live_count(), 50);

    // Exploding again does nothing
    assert!(explosion::explode(&mut world, body, &settings, &mut rng, &mapper, &mut canvas).is_none());
    assert_eq!(debris::count(&world), 50);
    assert_eq!(canvas.stale_operations(), 0);
}

#[test]
fn test_explode_directions_spread() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let body = spawn(&mut world, &mut canvas, "body", Position::default(), Velocity::default(), 1e7, 0.0);

    let settings = DebrisSettings {
        count: 400,
        ..DebrisSettings::default()
    };
    explosion::explode(&mut world, body, &settings, &mut rng, &mapper, &mut canvas).unwrap();

    let mut quadrants = [0u32; 4];
    let mut q = world.query::<(&Velocity, &Debris)>();
    for (_, (vel, _)) in q.iter() {
        let index = match (vel.x >= 0.0, vel.y >= 0.0) {
            (true, true) => 0,
            (false, true) => 1,
            (false, false) => 2,
            (true, false) => 3,
        };
        quadrants[index] += 1;
    }
    for count in quadrants {
        assert!(count > 50, "Debris directions are lopsided: {quadrants:?}");
    }
}

// ---- Debris ----

#[test]
fn test_debris_lifetime_is_exact() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let mut buffer = Vec::new();
    let particle = world_setup::spawn_debris(
        &mut world,
        Position::default(),
        Velocity::new(1.0, 0.0),
        1e5,
        Tint::WHITE,
        100,
        &mapper,
        &mut canvas,
    );

    for tick in 1..100 {
        let expired = debris::run(&mut world, DT, &mapper, &mut canvas, &mut buffer);
        assert_eq!(expired, 0, "Expired early at advance {tick}");
        assert!(world.contains(particle));
    }
    assert_eq!(world.get::<&Debris>(particle).unwrap().remaining_ticks, 1);

    let expired = debris::run(&mut world, DT, &mapper, &mut canvas, &mut buffer);
    assert_eq!(expired, 1);
    assert!(!world.contains(particle));
    assert_eq!(canvas.live_count(), 0);
    assert_eq!(canvas.stale_operations(), 0);

    let expired = debris::run(&mut world, DT, &mapper, &mut canvas, &mut buffer);
    assert_eq!(expired, 0);
}

#[test]
fn test_debris_moves_ballistically() {
    let mut world = World::new();
    let mut canvas = RecordingCanvas::new();
    let mapper = mapper();
    let mut buffer = Vec::new();
    let start = Position::new(-1e8, 2e8);
    let velocity = Velocity::new(2000.0, -4000.0);
    let particle =
        world_setup::spawn_debris(&mut world, start, velocity, 1e5, Tint::WHITE, 10, &mapper, &mut canvas);
    // A massive neighbor must not bend debris paths
    spawn(&mut world, &mut canvas, "heavy", Position::new(-1e8, 1.9e8), Velocity::default(), 1e6, EARTH_MASS);

    debris::run(&mut world, DT, &mapper, &mut canvas, &mut buffer);
    debris::run(&mut world, DT, &mapper, &mut canvas, &mut buffer);

    let expected = start.as_dvec2() + velocity.as_dvec2() * (2.0 * DT);
    assert!(position_of(&world, particle).as_dvec2().distance(expected) < 1e-3);
    assert_eq!(velocity_of(&world, particle), velocity);

    let handle = world.get::<&Visual>(particle).unwrap().handle;
    let center = canvas.get(handle).unwrap().center;
    assert!(center.distance(mapper.to_display(Position::from(expected))) < 1e-6);
}

// ---- Engine: reference scenario ----

#[test]
fn test_moon_follows_curved_orbit() {
    let (mut engine, mut canvas) = engine(SimConfig::default());
    let moon = engine.roster().entity(MOON).unwrap();

    let mut path = vec![position_of(engine.world(), moon).as_dvec2()];
    for _ in 0..3 {
        engine.tick(&mut canvas);
        path.push(position_of(engine.world(), moon).as_dvec2());
    }

    let first_step = path[1] - path[0];
    assert!(first_step.length() > 1e6, "Moon should move in one tick");

    // Successive displacements turn: the path is not a straight line.
    for window in path.windows(3) {
        let d1 = window[1] - window[0];
        let d2 = window[2] - window[1];
        let turn = d1.normalize().perp_dot(d2.normalize());
        assert!(turn > 1e-3, "Moon path should curve counter-clockwise, turn = {turn}");
    }

    // Stays near the orbital radius
    for p in &path {
        let drift = (p.length() - MOON_ORBIT_RADIUS).abs() / MOON_ORBIT_RADIUS;
        assert!(drift < 0.02, "Moon drifted {drift:.4} off its orbit");
    }
}

#[test]
fn test_primary_stays_fixed() {
    let (mut engine, mut canvas) = engine(SimConfig::default());
    for _ in 0..20 {
        engine.tick(&mut canvas);
    }
    let snap = engine.snapshot();
    assert_eq!(snap.body(EARTH).unwrap().position, Position::default());
}

#[test]
fn test_unpulled_body_ignores_its_velocity() {
    let mut config = SimConfig::default();
    config.collision_pairs.clear();
    config
        .set_initial_state(EARTH, Position::default(), Velocity::new(1000.0, 0.0))
        .unwrap();

    let (mut engine, mut canvas) = engine(config);
    let snap = engine.tick(&mut canvas);
    let earth = snap.body(EARTH).unwrap();
    assert_eq!(earth.position, Position::default());
    assert_eq!(earth.velocity, Velocity::new(1000.0, 0.0));
}

#[test]
fn test_reference_scenario_runs_cleanly() {
    let (mut engine, mut canvas) = engine(SimConfig::default());

    for _ in 0..500 {
        let snap = engine.tick(&mut canvas);
        for body in &snap.bodies {
            assert!(is_finite(body.position), "{} went non-finite", body.name);
        }
        assert_eq!(
            canvas.live_count(),
            snap.bodies.len() + snap.debris.active as usize,
            "Every live entity owns exactly one circle"
        );
    }
    assert_eq!(canvas.stale_operations(), 0);
    assert_eq!(engine.time().tick, 500);
    assert_eq!(engine.time().elapsed_secs, 500.0 * DT);
}

// ---- Engine: collisions ----

#[test]
fn test_collision_explodes_both_and_retires_them() {
    let (mut engine, mut canvas) = engine(touching_config());
    assert_eq!(canvas.live_count(), 3);

    let snap = engine.tick(&mut canvas);

    assert!(snap.events.contains(&SimEvent::Collision {
        first: MOON.into(),
        second: ASTEROID.into(),
    }));
    let exploded: Vec<&str> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            SimEvent::Explosion { body, debris_spawned, .. } => {
                assert_eq!(*debris_spawned, 50);
                Some(body.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(exploded, vec![MOON, ASTEROID]);

    assert_eq!(snap.bodies.len(), 1);
    assert_eq!(snap.bodies[0].name, EARTH);
    assert_eq!(snap.debris.active, 100);
    assert_eq!(snap.debris.spawned_total, 100);
    assert_eq!(snap.particles.len(), 100);

    assert!(engine.roster().collision_pairs().is_empty());
    assert_eq!(engine.roster().entity(MOON), None);
    assert_eq!(canvas.live_count(), 101);
    assert_eq!(canvas.destroyed_count(), 2);
    assert_eq!(canvas.stale_operations(), 0);

    // Nothing left to collide
    let snap = engine.tick(&mut canvas);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Collision { .. })));
}

#[test]
fn test_debris_expires_after_lifetime_in_engine() {
    let (mut engine, mut canvas) = engine(touching_config());
    engine.tick(&mut canvas);

    for _ in 0..99 {
        let snap = engine.tick(&mut canvas);
        assert_eq!(snap.debris.active, 100);
    }

    let snap = engine.tick(&mut canvas);
    assert_eq!(snap.debris.active, 0);
    assert_eq!(snap.debris.expired_total, 100);
    assert!(snap.events.contains(&SimEvent::DebrisExpired { count: 100 }));
    assert_eq!(canvas.live_count(), 1);
    assert_eq!(canvas.stale_operations(), 0);
}

#[test]
fn test_debris_spreads_from_explosion_site() {
    let (mut engine, mut canvas) = engine(touching_config());
    let snap = engine.tick(&mut canvas);
    let site = match &snap.events[..] {
        [_, SimEvent::Explosion { position, .. }, ..] => *position,
        other => panic!("unexpected events {other:?}"),
    };

    let snap = engine.tick(&mut canvas);
    for particle in &snap.particles {
        let distance = particle.position.range_to(&site);
        // The asteroid sat 5e6 m from the moon; both bursts started from their own body
        assert!(
            distance >= DEBRIS_MIN_SPEED * DT - 5e6 - 1.0
                && distance <= DEBRIS_MAX_SPEED * DT + 5e6 + 1.0,
            "particle {distance} m from the blast"
        );
        assert_eq!(particle.remaining_ticks, DEBRIS_LIFETIME_TICKS - 1);
    }
}

#[test]
fn test_extended_collision_retires_primary() {
    let mut config = SimConfig {
        dt_secs: 1.0,
        ..SimConfig::default()
    }
    .with_extended_collisions();
    config
        .set_initial_state(ASTEROID, Position::new(0.0, 2.0e7), Velocity::default())
        .unwrap();

    let (mut engine, mut canvas) = engine(config);
    let snap = engine.tick(&mut canvas);

    assert!(snap.events.contains(&SimEvent::Collision {
        first: EARTH.into(),
        second: ASTEROID.into(),
    }));
    assert_eq!(snap.bodies.len(), 1);
    assert_eq!(snap.bodies[0].name, MOON);
    assert!(engine.roster().gravity_pairs().is_empty());

    // With the primary gone nothing pulls on the moon, so it stays put
    let before = snap.body(MOON).unwrap().position;
    let snap = engine.tick(&mut canvas);
    assert_eq!(snap.body(MOON).unwrap().position, before);
    assert_eq!(canvas.stale_operations(), 0);
}

#[test]
fn test_body_explodes_once_per_tick() {
    let mut config = SimConfig {
        dt_secs: 1.0,
        ..SimConfig::default()
    }
    .with_extended_collisions();
    config
        .set_initial_state(MOON, Position::new(1.0e7, 0.0), Velocity::default())
        .unwrap();
    config
        .set_initial_state(ASTEROID, Position::new(1.0e7, 5.0e6), Velocity::default())
        .unwrap();

    let (mut engine, mut canvas) = engine(config);
    let snap = engine.tick(&mut canvas);

    let collisions = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Collision { .. }))
        .count();
    let explosions = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Explosion { .. }))
        .count();
    assert_eq!(collisions, 3);
    assert_eq!(explosions, 3);
    assert_eq!(snap.debris.active, 150);
    assert!(snap.bodies.is_empty());
    assert!(engine.roster().is_empty());
    assert_eq!(canvas.live_count(), 150);
    assert_eq!(canvas.destroyed_count(), 3);
    assert_eq!(canvas.stale_operations(), 0);
}

// ---- Engine: singularity ----

#[test]
fn test_singularity_guard_keeps_loop_alive() {
    let mut config = SimConfig::default();
    config.collision_pairs.clear();
    config
        .set_initial_state(ASTEROID, Position::default(), Velocity::new(500.0, -300.0))
        .unwrap();

    let (mut engine, mut canvas) = engine(config);
    let snap = engine.tick(&mut canvas);
    assert!(snap.events.contains(&SimEvent::SingularitySkipped {
        influenced: ASTEROID.into(),
        influencer: EARTH.into(),
    }));

    for _ in 0..20 {
        let snap = engine.tick(&mut canvas);
        for body in &snap.bodies {
            assert!(is_finite(body.position), "{} went non-finite", body.name);
        }
    }
    assert_eq!(engine.time().tick, 21);
}

// ---- Engine: determinism ----

#[test]
fn test_determinism_same_seed() {
    let (mut engine_a, mut canvas_a) = engine(touching_config());
    let (mut engine_b, mut canvas_b) = engine(touching_config());

    for _ in 0..30 {
        let snap_a = engine_a.tick(&mut canvas_a);
        let snap_b = engine_b.tick(&mut canvas_b);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let (mut engine_a, mut canvas_a) = engine(SimConfig {
        seed: 111,
        ..touching_config()
    });
    let (mut engine_b, mut canvas_b) = engine(SimConfig {
        seed: 222,
        ..touching_config()
    });

    engine_a.tick(&mut canvas_a);
    engine_b.tick(&mut canvas_b);
    let snap_a = engine_a.tick(&mut canvas_a);
    let snap_b = engine_b.tick(&mut canvas_b);
    assert_ne!(snap_a.particles, snap_b.particles);
}

// ---- Engine: commands ----

#[test]
fn test_pause_resume_via_commands() {
    let (mut engine, mut canvas) = engine(SimConfig::default());
    engine.tick(&mut canvas);

    engine.queue_command(SimCommand::Pause);
    let snap = engine.tick(&mut canvas);
    assert_eq!(snap.phase, SimPhase::Paused);
    assert_eq!(engine.phase(), SimPhase::Paused);
    let paused_tick = snap.time.tick;
    let paused_moon = snap.body(MOON).unwrap().position;

    let snap = engine.tick(&mut canvas);
    assert_eq!(snap.time.tick, paused_tick);
    assert_eq!(snap.body(MOON).unwrap().position, paused_moon);

    engine.queue_command(SimCommand::Resume);
    let snap = engine.tick(&mut canvas);
    assert_eq!(snap.phase, SimPhase::Idle);
    assert_eq!(snap.time.tick, paused_tick + 1);

    engine.queue_commands([SimCommand::TogglePause, SimCommand::TogglePause]);
    let snap = engine.tick(&mut canvas);
    assert_eq!(snap.phase, SimPhase::Idle);
    assert_eq!(snap.time.tick, paused_tick + 2);
}

#[test]
fn test_restart_rebuilds_without_leaks() {
    let (mut engine, mut canvas) = engine(touching_config());
    engine.tick(&mut canvas);
    let first_burst = engine.tick(&mut canvas).particles;
    for _ in 0..3 {
        engine.tick(&mut canvas);
    }
    assert_eq!(engine.snapshot().debris.active, 100);

    // Restart while paused so the fresh roster can be inspected untouched
    engine.queue_commands([SimCommand::Pause, SimCommand::Restart]);
    let snap = engine.tick(&mut canvas);

    assert!(snap.events.contains(&SimEvent::Restarted));
    assert_eq!(snap.phase, SimPhase::Paused);
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.bodies.len(), 3);
    assert_eq!(snap.debris.active, 0);
    assert_eq!(snap.debris.spawned_total, 0);
    assert_eq!(engine.roster().collision_pairs().len(), 1);
    assert_eq!(canvas.live_count(), 3);
    assert_eq!(canvas.stale_operations(), 0);

    // Same seed, same burst as the first run
    engine.queue_command(SimCommand::Resume);
    engine.tick(&mut canvas);
    let snap = engine.tick(&mut canvas);
    assert_eq!(snap.particles, first_burst);
    assert_eq!(canvas.live_count(), 101);
    assert_eq!(canvas.stale_operations(), 0);
}

#[test]
fn test_time_scale_changes_interval() {
    let (mut engine, mut canvas) = engine(SimConfig::default());
    assert_eq!(engine.tick_interval().as_millis(), 40);

    engine.queue_command(SimCommand::SetTimeScale { scale: 2.0 });
    engine.tick(&mut canvas);
    assert_eq!(engine.tick_interval().as_millis(), 20);

    engine.queue_command(SimCommand::SetTimeScale { scale: 100.0 });
    engine.tick(&mut canvas);
    assert_eq!(engine.time_scale(), 8.0);

    engine.queue_command(SimCommand::SetTimeScale { scale: f64::NAN });
    engine.tick(&mut canvas);
    assert_eq!(engine.time_scale(), 8.0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut canvas = RecordingCanvas::new();
    let mut config = SimConfig::default();
    config.collision_pairs.push((MOON.into(), "phobos".into()));
    assert!(SimulationEngine::new(config, &mut canvas).is_err());
    assert_eq!(canvas.created_count(), 0);
}

#[test]
fn test_snapshot_serialization_round_trip() {
    let (mut engine, mut canvas) = engine(touching_config());
    let snap = engine.tick(&mut canvas);
    let json = serde_json::to_string(&snap).unwrap();
    let back: orbitfall_core::state::SimSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back.time.tick, snap.time.tick);
    assert_eq!(back.phase, snap.phase);
    assert_eq!(back.debris, snap.debris);
    assert_eq!(back.events.len(), snap.events.len());
    assert_eq!(back.events[0], snap.events[0]);
    let names: Vec<&str> = back.bodies.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec![EARTH]);
    assert_eq!(back.particles.len(), 100);
}
