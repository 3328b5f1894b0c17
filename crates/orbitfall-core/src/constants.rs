//! Simulation constants and reference scenario parameters.
//!
//! These are the defaults behind [`crate::config::SimConfig`]; a loaded
//! configuration may override any of them.

// --- Timing ---

/// Wall-clock interval between ticks (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 40;

/// Simulated seconds per tick (6 hours).
pub const DT: f64 = 6.0 * 60.0 * 60.0;

/// Bounds for the wall-clock speed multiplier.
pub const MIN_TIME_SCALE: f64 = 0.25;
pub const MAX_TIME_SCALE: f64 = 8.0;

// --- Frame ---

/// World bounds in meters: left, right, bottom, top.
pub const WORLD_LEFT: f64 = -1e9;
pub const WORLD_RIGHT: f64 = 1e9;
pub const WORLD_BOTTOM: f64 = -1e9;
pub const WORLD_TOP: f64 = 1e9;

/// Display size in pixels.
pub const DISPLAY_WIDTH: u32 = 700;
pub const DISPLAY_HEIGHT: u32 = 700;

// --- Physics ---

/// Gravitational constant (SI).
pub const G: f64 = 6.674e-11;

/// Separations below this are treated as singular and the pair is skipped (meters).
pub const MIN_GRAVITY_DISTANCE: f64 = 1.0;

/// Visual exaggeration applied to body radii.
pub const RADIUS_EXAGGERATION: f64 = 5.0;

pub const EARTH_MASS: f64 = 5.9726e24;
pub const EARTH_RADIUS: f64 = 6.371e6 * RADIUS_EXAGGERATION;

pub const MOON_MASS: f64 = 7.342e22;
pub const MOON_RADIUS: f64 = 1.737e6 * RADIUS_EXAGGERATION;
/// Radius of the moon's orbit around the earth.
pub const MOON_ORBIT_RADIUS: f64 = 3.84467e8;
/// Tangential orbital speed of the moon.
pub const MOON_ORBIT_SPEED: f64 = 1022.0;

pub const ASTEROID_RADIUS: f64 = 1e6 * RADIUS_EXAGGERATION;

/// Reference asteroid initial state: x, y, vx, vy.
pub const ASTEROID_INITIAL: [f64; 4] = [1e8, 4e8, 500.0, -300.0];

/// Defaults offered by the interactive prompt: x, y, vx, vy.
pub const ASTEROID_PROMPT_DEFAULTS: [f64; 4] = [4e8, 4e8, 300.0, -300.0];

// --- Debris ---

/// Particles spawned per explosion.
pub const DEBRIS_COUNT: u32 = 50;

/// Ticks a debris particle lives.
pub const DEBRIS_LIFETIME_TICKS: i32 = 100;

/// Debris launch speed range (m/s).
pub const DEBRIS_MIN_SPEED: f64 = 1e3;
pub const DEBRIS_MAX_SPEED: f64 = 1e4;

/// Debris radius is the parent radius divided by this.
pub const DEBRIS_RADIUS_DIVISOR: f64 = 10.0;

// --- Reference roster names ---

pub const EARTH: &str = "earth";
pub const MOON: &str = "moon";
pub const ASTEROID: &str = "asteroid";
