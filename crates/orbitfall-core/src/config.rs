//! Simulation configuration.
//!
//! Every tunable of a run lives here: frame, physics constants, the
//! body roster with its gravity and collision pairs, and debris
//! behavior. Defaults reproduce the reference earth/moon/asteroid
//! scenario. Configurations can be loaded from TOML; unspecified keys
//! fall back to the defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::Tint;
use crate::constants::*;
use crate::coords::{CoordinateMapper, DisplaySize, WorldBounds};
use crate::error::ConfigError;
use crate::types::{Position, Velocity};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for debris directions. Same seed = same simulation.
    pub seed: u64,
    /// Initial wall-clock speed multiplier (1.0 = normal).
    pub time_scale: f64,
    /// Wall-clock milliseconds between ticks at time scale 1.0.
    pub tick_interval_ms: u64,
    /// Simulated seconds per tick.
    pub dt_secs: f64,
    pub gravitational_constant: f64,
    /// Gravity pairs closer than this are skipped for the tick.
    pub min_gravity_distance: f64,
    pub bounds: WorldBounds,
    pub display: DisplaySize,
    /// The gravitating roster, in declaration order.
    pub bodies: Vec<BodySpec>,
    /// Ordered `(influenced, influencer)` pairs, applied in this order each tick.
    pub gravity_pairs: Vec<(String, String)>,
    /// Pairs checked for overlap each tick, in this order.
    pub collision_pairs: Vec<(String, String)>,
    pub debris: DebrisSettings,
}

/// Initial state of one gravitating body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
    pub radius: f64,
    #[serde(default)]
    pub mass: f64,
    pub tint: Tint,
}

/// Explosion and debris behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebrisSettings {
    /// Particles spawned per explosion.
    pub count: u32,
    pub lifetime_ticks: i32,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Debris radius = parent radius / radius_divisor.
    pub radius_divisor: f64,
}

impl Default for DebrisSettings {
    fn default() -> Self {
        Self {
            count: DEBRIS_COUNT,
            lifetime_ticks: DEBRIS_LIFETIME_TICKS,
            min_speed: DEBRIS_MIN_SPEED,
            max_speed: DEBRIS_MAX_SPEED,
            radius_divisor: DEBRIS_RADIUS_DIVISOR,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let [ax, ay, avx, avy] = ASTEROID_INITIAL;
        Self {
            seed: 42,
            time_scale: 1.0,
            tick_interval_ms: TICK_INTERVAL_MS,
            dt_secs: DT,
            gravitational_constant: G,
            min_gravity_distance: MIN_GRAVITY_DISTANCE,
            bounds: WorldBounds::default(),
            display: DisplaySize::default(),
            bodies: vec![
                BodySpec {
                    name: EARTH.into(),
                    x: 0.0,
                    y: 0.0,
                    vx: 0.0,
                    vy: 0.0,
                    radius: EARTH_RADIUS,
                    mass: EARTH_MASS,
                    tint: Tint::BLUE,
                },
                BodySpec {
                    name: ASTEROID.into(),
                    x: ax,
                    y: ay,
                    vx: avx,
                    vy: avy,
                    radius: ASTEROID_RADIUS,
                    mass: 0.0,
                    tint: Tint::WHITE,
                },
                BodySpec {
                    name: MOON.into(),
                    x: MOON_ORBIT_RADIUS,
                    y: 0.0,
                    vx: 0.0,
                    vy: MOON_ORBIT_SPEED,
                    radius: MOON_RADIUS,
                    mass: MOON_MASS,
                    tint: Tint::GRAY,
                },
            ],
            gravity_pairs: vec![
                (MOON.into(), EARTH.into()),
                (ASTEROID.into(), EARTH.into()),
                (ASTEROID.into(), MOON.into()),
            ],
            collision_pairs: vec![(MOON.into(), ASTEROID.into())],
            debris: DebrisSettings::default(),
        }
    }
}

impl BodySpec {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.vx, self.vy)
    }
}

impl SimConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Add earth–moon and earth–asteroid collision checks to the reference pair.
    pub fn with_extended_collisions(mut self) -> Self {
        for (a, b) in [(EARTH, MOON), (EARTH, ASTEROID)] {
            let known = self.body(a).is_some() && self.body(b).is_some();
            let present = self
                .collision_pairs
                .iter()
                .any(|(x, y)| (x == a && y == b) || (x == b && y == a));
            if known && !present {
                self.collision_pairs.push((a.into(), b.into()));
            }
        }
        self
    }

    pub fn body(&self, name: &str) -> Option<&BodySpec> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Override the initial position and velocity of a named body.
    pub fn set_initial_state(
        &mut self,
        name: &str,
        position: Position,
        velocity: Velocity,
    ) -> Result<(), ConfigError> {
        let body = self
            .bodies
            .iter_mut()
            .find(|b| b.name == name)
            .ok_or_else(|| ConfigError::UnknownBody(name.to_string()))?;
        body.x = position.x;
        body.y = position.y;
        body.vx = velocity.x;
        body.vy = velocity.y;
        Ok(())
    }

    /// Build the coordinate mapper for this configuration's frame.
    pub fn mapper(&self) -> Result<CoordinateMapper, ConfigError> {
        CoordinateMapper::new(self.bounds, self.display)
    }

    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mapper()?;

        if !self.dt_secs.is_finite() || self.dt_secs <= 0.0 {
            return Err(ConfigError::InvalidTimeStep(self.dt_secs));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::InvalidTimeScale(self.time_scale));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        if !self.min_gravity_distance.is_finite() || self.min_gravity_distance <= 0.0 {
            return Err(ConfigError::InvalidDistanceGuard(self.min_gravity_distance));
        }

        let mut names = HashSet::new();
        for body in &self.bodies {
            if !names.insert(body.name.as_str()) {
                return Err(ConfigError::DuplicateBody(body.name.clone()));
            }
            if !body.radius.is_finite() || body.radius <= 0.0 {
                return Err(ConfigError::InvalidRadius {
                    name: body.name.clone(),
                    radius: body.radius,
                });
            }
            if !body.mass.is_finite() || body.mass < 0.0 {
                return Err(ConfigError::NegativeMass {
                    name: body.name.clone(),
                    mass: body.mass,
                });
            }
            if ![body.x, body.y, body.vx, body.vy].iter().all(|v| v.is_finite()) {
                return Err(ConfigError::NonFiniteState {
                    name: body.name.clone(),
                });
            }
        }

        for (a, b) in self.gravity_pairs.iter().chain(&self.collision_pairs) {
            for name in [a, b] {
                if !names.contains(name.as_str()) {
                    return Err(ConfigError::UnknownBody(name.clone()));
                }
            }
            if a == b {
                return Err(ConfigError::SelfPair(a.clone()));
            }
        }

        let debris = &self.debris;
        if debris.lifetime_ticks <= 0 {
            return Err(ConfigError::InvalidDebris("lifetime_ticks must be positive"));
        }
        if !debris.min_speed.is_finite() || !debris.max_speed.is_finite() {
            return Err(ConfigError::InvalidDebris("speeds must be finite"));
        }
        if debris.min_speed < 0.0 || debris.min_speed > debris.max_speed {
            return Err(ConfigError::InvalidDebris(
                "speeds must satisfy 0 <= min_speed <= max_speed",
            ));
        }
        if !debris.radius_divisor.is_finite() || debris.radius_divisor <= 0.0 {
            return Err(ConfigError::InvalidDebris("radius_divisor must be positive"));
        }

        Ok(())
    }
}
