//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::canvas::CircleHandle;

/// Tag for a named member of the gravitating roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
}

/// Size and mass of a body. Set at spawn and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProperties {
    /// Collision and display radius in meters.
    pub radius: f64,
    /// Mass in kilograms. Zero for debris.
    pub mass: f64,
}

/// Display color, opaque to the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const BLUE: Tint = Tint::rgb(0, 0, 255);
    pub const GRAY: Tint = Tint::rgb(128, 128, 128);
    pub const WHITE: Tint = Tint::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The rendered circle owned by an entity.
///
/// Removed from the entity at the moment the circle is destroyed, so
/// an entity without `Visual` has nothing left to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visual {
    pub handle: CircleHandle,
}

/// Debris extension: short-lived, massless, moves ballistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debris {
    /// Ticks left before removal. Removed once this reaches 0 or below.
    pub remaining_ticks: i32,
}
