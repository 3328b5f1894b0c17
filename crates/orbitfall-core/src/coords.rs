//! Mapping between simulation space (meters, y up) and display space
//! (pixels, y down).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Position;

/// Rectangle of simulation space shown on the display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            left: WORLD_LEFT,
            right: WORLD_RIGHT,
            bottom: WORLD_BOTTOM,
            top: WORLD_TOP,
        }
    }
}

impl WorldBounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Pixel dimensions of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        }
    }
}

/// Affine map from world bounds onto the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    bounds: WorldBounds,
    display: DisplaySize,
    scale: DVec2,
}

impl CoordinateMapper {
    pub fn new(bounds: WorldBounds, display: DisplaySize) -> Result<Self, ConfigError> {
        let ordered = bounds.left < bounds.right && bounds.bottom < bounds.top;
        let finite = [bounds.left, bounds.right, bounds.bottom, bounds.top]
            .iter()
            .all(|v| v.is_finite());
        if !ordered || !finite {
            return Err(ConfigError::InvalidBounds {
                left: bounds.left,
                right: bounds.right,
                bottom: bounds.bottom,
                top: bounds.top,
            });
        }
        if display.width == 0 || display.height == 0 {
            return Err(ConfigError::InvalidDisplay {
                width: display.width,
                height: display.height,
            });
        }

        let scale = DVec2::new(
            display.width as f64 / bounds.width(),
            display.height as f64 / bounds.height(),
        );
        Ok(Self {
            bounds,
            display,
            scale,
        })
    }

    /// Pixels per meter along x and y.
    pub fn scale(&self) -> DVec2 {
        self.scale
    }

    pub fn to_display(&self, pos: Position) -> DVec2 {
        DVec2::new(
            (pos.x - self.bounds.left) * self.scale.x,
            self.display.height as f64 - (pos.y - self.bounds.bottom) * self.scale.y,
        )
    }

    /// Inverse of [`Self::to_display`].
    pub fn to_world(&self, px: DVec2) -> Position {
        Position::new(
            px.x / self.scale.x + self.bounds.left,
            (self.display.height as f64 - px.y) / self.scale.y + self.bounds.bottom,
        )
    }

    /// Pixel displacement for a world displacement. The y axis flips.
    pub fn delta_to_display(&self, delta: DVec2) -> DVec2 {
        DVec2::new(delta.x * self.scale.x, -delta.y * self.scale.y)
    }

    /// Per-axis pixel radii of a world-space circle.
    pub fn radii_to_display(&self, radius: f64) -> DVec2 {
        self.scale * radius
    }
}
