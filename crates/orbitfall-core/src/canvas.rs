//! The drawing service the simulation renders through.
//!
//! All coordinates crossing this boundary are display pixels; the
//! simulation maps world meters through [`crate::coords::CoordinateMapper`]
//! before calling in.

use std::collections::HashMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::Tint;

/// Opaque identifier for a circle created on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircleHandle(pub u64);

/// Host-provided drawing surface.
pub trait Canvas {
    /// Create a filled ellipse centered at `center` with per-axis radii, both in pixels.
    fn create_circle(&mut self, center: DVec2, radii: DVec2, tint: Tint) -> CircleHandle;

    /// Move an existing circle by a pixel delta.
    fn move_circle(&mut self, handle: CircleHandle, delta: DVec2);

    /// Delete a circle. Each handle is destroyed at most once.
    fn destroy_circle(&mut self, handle: CircleHandle);
}

/// A circle as tracked by [`RecordingCanvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedCircle {
    pub center: DVec2,
    pub radii: DVec2,
    pub tint: Tint,
}

/// In-memory canvas for headless runs and tests.
///
/// Keeps every live circle and counts operations aimed at handles it
/// does not know, which should stay at zero.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    circles: HashMap<CircleHandle, RecordedCircle>,
    next_handle: u64,
    created: u64,
    destroyed: u64,
    stale_operations: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: CircleHandle) -> Option<&RecordedCircle> {
        self.circles.get(&handle)
    }

    /// Number of circles currently alive.
    pub fn live_count(&self) -> usize {
        self.circles.len()
    }

    pub fn created_count(&self) -> u64 {
        self.created
    }

    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }

    /// Moves or destroys issued against unknown or already destroyed handles.
    pub fn stale_operations(&self) -> u64 {
        self.stale_operations
    }
}

impl Canvas for RecordingCanvas {
    fn create_circle(&mut self, center: DVec2, radii: DVec2, tint: Tint) -> CircleHandle {
        let handle = CircleHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.circles
            .insert(handle, RecordedCircle { center, radii, tint });
        handle
    }

    fn move_circle(&mut self, handle: CircleHandle, delta: DVec2) {
        match self.circles.get_mut(&handle) {
            Some(circle) => circle.center += delta,
            None => self.stale_operations += 1,
        }
    }

    fn destroy_circle(&mut self, handle: CircleHandle) {
        if self.circles.remove(&handle).is_some() {
            self.destroyed += 1;
        } else {
            self.stale_operations += 1;
        }
    }
}
