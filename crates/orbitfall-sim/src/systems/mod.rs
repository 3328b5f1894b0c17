//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for
//! read-only work). They do not own state; all state lives in components
//! or is passed in by the engine.

pub mod cleanup;
pub mod collision;
pub mod debris;
pub mod explosion;
pub mod gravity;
pub mod snapshot;
