//! Simulation engine for orbitfall.
//!
//! Owns the hecs ECS world, runs systems once per tick in a fixed
//! order, and produces SimSnapshots for the host.

pub mod engine;
pub mod roster;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use orbitfall_core as core;

#[cfg(test)]
mod tests;
