//! Orbitfall terminal host.
//!
//! This crate wires the headless simulation to a terminal: CLI parsing,
//! logging, interactive initial conditions, the game loop thread, the
//! keyboard thread and a crossterm-backed canvas.

pub mod cli;
pub mod error;
pub mod game_loop;
pub mod headless;
pub mod input;
pub mod logging;
pub mod prompt;
pub mod state;
pub mod terminal;

pub use orbitfall_core as core;
