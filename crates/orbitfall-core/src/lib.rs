//! Core types and definitions for the orbitfall simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, snapshots, events, configuration and the
//! canvas service the simulation draws through.
//! It has no dependency on a terminal, window or timer.

pub mod canvas;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod coords;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
