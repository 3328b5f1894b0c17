//! State shared between the game loop thread and the rest of the host.

use std::sync::{Arc, Mutex};

use orbitfall_core::commands::SimCommand;
use orbitfall_core::state::SimSnapshot;

/// Commands sent from the input thread to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the simulation engine.
    Sim(SimCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot published by the game loop, for reading after it stops.
pub type SharedSnapshot = Arc<Mutex<Option<SimSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
