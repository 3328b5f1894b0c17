//! Game loop thread: ticks the simulation on a wall-clock cadence and
//! presents each frame.
//!
//! The engine and its canvas move into the thread. Commands arrive via an
//! `mpsc` channel; the latest snapshot is published to shared state.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{error, info};

use orbitfall_core::canvas::{Canvas, RecordingCanvas};
use orbitfall_core::state::SimSnapshot;
use orbitfall_sim::SimulationEngine;

use crate::state::{GameLoopCommand, SharedSnapshot};

/// A canvas that can show a finished frame.
pub trait Frame: Canvas {
    fn present(&mut self, snapshot: &SimSnapshot) -> io::Result<()>;
}

impl Frame for RecordingCanvas {
    fn present(&mut self, _snapshot: &SimSnapshot) -> io::Result<()> {
        Ok(())
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop<F>(
    engine: SimulationEngine,
    frame: F,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)>
where
    F: Frame + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("orbitfall-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, frame, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, or a failed frame.
fn run_game_loop<F: Frame>(
    mut engine: SimulationEngine,
    mut frame: F,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) {
    let mut next_tick_time = Instant::now();
    info!(
        seed = engine.config().seed,
        interval_ms = engine.tick_interval().as_millis() as u64,
        "game loop started"
    );

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Sim(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    info!(tick = engine.time().tick, "game loop shut down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause internally)
        let snapshot = engine.tick(&mut frame);

        // 3. Draw
        if let Err(e) = frame.present(&snapshot) {
            error!(error = %e, "failed to present frame, stopping game loop");
            return;
        }

        // 4. Publish for whoever reads after the loop stops
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, interval adjusted for time_scale
        let now = Instant::now();
        next_tick_time = next_deadline(next_tick_time, now, engine.tick_interval());
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        }
    }
}

/// Deadline for the next tick. Resets to `now` when more than two
/// intervals behind so a stall does not turn into a burst of catch-up ticks.
pub fn next_deadline(previous: Instant, now: Instant, interval: Duration) -> Instant {
    let next = previous + interval;
    if now > next && now - next > interval * 2 {
        now
    } else {
        next
    }
}
