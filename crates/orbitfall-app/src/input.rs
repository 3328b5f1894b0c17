//! Keyboard thread: turns key presses into game loop commands.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, error};

use orbitfall_core::commands::SimCommand;
use orbitfall_core::constants::{MAX_TIME_SCALE, MIN_TIME_SCALE};

use crate::state::GameLoopCommand;

/// How long one poll waits before rechecking the running flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Sim(SimCommand),
    Quit,
}

/// Key bindings. Tracks the requested time scale so `+`/`-` can step it.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    time_scale: f64,
}

impl KeyBindings {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale: time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE),
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn map(&mut self, key: KeyEvent) -> Option<InputAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            KeyCode::Char(' ') => InputAction::Sim(SimCommand::TogglePause),
            KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Sim(SimCommand::Restart),
            KeyCode::Char('+') | KeyCode::Char('=') => self.rescale(2.0),
            KeyCode::Char('-') | KeyCode::Char('_') => self.rescale(0.5),
            _ => return None,
        };
        Some(action)
    }

    fn rescale(&mut self, factor: f64) -> InputAction {
        self.time_scale = (self.time_scale * factor).clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
        InputAction::Sim(SimCommand::SetTimeScale {
            scale: self.time_scale,
        })
    }
}

/// Spawn the keyboard thread. It exits on quit, when the game loop hangs
/// up, or once `running` is cleared.
pub fn spawn_input_thread(
    cmd_tx: mpsc::Sender<GameLoopCommand>,
    bindings: KeyBindings,
    running: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("orbitfall-input".into())
        .spawn(move || run_input(cmd_tx, bindings, &running))
}

fn run_input(cmd_tx: mpsc::Sender<GameLoopCommand>, mut bindings: KeyBindings, running: &AtomicBool) {
    while running.load(Ordering::Relaxed) {
        let ready = match event::poll(POLL_INTERVAL) {
            Ok(ready) => ready,
            Err(e) => {
                error!(error = %e, "keyboard poll failed");
                break;
            }
        };
        if !ready {
            continue;
        }

        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                error!(error = %e, "keyboard read failed");
                break;
            }
        };

        match bindings.map(key) {
            Some(InputAction::Quit) => {
                debug!("quit requested");
                let _ = cmd_tx.send(GameLoopCommand::Shutdown);
                break;
            }
            Some(InputAction::Sim(command)) => {
                debug!(?command, "key command");
                if cmd_tx.send(GameLoopCommand::Sim(command)).is_err() {
                    break;
                }
            }
            None => {}
        }
    }
    running.store(false, Ordering::Relaxed);
}
