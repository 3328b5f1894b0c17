use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;

use orbitfall_app::cli::Args;
use orbitfall_app::error::AppError;
use orbitfall_app::input::{self, KeyBindings};
use orbitfall_app::state::shared_snapshot;
use orbitfall_app::terminal::TerminalCanvas;
use orbitfall_app::{game_loop, headless};
use orbitfall_core::config::SimConfig;
use orbitfall_sim::SimulationEngine;

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let log_file = (!args.headless && !args.print_config).then_some(args.log_file.as_path());
    orbitfall_app::logging::init(args.verbose, log_file)?;

    let config = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        args.build_config(&mut input, &mut output)?
    };

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    if args.headless {
        let report = headless::run(config, args.ticks)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
        } else {
            println!("{}", headless::summary(&report));
        }
        return Ok(());
    }

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide, DisableLineWrap)?;
    let res = run_terminal(config);
    execute!(out, ResetColor, cursor::Show, EnableLineWrap, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    res
}

fn run_terminal(config: SimConfig) -> Result<(), AppError> {
    let bindings = KeyBindings::new(config.time_scale);
    let mut canvas: TerminalCanvas<Stdout> = TerminalCanvas::new(io::stdout(), config.display);
    let engine = SimulationEngine::new(config, &mut canvas)?;

    let latest = shared_snapshot();
    let (cmd_tx, loop_handle) = game_loop::spawn_game_loop(engine, canvas, latest.clone())?;

    let running = Arc::new(AtomicBool::new(true));
    let input_handle = input::spawn_input_thread(cmd_tx, bindings, running.clone())?;

    let loop_result = loop_handle.join();
    running.store(false, Ordering::Relaxed);
    let input_result = input_handle.join();
    loop_result.map_err(|_| AppError::ThreadPanicked("game loop"))?;
    input_result.map_err(|_| AppError::ThreadPanicked("input"))?;

    if let Ok(lock) = latest.lock() {
        if let Some(snapshot) = lock.as_ref() {
            info!(
                tick = snapshot.time.tick,
                bodies = snapshot.bodies.len(),
                debris = snapshot.debris.active,
                "session ended"
            );
        }
    }
    Ok(())
}
