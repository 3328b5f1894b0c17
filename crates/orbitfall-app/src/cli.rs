//! Command-line arguments and startup configuration.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use orbitfall_core::config::SimConfig;
use orbitfall_core::constants::{ASTEROID, ASTEROID_PROMPT_DEFAULTS};

use crate::error::AppError;
use crate::prompt;

/// Earth, moon and an asteroid under Newtonian gravity, in your terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ask for the asteroid's initial position and velocity
    #[arg(short, long)]
    pub prompt: bool,

    /// Also explode bodies that hit the earth
    #[arg(long)]
    pub extended_collisions: bool,

    /// Random seed for explosion debris (overrides config file)
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Run without a terminal display as fast as possible
    #[arg(long)]
    pub headless: bool,

    /// Number of ticks to run in headless mode
    #[arg(long, value_name = "COUNT", default_value_t = 1000)]
    pub ticks: u64,

    /// Print the final snapshot as JSON (headless mode)
    #[arg(long)]
    pub json: bool,

    /// Log file used while the terminal display is active
    #[arg(long, value_name = "FILE", default_value = "orbitfall.log")]
    pub log_file: PathBuf,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve the simulation configuration: file (or defaults when no file is
    /// given), then command-line overrides, then interactive initial conditions.
    pub fn build_config<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<SimConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.extended_collisions {
            config = config.with_extended_collisions();
        }
        if self.prompt {
            let (position, velocity) =
                prompt::prompt_initial_state(input, output, ASTEROID, ASTEROID_PROMPT_DEFAULTS)?;
            config.set_initial_state(ASTEROID, position, velocity)?;
            info!(?position, ?velocity, "asteroid initial state entered");
        }

        config.validate()?;
        Ok(config)
    }
}
