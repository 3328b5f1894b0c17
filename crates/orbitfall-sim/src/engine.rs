//! Simulation engine, the core of orbitfall.
//!
//! `SimulationEngine` owns the hecs ECS world, processes host commands,
//! runs all systems, and produces `SimSnapshot`s. It draws only through
//! the `Canvas` it is handed and never schedules itself; the host decides
//! when the next tick happens.

use std::collections::VecDeque;
use std::time::Duration;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use orbitfall_core::canvas::Canvas;
use orbitfall_core::commands::SimCommand;
use orbitfall_core::config::SimConfig;
use orbitfall_core::constants::{MAX_TIME_SCALE, MIN_TIME_SCALE};
use orbitfall_core::coords::CoordinateMapper;
use orbitfall_core::enums::SimPhase;
use orbitfall_core::error::ConfigError;
use orbitfall_core::events::SimEvent;
use orbitfall_core::state::SimSnapshot;
use orbitfall_core::types::SimTime;

use crate::roster::Roster;
use crate::systems;
use crate::systems::gravity::GravityParams;
use crate::systems::snapshot::DebrisTotals;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    mapper: CoordinateMapper,
    roster: Roster,
    time: SimTime,
    phase: SimPhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    debris_totals: DebrisTotals,
}

impl SimulationEngine {
    /// Validate the config and spawn the roster onto the canvas.
    pub fn new(config: SimConfig, canvas: &mut dyn Canvas) -> Result<Self, ConfigError> {
        config.validate()?;
        let mapper = config.mapper()?;

        let mut world = World::new();
        let roster = world_setup::spawn_roster(&mut world, &config, &mapper, canvas);
        info!(
            bodies = roster.len(),
            gravity_pairs = roster.gravity_pairs().len(),
            collision_pairs = roster.collision_pairs().len(),
            seed = config.seed,
            "simulation created"
        );

        Ok(Self {
            world,
            mapper,
            roster,
            time: SimTime::default(),
            phase: SimPhase::default(),
            time_scale: config.time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            debris_totals: DebrisTotals::default(),
            config,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, canvas: &mut dyn Canvas) -> SimSnapshot {
        self.process_commands(canvas);

        if self.phase == SimPhase::Idle {
            self.phase = SimPhase::Ticking;
            self.run_systems(canvas);
            self.time.advance(self.config.dt_secs);
            self.phase = SimPhase::Idle;
            trace!(tick = self.time.tick, "tick complete");
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> SimSnapshot {
        self.build_snapshot(Vec::new())
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Wall-clock delay before the next tick at the current time scale.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms).div_f64(self.time_scale)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> SimSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.roster,
            &self.time,
            self.phase,
            self.time_scale,
            self.debris_totals,
            events,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self, canvas: &mut dyn Canvas) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, canvas);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand, canvas: &mut dyn Canvas) {
        match command {
            SimCommand::Pause => {
                if self.phase == SimPhase::Idle {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Idle;
                }
            }
            SimCommand::TogglePause => {
                self.phase = match self.phase {
                    SimPhase::Paused => SimPhase::Idle,
                    _ => SimPhase::Paused,
                };
            }
            SimCommand::Restart => self.restart(canvas),
            SimCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
                }
            }
        }
    }

    /// Tear down every entity and respawn the configured roster.
    /// Pause state is kept.
    fn restart(&mut self, canvas: &mut dyn Canvas) {
        systems::cleanup::clear(&mut self.world, canvas, &mut self.despawn_buffer);
        self.roster =
            world_setup::spawn_roster(&mut self.world, &self.config, &self.mapper, canvas);
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.debris_totals = DebrisTotals::default();
        self.events.push(SimEvent::Restarted);
        info!(bodies = self.roster.len(), "simulation restarted");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, canvas: &mut dyn Canvas) {
        let params = GravityParams {
            dt: self.config.dt_secs,
            g: self.config.gravitational_constant,
            min_distance: self.config.min_gravity_distance,
        };

        // 1. Gravity, pair by pair in declared order
        systems::gravity::run(
            &mut self.world,
            &self.roster,
            params,
            &self.mapper,
            canvas,
            &mut self.events,
        );

        // 2. Debris motion and aging
        let expired = systems::debris::run(
            &mut self.world,
            self.config.dt_secs,
            &self.mapper,
            canvas,
            &mut self.despawn_buffer,
        );
        if expired > 0 {
            self.debris_totals.expired += u64::from(expired);
            self.events.push(SimEvent::DebrisExpired { count: expired });
            debug!(expired, "debris expired");
        }

        // 3. Collisions and explosions
        let exploded = self.run_collisions(canvas);

        // 4. Retire exploded bodies from the roster and the world
        for entity in exploded {
            self.roster.retire(entity);
            systems::cleanup::despawn_with_visual(&mut self.world, entity, canvas);
        }
    }

    /// Explode both bodies of every colliding pair. A body explodes at most
    /// once even if it touches several others in the same tick.
    fn run_collisions(&mut self, canvas: &mut dyn Canvas) -> Vec<Entity> {
        let contacts = systems::collision::run(&self.world, self.roster.collision_pairs());
        let mut exploded = Vec::new();

        for pair in contacts {
            let first = self.body_name(pair.first);
            let second = self.body_name(pair.second);
            info!(%first, %second, tick = self.time.tick, "collision");
            self.events.push(SimEvent::Collision { first, second });

            for entity in [pair.first, pair.second] {
                if exploded.contains(&entity) {
                    continue;
                }
                let report = systems::explosion::explode(
                    &mut self.world,
                    entity,
                    &self.config.debris,
                    &mut self.rng,
                    &self.mapper,
                    canvas,
                );
                if let Some(report) = report {
                    exploded.push(entity);
                    self.debris_totals.spawned += u64::from(report.debris_spawned);
                    let body = self.body_name(entity);
                    self.events.push(SimEvent::Explosion {
                        body,
                        position: report.position,
                        debris_spawned: report.debris_spawned,
                    });
                }
            }
        }

        exploded
    }

    fn body_name(&self, entity: Entity) -> String {
        self.roster.name_of(entity).unwrap_or_default().to_string()
    }
}
