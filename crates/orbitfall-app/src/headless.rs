//! Headless runs: tick as fast as possible against an in-memory canvas.

use tracing::info;

use orbitfall_core::canvas::RecordingCanvas;
use orbitfall_core::config::SimConfig;
use orbitfall_core::error::ConfigError;
use orbitfall_core::events::SimEvent;
use orbitfall_core::state::SimSnapshot;
use orbitfall_sim::SimulationEngine;

/// Outcome of a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub snapshot: SimSnapshot,
    pub collisions: u32,
    pub singularities: u32,
    pub live_circles: usize,
    pub stale_operations: u64,
}

/// Run `ticks` ticks and report on the final state.
pub fn run(config: SimConfig, ticks: u64) -> Result<HeadlessReport, ConfigError> {
    let mut canvas = RecordingCanvas::new();
    let mut engine = SimulationEngine::new(config, &mut canvas)?;
    let mut snapshot = engine.snapshot();
    let mut collisions: u32 = 0;
    let mut singularities: u32 = 0;

    for _ in 0..ticks {
        snapshot = engine.tick(&mut canvas);
        for event in &snapshot.events {
            match event {
                SimEvent::Collision { .. } => collisions += 1,
                SimEvent::SingularitySkipped { .. } => singularities += 1,
                _ => {}
            }
        }
    }

    info!(
        ticks,
        collisions,
        bodies = snapshot.bodies.len(),
        debris = snapshot.debris.active,
        "headless run finished"
    );

    Ok(HeadlessReport {
        snapshot,
        collisions,
        singularities,
        live_circles: canvas.live_count(),
        stale_operations: canvas.stale_operations(),
    })
}

/// One-line human summary of a report.
pub fn summary(report: &HeadlessReport) -> String {
    let snap = &report.snapshot;
    let days = snap.time.elapsed_secs / 86_400.0;
    let names: Vec<&str> = snap.bodies.iter().map(|b| b.name.as_str()).collect();
    format!(
        "tick {} ({days:.1} days): bodies [{}], {} debris, {} collisions",
        snap.time.tick,
        names.join(", "),
        snap.debris.active,
        report.collisions,
    )
}
