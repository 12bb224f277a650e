use colony_core::{Simulation, SimulationStats};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;

/// Summary of a windowless run, printed as TOML.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub ticks_run: u64,
    pub resets: u32,
    pub stats: SimulationStats,
}

/// Runs up to `ticks` ticks. Exhausted runs restart at once when `auto_reset`
/// is set, otherwise the run stops early.
pub fn run(config: &AppConfig, ticks: u64) -> HeadlessReport {
    let mut simulation = Simulation::new(config.simulation.clone());
    let mut ticks_run = 0;
    let mut resets = 0;

    while ticks_run < ticks {
        if simulation.is_awaiting_reset() {
            if !config.viewer.auto_reset {
                info!(ticks_run, "Simulation exhausted, stopping headless run");
                break;
            }
            simulation.reset();
            resets += 1;
        }
        simulation.tick();
        ticks_run += 1;
    }

    info!(ticks_run, resets, "Headless run finished");
    HeadlessReport {
        ticks_run,
        resets,
        stats: simulation.stats(),
    }
}
