use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::GRID_SIZE;
use super::colony::Colony;
use super::geometry::Cell;
use super::grid::FoodGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colony identity colours, cycled by creation index.
pub const COLONY_COLORS: [Rgb; 5] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(128, 0, 128),
    Rgb::new(139, 69, 19),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Fixed seed for reproducible runs. Seeds from OS entropy when unset.
    pub seed: Option<u64>,
    pub colony_count: usize,
    pub initial_ants_per_colony: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            colony_count: 3,
            initial_ants_per_colony: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Running,
    /// Food or ants ran out. Ticks are ignored until `reset`.
    AwaitingReset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColonyStats {
    pub id: u32,
    pub home: Cell,
    pub live_ants: usize,
    pub peak_population: usize,
    pub deaths: u32,
    pub food_stored: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStats {
    pub tick: u64,
    pub live_ants: usize,
    pub peak_population: usize,
    pub deaths: u32,
    pub food_sources: u32,
    pub colonies: Vec<ColonyStats>,
}

pub struct Simulation {
    pub tick: u64,
    pub grid: FoodGrid,
    pub colonies: Vec<Colony>,
    pub settings: SimulationSettings,
    next_colony_id: u32,
    rng: StdRng,
    state: SimulationState,
}

impl Simulation {
    pub fn new(settings: SimulationSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut sim = Self {
            tick: 0,
            grid: FoodGrid::new(),
            colonies: Vec::with_capacity(settings.colony_count),
            settings,
            next_colony_id: 0,
            rng,
            state: SimulationState::Running,
        };
        sim.reset();
        sim
    }

    /// Advances every colony once. Does nothing while awaiting a reset.
    pub fn tick(&mut self) -> SimulationState {
        if self.state == SimulationState::AwaitingReset {
            return self.state;
        }

        for colony in &mut self.colonies {
            colony.update(&mut self.grid, &mut self.rng);
        }
        self.tick += 1;

        let food_sources = self.grid.total_food_sources();
        let live_ants = self.total_live_ants();
        if food_sources == 0 || live_ants == 0 {
            info!(
                tick = self.tick,
                food_sources, live_ants, "Simulation exhausted, awaiting reset"
            );
            self.state = SimulationState::AwaitingReset;
        }
        self.state
    }

    /// Regenerates food and replaces every colony with a fresh one.
    pub fn reset(&mut self) {
        self.tick = 0;
        self.next_colony_id = 0;
        self.grid.generate_food(&mut self.rng);

        self.colonies.clear();
        for index in 0..self.settings.colony_count {
            let home = Cell::new(
                self.rng.random_range(0..GRID_SIZE as i32),
                self.rng.random_range(0..GRID_SIZE as i32),
            );
            let id = self.next_colony_id;
            self.next_colony_id += 1;
            let color = COLONY_COLORS[index % COLONY_COLORS.len()];
            self.colonies.push(Colony::new(
                id,
                home,
                color,
                self.settings.initial_ants_per_colony,
                &mut self.rng,
            ));
        }

        self.state = SimulationState::Running;
        info!(
            colonies = self.colonies.len(),
            food_sources = self.grid.total_food_sources(),
            "Simulation reset"
        );
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_awaiting_reset(&self) -> bool {
        self.state == SimulationState::AwaitingReset
    }

    pub fn total_live_ants(&self) -> usize {
        self.colonies.iter().map(Colony::live_count).sum()
    }

    pub fn total_peak_population(&self) -> usize {
        self.colonies.iter().map(|c| c.peak_population).sum()
    }

    pub fn total_deaths(&self) -> u32 {
        self.colonies.iter().map(|c| c.total_ants_died).sum()
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            tick: self.tick,
            live_ants: self.total_live_ants(),
            peak_population: self.total_peak_population(),
            deaths: self.total_deaths(),
            food_sources: self.grid.total_food_sources(),
            colonies: self
                .colonies
                .iter()
                .map(|c| ColonyStats {
                    id: c.id,
                    home: c.home,
                    live_ants: c.live_count(),
                    peak_population: c.peak_population,
                    deaths: c.total_ants_died,
                    food_stored: c.food_stored,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Simulation {
        Simulation::new(SimulationSettings {
            seed: Some(seed),
            ..SimulationSettings::default()
        })
    }

    #[test]
    fn test_new_simulation_layout() {
        let sim = seeded(1);

        assert_eq!(sim.colonies.len(), 3);
        assert_eq!(sim.total_live_ants(), 15);
        assert_eq!(sim.state(), SimulationState::Running);
        assert!(sim.grid.total_food_sources() > 0);
        assert_eq!(
            sim.colonies.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(sim.colonies[1].color, COLONY_COLORS[1]);
        assert!(sim.colonies.iter().all(|c| c.home.in_bounds()));
    }

    #[test]
    fn test_reset_restarts_colony_ids() {
        let mut sim = seeded(2);
        for _ in 0..10 {
            sim.tick();
        }
        sim.reset();

        assert_eq!(sim.tick, 0);
        assert_eq!(
            sim.colonies.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(sim.total_deaths(), 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..300 {
            assert_eq!(a.tick(), b.tick());
        }

        assert_eq!(a.stats(), b.stats());
        for (ca, cb) in a.colonies.iter().zip(&b.colonies) {
            let pa: Vec<Cell> = ca.ants.iter().map(|ant| ant.pos).collect();
            let pb: Vec<Cell> = cb.ants.iter().map(|ant| ant.pos).collect();
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_extinction_awaits_reset() {
        let mut sim = seeded(3);
        for colony in &mut sim.colonies {
            for ant in &mut colony.ants {
                ant.lifespan = 1;
            }
        }

        assert_eq!(sim.tick(), SimulationState::AwaitingReset);
        assert_eq!(sim.total_deaths(), 15);
        assert_eq!(sim.tick, 1);

        // Further ticks are ignored.
        assert_eq!(sim.tick(), SimulationState::AwaitingReset);
        assert_eq!(sim.tick, 1);

        sim.reset();
        assert!(!sim.is_awaiting_reset());
        assert_eq!(sim.total_live_ants(), 15);
    }

    #[test]
    fn test_starvation_awaits_reset() {
        let mut sim = seeded(4);
        sim.grid.clear();

        assert_eq!(sim.tick(), SimulationState::AwaitingReset);
        assert!(sim.is_awaiting_reset());
    }

    #[test]
    fn test_stats_match_colonies() {
        let mut sim = seeded(5);
        for _ in 0..50 {
            sim.tick();
        }
        let stats = sim.stats();

        assert_eq!(stats.tick, sim.tick);
        assert_eq!(stats.colonies.len(), 3);
        assert_eq!(
            stats.live_ants,
            stats.colonies.iter().map(|c| c.live_ants).sum::<usize>()
        );
        assert_eq!(stats.food_sources, sim.grid.total_food_sources());
    }
}
