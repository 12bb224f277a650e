pub mod ant;
mod colony;
mod geometry;
mod grid;
mod memory;
mod pheromone;
pub mod selection;
mod sim;

// Re-export key types for easier imports
pub use ant::{Ant, ForageContext, Steering};
pub use colony::Colony;
pub use geometry::{Cell, Direction};
pub use grid::FoodGrid;
pub use memory::ShortTermMemory;
pub use pheromone::{PheromoneField, PheromoneKind, Trails};
pub use sim::{
    COLONY_COLORS, ColonyStats, Rgb, Simulation, SimulationSettings, SimulationState,
    SimulationStats,
};

// Grid constants
pub const GRID_SIZE: usize = 200;

// Food generation
pub const INITIAL_FOOD_PER_SOURCE: u32 = 50;
pub const INITIAL_FOOD_SOURCES: u32 = 100;
pub const NUM_CLUMPS: usize = 8;
pub const ATTEMPTS_PER_CLUMP: usize = INITIAL_FOOD_SOURCES as usize / NUM_CLUMPS;
pub const CLUMP_RADIUS: f32 = 10.0;

// Pheromone field constants
pub const MAX_PHEROMONE_LEVEL: f32 = 500.0;
pub const PHEROMONE_DECAY_RATE: f32 = 0.98;
pub const PHEROMONE_EPSILON: f32 = 0.001;

// Colony constants
pub const FOOD_REQUIRED_PER_ANT_SPAWN: u32 = 8;

// Ant life cycle
pub const MAX_LIFESPAN: u32 = 1000;
pub const MEMORY_LENGTH: usize = 10;
pub const MAX_TOTAL_RETURN_ATTEMPTS: u32 = 150;
pub const HOME_PROXIMITY_THRESHOLD: f32 = 8.0;
pub const NO_PROGRESS_EPSILON: f32 = 0.1; // Tuned, keep as is

// Deposit budget
pub const INITIAL_PHEROMONE_STRENGTH: f32 = 100.0;
pub const FOUND_FOOD_PHEROMONE_STRENGTH: f32 = 20.0;
pub const DELIVERY_PHEROMONE_BONUS: f32 = 10.0;
pub const FOOD_PHEROMONE_DEPOSIT: f32 = 60.0;
pub const HOME_PHEROMONE_DEPOSIT: f32 = 50.5;
pub const FOOD_DEPOSIT_MIN_STRENGTH: f32 = 0.05;
pub const HOME_DEPOSIT_MIN_STRENGTH: f32 = 0.1;
pub const DEPOSIT_COST: f32 = 0.1;

// Trail following
pub const FOOD_TRAIL_CROWDING_LEVEL: f32 = 25.0;
pub const HOME_TRAIL_CROWDING_LEVEL: f32 = 30.0;
pub const TRAIL_CROWDING_WANDER_PERCENT: u32 = 5;
pub const LOW_TRAIL_WEIGHT: f32 = 0.1;
pub const LOW_TRAIL_WANDER_PERCENT: u32 = 20;
pub const MIN_CANDIDATE_WEIGHT: f32 = 0.001;
pub const DIAGONAL_BONUS: f32 = 1.1;
pub const NEAR_HOME_DISTANCE: f32 = 2.5; // Revisits are barely penalised this close to the nest

// Movement
pub const WANDER_INERTIA_PERCENT: u32 = 70;
pub const NEST_DEPARTURE_WANDER_PERCENT: u32 = 3;
pub const BOUNDARY_TURN_UNITS: i32 = 2; // Sharp turn is 2 or 3 units
