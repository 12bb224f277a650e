use rand::Rng;
use tracing::debug;

use super::FOOD_REQUIRED_PER_ANT_SPAWN;
use super::ant::{Ant, ForageContext};
use super::geometry::Cell;
use super::grid::FoodGrid;
use super::pheromone::Trails;
use super::sim::Rgb;

pub struct Colony {
    pub id: u32,
    pub home: Cell,
    pub color: Rgb,
    /// Live ants in insertion order. Update order within a tick follows this list.
    pub ants: Vec<Ant>,
    pub trails: Trails,
    pub food_stored: u32,
    pub peak_population: usize,
    pub total_ants_died: u32,
}

impl Colony {
    pub fn new<R: Rng + ?Sized>(
        id: u32,
        home: Cell,
        color: Rgb,
        ant_count: usize,
        rng: &mut R,
    ) -> Self {
        let mut colony = Self {
            id,
            home,
            color,
            ants: Vec::with_capacity(ant_count),
            trails: Trails::default(),
            food_stored: 0,
            peak_population: 0,
            total_ants_died: 0,
        };
        colony.spawn_ants(ant_count, rng);
        colony.peak_population = colony.ants.len();
        colony
    }

    /// Runs one tick: ants, death purge, spawning, peak bookkeeping, then trail decay.
    pub fn update<R: Rng + ?Sized>(&mut self, grid: &mut FoodGrid, rng: &mut R) {
        let mut ctx = ForageContext {
            grid,
            trails: &mut self.trails,
            food_stored: &mut self.food_stored,
        };
        for ant in &mut self.ants {
            ant.update_self(&mut ctx, rng);
        }

        let before = self.ants.len();
        self.ants.retain(|ant| !ant.is_dead());
        let died = (before - self.ants.len()) as u32;
        self.total_ants_died += died;

        let mut spawned = 0;
        while self.food_stored >= FOOD_REQUIRED_PER_ANT_SPAWN {
            self.spawn_ant(rng);
            self.food_stored -= FOOD_REQUIRED_PER_ANT_SPAWN;
            spawned += 1;
        }

        if died > 0 || spawned > 0 {
            debug!(
                colony = self.id,
                died,
                spawned,
                alive = self.ants.len(),
                "Colony population changed"
            );
        }

        self.peak_population = self.peak_population.max(self.ants.len());
        self.trails.decay();
    }

    pub fn spawn_ants<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count {
            self.spawn_ant(rng);
        }
    }

    pub fn spawn_ant<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.ants.push(Ant::new(self.home, rng));
    }

    pub fn live_count(&self) -> usize {
        self.ants.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.ants.is_empty()
    }
}
