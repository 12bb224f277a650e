use rand::Rng;
use std::f32::consts::TAU;

use super::geometry::Cell;
use super::{
    ATTEMPTS_PER_CLUMP, CLUMP_RADIUS, GRID_SIZE, INITIAL_FOOD_PER_SOURCE, INITIAL_FOOD_SOURCES,
    NUM_CLUMPS,
};

/// Square grid of food quantities shared by every colony.
#[derive(Clone)]
pub struct FoodGrid {
    cells: Vec<u32>,
    total_food_sources: u32,
}

impl Default for FoodGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodGrid {
    /// An empty grid. Call `generate_food` to populate it.
    pub fn new() -> Self {
        Self {
            cells: vec![0; GRID_SIZE * GRID_SIZE],
            total_food_sources: 0,
        }
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Number of cells currently holding food.
    pub fn total_food_sources(&self) -> u32 {
        self.total_food_sources
    }

    /// Row-major quantities, `GRID_SIZE` cells per row.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = 0);
        self.total_food_sources = 0;
    }

    /// Scatters food sources in clumps biased toward each clump centre.
    /// Collisions and out-of-bounds placements are skipped, so fewer than
    /// `INITIAL_FOOD_SOURCES` sources is a normal outcome.
    pub fn generate_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear();

        for _ in 0..NUM_CLUMPS {
            if self.total_food_sources >= INITIAL_FOOD_SOURCES {
                break;
            }

            let center = Cell::new(
                rng.random_range(0..GRID_SIZE as i32),
                rng.random_range(0..GRID_SIZE as i32),
            );

            for _ in 0..ATTEMPTS_PER_CLUMP {
                if self.total_food_sources >= INITIAL_FOOD_SOURCES {
                    break;
                }

                let angle: f32 = rng.random_range(0.0..TAU);
                let radius_factor: f32 = rng.random();
                let radius = CLUMP_RADIUS * radius_factor * radius_factor;

                let target = Cell::new(
                    center.x + (radius * angle.cos()).round() as i32,
                    center.y + (radius * angle.sin()).round() as i32,
                );

                if let Some(idx) = target.index() {
                    if self.cells[idx] == 0 {
                        self.cells[idx] = INITIAL_FOOD_PER_SOURCE;
                        self.total_food_sources += 1;
                    }
                }
            }
        }
    }

    #[inline(always)]
    pub fn food_at(&self, cell: Cell) -> u32 {
        cell.index().map_or(0, |idx| self.cells[idx])
    }

    #[inline(always)]
    pub fn has_food(&self, cell: Cell) -> bool {
        self.food_at(cell) > 0
    }

    /// Sets the quantity at `cell`, keeping the source count in step.
    pub fn place_food(&mut self, cell: Cell, amount: u32) {
        if let Some(idx) = cell.index() {
            let was_source = self.cells[idx] > 0;
            self.cells[idx] = amount;
            match (was_source, amount > 0) {
                (false, true) => self.total_food_sources += 1,
                (true, false) => self.total_food_sources -= 1,
                _ => {}
            }
        }
    }

    /// Takes one unit of food. The source count drops only when the cell empties.
    pub fn remove_food(&mut self, cell: Cell) {
        if let Some(idx) = cell.index() {
            let quantity = &mut self.cells[idx];
            if *quantity > 0 {
                *quantity -= 1;
                if *quantity == 0 {
                    self.total_food_sources -= 1;
                }
            }
        }
    }
}
