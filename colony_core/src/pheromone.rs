use super::geometry::Cell;
use super::{GRID_SIZE, MAX_PHEROMONE_LEVEL, PHEROMONE_DECAY_RATE, PHEROMONE_EPSILON};

/// Which of a colony's two trails a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PheromoneKind {
    ToFood,
    ToHome,
}

/// Dense grid of trail strengths. Every value stays in `[0, MAX_PHEROMONE_LEVEL]`.
#[derive(Clone)]
pub struct PheromoneField {
    data: Vec<f32>,
}

impl Default for PheromoneField {
    fn default() -> Self {
        Self::new()
    }
}

impl PheromoneField {
    pub fn new() -> Self {
        Self {
            data: vec![0.0; GRID_SIZE * GRID_SIZE],
        }
    }

    /// Strength at `cell`; 0 outside the grid.
    #[inline(always)]
    pub fn level(&self, cell: Cell) -> f32 {
        cell.index().map_or(0.0, |idx| self.data[idx])
    }

    #[inline(always)]
    pub fn deposit(&mut self, cell: Cell, amount: f32) {
        if let Some(idx) = cell.index() {
            let value = &mut self.data[idx];
            *value = (*value + amount).clamp(0.0, MAX_PHEROMONE_LEVEL);
        }
    }

    /// One tick of evaporation. Values at or below the epsilon snap to zero.
    pub fn decay(&mut self) {
        for value in &mut self.data {
            if *value > PHEROMONE_EPSILON {
                *value *= PHEROMONE_DECAY_RATE;
                if *value < PHEROMONE_EPSILON {
                    *value = 0.0;
                }
            } else {
                *value = 0.0;
            }
        }
    }

    /// Row-major values, `GRID_SIZE` per row.
    pub fn values(&self) -> &[f32] {
        &self.data
    }
}

/// The pair of fields owned by one colony.
#[derive(Clone, Default)]
pub struct Trails {
    pub to_food: PheromoneField,
    pub to_home: PheromoneField,
}

impl Trails {
    pub fn field(&self, kind: PheromoneKind) -> &PheromoneField {
        match kind {
            PheromoneKind::ToFood => &self.to_food,
            PheromoneKind::ToHome => &self.to_home,
        }
    }

    pub fn decay(&mut self) {
        self.to_food.decay();
        self.to_home.decay();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_saturates_at_cap() {
        let mut field = PheromoneField::new();
        let cell = Cell::new(3, 4);
        for _ in 0..20 {
            field.deposit(cell, 60.0);
        }
        assert_eq!(field.level(cell), MAX_PHEROMONE_LEVEL);
    }

    #[test]
    fn test_deposit_never_goes_negative() {
        let mut field = PheromoneField::new();
        let cell = Cell::new(3, 4);
        field.deposit(cell, 5.0);
        field.deposit(cell, -50.0);
        assert_eq!(field.level(cell), 0.0);
    }

    #[test]
    fn test_out_of_bounds_deposit_is_ignored() {
        let mut field = PheromoneField::new();
        field.deposit(Cell::new(-1, 0), 10.0);
        field.deposit(Cell::new(0, GRID_SIZE as i32), 10.0);
        assert_eq!(field.level(Cell::new(-1, 0)), 0.0);
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_decay_is_geometric() {
        let mut field = PheromoneField::new();
        let cell = Cell::new(50, 50);
        field.deposit(cell, 100.0);
        for _ in 0..10 {
            field.decay();
        }
        let expected = 100.0 * PHEROMONE_DECAY_RATE.powi(10);
        assert!((field.level(cell) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_decay_snaps_tail_to_zero() {
        let mut field = PheromoneField::new();
        let cell = Cell::new(1, 1);
        field.deposit(cell, 0.00101);
        field.decay();
        assert_eq!(field.level(cell), 0.0);

        field.deposit(cell, 1.0);
        for _ in 0..400 {
            field.decay();
        }
        assert_eq!(field.level(cell), 0.0);
    }
}
