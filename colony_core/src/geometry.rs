use rand::Rng;
use serde::{Deserialize, Serialize};

use super::GRID_SIZE;

/// Integer grid coordinate. May lie outside the grid; every consumer bounds-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn in_bounds(&self) -> bool {
        let size = GRID_SIZE as i32;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }

    /// Neighbour one unit away along `dir`. Not clamped.
    #[inline(always)]
    pub fn step(&self, dir: Direction) -> Cell {
        let (dx, dy) = dir.offset();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(&self, other: Cell) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn chebyshev_to(&self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Flat row-major index, or None when outside the grid.
    #[inline(always)]
    pub(crate) fn index(&self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * GRID_SIZE + self.x as usize)
        } else {
            None
        }
    }
}

/// 8-way compass heading, clockwise from north. Screen coordinates: north is -y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Scan order used by every neighbour sweep.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(8) as usize]
    }

    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        self.index() % 2 != 0
    }

    /// Rotates clockwise by `units` eighths of a turn (negative turns counter-clockwise).
    pub fn turned(self, units: i32) -> Self {
        Self::from_index(self.index() + units)
    }

    /// Greedy heading that shrinks both axis deltas toward the target.
    /// Diagonals win whenever both deltas are non-zero.
    pub fn toward(dx: i32, dy: i32) -> Option<Self> {
        let dir = match (dx.signum(), dy.signum()) {
            (0, 0) => return None,
            (1, 1) => Direction::SouthEast,
            (1, -1) => Direction::NorthEast,
            (1, _) => Direction::East,
            (-1, 1) => Direction::SouthWest,
            (-1, -1) => Direction::NorthWest,
            (-1, _) => Direction::West,
            (_, 1) => Direction::South,
            _ => Direction::North,
        };
        Some(dir)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_index(rng.random_range(0..8))
    }
}
