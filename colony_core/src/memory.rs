use std::collections::VecDeque;

use super::MEMORY_LENGTH;
use super::geometry::Cell;

/// Bounded FIFO of recently visited cells, used to keep ants from looping.
#[derive(Debug, Clone)]
pub struct ShortTermMemory {
    cells: VecDeque<Cell>,
    capacity: usize,
}

impl ShortTermMemory {
    /// Memory seeded with the cell the ant starts on.
    pub fn starting_at(cell: Cell) -> Self {
        let mut cells = VecDeque::with_capacity(MEMORY_LENGTH);
        cells.push_back(cell);
        Self {
            cells,
            capacity: MEMORY_LENGTH,
        }
    }

    /// Records a visit, evicting the oldest entry once full.
    pub fn push(&mut self, cell: Cell) {
        if self.cells.len() == self.capacity {
            self.cells.pop_front();
        }
        self.cells.push_back(cell);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
