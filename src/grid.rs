use crate::error::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the grid, `x` grows east and `y` grows north
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Manhattan distance (number of 4-connected steps on an empty grid)
    pub fn manhattan(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Straight-line distance
    pub fn euclidean(&self, other: &Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The four orthogonal neighbours in fixed order: east, north, west, south.
    /// Search tie-breaking depends on this order staying stable.
    pub fn neighbours(&self) -> [Cell; 4] {
        [
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x, self.y - 1),
        ]
    }

    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Grid structure storing which cells are permanently blocked (pits, walls)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create a grid with the given blocked cells.
    ///
    /// Fails if either dimension is not positive or a blocked cell lies
    /// outside the grid.
    pub fn new<I>(width: i32, height: i32, blocked: I) -> PlanResult<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        if width <= 0 || height <= 0 {
            return Err(PlanError::InvalidGrid {
                reason: format!("dimensions must be positive, got {}x{}", width, height),
            });
        }

        // Cell ids are row-major `i32` products, so the cell count must fit one
        let cells = width.checked_mul(height).ok_or_else(|| PlanError::InvalidGrid {
            reason: format!("grid too large: {}x{}", width, height),
        })?;

        let mut grid = Grid {
            width,
            height,
            blocked: vec![false; cells as usize],
        };

        for cell in blocked {
            if !grid.in_bounds(&cell) {
                return Err(PlanError::InvalidGrid {
                    reason: format!(
                        "blocked cell {} lies outside the {}x{} grid",
                        cell, width, height
                    ),
                });
            }
            let id = grid.get_id(&cell);
            grid.blocked[id] = true;
        }

        Ok(grid)
    }

    /// Create a grid with no blocked cells
    pub fn open(width: i32, height: i32) -> PlanResult<Self> {
        Self::new(width, height, std::iter::empty())
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Check if a cell is blocked. Out of bounds counts as blocked.
    pub fn is_blocked(&self, cell: &Cell) -> bool {
        if !self.in_bounds(cell) {
            return true;
        }
        self.blocked[self.get_id(cell)]
    }

    /// Convert a cell to its row-major index
    pub fn get_id(&self, cell: &Cell) -> usize {
        cell.x as usize + cell.y as usize * self.width as usize
    }

    /// Convert a row-major index back to a cell
    pub fn get_coords(&self, id: usize) -> Cell {
        let id = id as i32;
        Cell::new(id % self.width, id / self.width)
    }

    /// All blocked cells in row-major order
    pub fn blocked_cells(&self) -> Vec<Cell> {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, &blocked)| blocked)
            .map(|(id, _)| self.get_coords(id))
            .collect()
    }

    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(matches!(Grid::open(0, 3), Err(PlanError::InvalidGrid { .. })));
        assert!(matches!(Grid::open(3, -1), Err(PlanError::InvalidGrid { .. })));
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        for (w, h) in [(50_000, 50_000), (70_000, 70_000), (i32::MAX, 2)] {
            match Grid::open(w, h) {
                Err(PlanError::InvalidGrid { reason }) => assert!(reason.contains("too large")),
                other => panic!("{}x{} should be rejected, got {:?}", w, h, other),
            }
        }
    }

    #[test]
    fn test_rejects_out_of_bounds_blocked_cell() {
        let result = Grid::new(3, 3, vec![Cell::new(3, 0)]);
        assert!(matches!(result, Err(PlanError::InvalidGrid { .. })));
    }

    #[test]
    fn test_id_roundtrip() {
        let grid = Grid::open(4, 3).unwrap();
        for id in 0..grid.cell_count() {
            assert_eq!(grid.get_id(&grid.get_coords(id)), id);
        }
    }

    #[test]
    fn test_blocked_lookup() {
        let grid = Grid::new(3, 3, vec![Cell::new(1, 1)]).unwrap();
        assert!(grid.is_blocked(&Cell::new(1, 1)));
        assert!(!grid.is_blocked(&Cell::new(0, 1)));
        assert!(grid.is_blocked(&Cell::new(-1, 0)), "out of bounds is blocked");
        assert_eq!(grid.blocked_cells(), vec![Cell::new(1, 1)]);
    }
}
