use crate::grid::{Cell, Grid};
use std::collections::BTreeSet;
use std::sync::Arc;

/// 4-connected traversal graph over the free cells of a grid.
///
/// The graph is a view: the base grid is shared behind an `Arc` and node
/// removals are kept in a small exclusion set, so `without_node` never
/// copies the grid. Nodes and edges are derived on demand from
/// `grid minus blocked minus excluded`.
#[derive(Debug, Clone)]
pub struct GridGraph {
    grid: Arc<Grid>,
    excluded: BTreeSet<Cell>,
}

impl GridGraph {
    /// Build the traversal graph for a grid (all free cells, 4-adjacency)
    pub fn build(grid: Grid) -> Self {
        GridGraph {
            grid: Arc::new(grid),
            excluded: BTreeSet::new(),
        }
    }

    /// Return a graph with `cell` and its incident edges removed.
    /// `self` is left untouched.
    pub fn without_node(&self, cell: Cell) -> Self {
        let mut excluded = self.excluded.clone();
        if self.contains(&cell) {
            excluded.insert(cell);
        }
        GridGraph {
            grid: Arc::clone(&self.grid),
            excluded,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whether a cell is a node of this graph
    pub fn contains(&self, cell: &Cell) -> bool {
        !self.grid.is_blocked(cell) && !self.excluded.contains(cell)
    }

    /// Neighbours of a node in the fixed order east, north, west, south
    pub fn neighbours(&self, cell: &Cell) -> impl Iterator<Item = Cell> + '_ {
        let candidates = if self.contains(cell) {
            cell.neighbours().to_vec()
        } else {
            Vec::new()
        };
        candidates.into_iter().filter(move |n| self.contains(n))
    }

    /// All nodes in row-major order
    pub fn nodes(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.grid.cell_count())
            .map(move |id| self.grid.get_coords(id))
            .filter(move |cell| self.contains(cell))
    }

    /// All undirected edges, each reported once with the smaller cell first
    pub fn edges(&self) -> Vec<(Cell, Cell)> {
        let mut edges = Vec::new();
        for cell in self.nodes() {
            for next in self.neighbours(&cell) {
                if cell < next {
                    edges.push((cell, next));
                }
            }
        }
        edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Whether `a` and `b` are both nodes and 4-adjacent
    pub fn has_edge(&self, a: &Cell, b: &Cell) -> bool {
        self.contains(a) && self.contains(b) && a.is_adjacent(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_grid_counts() {
        let graph = GridGraph::build(Grid::open(3, 3).unwrap());
        assert_eq!(graph.node_count(), 9);
        // 2 horizontal edges per row, 2 vertical per column
        assert_eq!(graph.edge_count(), 12);
    }

    #[test]
    fn test_blocked_cells_have_no_edges() {
        let blocked = Cell::new(1, 1);
        let graph = GridGraph::build(Grid::new(3, 3, vec![blocked]).unwrap());
        assert!(!graph.contains(&blocked));
        assert_eq!(graph.node_count(), 8);
        assert!(graph.edges().iter().all(|(a, b)| *a != blocked && *b != blocked));
        assert_eq!(graph.neighbours(&blocked).count(), 0);
    }

    #[test]
    fn test_without_node_leaves_original_intact() {
        let graph = GridGraph::build(Grid::open(3, 3).unwrap());
        let hazard = Cell::new(1, 0);
        let reduced = graph.without_node(hazard);

        assert!(graph.contains(&hazard));
        assert!(!reduced.contains(&hazard));
        assert_eq!(graph.node_count(), 9);
        assert_eq!(reduced.node_count(), 8);
        assert_eq!(reduced.edge_count(), 12 - 3);
    }

    #[test]
    fn test_without_missing_node_is_noop() {
        let graph = GridGraph::build(Grid::open(2, 2).unwrap());
        let reduced = graph.without_node(Cell::new(5, 5));
        assert_eq!(reduced.node_count(), graph.node_count());
        assert_eq!(reduced.edges(), graph.edges());
    }
}
