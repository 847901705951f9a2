use crate::error::{PlanError, PlanResult};
use crate::graph::GridGraph;
use crate::grid::Cell;
use crate::heuristic::Heuristic;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use tracing::debug;

/// Ordered, non-empty sequence of cells from a source to a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Wrap a cell sequence. Returns `None` for an empty sequence.
    pub fn new(cells: Vec<Cell>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Path { cells })
        }
    }

    /// Path that starts and ends at `cell`
    pub fn single(cell: Cell) -> Self {
        Path { cells: vec![cell] }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn source(&self) -> Cell {
        self.cells[0]
    }

    pub fn target(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of edges (moves) along the path
    pub fn edge_count(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Whether the path steps into `cell` at some point (the source does not count)
    pub fn enters(&self, cell: &Cell) -> bool {
        self.cells[1..].contains(cell)
    }

    /// Append `next`, dropping its first cell when it repeats our target
    pub fn join(mut self, next: &Path) -> Path {
        let skip = usize::from(next.source() == self.target());
        self.cells.extend_from_slice(&next.cells[skip..]);
        self
    }

    pub fn reversed(&self) -> Path {
        let mut cells = self.cells.clone();
        cells.reverse();
        Path { cells }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// A node in the A* open list
#[derive(Debug, Clone)]
struct SearchNode {
    cell: Cell,
    cost: u32,
    estimate: f64,
    seq: u64,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .estimate
            .partial_cmp(&self.estimate)
            .unwrap_or(Ordering::Equal)
            // Tie-breaker: prefer deeper nodes, then insertion order
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Find a path from `source` to `target`.
///
/// Without a heuristic this is a breadth-first search, so the result has the
/// fewest edges. With a heuristic it is A* with unit edge weights, and the
/// result is only guaranteed shortest when the heuristic is admissible.
/// Among equally short paths the one returned depends on the fixed
/// neighbour order (east, north, west, south), so repeated calls always
/// agree.
pub fn find_path(
    graph: &GridGraph,
    source: Cell,
    target: Cell,
    heuristic: Option<&dyn Heuristic>,
) -> PlanResult<Path> {
    if !graph.contains(&source) || !graph.contains(&target) {
        debug!(%source, %target, "endpoint is not a graph node");
        return Err(PlanError::NoPath { from: source, to: target });
    }
    if source == target {
        return Ok(Path::single(source));
    }

    let result = match heuristic {
        None => breadth_first(graph, source, target),
        Some(h) => a_star(graph, source, target, h),
    };

    match &result {
        Ok(path) => debug!(%source, %target, edges = path.edge_count(), "path found"),
        Err(_) => debug!(%source, %target, "no path"),
    }
    result
}

fn breadth_first(graph: &GridGraph, source: Cell, target: Cell) -> PlanResult<Path> {
    let grid = graph.grid();
    let mut parents: Vec<Option<Cell>> = vec![None; grid.cell_count()];
    let mut visited = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();

    visited[grid.get_id(&source)] = true;
    queue.push_back(source);

    while let Some(cell) = queue.pop_front() {
        if cell == target {
            return Ok(reconstruct(graph, &parents, source, target));
        }
        for next in graph.neighbours(&cell) {
            let id = grid.get_id(&next);
            if !visited[id] {
                visited[id] = true;
                parents[id] = Some(cell);
                queue.push_back(next);
            }
        }
    }

    Err(PlanError::NoPath { from: source, to: target })
}

fn a_star(
    graph: &GridGraph,
    source: Cell,
    target: Cell,
    heuristic: &dyn Heuristic,
) -> PlanResult<Path> {
    let grid = graph.grid();
    let mut parents: Vec<Option<Cell>> = vec![None; grid.cell_count()];
    let mut best_cost = vec![u32::MAX; grid.cell_count()];
    let mut queue = BinaryHeap::new();
    let mut seq = 0u64;
    let mut expansions = 0usize;

    best_cost[grid.get_id(&source)] = 0;
    queue.push(SearchNode {
        cell: source,
        cost: 0,
        estimate: heuristic.estimate(&source, &target),
        seq,
    });

    while let Some(node) = queue.pop() {
        // Stale entry superseded by a cheaper one
        if node.cost > best_cost[grid.get_id(&node.cell)] {
            continue;
        }
        if node.cell == target {
            debug!(expansions, "a* reached target");
            return Ok(reconstruct(graph, &parents, source, target));
        }
        expansions += 1;

        for next in graph.neighbours(&node.cell) {
            let id = grid.get_id(&next);
            let cost = node.cost + 1;
            if cost < best_cost[id] {
                best_cost[id] = cost;
                parents[id] = Some(node.cell);
                seq += 1;
                queue.push(SearchNode {
                    cell: next,
                    cost,
                    estimate: cost as f64 + heuristic.estimate(&next, &target),
                    seq,
                });
            }
        }
    }

    Err(PlanError::NoPath { from: source, to: target })
}

fn reconstruct(graph: &GridGraph, parents: &[Option<Cell>], source: Cell, target: Cell) -> Path {
    let grid = graph.grid();
    let mut cells = vec![target];
    let mut current = target;
    while current != source {
        match parents[grid.get_id(&current)] {
            Some(parent) => {
                cells.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    cells.reverse();
    Path { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::heuristic::Manhattan;

    #[test]
    fn test_join_drops_shared_cell() {
        let a = Path::new(vec![Cell::new(0, 0), Cell::new(1, 0)]).unwrap();
        let b = Path::new(vec![Cell::new(1, 0), Cell::new(1, 1)]).unwrap();
        let joined = a.join(&b);
        assert_eq!(
            joined.cells(),
            &[Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_empty_path_cannot_be_built() {
        assert!(Path::new(Vec::new()).is_none());
    }

    #[test]
    fn test_display() {
        let path = Path::new(vec![Cell::new(0, 0), Cell::new(0, 1)]).unwrap();
        assert_eq!(path.to_string(), "(0,0) -> (0,1)");
    }

    #[test]
    fn test_same_source_and_target() {
        let graph = GridGraph::build(Grid::open(2, 2).unwrap());
        let path = find_path(&graph, Cell::new(1, 1), Cell::new(1, 1), None).unwrap();
        assert_eq!(path.cells(), &[Cell::new(1, 1)]);
    }

    #[test]
    fn test_bfs_and_astar_agree_on_length() {
        let graph = GridGraph::build(Grid::new(5, 5, vec![Cell::new(2, 1), Cell::new(2, 2), Cell::new(2, 3)]).unwrap());
        let bfs = find_path(&graph, Cell::new(0, 2), Cell::new(4, 2), None).unwrap();
        let astar = find_path(&graph, Cell::new(0, 2), Cell::new(4, 2), Some(&Manhattan)).unwrap();
        assert_eq!(bfs.edge_count(), astar.edge_count());
        assert_eq!(bfs.edge_count(), 8);
    }
}
