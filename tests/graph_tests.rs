use gridhunt::{Cell, Grid, GridGraph, PlanError};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Random grid up to 8x8 with roughly a quarter of the cells blocked
fn arb_grid() -> impl Strategy<Value = Grid> {
    (1i32..=8, 1i32..=8).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::bool::weighted(0.25), (w * h) as usize).prop_map(move |mask| {
            let blocked = mask
                .iter()
                .enumerate()
                .filter(|(_, &b)| b)
                .map(|(id, _)| Cell::new(id as i32 % w, id as i32 / w));
            Grid::new(w, h, blocked).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn edges_join_adjacent_free_cells(grid in arb_grid()) {
        let graph = GridGraph::build(grid.clone());
        for (a, b) in graph.edges() {
            prop_assert_eq!(a.manhattan(&b), 1);
            prop_assert!(!grid.is_blocked(&a));
            prop_assert!(!grid.is_blocked(&b));
        }
    }

    #[test]
    fn node_set_is_grid_minus_blocked(grid in arb_grid()) {
        let graph = GridGraph::build(grid.clone());
        let nodes: BTreeSet<Cell> = graph.nodes().collect();
        let mut expected = BTreeSet::new();
        for y in 0..grid.height {
            for x in 0..grid.width {
                let cell = Cell::new(x, y);
                if !grid.is_blocked(&cell) {
                    expected.insert(cell);
                }
            }
        }
        prop_assert_eq!(nodes, expected);
    }

    #[test]
    fn every_adjacent_pair_of_nodes_is_an_edge(grid in arb_grid()) {
        let graph = GridGraph::build(grid);
        let edges: BTreeSet<(Cell, Cell)> = graph.edges().into_iter().collect();
        for cell in graph.nodes() {
            for next in [Cell::new(cell.x + 1, cell.y), Cell::new(cell.x, cell.y + 1)] {
                if graph.contains(&next) {
                    prop_assert!(edges.contains(&(cell, next)));
                }
            }
        }
    }

    #[test]
    fn neighbours_are_symmetric(grid in arb_grid()) {
        let graph = GridGraph::build(grid);
        for cell in graph.nodes() {
            prop_assert!(!graph.neighbours(&cell).any(|n| n == cell), "no self loops");
            for next in graph.neighbours(&cell) {
                prop_assert!(graph.neighbours(&next).any(|n| n == cell));
            }
        }
    }

    #[test]
    fn removing_a_node_keeps_both_variants(grid in arb_grid(), pick in any::<prop::sample::Index>()) {
        let graph = GridGraph::build(grid);
        let nodes: Vec<Cell> = graph.nodes().collect();
        prop_assume!(!nodes.is_empty());
        let removed = nodes[pick.index(nodes.len())];

        let reduced = graph.without_node(removed);
        prop_assert!(graph.contains(&removed));
        prop_assert!(!reduced.contains(&removed));
        prop_assert_eq!(reduced.node_count() + 1, graph.node_count());
        prop_assert!(reduced.edges().iter().all(|(a, b)| *a != removed && *b != removed));
    }
}

#[test]
fn test_invalid_dimensions_rejected() {
    for (w, h) in [(0, 4), (4, 0), (-2, 3)] {
        let result = Grid::open(w, h);
        assert!(
            matches!(result, Err(PlanError::InvalidGrid { .. })),
            "{}x{} should be rejected",
            w,
            h
        );
    }
}

#[test]
fn test_blocked_cell_outside_grid_rejected() {
    let result = Grid::new(4, 4, vec![Cell::new(1, 1), Cell::new(0, 4)]);
    match result {
        Err(PlanError::InvalidGrid { reason }) => assert!(reason.contains("(0,4)")),
        other => panic!("Expected InvalidGrid, got {:?}", other),
    }
}

#[test]
fn test_build_is_deterministic() {
    let grid = Grid::new(5, 4, vec![Cell::new(2, 2), Cell::new(3, 0)]).unwrap();
    let first = GridGraph::build(grid.clone());
    let second = GridGraph::build(grid);
    assert_eq!(first.edges(), second.edges());
    assert_eq!(first.nodes().collect::<Vec<_>>(), second.nodes().collect::<Vec<_>>());
}

#[test]
fn test_fully_blocked_grid_is_empty() {
    let grid = Grid::new(2, 1, vec![Cell::new(0, 0), Cell::new(1, 0)]).unwrap();
    let graph = GridGraph::build(grid);
    assert_eq!(graph.node_count(), 0);
    assert!(graph.edges().is_empty());
}
