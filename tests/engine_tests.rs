//! Step engine behaviour: Life rules, boundary injection, frontier cost.

use boundary_life::core::{BoundaryParams, Grid, SimpleRng};
use boundary_life::engine::{count_neighbors, StepEngine};
use boundary_life::types::{pulse_width, BoundaryType};

fn params(kind: BoundaryType, width: i64, offset: i64) -> BoundaryParams {
    BoundaryParams::new(kind, pulse_width(width), offset)
}

fn nothing() -> BoundaryParams {
    params(BoundaryType::Nothing, 5, 0)
}

fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}

#[test]
fn block_is_a_still_life() {
    let grid = Grid::with_live_cells(6, 6, 0, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
    let before = sorted(grid.active().to_vec());
    let mut engine = StepEngine::new(grid, nothing());

    for _ in 0..5 {
        let stats = engine.step(nothing());
        assert_eq!(stats.births, 0);
        assert_eq!(stats.deaths, 0);
        assert_eq!(sorted(engine.grid().active().to_vec()), before);
    }
}

#[test]
fn blinker_has_period_two() {
    let grid = Grid::with_live_cells(5, 5, 0, &[(1, 2), (2, 2), (3, 2)]);
    let horizontal = sorted(grid.active().to_vec());
    let mut engine = StepEngine::new(grid, nothing());

    engine.step(nothing());
    let vertical = sorted(engine.grid().active().to_vec());
    assert_eq!(vertical, vec![7, 12, 17]);

    engine.step(nothing());
    assert_eq!(sorted(engine.grid().active().to_vec()), horizontal);
}

#[test]
fn isolated_cell_dies() {
    let grid = Grid::with_live_cells(5, 5, 0, &[(2, 2)]);
    let mut engine = StepEngine::new(grid, nothing());
    let stats = engine.step(nothing());
    assert_eq!(stats.deaths, 1);
    assert_eq!(engine.grid().live_count(), 0);
    assert!(engine.grid().is_consistent());
}

#[test]
fn dead_cell_with_three_neighbours_is_born() {
    // L-tromino: (1,1) (2,1) (1,2) gives birth at (2,2).
    let grid = Grid::with_live_cells(5, 5, 0, &[(1, 1), (2, 1), (1, 2)]);
    let mut engine = StepEngine::new(grid, nothing());
    engine.step(nothing());
    assert!(engine.grid().is_alive(2, 2));
    assert_eq!(engine.grid().live_count(), 4);
}

#[test]
fn boundary_feeds_births_next_to_live_cells() {
    // Width-1 stripes: even columns on. Odd columns in the first live row see
    // two boundary cells; one live neighbour below makes three.
    let grid = Grid::with_live_cells(9, 6, 2, &[(4, 3)]);
    let mut engine = StepEngine::new(grid, nothing());

    let stats = engine.step(params(BoundaryType::Pulse, 1, 0));
    assert_eq!(sorted(engine.grid().active().to_vec()), vec![21, 23]);
    assert_eq!(stats.births, 2);
    assert_eq!(stats.deaths, 1);
    assert!(engine.grid().is_consistent());
}

#[test]
fn solid_boundary_counts_only_in_range_columns() {
    // Column 0 sees two solid cells; with (1,3) alive it reaches three.
    let grid = Grid::with_live_cells(9, 6, 2, &[(1, 3)]);
    let mut engine = StepEngine::new(grid, nothing());

    engine.step(params(BoundaryType::Solid, 5, 0));
    assert_eq!(sorted(engine.grid().active().to_vec()), vec![18]);
}

#[test]
fn boundary_alone_does_not_seed_an_empty_grid() {
    // Only frontier cells are evaluated; with nothing alive there is none.
    let mut engine = StepEngine::new(Grid::new(5, 5, 1), nothing());
    let stats = engine.step(params(BoundaryType::Solid, 5, 0));
    assert_eq!(stats.evaluated, 0);
    assert_eq!(engine.grid().live_count(), 0);
}

#[test]
fn nothing_boundary_contributes_zero() {
    let grid = Grid::with_live_cells(8, 8, 3, &[(4, 3)]);
    for col in 0..8 {
        assert_eq!(count_neighbors(&grid, col, 3, &nothing()) as u32, u32::from(col == 3 || col == 5));
    }
}

#[test]
fn pulse_stripes_follow_phase() {
    let grid = Grid::new(20, 6, 2);
    let p0 = params(BoundaryType::Pulse, 5, 0);
    let p5 = params(BoundaryType::Pulse, 5, 5);

    // Column 2 sits inside stripe [0,5) at phase 0 and stripe [5,10) at phase 5.
    assert_eq!(count_neighbors(&grid, 2, 2, &p0), 3);
    assert_eq!(count_neighbors(&grid, 2, 2, &p5), 0);
    // Column 5 borders a stripe edge: only column 4 is on at phase 0.
    assert_eq!(count_neighbors(&grid, 5, 2, &p0), 1);
}

#[test]
fn pulse_steps_are_deterministic() {
    let mut grid = Grid::new(64, 48, 4);
    grid.random_fill(&mut SimpleRng::new(2024));
    let mut a = StepEngine::new(grid.clone(), nothing());
    let mut b = StepEngine::new(grid, nothing());

    for step in 0..20i64 {
        let p = params(BoundaryType::Pulse, 5, (step * 5).rem_euclid(10));
        a.step(p);
        b.step(p);
    }
    assert_eq!(a.grid().cells(), b.grid().cells());
    assert!(a.grid().is_consistent());
}

#[test]
fn frontier_cost_is_bounded_by_nine_per_live_cell() {
    let cells: Vec<(u32, u32)> = (0..10).map(|i| (10 + i * 20, 50)).collect();
    let grid = Grid::with_live_cells(400, 400, 0, &cells);
    let mut engine = StepEngine::new(grid, nothing());

    let stats = engine.step(nothing());
    assert_eq!(stats.evaluated, 9 * cells.len());
    assert_eq!(stats.live, 0);
}

#[test]
fn active_set_stays_consistent_through_steps_and_toggles() {
    let mut grid = Grid::new(48, 40, 5);
    grid.random_fill(&mut SimpleRng::new(5));
    let mut engine = StepEngine::new(grid, nothing());
    assert!(engine.grid().is_consistent());

    for step in 0..30i64 {
        let kind = BoundaryType::ALL[(step % 4) as usize];
        engine.step(params(kind, 3, step));
        assert!(engine.grid().is_consistent(), "after step {}", step);

        let index = ((step * 37) % (48 * 40)) as u32;
        engine.toggle(index);
        assert!(engine.grid().is_consistent(), "after toggle {}", index);
    }
}

#[test]
fn boundary_rows_never_hold_live_cells_after_a_step() {
    let mut grid = Grid::new(10, 10, 3);
    for col in 0..10 {
        let index = grid.index(col, 1);
        grid.toggle(index);
    }
    let mut engine = StepEngine::new(grid, nothing());
    engine.step(params(BoundaryType::Solid, 5, 0));
    for index in engine.grid().active().iter() {
        assert!(engine.grid().coords(index).1 >= 3);
    }
}
