//! Grid state model: index math, toggling, random fill.

use boundary_life::core::{Grid, GridError, SimpleRng};

#[test]
fn index_and_coords_round_trip_everywhere() {
    let grid = Grid::new(7, 5, 2);
    for row in 0..5 {
        for col in 0..7 {
            let index = grid.index(col, row);
            assert_eq!(index, col + row * 7);
            assert_eq!(grid.coords(index), (col, row));
        }
    }
}

#[test]
fn toggle_twice_is_identity() {
    let mut grid = Grid::new(10, 10, 3);
    grid.random_fill(&mut SimpleRng::new(99));
    let before_cells = grid.cells().to_vec();
    let mut before_active = grid.active().to_vec();
    before_active.sort_unstable();

    let index = grid.index(4, 6);
    grid.toggle(index);
    grid.toggle(index);

    let mut after_active = grid.active().to_vec();
    after_active.sort_unstable();
    assert_eq!(grid.cells(), &before_cells[..]);
    assert_eq!(after_active, before_active);
}

#[test]
fn random_fill_leaves_boundary_rows_dead() {
    let mut grid = Grid::new(40, 30, 6);
    grid.random_fill(&mut SimpleRng::new(3));
    assert!(grid.is_consistent());
    assert!(grid.live_count() > 0);
    for index in grid.active().iter() {
        let (_, row) = grid.coords(index);
        assert!(row >= 6);
    }
}

#[test]
fn random_fill_is_deterministic_per_seed() {
    let mut a = Grid::new(20, 20, 2);
    let mut b = Grid::new(20, 20, 2);
    a.random_fill(&mut SimpleRng::new(1234));
    b.random_fill(&mut SimpleRng::new(1234));
    assert_eq!(a.cells(), b.cells());
}

#[test]
fn from_parts_rejects_inconsistent_payloads() {
    let err = Grid::from_parts(vec![0; 8], &[], 3, 3, 0).unwrap_err();
    assert_eq!(err, GridError::SizeMismatch { expected: 9, actual: 8 });

    let err = Grid::from_parts(vec![0; 9], &[9], 3, 3, 0).unwrap_err();
    assert!(matches!(err, GridError::IndexOutOfRange { index: 9, .. }));

    let mut cells = vec![0; 9];
    cells[2] = 1;
    let err = Grid::from_parts(cells, &[], 3, 3, 0).unwrap_err();
    assert_eq!(err, GridError::ActiveSetMismatch { live: 1, listed: 0 });
}

#[test]
fn into_parts_then_from_parts_preserves_state() {
    let mut grid = Grid::new(12, 9, 1);
    grid.random_fill(&mut SimpleRng::new(77));
    let live = grid.live_count();

    let (cells, active) = grid.into_parts();
    let rebuilt = Grid::from_parts(cells, &active, 12, 9, 1).unwrap();
    assert_eq!(rebuilt.live_count(), live);
    assert!(rebuilt.is_consistent());
}
