//! Grid engine tests - matching, removal, refill and the solvability cap

use tile_pop::core::{
    EventLog, Grid, GridConfig, GridEngine, GridError, GroupProbe, NullSink, ScriptedRng,
    SimpleRng,
};
use tile_pop::types::{CellPos, GridEvent, MAX_REGEN_ATTEMPTS};

const ROWS: usize = 6;
const COLUMNS: usize = 5;

/// Colors drawn in column-major order for a 6x5 board with palette 4.
///
/// The base pattern `(row + 2 * col) % 4` has no two equal neighbors; the
/// bottom-left 2x2 block is painted color 3 and is the only group on the board.
fn block_script() -> Vec<u32> {
    let mut script = Vec::with_capacity(ROWS * COLUMNS);
    for col in 0..COLUMNS {
        for row in 0..ROWS {
            let color = if row < 2 && col < 2 { 3 } else { (row + 2 * col) % 4 };
            script.push(color as u32);
        }
    }
    script
}

fn block_positions() -> Vec<CellPos> {
    sorted(vec![
        CellPos::new(0, 0),
        CellPos::new(1, 0),
        CellPos::new(0, 1),
        CellPos::new(1, 1),
    ])
}

/// Column-major checkerboard: no two orthogonal neighbors share a color.
fn checkerboard_script() -> Vec<u32> {
    let mut script = Vec::with_capacity(ROWS * COLUMNS);
    for col in 0..COLUMNS {
        for row in 0..ROWS {
            script.push(((row + col) % 2) as u32);
        }
    }
    script
}

fn block_engine() -> GridEngine<EventLog> {
    let mut rng = ScriptedRng::new(block_script());
    GridEngine::initialize(GridConfig::default(), EventLog::new(), &mut rng).unwrap()
}

fn sorted(mut cells: Vec<CellPos>) -> Vec<CellPos> {
    cells.sort();
    cells
}

#[test]
fn test_initialize_fills_every_cell() {
    let engine = GridEngine::initialize(GridConfig::default(), NullSink, &mut SimpleRng::new(1))
        .unwrap();
    assert_eq!(engine.rows(), ROWS);
    assert_eq!(engine.columns(), COLUMNS);
    assert_eq!(engine.occupied_count(), ROWS * COLUMNS);
    assert!(engine.grid().is_full());

    for row in 0..ROWS {
        for col in 0..COLUMNS {
            let color = engine.cell(row, col).unwrap();
            assert!(matches!(color, Some(c) if c < 4), "bad cell ({row}, {col})");
        }
    }
}

#[test]
fn test_initialize_is_deterministic_per_seed() {
    let a = GridEngine::initialize(GridConfig::default(), NullSink, &mut SimpleRng::new(77))
        .unwrap();
    let b = GridEngine::initialize(GridConfig::default(), NullSink, &mut SimpleRng::new(77))
        .unwrap();
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn test_initialize_reports_every_created_cell() {
    let engine = block_engine();
    let created = engine
        .sink()
        .events()
        .iter()
        .filter(|e| matches!(e, GridEvent::CellCreated { .. }))
        .count();
    assert_eq!(created, ROWS * COLUMNS);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let mut rng = SimpleRng::new(1);
    for config in [
        GridConfig::new(0, 5, 4),
        GridConfig::new(6, 0, 4),
        GridConfig::new(6, 5, 0),
        GridConfig::default().with_min_group_size(0),
    ] {
        let result = GridEngine::initialize(config, NullSink, &mut rng);
        assert!(
            matches!(result, Err(GridError::InvalidConfiguration(_))),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn test_collect_removes_exactly_the_group() {
    let mut engine = block_engine();
    let before = engine.grid().clone();

    let removed = engine.collect_group(1, 1).unwrap();
    assert_eq!(sorted(removed.clone()), block_positions());
    assert_eq!(engine.occupied_count(), ROWS * COLUMNS - 4);

    for row in 0..ROWS {
        for col in 0..COLUMNS {
            let pos = CellPos::new(row, col);
            if block_positions().contains(&pos) {
                assert_eq!(engine.cell(row, col).unwrap(), None);
            } else {
                assert_eq!(engine.grid().get(row, col), before.get(row, col));
            }
        }
    }

    assert_eq!(
        engine.sink().events().last(),
        Some(&GridEvent::CellsRemoved(removed))
    );
}

#[test]
fn test_small_group_and_empty_cell_are_no_ops() {
    let mut engine = block_engine();
    let before = engine.snapshot();
    let events = engine.sink().len();

    // Singleton, clicked twice.
    assert_eq!(engine.collect_group(5, 4).unwrap(), Vec::new());
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.collect_group(5, 4).unwrap(), Vec::new());
    assert_eq!(engine.probe_group(5, 4).unwrap(), GroupProbe::TooSmall(1));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.sink().len(), events);

    // Empty cell after a collect, clicked twice.
    engine.collect_group(0, 0).unwrap();
    let after = engine.snapshot();
    assert_eq!(engine.collect_group(0, 0).unwrap(), Vec::new());
    assert_eq!(engine.collect_group(0, 0).unwrap(), Vec::new());
    assert_eq!(engine.probe_group(0, 0).unwrap(), GroupProbe::Empty);
    assert_eq!(engine.snapshot(), after);
}

#[test]
fn test_out_of_bounds_click_is_an_error() {
    let mut engine = block_engine();
    let err = engine.collect_group(ROWS, 0).unwrap_err();
    assert!(matches!(err, GridError::OutOfBounds { row: 6, col: 0, .. }));
    assert!(engine.probe_group(0, COLUMNS).is_err());
    assert!(engine.cell(99, 99).is_err());
}

#[test]
fn test_three_by_three_group() {
    let mut rows = vec![vec![Some(0u8), Some(1), Some(0), Some(1)]; 4];
    for row in rows.iter_mut().take(3) {
        row[..3].fill(Some(2));
    }
    let grid = Grid::from_rows(rows).unwrap();
    let mut engine = GridEngine::from_grid(grid, 3, NullSink).unwrap();

    assert_eq!(engine.probe_group(1, 1).unwrap(), GroupProbe::Removable(9));
    assert_eq!(engine.collect_group(2, 2).unwrap().len(), 9);
}

#[test]
fn test_single_color_board_is_one_group_from_every_seed() {
    let grid = Grid::from_rows(vec![vec![Some(1); 3]; 3]).unwrap();
    let engine = GridEngine::from_grid(grid, 3, NullSink).unwrap();
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(engine.probe_group(row, col).unwrap(), GroupProbe::Removable(9));
        }
    }

    let mut engine = engine;
    let removed = sorted(engine.collect_group(2, 0).unwrap());
    let mut expected: Vec<CellPos> = (0..3)
        .flat_map(|row| (0..3).map(move |col| CellPos::new(row, col)))
        .collect();
    expected.sort();
    assert_eq!(removed, expected);
    assert_eq!(engine.occupied_count(), 0);
}

#[test]
fn test_groups_do_not_connect_diagonally() {
    let grid = Grid::from_rows(vec![
        vec![Some(1), Some(0), Some(1)],
        vec![Some(0), Some(1), Some(0)],
        vec![Some(1), Some(0), Some(1)],
    ])
    .unwrap();
    let engine = GridEngine::from_grid(grid, 3, NullSink).unwrap();
    assert_eq!(engine.probe_group(1, 1).unwrap(), GroupProbe::TooSmall(1));
    assert!(!engine.has_any_match(2));
}

#[test]
fn test_refill_leaves_no_floating_gaps() {
    let mut engine = block_engine();
    let before = engine.grid().clone();
    engine.collect_group(0, 0).unwrap();

    let outcome = engine.refill(&mut SimpleRng::new(5));
    assert!(outcome.solvable);
    assert_eq!(engine.occupied_count(), ROWS * COLUMNS);
    for col in 0..COLUMNS {
        assert!(engine.grid().column_is_packed(col));
    }

    // Survivors in the first two columns slid down by two rows.
    if outcome.attempts == 0 {
        for col in 0..2 {
            for row in 2..ROWS {
                assert_eq!(engine.grid().get(row - 2, col), before.get(row, col));
            }
        }
    }
}

#[test]
fn test_refill_reports_moves_then_creations() {
    let mut engine = block_engine();
    engine.collect_group(0, 0).unwrap();
    engine.sink_mut().clear();

    engine.compact_and_fill(&mut ScriptedRng::new(vec![0, 1, 2, 3]));
    let events = engine.sink().events();

    let moved = events
        .iter()
        .filter(|e| matches!(e, GridEvent::CellMoved { .. }))
        .count();
    let created = events
        .iter()
        .filter(|e| matches!(e, GridEvent::CellCreated { .. }))
        .count();
    assert_eq!(moved, 8);
    assert_eq!(created, 4);
    assert!(events.contains(&GridEvent::CellMoved {
        pos: CellPos::new(0, 0),
        from_row: 2,
    }));
    assert!(events.contains(&GridEvent::CellCreated {
        pos: CellPos::new(5, 1),
        color: 3,
    }));
}

#[test]
fn test_has_any_match_threshold() {
    let engine = block_engine();
    assert!(engine.has_any_match(1));
    assert!(engine.has_any_match(4));
    assert!(!engine.has_any_match(5));
}

#[test]
fn test_ensure_solvable_stops_after_the_cap() {
    let grid = Grid::from_rows(vec![vec![Some(0); COLUMNS]; ROWS]).unwrap();
    let mut engine = GridEngine::from_grid(grid, 4, EventLog::new()).unwrap();
    engine.collect_group(0, 0).unwrap();
    engine.sink_mut().clear();

    let mut rng = ScriptedRng::new(checkerboard_script());
    let outcome = engine.ensure_solvable(3, &mut rng);

    assert_eq!(outcome.attempts, MAX_REGEN_ATTEMPTS);
    assert!(!outcome.solvable);
    assert_eq!(rng.draws(), (ROWS * COLUMNS) as u64 * MAX_REGEN_ATTEMPTS as u64);
    assert!(!engine.has_any_match(3));
    assert!(engine.grid().is_full());

    let states: Vec<bool> = engine
        .sink()
        .events()
        .iter()
        .filter_map(|e| match e {
            GridEvent::NoMovesState(active) => Some(*active),
            _ => None,
        })
        .collect();
    assert_eq!(states.len(), MAX_REGEN_ATTEMPTS as usize + 1);
    assert_eq!(states.last(), Some(&false));
    assert!(states[..MAX_REGEN_ATTEMPTS as usize].iter().all(|&s| s));
}

#[test]
fn test_initialize_survives_an_exhausted_cap() {
    let mut rng = ScriptedRng::new(checkerboard_script());
    let engine = GridEngine::initialize(GridConfig::default(), NullSink, &mut rng).unwrap();
    assert!(engine.grid().is_full());
    assert!(!engine.has_any_match(3));
    assert_eq!(
        rng.draws(),
        (ROWS * COLUMNS) as u64 * (MAX_REGEN_ATTEMPTS as u64 + 1)
    );
}

#[test]
fn test_every_refill_keeps_a_move() {
    let mut rng = SimpleRng::new(2024);
    let mut engine = GridEngine::initialize(GridConfig::default(), NullSink, &mut rng).unwrap();

    for _ in 0..200 {
        assert!(engine.has_any_match(3));
        let target = (0..ROWS)
            .flat_map(|row| (0..COLUMNS).map(move |col| (row, col)))
            .find(|&(row, col)| {
                matches!(engine.probe_group(row, col), Ok(GroupProbe::Removable(_)))
            });
        let Some((row, col)) = target else {
            panic!("solvable board without a removable group");
        };
        assert!(!engine.collect_group(row, col).unwrap().is_empty());
        let outcome = engine.refill(&mut rng);
        assert!(outcome.solvable);
        assert!(engine.grid().is_full());
    }
}
