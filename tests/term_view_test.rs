use tile_pop::core::{Grid, GridSnapshot};
use tile_pop::term::{tile_color, GameView, StatusView, Viewport};
use tile_pop::types::CellPos;

fn snapshot_of(rows: Vec<Vec<Option<u8>>>) -> GridSnapshot {
    let mut snap = GridSnapshot::default();
    snap.fill_from(&Grid::from_rows(rows).unwrap());
    snap
}

#[test]
fn term_view_renders_border_corners() {
    let snap = snapshot_of(vec![vec![Some(0); 5]; 6]);
    let view = GameView::default();

    // With cell_w=4 and cell_h=2: 5*4 by 6*2 => 20x12, plus border => 22x14.
    let fb = view.render(&snap, &StatusView::default(), Viewport::new(22, 14));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 13).unwrap().ch, '└');
    assert_eq!(fb.get(21, 13).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_tiles_in_palette_colors() {
    let snap = snapshot_of(vec![vec![Some(0), Some(1)], vec![None, Some(2)]]);
    let view = GameView::new(2, 1);
    let fb = view.render(&snap, &StatusView::default(), Viewport::new(6, 4));

    // Bottom row (row 0) sits just above the lower border.
    let bottom_left = fb.get(1, 2).unwrap();
    assert_eq!(bottom_left.ch, '█');
    assert_eq!(bottom_left.style.fg, tile_color(0));
    assert_eq!(fb.get(3, 2).unwrap().style.fg, tile_color(1));
    assert_eq!(fb.get(4, 1).unwrap().style.fg, tile_color(2));
    assert_ne!(fb.get(1, 1).unwrap().ch, '█');
}

#[test]
fn term_view_marks_cursor() {
    let snap = snapshot_of(vec![vec![Some(0), Some(1)]]);
    let view = GameView::new(1, 1);
    let status = StatusView {
        cursor: Some(CellPos::new(0, 1)),
        ..StatusView::default()
    };
    let fb = view.render(&snap, &status, Viewport::new(4, 3));

    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(2, 1).unwrap().ch, '▓');
}

#[test]
fn term_view_shows_no_moves_overlay() {
    let snap = snapshot_of(vec![vec![Some(0); 5]; 6]);
    let view = GameView::default();
    let vp = Viewport::new(22, 14);

    let calm = view.render(&snap, &StatusView::default(), vp);
    assert!(!calm.row_text(7).contains("NO MOVES"));

    let status = StatusView {
        no_moves: true,
        ..StatusView::default()
    };
    let fb = view.render(&snap, &status, vp);
    assert!(fb.row_text(7).contains("NO MOVES"));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let snap = snapshot_of(vec![vec![Some(0); 5]; 6]);
    let view = GameView::default();
    let status = StatusView {
        cursor: None,
        busy: true,
        no_moves: false,
        collects: 12,
    };
    let fb = view.render(&snap, &status, Viewport::new(60, 14));

    let text: Vec<String> = (0..14).map(|y| fb.row_text(y)).collect();
    let all = text.join("\n");
    assert!(all.contains("CLEARED"));
    assert!(all.contains("12"));
    assert!(all.contains("30/30"));
    assert!(all.contains("busy"));
}

#[test]
fn term_view_click_maps_back_to_cell() {
    let snap = snapshot_of(vec![vec![Some(0); 5]; 6]);
    let view = GameView::default();
    let vp = Viewport::new(22, 14);

    // Top-left tile is the highest row.
    assert_eq!(view.cell_at(&snap, vp, 1, 1), Some(CellPos::new(5, 0)));
    // Bottom-right tile is row 0.
    assert_eq!(view.cell_at(&snap, vp, 20, 12), Some(CellPos::new(0, 4)));
    assert_eq!(view.cell_at(&snap, vp, 0, 5), None);
    assert_eq!(view.cell_at(&snap, vp, 21, 5), None);
}

#[test]
fn term_view_clips_boards_wider_than_the_screen() {
    let snap = snapshot_of(vec![vec![Some(0); 17_000]]);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let status = StatusView {
        cursor: Some(CellPos::new(0, 16_999)),
        no_moves: true,
        ..StatusView::default()
    };
    let fb = view.render(&snap, &status, vp);

    // 1 row of 2-high tiles plus border => 4 rows, centered at y=10.
    assert_eq!(fb.get(0, 10).unwrap().ch, '┌');
    assert_eq!(fb.get(79, 10).unwrap().ch, '─');
    assert_eq!(fb.get(1, 11).unwrap().ch, '█');
    assert_eq!(fb.get(79, 11).unwrap().ch, '█');
    assert!(fb.row_text(12).contains("NO MOVES"));

    assert_eq!(view.cell_at(&snap, vp, 1, 11), Some(CellPos::new(0, 0)));
    assert_eq!(view.cell_at(&snap, vp, 79, 12), Some(CellPos::new(0, 19)));
}

#[test]
fn term_view_clips_boards_taller_than_the_screen() {
    let snap = snapshot_of(vec![vec![Some(1)]; 40_000]);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, &StatusView::default(), vp);

    // Frame starts at the top; the highest row is the first one drawn.
    assert_eq!(fb.get(37, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(39, 1).unwrap().style.fg, tile_color(1));
    assert_eq!(fb.get(39, 23).unwrap().ch, '█');
    assert_eq!(view.cell_at(&snap, vp, 39, 1), Some(CellPos::new(39_999, 0)));
}
