use blockfall::core::GameEngine;
use blockfall::term::{piece_color, FrameBuffer, GameView, Viewport};
use blockfall::types::{PieceKind, EMPTY};

fn find(fb: &FrameBuffer, ch: char) -> Option<(u16, u16)> {
    (0..fb.height())
        .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
        .find(|&(x, y)| fb.get(x, y).map(|g| g.ch) == Some(ch))
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameEngine::new(1).snapshot();
    let view = GameView::default();

    // 12 cells * 2 columns + border = 26 wide, 20 rows + border = 22 tall.
    let fb = view.render(&snap, Viewport::new(26, 22));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(25, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(25, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_two_columns_wide() {
    let mut snap = GameEngine::new(1).snapshot();
    snap.active = None;
    snap.board[19 * 12] = PieceKind::Z.cell();

    let fb = GameView::default().render(&snap, Viewport::new(26, 22));
    for x in [1, 2] {
        let glyph = fb.get(x, 20).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, piece_color(PieceKind::Z));
    }
    assert_eq!(fb.get(3, 20).unwrap().ch, ' ');
}

#[test]
fn term_view_draws_active_and_ghost() {
    let snap = GameEngine::new(1).snapshot();
    let active = snap.active.unwrap();
    let fb = GameView::default().render(&snap, Viewport::new(26, 22));

    let (x, y) = active.cells_at(active.y).next().unwrap();
    let glyph = fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap();
    assert_eq!(glyph.ch, '█');
    assert_eq!(glyph.style.fg, piece_color(active.kind));

    let (gx, gy) = active.cells_at(active.ghost_y).next().unwrap();
    let ghost = fb.get(1 + gx as u16 * 2, 1 + gy as u16).unwrap();
    assert_eq!(ghost.ch, '░');
    assert!(ghost.style.dim);

    let plain = GameView::default()
        .with_ghost(false)
        .render(&snap, Viewport::new(26, 22));
    assert_eq!(find(&plain, '░'), None);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut engine = GameEngine::new(1);
    engine.hold();
    let snap = engine.snapshot();

    let text = GameView::default().render(&snap, Viewport::new(60, 30)).to_text();
    assert!(text.contains("LINES"));
    assert!(text.contains("NEXT"));
    assert!(text.contains("HOLD"));
}

#[test]
fn term_view_overlays() {
    let mut snap = GameEngine::new(1).snapshot();
    snap.paused = true;
    let text = GameView::default().render(&snap, Viewport::new(40, 24)).to_text();
    assert!(text.contains("PAUSED"));

    snap.paused = false;
    snap.game_over = true;
    snap.active = None;
    snap.board.fill(EMPTY);
    let text = GameView::default().render(&snap, Viewport::new(40, 24)).to_text();
    assert!(text.contains("GAME OVER"));
}

#[test]
fn term_view_follows_board_dimensions() {
    let config = blockfall::core::EngineConfig {
        board_width: 6,
        board_height: 8,
        ..Default::default()
    };
    let snap = GameEngine::with_config(config, 1).unwrap().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(14, 10));
    assert_eq!(fb.get(13, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = GameEngine::new(1).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, Viewport::new(30, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 24));
    assert!(find(&fb, '┌').is_some());
}
