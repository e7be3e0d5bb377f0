use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{get_shape, Board, GameEngine, GameSnapshot};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{PieceKind, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

fn bench_advance(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);

    c.bench_function("engine_advance_16ms", |b| {
        b.iter(|| {
            engine.advance(black_box(TICK_MS));
            if engine.is_game_over() {
                engine.reset();
            }
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
            for y in 16..20 {
                for x in 0..BOARD_WIDTH as i16 {
                    board.set(x, y, 5);
                }
            }
            black_box(board.sweep_completed_rows());
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
    let shape = get_shape(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| black_box(board.collides(&shape, black_box(5), black_box(10))))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let shape = get_shape(PieceKind::I);

    c.bench_function("rotate_shape", |b| {
        b.iter(|| black_box(shape.rotated(black_box(RotationDirection::Clockwise))))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = GameEngine::new(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            engine.hard_drop();
            engine.drain_events().for_each(drop);
            if engine.is_game_over() {
                engine.reset();
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let engine = GameEngine::new(12345);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_sweep,
    bench_collides,
    bench_rotate,
    bench_hard_drop,
    bench_render
);
criterion_main!(benches);
