//! Engine tests - whole rounds driven through the public API

use blockfall::core::{EngineConfig, GameEngine, LockResetPolicy, LockState};
use blockfall::types::{EngineEvent, GameAction, PieceKind, TICK_MS};

fn drain(engine: &mut GameEngine) -> Vec<EngineEvent> {
    engine.drain_events().collect()
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::RotateCcw,
        GameAction::SoftDrop,
    ];

    let mut a = GameEngine::new(2024);
    let mut b = GameEngine::new(2024);
    for action in script {
        assert_eq!(a.apply_action(action), b.apply_action(action));
        a.advance(TICK_MS);
        b.advance(TICK_MS);
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(drain(&mut a), drain(&mut b));
}

#[test]
fn test_hard_drops_eventually_end_the_round() {
    let mut engine = GameEngine::new(77);
    let mut drops = 0;
    while !engine.is_game_over() {
        assert!(engine.hard_drop());
        drops += 1;
        assert!(drops < 200, "stack never reached the top");
    }

    let events = drain(&mut engine);
    assert_eq!(events.last(), Some(&EngineEvent::GameOver));
    assert_eq!(
        events.iter().filter(|e| **e == EngineEvent::GameOver).count(),
        1
    );
    assert!(engine.board().is_empty());
    assert!(engine.active().is_none());
    assert!(!engine.hard_drop());
    assert!(!engine.toggle_pause());
}

#[test]
fn test_reset_after_game_over() {
    let mut engine = GameEngine::new(5);
    while !engine.is_game_over() {
        engine.hard_drop();
    }
    engine.reset();

    assert!(!engine.is_game_over());
    assert_eq!(engine.lines(), 0);
    assert!(engine.active().is_some());
    assert!(drain(&mut engine).is_empty());
}

#[test]
fn test_piece_falls_and_locks_by_time_alone() {
    let mut engine = GameEngine::new(3);
    let first = engine.active().unwrap().kind;

    // Generous upper bound: 20 rows at just over 1s each plus the lock delay.
    let mut elapsed = 0;
    while drain(&mut engine).is_empty() {
        engine.advance(TICK_MS);
        elapsed += TICK_MS;
        assert!(elapsed < 25_000, "piece never locked");
    }
    assert!(elapsed > 18_000);
    assert!(!engine.board().is_empty());
    assert!(engine.board().cells().contains(&first.cell()));
}

#[test]
fn test_one_drop_per_advance_even_with_large_elapsed() {
    let mut engine = GameEngine::new(3);
    let y = engine.active().unwrap().y;
    engine.advance(10_000);
    assert_eq!(engine.active().unwrap().y, y + 1);
}

#[test]
fn test_ghost_tracks_moves() {
    let mut engine = GameEngine::new(8);
    let (gx, _) = engine.ghost_position().unwrap();
    assert_eq!(gx, engine.active().unwrap().x);
    engine.move_left();
    let (gx2, _) = engine.ghost_position().unwrap();
    assert_eq!(gx2, engine.active().unwrap().x);
}

#[test]
fn test_left_wall_stops_movement() {
    let mut engine = GameEngine::new(8);
    let mut moves = 0;
    while engine.move_left() {
        moves += 1;
        assert!(moves <= 12);
    }
    let piece = *engine.active().unwrap();
    let leftmost = piece.cells().map(|(x, _)| x).min().unwrap();
    assert_eq!(leftmost, 0);
}

#[test]
fn test_hold_once_per_piece() {
    let mut engine = GameEngine::new(10);
    let first = engine.active().unwrap().kind;
    assert!(engine.hold());
    assert!(!engine.hold());
    assert_eq!(engine.hold_kind(), Some(first));

    engine.hard_drop();
    assert!(!engine.hold_used());
    assert!(engine.hold());
    assert_eq!(engine.active().unwrap().kind, first);
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = GameEngine::new(1);
    engine.apply_action(GameAction::Pause);
    let before = engine.snapshot();
    engine.advance(60_000);
    assert_eq!(engine.snapshot(), before);
    assert!(!engine.apply_action(GameAction::HardDrop));

    engine.apply_action(GameAction::Pause);
    assert!(engine.apply_action(GameAction::HardDrop));
}

#[test]
fn test_config_from_json_drives_engine() {
    let config = EngineConfig::from_json_str(
        r#"{
            "board_width": 10,
            "board_height": 16,
            "fall_interval_ms": 100,
            "lock_delay_ms": 50,
            "lock_reset_policy": { "limited": 3 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.lock_reset_policy, LockResetPolicy::Limited(3));

    let mut engine = GameEngine::with_config(config, 1).unwrap();
    assert_eq!(engine.board().width(), 10);
    assert_eq!(engine.board().height(), 16);

    let y = engine.active().unwrap().y;
    engine.advance(101);
    assert_eq!(engine.active().unwrap().y, y + 1);
}

#[test]
fn test_custom_shape_spawns() {
    let config = EngineConfig::from_json_str(
        r#"{ "shapes": [ { "kind": "O", "rows": [[2, 2, 2], [0, 2, 0], [0, 0, 0]] } ] }"#,
    )
    .unwrap();
    let mut engine = GameEngine::with_config(config, 1).unwrap();

    for _ in 0..7 {
        let piece = *engine.active().unwrap();
        if piece.kind == PieceKind::O {
            assert_eq!(piece.shape.size(), 3);
            assert_eq!(piece.cells().count(), 4);
            return;
        }
        engine.hard_drop();
    }
    panic!("no O piece in the first bag");
}

#[test]
fn test_lock_state_exposed() {
    let mut engine = GameEngine::new(1);
    while engine.soft_drop() {}
    assert!(matches!(engine.lock_state(), LockState::Grounded { .. }));
    engine.advance(200);
    assert_eq!(engine.lock_state(), LockState::Grounded { timer_ms: 200 });
}
