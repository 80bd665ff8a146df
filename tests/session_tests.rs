//! End-to-end session tests

use tui_blockfall::core::error::SinkError;
use tui_blockfall::core::sinks::{FrameView, RenderSink, ScoreSink};
use tui_blockfall::core::{
    Clock, ControlScheme, ManualClock, NullSinks, Rules, ScriptedRandom, Session, SessionConfig,
    Shape, SpawnCollisionPolicy,
};
use tui_blockfall::types::{GameAction, PieceKind, Position};

/// Records everything the session reports.
#[derive(Default)]
struct Capture {
    frames: Vec<(u32, bool, bool)>,
    next: Vec<Vec<Vec<u8>>>,
    scores: Vec<u32>,
    fail_next_draw: bool,
}

impl RenderSink for Capture {
    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), SinkError> {
        if std::mem::take(&mut self.fail_next_draw) {
            return Err(SinkError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "terminal closed",
            )));
        }
        self.frames.push((frame.score, frame.paused, frame.game_over));
        Ok(())
    }

    fn show_next(&mut self, next: &Shape) -> Result<(), SinkError> {
        self.next.push(next.to_u8_grid());
        Ok(())
    }
}

impl ScoreSink for Capture {
    fn score_changed(&mut self, score: u32) {
        self.scores.push(score);
    }
}

fn scripted(config: SessionConfig, kinds: &[PieceKind]) -> Session<ScriptedRandom> {
    Session::new(config, ScriptedRandom::new(kinds.to_vec())).unwrap()
}

#[test]
fn test_o_piece_hard_drop_end_to_end() {
    let mut session = scripted(SessionConfig::default(), &[PieceKind::O, PieceKind::T]);
    let mut sinks = Capture::default();
    session.start(&mut sinks).unwrap();

    assert_eq!(session.active().unwrap().pos, Position::new(4, 0));
    assert!(session.dispatch(GameAction::HardDrop, &mut sinks));

    let grid = session.well().to_u8_grid();
    for (y, row) in grid.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let expected = if (18..20).contains(&y) && (4..6).contains(&x) {
                4
            } else {
                0
            };
            assert_eq!(v, expected, "cell ({}, {})", x, y);
        }
    }
    assert_eq!(session.score(), 0);
    assert_eq!(session.active().unwrap().kind, PieceKind::T);
    assert_eq!(session.active().unwrap().pos, Position::new(4, 0));
}

#[test]
fn test_spawn_centering_three_wide() {
    for kind in [PieceKind::L, PieceKind::J, PieceKind::S, PieceKind::T, PieceKind::Z] {
        let mut session = scripted(SessionConfig::default(), &[kind]);
        session.start(&mut NullSinks).unwrap();
        assert_eq!(session.active().unwrap().pos.x, 4, "{:?}", kind);
    }
}

#[test]
fn test_line_clear_scores_through_session() {
    // Fill the bottom row except columns 4 and 5, then drop an O into the gap.
    let mut session = scripted(SessionConfig::default(), &[PieceKind::I, PieceKind::I, PieceKind::O]);
    let mut sinks = Capture::default();
    session.start(&mut sinks).unwrap();

    // First I: flat on the bottom, columns 0..=3.
    for _ in 0..3 {
        session.dispatch(GameAction::MoveLeft, &mut sinks);
    }
    session.dispatch(GameAction::HardDrop, &mut sinks);
    // Second I: columns 6..=9.
    for _ in 0..3 {
        session.dispatch(GameAction::MoveRight, &mut sinks);
    }
    session.dispatch(GameAction::HardDrop, &mut sinks);
    assert_eq!(session.well().to_u8_grid()[19], vec![1, 1, 1, 1, 0, 0, 1, 1, 1, 1]);

    assert_eq!(session.active().unwrap().kind, PieceKind::O);
    session.dispatch(GameAction::HardDrop, &mut sinks);

    assert_eq!(session.score(), 10);
    assert_eq!(session.well().to_u8_grid()[19], vec![0, 0, 0, 0, 4, 4, 0, 0, 0, 0]);
    assert_eq!(sinks.scores.last(), Some(&10));
}

#[test]
fn test_wall_kick_against_left_wall() {
    let mut config = SessionConfig::default();
    config.controls = config.controls.with_action(GameAction::RotateCw);
    let mut session = scripted(config, &[PieceKind::I]);
    session.start(&mut NullSinks).unwrap();

    assert!(session.dispatch(GameAction::RotateCw, &mut NullSinks));
    while session.dispatch(GameAction::MoveLeft, &mut NullSinks) {}
    assert_eq!(session.active().unwrap().pos.x, -2);

    assert!(session.dispatch(GameAction::RotateCw, &mut NullSinks));
    let piece = session.active().unwrap();
    assert_eq!(piece.pos.x, 0);
    let cols: Vec<i32> = piece.cells().map(|(x, _, _)| x).collect();
    assert_eq!(cols, vec![0, 1, 2, 3]);
}

#[test]
fn test_rotation_reverts_in_narrow_well() {
    let config = SessionConfig {
        cols: 2,
        rows: 3,
        controls: ControlScheme::minimal(),
        ..SessionConfig::default()
    };
    let mut session = scripted(config, &[PieceKind::I]);
    session.start(&mut NullSinks).unwrap();

    // Neither the flat I (4 columns) nor the upright one (4 rows) fits anywhere.
    let before = session.active().unwrap().clone();
    assert!(!session.dispatch(GameAction::RotateCcw, &mut NullSinks));
    assert_eq!(session.active().unwrap(), &before);
}

#[test]
fn test_gravity_with_manual_clock() {
    let mut session = scripted(SessionConfig::default(), &[PieceKind::T]);
    let mut sinks = Capture::default();
    let clock = ManualClock::new(10_000);
    session.start(&mut sinks).unwrap();

    assert!(session.frame(clock.now_ms(), &mut sinks));
    for _ in 0..62 {
        session.frame(clock.advance(16), &mut sinks);
    }
    // 62 * 16 = 992 ms: no drop yet.
    assert_eq!(session.active().unwrap().pos.y, 0);
    session.frame(clock.advance(16), &mut sinks);
    assert_eq!(session.active().unwrap().pos.y, 1);
    assert_eq!(sinks.frames.len(), 64);
}

#[test]
fn test_piece_falls_to_floor_and_locks_by_gravity() {
    let config = SessionConfig {
        rows: 4,
        drop_interval_ms: 10,
        ..SessionConfig::default()
    };
    let mut session = scripted(config, &[PieceKind::O, PieceKind::S]);
    session.start(&mut NullSinks).unwrap();

    let mut now = 0;
    session.frame(now, &mut NullSinks);
    for _ in 0..3 {
        now += 11;
        session.frame(now, &mut NullSinks);
    }
    assert_eq!(session.active().unwrap().kind, PieceKind::S);
    assert_eq!(session.well().cell_value(4, 3), Some(4));
}

#[test]
fn test_pause_blocks_input_but_not_gravity() {
    let mut session = scripted(SessionConfig::default(), &[PieceKind::T]);
    let mut sinks = Capture::default();
    session.start(&mut sinks).unwrap();
    session.frame(0, &mut sinks);

    assert!(session.dispatch(GameAction::Pause, &mut sinks));
    assert!(!session.dispatch(GameAction::HardDrop, &mut sinks));
    for step in 1..=5u64 {
        session.frame(step * 1_001, &mut sinks);
    }
    assert_eq!(session.active().unwrap().pos.y, 5);
    assert_eq!(sinks.frames.last(), Some(&(0, true, false)));

    assert!(session.dispatch(GameAction::Pause, &mut sinks));
    assert!(session.dispatch(GameAction::HardDrop, &mut sinks));
}

#[test]
fn test_freeze_on_pause_stops_gravity() {
    let config = SessionConfig {
        rules: Rules {
            freeze_on_pause: true,
            ..Rules::default()
        },
        ..SessionConfig::default()
    };
    let mut session = scripted(config, &[PieceKind::T]);
    let mut sinks = Capture::default();
    session.start(&mut sinks).unwrap();
    session.frame(0, &mut sinks);

    assert!(session.dispatch(GameAction::Pause, &mut sinks));
    for step in 1..=5u64 {
        session.frame(step * 1_001, &mut sinks);
    }
    assert_eq!(session.active().unwrap().pos.y, 0);
    assert_eq!(session.drop_counter_ms(), 0);
}

#[test]
fn test_restart_resets_everything() {
    let mut session = scripted(SessionConfig::default(), &[PieceKind::O]);
    let mut sinks = Capture::default();
    session.start(&mut sinks).unwrap();
    session.dispatch(GameAction::HardDrop, &mut sinks);
    assert!(!session.well().is_empty());

    assert!(session.dispatch(GameAction::Restart, &mut sinks));
    assert!(session.well().is_empty());
    assert_eq!(session.score(), 0);
    assert_eq!(sinks.scores.last(), Some(&0));
    assert!(session.active().is_some());
}

#[test]
fn test_blocked_spawn_clears_well_by_default() {
    let config = SessionConfig {
        cols: 4,
        rows: 2,
        ..SessionConfig::default()
    };
    let mut session = scripted(config, &[PieceKind::O]);
    session.start(&mut NullSinks).unwrap();
    // The O fills rows 0-1 of columns 1-2; the next O cannot spawn.
    session.dispatch(GameAction::HardDrop, &mut NullSinks);
    assert!(session.well().is_empty());
    assert!(!session.is_game_over());
    assert!(session.active().is_some());
}

#[test]
fn test_blocked_spawn_game_over_policy() {
    let config = SessionConfig {
        cols: 4,
        rows: 2,
        rules: Rules {
            on_blocked_spawn: SpawnCollisionPolicy::GameOver,
            ..Rules::default()
        },
        ..SessionConfig::default()
    };
    let mut session = scripted(config, &[PieceKind::O]);
    let mut sinks = Capture::default();
    session.start(&mut sinks).unwrap();
    session.dispatch(GameAction::HardDrop, &mut sinks);

    assert!(session.is_game_over());
    for action in GameAction::ALL {
        assert!(!session.accepts(action), "{:?}", action);
    }
    session.frame(100, &mut sinks);
    assert_eq!(sinks.frames.last(), Some(&(0, false, true)));
}

#[test]
fn test_sink_fault_is_recovered_by_reset() {
    let mut session = scripted(SessionConfig::default(), &[PieceKind::O]);
    let mut sinks = Capture {
        fail_next_draw: true,
        ..Capture::default()
    };
    session.start(&mut sinks).unwrap();
    session.dispatch(GameAction::HardDrop, &mut sinks);

    assert!(!session.frame(0, &mut sinks));
    assert!(session.well().is_empty());
    assert!(session.is_playing());
    assert!(session.frame(16, &mut sinks));
    assert_eq!(sinks.frames.len(), 1);
}

#[test]
fn test_next_preview_follows_queue() {
    let mut session = scripted(SessionConfig::default(), &[PieceKind::S, PieceKind::Z, PieceKind::O]);
    let mut sinks = Capture::default();
    session.start(&mut sinks).unwrap();
    assert_eq!(session.next(), Some(PieceKind::Z));
    assert_eq!(sinks.next.last(), Some(&vec![vec![7, 7, 0], vec![0, 7, 7], vec![0, 0, 0]]));

    session.dispatch(GameAction::HardDrop, &mut sinks);
    assert_eq!(session.active().unwrap().kind, PieceKind::Z);
    assert_eq!(session.next(), Some(PieceKind::O));
    assert_eq!(sinks.next.last(), Some(&vec![vec![4, 4], vec![4, 4]]));
}

#[test]
fn test_seeded_sessions_are_deterministic() {
    let run = |seed| {
        let mut session = Session::with_seed(SessionConfig::default(), seed).unwrap();
        session.start(&mut NullSinks).unwrap();
        let mut kinds = Vec::new();
        for _ in 0..20 {
            kinds.push(session.active().unwrap().kind);
            session.dispatch(GameAction::HardDrop, &mut NullSinks);
        }
        (kinds, session.well().to_u8_grid())
    };
    assert_eq!(run(99), run(99));
}
