//! Input adapter tests: keys, swipes and their effect on a session

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tui_blockfall::core::{NullSinks, ScriptedRandom, Session, SessionConfig};
use tui_blockfall::input::{handle_key_event, EventTranslator, TouchTracker, Translated};
use tui_blockfall::types::{GameAction, PieceKind};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::from(code))
}

fn drag(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Drag(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn press(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn test_default_keymap() {
    let cases = [
        (KeyCode::Left, GameAction::MoveLeft),
        (KeyCode::Right, GameAction::MoveRight),
        (KeyCode::Down, GameAction::SoftDrop),
        (KeyCode::Up, GameAction::RotateCcw),
        (KeyCode::Char(' '), GameAction::HardDrop),
        (KeyCode::Char('p'), GameAction::Pause),
        (KeyCode::Char('R'), GameAction::Restart),
    ];
    for (code, action) in cases {
        assert_eq!(handle_key_event(KeyEvent::from(code)), Some(action), "{:?}", code);
    }
}

#[test]
fn test_ctrl_c_quits() {
    let mut tr = EventTranslator::default();
    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(tr.translate(&ctrl_c, true), Some(Translated::Quit));
}

#[test]
fn test_keys_drive_session() {
    let mut session = Session::new(SessionConfig::default(), ScriptedRandom::new(vec![PieceKind::T])).unwrap();
    session.start(&mut NullSinks).unwrap();
    let mut tr = EventTranslator::default();

    for ev in [key(KeyCode::Left), key(KeyCode::Left), key(KeyCode::Up)] {
        if let Some(Translated::Action(action)) = tr.translate(&ev, session.input_enabled()) {
            session.dispatch(action, &mut NullSinks);
        }
    }
    assert_eq!(session.active().unwrap().pos.x, 2);
    assert_eq!(
        session.active().unwrap().shape.to_u8_grid(),
        vec![vec![0, 6, 0], vec![6, 6, 0], vec![0, 6, 0]]
    );
}

#[test]
fn test_swipes_drive_session() {
    let mut session = Session::new(SessionConfig::default(), ScriptedRandom::new(vec![PieceKind::T])).unwrap();
    session.start(&mut NullSinks).unwrap();
    let mut tr = EventTranslator::default();

    let events = [press(10, 2), drag(14, 2), drag(18, 2), drag(18, 4)];
    let mut actions = Vec::new();
    for ev in &events {
        if let Some(Translated::Action(action)) = tr.translate(ev, session.input_enabled()) {
            actions.push(action);
            session.dispatch(action, &mut NullSinks);
        }
    }
    assert_eq!(
        actions,
        vec![GameAction::MoveRight, GameAction::MoveRight, GameAction::SoftDrop]
    );
    assert_eq!(session.active().unwrap().pos.x, 6);
    assert_eq!(session.active().unwrap().pos.y, 1);
}

#[test]
fn test_swipe_ignored_while_paused() {
    let mut session = Session::with_seed(SessionConfig::default(), 1).unwrap();
    session.start(&mut NullSinks).unwrap();
    session.toggle_pause();

    let mut tr = EventTranslator::default();
    assert_eq!(tr.translate(&press(0, 0), session.input_enabled()), None);
    assert_eq!(tr.translate(&drag(10, 0), session.input_enabled()), None);
}

#[test]
fn test_touch_tracker_custom_threshold() {
    let mut t = TouchTracker::new(5.0);
    t.start(0.0, 0.0);
    assert_eq!(t.move_to(6.0, 0.0), Some(GameAction::MoveRight));
    assert_eq!(t.move_to(6.0, -6.0), Some(GameAction::RotateCcw));
}
