//! Game session - owns the well, the player and the random source
//!
//! The host drives a [`Session`] with two calls:
//!
//! - [`Session::dispatch`] for every discrete [`GameAction`]
//! - [`Session::frame`] once per frame with a monotonic timestamp
//!
//! Both recover from sink failures by logging the fault and resetting the
//! session, so the host loop never has to handle runtime errors. The fallible
//! counterparts [`Session::apply`] and [`Session::tick`] surface the
//! [`SinkError`] instead.

use log::{debug, error, info};

use crate::catalog::template;
use crate::controller::{ActivePiece, Controller, DropOutcome, Landing, Player, Rules, SpawnOutcome};
use crate::error::{GridError, SinkError};
use crate::rng::{RandomSource, SimpleRng};
use crate::sinks::{FrameView, Sinks};
use crate::types::{
    GameAction, PieceKind, RotateDir, DEFAULT_COLS, DEFAULT_DROP_INTERVAL_MS, DEFAULT_ROWS,
};
use crate::well::Well;

/// Set of [`GameAction`]s, one bit per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        GameAction::ALL.iter().copied().collect()
    }

    fn bit(action: GameAction) -> u16 {
        1 << (action as u16)
    }

    pub fn contains(self, action: GameAction) -> bool {
        self.0 & Self::bit(action) != 0
    }

    #[must_use]
    pub fn with(self, action: GameAction) -> Self {
        Self(self.0 | Self::bit(action))
    }

    #[must_use]
    pub fn without(self, action: GameAction) -> Self {
        Self(self.0 & !Self::bit(action))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = GameAction> {
        GameAction::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<GameAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = GameAction>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Which actions are wired and whether the session flags gate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    pub actions: ActionSet,
    /// While paused only `Pause` is accepted; before start nothing is.
    pub gate_on_flags: bool,
}

impl ControlScheme {
    /// Every action except clockwise rotation, gated on the session flags.
    pub fn full() -> Self {
        Self {
            actions: ActionSet::all().without(GameAction::RotateCw),
            gate_on_flags: true,
        }
    }

    /// Movement, drops and counter-clockwise rotation only, ungated.
    pub fn minimal() -> Self {
        Self {
            actions: [
                GameAction::MoveLeft,
                GameAction::MoveRight,
                GameAction::SoftDrop,
                GameAction::HardDrop,
                GameAction::RotateCcw,
            ]
            .into_iter()
            .collect(),
            gate_on_flags: false,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: GameAction) -> Self {
        self.actions = self.actions.with(action);
        self
    }

    #[must_use]
    pub fn without_action(mut self, action: GameAction) -> Self {
        self.actions = self.actions.without(action);
        self
    }
}

impl Default for ControlScheme {
    fn default() -> Self {
        Self::full()
    }
}

/// Construction parameters of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub cols: u16,
    pub rows: u16,
    /// Gravity fires once the accumulated time exceeds this value.
    pub drop_interval_ms: u64,
    pub rules: Rules,
    pub controls: ControlScheme,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            rules: Rules::default(),
            controls: ControlScheme::default(),
        }
    }
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = SimpleRng> {
    well: Well,
    player: Player,
    rng: R,
    config: SessionConfig,
    playing: bool,
    paused: bool,
    game_over: bool,
    drop_counter_ms: u64,
    last_time_ms: Option<u64>,
}

impl Session<SimpleRng> {
    /// Session backed by the deterministic LCG.
    pub fn with_seed(config: SessionConfig, seed: u32) -> Result<Self, GridError> {
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Session<R> {
    pub fn new(config: SessionConfig, rng: R) -> Result<Self, GridError> {
        let well = Well::new(config.cols, config.rows)?;
        Ok(Self {
            well,
            player: Player::default(),
            rng,
            config,
            playing: false,
            paused: false,
            game_over: false,
            drop_counter_ms: 0,
            last_time_ms: None,
        })
    }

    /// Start play: reset and spawn the first piece. No-op once playing.
    pub fn start<S: Sinks + ?Sized>(&mut self, sinks: &mut S) -> Result<(), SinkError> {
        if self.playing {
            return Ok(());
        }
        info!(
            "session start ({}x{}, drop every {} ms)",
            self.config.cols, self.config.rows, self.config.drop_interval_ms
        );
        self.reset(sinks)
    }

    /// Whether `action` would be applied right now.
    pub fn accepts(&self, action: GameAction) -> bool {
        if !self.config.controls.actions.contains(action) || self.game_over {
            return false;
        }
        if !self.config.controls.gate_on_flags {
            return true;
        }
        if !self.playing {
            return false;
        }
        !self.paused || action == GameAction::Pause
    }

    /// Whether piece-moving input (keys or gestures) is currently live.
    pub fn input_enabled(&self) -> bool {
        if self.game_over {
            return false;
        }
        !self.config.controls.gate_on_flags || (self.playing && !self.paused)
    }

    /// Apply one action. Returns `Ok(false)` when it was rejected or had no
    /// effect.
    pub fn apply<S: Sinks + ?Sized>(
        &mut self,
        action: GameAction,
        sinks: &mut S,
    ) -> Result<bool, SinkError> {
        if !self.accepts(action) {
            return Ok(false);
        }
        match action {
            GameAction::MoveLeft => Ok(self.controller().move_horizontal(-1)),
            GameAction::MoveRight => Ok(self.controller().move_horizontal(1)),
            GameAction::SoftDrop => self.soft_drop(sinks),
            GameAction::HardDrop => self.hard_drop(sinks),
            GameAction::RotateCw => Ok(self.controller().rotate(RotateDir::Cw)),
            GameAction::RotateCcw => Ok(self.controller().rotate(RotateDir::Ccw)),
            GameAction::Pause => {
                self.toggle_pause();
                Ok(true)
            }
            GameAction::Restart => {
                self.reset(sinks)?;
                Ok(true)
            }
        }
    }

    /// [`apply`](Self::apply), resetting the session on a sink fault.
    pub fn dispatch<S: Sinks + ?Sized>(&mut self, action: GameAction, sinks: &mut S) -> bool {
        match self.apply(action, sinks) {
            Ok(applied) => applied,
            Err(err) => {
                self.recover(&err, sinks);
                false
            }
        }
    }

    /// One row down; lands the piece if blocked. Resets the gravity timer.
    pub fn soft_drop<S: Sinks + ?Sized>(&mut self, sinks: &mut S) -> Result<bool, SinkError> {
        self.drop_counter_ms = 0;
        match self.controller().soft_drop() {
            DropOutcome::NoPiece => Ok(false),
            DropOutcome::Moved => Ok(true),
            DropOutcome::Landed(landing) => {
                self.after_landing(landing, sinks)?;
                Ok(true)
            }
        }
    }

    /// Drop and land in one step. Resets the gravity timer.
    pub fn hard_drop<S: Sinks + ?Sized>(&mut self, sinks: &mut S) -> Result<bool, SinkError> {
        self.drop_counter_ms = 0;
        match self.controller().hard_drop() {
            Some(landing) => {
                self.after_landing(landing, sinks)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!("pause {}", if self.paused { "on" } else { "off" });
    }

    /// Advance gravity to `now_ms` and draw the frame.
    ///
    /// The first call only records the baseline. Time after game over is not
    /// accumulated; time spent paused is unless `freeze_on_pause` is set.
    pub fn tick<S: Sinks + ?Sized>(&mut self, now_ms: u64, sinks: &mut S) -> Result<(), SinkError> {
        let elapsed = match self.last_time_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_time_ms = Some(now_ms);

        if self.gravity_active() {
            self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed);
            if self.drop_counter_ms > self.config.drop_interval_ms {
                self.soft_drop(sinks)?;
            }
        }

        sinks.draw(self.frame_view())
    }

    /// [`tick`](Self::tick), resetting the session on a sink fault.
    pub fn frame<S: Sinks + ?Sized>(&mut self, now_ms: u64, sinks: &mut S) -> bool {
        match self.tick(now_ms, sinks) {
            Ok(()) => true,
            Err(err) => {
                self.recover(&err, sinks);
                false
            }
        }
    }

    /// Clear the well and score, drop both pieces, clear the flags and spawn.
    pub fn reset<S: Sinks + ?Sized>(&mut self, sinks: &mut S) -> Result<(), SinkError> {
        self.well.clear();
        self.player = Player::default();
        self.playing = true;
        self.paused = false;
        self.game_over = false;
        self.drop_counter_ms = 0;
        debug!("session reset");

        sinks.score_changed(self.player.score);
        if self.controller().spawn() == SpawnOutcome::Blocked {
            self.end_game();
        }
        self.notify_next(sinks)
    }

    pub fn well(&self) -> &Well {
        &self.well
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.player.active.as_ref()
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.player.next
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn drop_counter_ms(&self) -> u64 {
        self.drop_counter_ms
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            well: &self.well,
            active: self.player.active.as_ref(),
            score: self.player.score,
            paused: self.paused,
            game_over: self.game_over,
        }
    }

    fn controller(&mut self) -> Controller<'_, R> {
        Controller::new(
            &mut self.well,
            &mut self.player,
            &mut self.rng,
            self.config.rules,
        )
    }

    fn gravity_active(&self) -> bool {
        let frozen = self.paused && self.config.rules.freeze_on_pause;
        self.playing && !frozen && !self.game_over && self.player.active.is_some()
    }

    fn after_landing<S: Sinks + ?Sized>(
        &mut self,
        landing: Landing,
        sinks: &mut S,
    ) -> Result<(), SinkError> {
        sinks.score_changed(self.player.score);
        if landing.spawn == SpawnOutcome::Blocked {
            self.end_game();
            return Ok(());
        }
        self.notify_next(sinks)
    }

    fn end_game(&mut self) {
        self.game_over = true;
        info!("game over, final score {}", self.player.score);
    }

    fn notify_next<S: Sinks + ?Sized>(&mut self, sinks: &mut S) -> Result<(), SinkError> {
        match self.player.next {
            Some(kind) => sinks.show_next(&template(kind)),
            None => Ok(()),
        }
    }

    fn recover<S: Sinks + ?Sized>(&mut self, err: &SinkError, sinks: &mut S) {
        error!(
            "runtime fault at score {} (frame time {:?} ms): {}; resetting session",
            self.player.score, self.last_time_ms, err
        );
        if let Err(reset_err) = self.reset(sinks) {
            error!("reset after fault failed: {}", reset_err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;
    use crate::shape::Shape;
    use crate::sinks::{NullSinks, RenderSink, ScoreSink};

    #[derive(Default)]
    struct Recorder {
        draws: usize,
        previews: Vec<Shape>,
        scores: Vec<u32>,
        fail_draws: usize,
    }

    impl RenderSink for Recorder {
        fn draw(&mut self, _frame: FrameView<'_>) -> Result<(), SinkError> {
            self.draws += 1;
            if self.fail_draws > 0 {
                self.fail_draws -= 1;
                return Err(SinkError::Unavailable("screen gone".into()));
            }
            Ok(())
        }

        fn show_next(&mut self, next: &Shape) -> Result<(), SinkError> {
            self.previews.push(next.clone());
            Ok(())
        }
    }

    impl ScoreSink for Recorder {
        fn score_changed(&mut self, score: u32) {
            self.scores.push(score);
        }
    }

    fn scripted(kinds: &[PieceKind]) -> Session<ScriptedRandom> {
        Session::new(SessionConfig::default(), ScriptedRandom::new(kinds.to_vec())).unwrap()
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let config = SessionConfig {
            cols: 0,
            ..SessionConfig::default()
        };
        assert!(Session::with_seed(config, 1).is_err());
    }

    #[test]
    fn test_start_spawns_and_notifies() {
        let mut session = scripted(&[PieceKind::T, PieceKind::L]);
        let mut sinks = Recorder::default();
        session.start(&mut sinks).unwrap();

        assert!(session.is_playing());
        assert_eq!(session.active().unwrap().kind, PieceKind::T);
        assert_eq!(session.next(), Some(PieceKind::L));
        assert_eq!(sinks.scores, vec![0]);
        assert_eq!(sinks.previews, vec![template(PieceKind::L)]);

        // Starting again does nothing.
        session.start(&mut sinks).unwrap();
        assert_eq!(sinks.scores.len(), 1);
    }

    #[test]
    fn test_actions_rejected_before_start() {
        let mut session = scripted(&[PieceKind::T]);
        assert!(!session.accepts(GameAction::MoveLeft));
        assert!(!session.dispatch(GameAction::HardDrop, &mut NullSinks));
        assert!(session.well().is_empty());
    }

    #[test]
    fn test_pause_gates_everything_but_pause() {
        let mut session = scripted(&[PieceKind::T]);
        session.start(&mut NullSinks).unwrap();
        assert!(session.dispatch(GameAction::Pause, &mut NullSinks));
        assert!(session.is_paused());
        assert!(!session.input_enabled());

        let x = session.active().unwrap().pos.x;
        assert!(!session.dispatch(GameAction::MoveLeft, &mut NullSinks));
        assert_eq!(session.active().unwrap().pos.x, x);

        assert!(session.dispatch(GameAction::Pause, &mut NullSinks));
        assert!(session.dispatch(GameAction::MoveLeft, &mut NullSinks));
        assert_eq!(session.active().unwrap().pos.x, x - 1);
    }

    #[test]
    fn test_full_scheme_omits_rotate_cw() {
        let mut session = scripted(&[PieceKind::T]);
        session.start(&mut NullSinks).unwrap();
        assert!(!session.accepts(GameAction::RotateCw));
        assert!(session.accepts(GameAction::RotateCcw));
    }

    #[test]
    fn test_minimal_scheme_ignores_pause() {
        let config = SessionConfig {
            controls: ControlScheme::minimal(),
            ..SessionConfig::default()
        };
        let mut session = Session::new(config, ScriptedRandom::new(vec![PieceKind::O])).unwrap();
        session.start(&mut NullSinks).unwrap();
        assert!(!session.dispatch(GameAction::Pause, &mut NullSinks));
        assert!(!session.dispatch(GameAction::Restart, &mut NullSinks));
        assert!(session.dispatch(GameAction::MoveRight, &mut NullSinks));
    }

    #[test]
    fn test_gravity_waits_for_strictly_greater() {
        let mut session = scripted(&[PieceKind::T]);
        session.start(&mut NullSinks).unwrap();

        session.tick(5_000, &mut NullSinks).unwrap();
        assert_eq!(session.active().unwrap().pos.y, 0);

        session.tick(6_000, &mut NullSinks).unwrap();
        assert_eq!(session.active().unwrap().pos.y, 0);
        assert_eq!(session.drop_counter_ms(), 1_000);

        session.tick(6_001, &mut NullSinks).unwrap();
        assert_eq!(session.active().unwrap().pos.y, 1);
        assert_eq!(session.drop_counter_ms(), 0);
    }

    #[test]
    fn test_gravity_keeps_running_while_paused() {
        let mut session = scripted(&[PieceKind::T]);
        session.start(&mut NullSinks).unwrap();
        session.tick(0, &mut NullSinks).unwrap();
        session.toggle_pause();
        for step in 1..=5u64 {
            session.tick(step * 1_001, &mut NullSinks).unwrap();
        }
        assert!(session.is_paused());
        assert_eq!(session.active().unwrap().pos.y, 5);
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
        let mut session = Session::new(config, ScriptedRandom::new(vec![PieceKind::T])).unwrap();
        session.start(&mut NullSinks).unwrap();
        session.tick(0, &mut NullSinks).unwrap();
        session.toggle_pause();
        session.tick(10_000, &mut NullSinks).unwrap();
        session.toggle_pause();
        session.tick(10_016, &mut NullSinks).unwrap();
        assert_eq!(session.active().unwrap().pos.y, 0);
        assert_eq!(session.drop_counter_ms(), 16);
    }

    #[test]
    fn test_soft_drop_resets_gravity_timer() {
        let mut session = scripted(&[PieceKind::T]);
        session.start(&mut NullSinks).unwrap();
        session.tick(0, &mut NullSinks).unwrap();
        session.tick(900, &mut NullSinks).unwrap();
        assert!(session.dispatch(GameAction::SoftDrop, &mut NullSinks));
        assert_eq!(session.drop_counter_ms(), 0);
        session.tick(1_800, &mut NullSinks).unwrap();
        assert_eq!(session.active().unwrap().pos.y, 1);
    }

    #[test]
    fn test_hard_drop_reports_score_and_next() {
        let mut session = scripted(&[PieceKind::O, PieceKind::I]);
        let mut sinks = Recorder::default();
        session.start(&mut sinks).unwrap();
        assert!(session.dispatch(GameAction::HardDrop, &mut sinks));

        assert_eq!(session.well().cell_value(4, 19), Some(4));
        assert_eq!(session.well().cell_value(5, 18), Some(4));
        assert_eq!(sinks.scores, vec![0, 0]);
        assert_eq!(sinks.previews.len(), 2);
        assert_eq!(session.active().unwrap().kind, PieceKind::I);
    }

    #[test]
    fn test_draw_failure_resets_session() {
        let mut session = scripted(&[PieceKind::O]);
        let mut sinks = Recorder::default();
        session.start(&mut sinks).unwrap();
        session.dispatch(GameAction::HardDrop, &mut sinks);
        assert!(!session.well().is_empty());

        sinks.fail_draws = 1;
        assert!(!session.frame(16, &mut sinks));
        assert!(session.well().is_empty());
        assert!(session.is_playing());
        assert!(session.active().is_some());

        assert!(session.frame(32, &mut sinks));
    }

    #[test]
    fn test_game_over_policy_blocks_input() {
        let config = SessionConfig {
            cols: 3,
            rows: 2,
            rules: Rules {
                on_blocked_spawn: crate::controller::SpawnCollisionPolicy::GameOver,
                ..Rules::default()
            },
            ..SessionConfig::default()
        };
        let mut session = Session::new(config, ScriptedRandom::new(vec![PieceKind::O])).unwrap();
        session.start(&mut NullSinks).unwrap();
        assert!(session.dispatch(GameAction::HardDrop, &mut NullSinks));

        assert!(session.is_game_over());
        assert!(!session.accepts(GameAction::Pause));
        assert!(!session.dispatch(GameAction::Restart, &mut NullSinks));

        session.reset(&mut NullSinks).unwrap();
        assert!(!session.is_game_over());
        assert!(session.well().is_empty());
    }

    #[test]
    fn test_action_set_ops() {
        let set = ActionSet::empty().with(GameAction::Pause);
        assert!(set.contains(GameAction::Pause));
        assert!(!set.contains(GameAction::Restart));
        assert!(set.without(GameAction::Pause).is_empty());
        assert_eq!(ActionSet::all().iter().count(), GameAction::ALL.len());
        assert_eq!(ControlScheme::minimal().actions.iter().count(), 5);
    }
}
