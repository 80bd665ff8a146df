//! Piece controller - spawning, movement, rotation and drops
//!
//! A [`Controller`] borrows the well, the player and the random source for the
//! duration of one operation. Every operation is a complete, terminating state
//! change: rejected moves and rotations leave the piece exactly as it was.
//!
//! Piece lifecycle: `Falling -> Locked -> spawn -> Falling`. When a freshly
//! spawned piece already collides, the [`SpawnCollisionPolicy`] decides
//! between clearing the well (the classic behaviour) and ending the game.

use log::{debug, warn};

use crate::catalog::template;
use crate::collision::{collides, merge};
use crate::rng::{random_kind, RandomSource};
use crate::shape::Shape;
use crate::sweep::{sweep, SweepOutcome};
use crate::types::{PieceKind, Position, RotateDir};
use crate::well::Well;

/// The falling, player-controlled piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Owned copy of the catalog template, rotated in place
    pub shape: Shape,
    /// Top-left corner of `shape` in well coordinates
    pub pos: Position,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, shape: Shape, pos: Position) -> Self {
        Self { kind, shape, pos }
    }

    /// Fresh piece centred horizontally at the top of a well `well_width` wide.
    pub fn spawn(kind: PieceKind, well_width: usize) -> Self {
        let shape = template(kind);
        let x = (well_width / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            pos: Position::new(x, 0),
        }
    }

    pub fn collides(&self, well: &Well) -> bool {
        collides(well, &self.shape, self.pos)
    }

    /// Well coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy, kind)| (self.pos.x + dx, self.pos.y + dy, kind))
    }
}

/// Active piece, queued piece and score
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub active: Option<ActivePiece>,
    pub next: Option<PieceKind>,
    pub score: u32,
}

/// What happens when a freshly spawned piece overlaps the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnCollisionPolicy {
    /// Empty the well, zero the score and keep playing.
    #[default]
    ClearWell,
    /// End the session.
    GameOver,
}

/// Rule switches consulted while landing and spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    /// Let the sweep clear row 0 as well.
    pub sweep_top_row: bool,
    pub on_blocked_spawn: SpawnCollisionPolicy,
    /// Stop the gravity timer while paused. Off by default: gravity keeps
    /// running and only input is gated by the pause flag.
    pub freeze_on_pause: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The spawn collided and the well was cleared.
    BoardCleared,
    /// The spawn collided and the game is over.
    Blocked,
}

/// Result of locking a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub cleared: SweepOutcome,
    pub spawn: SpawnOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    NoPiece,
    Moved,
    Landed(Landing),
}

/// Borrowed view over the state one controller operation needs.
pub struct Controller<'a, R: RandomSource + ?Sized> {
    well: &'a mut Well,
    player: &'a mut Player,
    rng: &'a mut R,
    rules: Rules,
}

impl<'a, R: RandomSource + ?Sized> Controller<'a, R> {
    pub fn new(well: &'a mut Well, player: &'a mut Player, rng: &'a mut R, rules: Rules) -> Self {
        Self {
            well,
            player,
            rng,
            rules,
        }
    }

    /// Promote the queued piece (or draw one on the very first spawn), queue a
    /// new one and centre the active piece at the top of the well.
    pub fn spawn(&mut self) -> SpawnOutcome {
        let kind = match self.player.next.take() {
            Some(kind) => kind,
            None => random_kind(self.rng),
        };
        let next = random_kind(self.rng);
        self.player.next = Some(next);

        let piece = ActivePiece::spawn(kind, self.well.width());
        let blocked = piece.collides(self.well);
        debug!(
            "spawn {} at x={} (next {})",
            kind.as_str(),
            piece.pos.x,
            next.as_str()
        );
        self.player.active = Some(piece);

        if !blocked {
            return SpawnOutcome::Spawned;
        }

        match self.rules.on_blocked_spawn {
            SpawnCollisionPolicy::ClearWell => {
                warn!(
                    "spawn blocked, clearing well (score {} discarded)",
                    self.player.score
                );
                self.well.clear();
                self.player.score = 0;
                SpawnOutcome::BoardCleared
            }
            SpawnCollisionPolicy::GameOver => {
                warn!("spawn blocked, game over at score {}", self.player.score);
                SpawnOutcome::Blocked
            }
        }
    }

    /// Shift the piece by `dir` columns; reverts silently on collision.
    pub fn move_horizontal(&mut self, dir: i32) -> bool {
        let Some(piece) = self.player.active.as_mut() else {
            return false;
        };
        let target = piece.pos.offset(dir, 0);
        if collides(self.well, &piece.shape, target) {
            return false;
        }
        piece.pos = target;
        true
    }

    /// Move one row down, or land the piece if that row is blocked.
    pub fn soft_drop(&mut self) -> DropOutcome {
        let Some(piece) = self.player.active.as_mut() else {
            return DropOutcome::NoPiece;
        };
        let below = piece.pos.offset(0, 1);
        if !collides(self.well, &piece.shape, below) {
            piece.pos = below;
            return DropOutcome::Moved;
        }
        DropOutcome::Landed(self.land())
    }

    /// Drop to the lowest reachable row and land there.
    pub fn hard_drop(&mut self) -> Option<Landing> {
        let piece = self.player.active.as_mut()?;
        // A piece can never fall further than the well is tall.
        let limit = self.well.height() + piece.shape.height();
        for _ in 0..limit {
            let below = piece.pos.offset(0, 1);
            if collides(self.well, &piece.shape, below) {
                break;
            }
            piece.pos = below;
        }
        Some(self.land())
    }

    /// Rotate a quarter turn, searching for a horizontal kick if the rotated
    /// piece collides.
    ///
    /// The kick steps `+1, -2, +3, -4, ...` accumulate on `x`, so the probed
    /// columns are `x+1, x-1, x+2, x-2, ...`. The search stops once the next
    /// step would exceed the piece width; the rotation is then undone and `x`
    /// restored.
    pub fn rotate(&mut self, dir: RotateDir) -> bool {
        let Some(piece) = self.player.active.as_mut() else {
            return false;
        };
        let origin_x = piece.pos.x;
        piece.shape.rotate(dir);

        let width = piece.shape.width() as i32;
        let mut step: i32 = 1;
        while collides(self.well, &piece.shape, piece.pos) {
            piece.pos.x += step;
            step = -(step + step.signum());
            if step > width {
                piece.shape.rotate(dir.inverse());
                piece.pos.x = origin_x;
                return false;
            }
        }
        true
    }

    /// Merge the active piece, sweep full rows, score them and spawn.
    fn land(&mut self) -> Landing {
        if let Some(piece) = self.player.active.take() {
            merge(self.well, &piece.shape, piece.pos);
        }
        let cleared = sweep(self.well, self.rules.sweep_top_row);
        self.player.score = self.player.score.saturating_add(cleared.points);
        if cleared.rows > 0 {
            debug!("cleared {} rows for {} points", cleared.rows, cleared.points);
        }
        let spawn = self.spawn();
        Landing { cleared, spawn }
    }
}
