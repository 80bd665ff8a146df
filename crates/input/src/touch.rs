//! Swipe gestures to game actions
//!
//! A gesture fires once the pointer has travelled more than the threshold
//! from the start point. Horizontal swipes win when `|dx| > |dy|`; they move
//! the piece and rebase both axes. Otherwise a downward swipe soft-drops and
//! an upward swipe rotates counter-clockwise, rebasing only the vertical axis
//! so a diagonal drag keeps its horizontal progress.

use crate::types::{GameAction, TOUCH_THRESHOLD_PX};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchTracker {
    threshold: f32,
    start: Option<(f32, f32)>,
}

impl TouchTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
            start: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn start(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Pointer moved to `(x, y)`; returns the recognised gesture, if any.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<GameAction> {
        let (sx, sy) = self.start?;
        let dx = x - sx;
        let dy = y - sy;

        if dx.abs() > dy.abs() {
            if dx.abs() <= self.threshold {
                return None;
            }
            self.start = Some((x, y));
            return Some(if dx > 0.0 {
                GameAction::MoveRight
            } else {
                GameAction::MoveLeft
            });
        }

        let action = if dy > self.threshold {
            GameAction::SoftDrop
        } else if dy < -self.threshold {
            GameAction::RotateCcw
        } else {
            return None;
        };
        self.start = Some((sx, y));
        Some(action)
    }

    pub fn end(&mut self) {
        self.start = None;
    }
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(TOUCH_THRESHOLD_PX)
    }
}
