//! Terminal event translation
//!
//! Keys go through [`handle_key_event`]; left-button mouse drags are fed to a
//! [`TouchTracker`] after scaling terminal cells to pixels, so swipe gestures
//! work in any terminal with mouse reporting.

use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use crate::map::{handle_key_event, should_quit};
use crate::touch::TouchTracker;
use crate::types::GameAction;

/// Upper bound on events handled per frame.
pub const MAX_EVENTS_PER_FRAME: usize = 32;

/// Approximate pixel size of one terminal cell.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Host-level meaning of one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translated {
    Action(GameAction),
    Quit,
    Resize { cols: u16, rows: u16 },
}

pub type EventBatch = ArrayVec<Translated, MAX_EVENTS_PER_FRAME>;

#[derive(Debug, Clone)]
pub struct EventTranslator {
    touch: TouchTracker,
    cell_px: (f32, f32),
}

impl EventTranslator {
    pub fn new(touch_threshold_px: f32) -> Self {
        Self {
            touch: TouchTracker::new(touch_threshold_px),
            cell_px: (CELL_WIDTH_PX, CELL_HEIGHT_PX),
        }
    }

    /// Override the cell to pixel scale used for mouse gestures.
    pub fn with_cell_size(mut self, width_px: f32, height_px: f32) -> Self {
        self.cell_px = (width_px, height_px);
        self
    }

    pub fn touch(&self) -> &TouchTracker {
        &self.touch
    }

    /// Translate one event. `input_enabled` gates the start of a gesture.
    pub fn translate(&mut self, event: &Event, input_enabled: bool) -> Option<Translated> {
        match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return None;
                }
                if should_quit(*key) {
                    return Some(Translated::Quit);
                }
                handle_key_event(*key).map(Translated::Action)
            }
            Event::Mouse(mouse) => {
                let x = f32::from(mouse.column) * self.cell_px.0;
                let y = f32::from(mouse.row) * self.cell_px.1;
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if input_enabled {
                            self.touch.start(x, y);
                        }
                        None
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        self.touch.move_to(x, y).map(Translated::Action)
                    }
                    MouseEventKind::Up(_) => {
                        self.touch.end();
                        None
                    }
                    _ => None,
                }
            }
            Event::Resize(cols, rows) => Some(Translated::Resize {
                cols: *cols,
                rows: *rows,
            }),
            _ => None,
        }
    }

    /// Wait up to `timeout` for the first event, then drain whatever else is
    /// already queued, up to [`MAX_EVENTS_PER_FRAME`].
    pub fn poll_batch(&mut self, timeout: Duration, input_enabled: bool) -> io::Result<EventBatch> {
        let mut batch = EventBatch::new();
        if !event::poll(timeout)? {
            return Ok(batch);
        }
        loop {
            let ev = event::read()?;
            if let Some(t) = self.translate(&ev, input_enabled) {
                batch.push(t);
            }
            if batch.is_full() || !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(batch)
    }
}

impl Default for EventTranslator {
    fn default() -> Self {
        Self::new(crate::types::TOUCH_THRESHOLD_PX)
    }
}
