//! Interfaces the session drives once per frame or per event.

use crate::controller::ActivePiece;
use crate::error::SinkError;
use crate::shape::Shape;
use crate::well::Well;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub well: &'a Well,
    pub active: Option<&'a ActivePiece>,
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// Consumes frames and next-piece previews.
pub trait RenderSink {
    /// Called once per tick.
    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), SinkError>;

    /// Called on every spawn with the queued piece.
    fn show_next(&mut self, next: &Shape) -> Result<(), SinkError>;
}

/// Consumes the score whenever it changes.
pub trait ScoreSink {
    fn score_changed(&mut self, score: u32);
}

/// A front end that is both a render sink and a score sink.
pub trait Sinks: RenderSink + ScoreSink {}

impl<T: RenderSink + ScoreSink + ?Sized> Sinks for T {}

/// Sink that discards everything; useful for headless runs and benches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSinks;

impl RenderSink for NullSinks {
    fn draw(&mut self, _frame: FrameView<'_>) -> Result<(), SinkError> {
        Ok(())
    }

    fn show_next(&mut self, _next: &Shape) -> Result<(), SinkError> {
        Ok(())
    }
}

impl ScoreSink for NullSinks {
    fn score_changed(&mut self, _score: u32) {}
}
