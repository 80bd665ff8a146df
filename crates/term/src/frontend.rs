//! TerminalFrontend: the render and score sinks backed by a real terminal.

use std::io;

use anyhow::{Context, Result};
use crossterm::terminal;

use crate::core::error::SinkError;
use crate::core::shape::Shape;
use crate::core::sinks::{FrameView, RenderSink, ScoreSink};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, PanelView, Viewport};
use crate::renderer::TerminalRenderer;

pub struct TerminalFrontend {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    viewport: Viewport,
    next: Option<Shape>,
    score: u32,
}

impl TerminalFrontend {
    /// Query the terminal size; fails when no terminal is attached.
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("no terminal available")?;
        Ok(Self::with_size(width, height))
    }

    /// Front end for a known viewport size; nothing is drawn until
    /// [`enter`](Self::enter).
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(width, height),
            viewport: Viewport::new(width, height),
            next: None,
            score: 0,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Adopt a new terminal size; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.renderer.invalidate();
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

impl RenderSink for TerminalFrontend {
    fn draw(&mut self, frame: FrameView<'_>) -> Result<(), SinkError> {
        if !self.renderer.is_active() {
            return Err(SinkError::Unavailable("terminal not entered".into()));
        }
        let panel = PanelView {
            score: self.score,
            next: self.next.as_ref(),
        };
        self.view
            .render_into(frame, panel, self.viewport, &mut self.fb);
        self.renderer
            .draw_swap(&mut self.fb)
            .map_err(sink_error)
    }

    fn show_next(&mut self, next: &Shape) -> Result<(), SinkError> {
        self.next = Some(next.clone());
        Ok(())
    }
}

impl ScoreSink for TerminalFrontend {
    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }
}

/// I/O failures keep their own variant; anything else is a backend error.
fn sink_error(err: anyhow::Error) -> SinkError {
    match err.downcast::<io::Error>() {
        Ok(io) => SinkError::Io(io),
        Err(other) => SinkError::Backend(other.into()),
    }
}
