//! GameView: maps a session frame into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::shape::Shape;
use crate::core::sinks::FrameView;
use crate::core::well::Well;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::MAX_COLOR_ID;

/// Block colours indexed by colour id; index 0 is the empty cell.
pub const PALETTE: [Rgb; MAX_COLOR_ID as usize + 1] = [
    Rgb::new(0x1E, 0x1E, 0x28),
    Rgb::new(0xFF, 0x0D, 0x72),
    Rgb::new(0x0D, 0xC2, 0xFF),
    Rgb::new(0x0D, 0xFF, 0x72),
    Rgb::new(0xF5, 0x38, 0xFF),
    Rgb::new(0xFF, 0x8E, 0x0D),
    Rgb::new(0xFF, 0xE1, 0x38),
    Rgb::new(0x38, 0x77, 0xFF),
];

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Colour for a cell value; out-of-range values fall back to the empty colour.
pub fn color_for(value: u8) -> Rgb {
    PALETTE
        .get(usize::from(value))
        .copied()
        .unwrap_or(PALETTE[0])
}

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the well frame sits on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// Side-panel contents that do not come from the frame itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelView<'a> {
    pub score: u32,
    pub next: Option<&'a Shape>,
}

pub struct GameView {
    /// Well cell width in terminal columns.
    cell_w: u16,
    /// Well cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render one frame into an existing framebuffer.
    pub fn render_into(
        &self,
        frame: FrameView<'_>,
        panel: PanelView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(frame.well, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, layout, border);

        for (y, row) in frame.well.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as i32, y as i32);
                match cell {
                    Some(kind) => self.draw_block(fb, layout, x, y, kind.color_id()),
                    None => self.draw_empty(fb, layout, x, y),
                }
            }
        }

        if let Some(active) = frame.active {
            for (x, y, kind) in active.cells() {
                if frame.well.get(x, y).is_some() {
                    self.draw_block(fb, layout, x, y, kind.color_id());
                }
            }
        }

        self.draw_side_panel(fb, panel, viewport, layout);

        if frame.paused {
            self.draw_overlay_text(fb, layout, "PAUSED");
        } else if frame.game_over {
            self.draw_overlay_text(fb, layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: FrameView<'_>, panel: PanelView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, panel, viewport, &mut fb);
        fb
    }

    fn layout(&self, well: &Well, viewport: Viewport) -> Layout {
        let cols = u16::try_from(well.width()).unwrap_or(u16::MAX);
        let rows = u16::try_from(well.height()).unwrap_or(u16::MAX);
        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_mul(self.cell_h).saturating_add(2);
        Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
        let (x, y, w, h) = (l.start_x, l.start_y, l.frame_w, l.frame_h);
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, l: Layout, x: i32, y: i32) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_well_cell(fb, l, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, l: Layout, x: i32, y: i32, color_id: u8) {
        let style = CellStyle::new(color_for(color_id), WELL_BG).bold();
        self.fill_well_cell(fb, l, x, y, '█', style);
    }

    /// Cells that land outside the framebuffer are skipped.
    fn fill_well_cell(&self, fb: &mut FrameBuffer, l: Layout, x: i32, y: i32, ch: char, style: CellStyle) {
        let px = cell_origin(l.start_x, 1, x, self.cell_w);
        let py = cell_origin(l.start_y, 1, y, self.cell_h);
        let (Some(px), Some(py)) = (px, py) else {
            return;
        };
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, panel: PanelView<'_>, viewport: Viewport, l: Layout) {
        let panel_x = l.start_x.saturating_add(l.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = l.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, panel.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let Some(next) = panel.next else {
            fb.put_str(panel_x, y, "-", value);
            return;
        };
        for (dx, dy, kind) in next.filled() {
            let style = CellStyle::new(color_for(kind.color_id()), Rgb::new(0, 0, 0));
            let (Some(px), Some(py)) = (
                cell_origin(panel_x, 0, dx, self.cell_w),
                cell_origin(y, 0, dy, self.cell_h),
            ) else {
                continue;
            };
            if px < fb.width() && py < fb.height() {
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, l: Layout, text: &str) {
        let mid_y = l.start_y.saturating_add(l.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = l.start_x.saturating_add(l.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Screen coordinate of grid cell `index` of size `size` starting after
/// `base + inset`; `None` when it does not fit in a `u16`.
fn cell_origin(base: u16, inset: u16, index: i32, size: u16) -> Option<u16> {
    let index = u32::try_from(index).ok()?;
    let pos = u32::from(base) + u32::from(inset) + index.checked_mul(u32::from(size))?;
    u16::try_from(pos).ok()
}
