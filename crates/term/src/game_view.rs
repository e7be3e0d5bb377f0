//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure layout and styling; no I/O. Board cells are two columns wide to make
//! them roughly square on common terminal fonts.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Cell, PieceKind, EMPTY, MAX_SHAPE_SIZE};

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const WELL: Rgb = Rgb::new(24, 24, 32);
const BORDER: Rgb = Rgb::new(190, 190, 200);
const LABEL: Rgb = Rgb::new(230, 230, 230);

const BLOCK: char = '█';
const GHOST: char = '░';

const HELP: [&str; 6] = [
    "←→  move",
    "↓   soft drop",
    "↑ x z  rotate",
    "spc hard drop",
    "c   hold",
    "p r q",
];

/// Display color for a piece kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::hex(0xFF0D72),
        PieceKind::O => Rgb::hex(0x0DC2FF),
        PieceKind::L => Rgb::hex(0x0DFF72),
        PieceKind::J => Rgb::hex(0xF538FF),
        PieceKind::I => Rgb::hex(0xFF8E0D),
        PieceKind::S => Rgb::hex(0xFFE138),
        PieceKind::Z => Rgb::hex(0x3877FF),
    }
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

/// Where the board frame sits inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            show_ghost: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_ghost(mut self, show: bool) -> Self {
        self.show_ghost = show;
        self
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let w = snap.width as u16 * self.cell_w + 2;
        let h = snap.height as u16 + 2;
        Layout {
            x: viewport.width.saturating_sub(w + self.panel_width()) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn panel_width(&self) -> u16 {
        MAX_SHAPE_SIZE as u16 * self.cell_w + 4
    }

    /// Render into a reused framebuffer, resizing it to the viewport
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::new(' ', Style::new(LABEL, BACKGROUND)));

        let layout = self.layout(snap, viewport);
        self.draw_frame(fb, layout);
        self.draw_well(fb, snap, layout);
        self.draw_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_banner(fb, layout, "GAME OVER", Some("r to restart"));
        } else if snap.paused {
            self.draw_banner(fb, layout, "PAUSED", Some("p to resume"));
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, l: Layout) {
        let style = Style::new(BORDER, BACKGROUND);
        let right = l.x + l.w - 1;
        let bottom = l.y + l.h - 1;

        fb.rect(l.x + 1, l.y, l.w - 2, 1, Glyph::new('─', style));
        fb.rect(l.x + 1, bottom, l.w - 2, 1, Glyph::new('─', style));
        fb.rect(l.x, l.y + 1, 1, l.h - 2, Glyph::new('│', style));
        fb.rect(right, l.y + 1, 1, l.h - 2, Glyph::new('│', style));
        fb.set(l.x, l.y, Glyph::new('┌', style));
        fb.set(right, l.y, Glyph::new('┐', style));
        fb.set(l.x, bottom, Glyph::new('└', style));
        fb.set(right, bottom, Glyph::new('┘', style));
    }

    fn draw_well(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        for y in 0..snap.height as i16 {
            for x in 0..snap.width as i16 {
                let cell = snap.visible_cell(x, y).unwrap_or(EMPTY);
                let glyph = if cell != EMPTY {
                    cell_glyph(cell)
                } else if self.show_ghost && snap.is_ghost(x, y) {
                    ghost_glyph(snap)
                } else {
                    Glyph::new(' ', Style::new(LABEL, WELL))
                };
                fb.rect(
                    l.x + 1 + x as u16 * self.cell_w,
                    l.y + 1 + y as u16,
                    self.cell_w,
                    1,
                    glyph,
                );
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, l: Layout) {
        let x = l.x + l.w + 2;
        if x >= viewport.width {
            return;
        }
        let label = Style::new(LABEL, BACKGROUND).bold();
        let value = Style::new(LABEL, BACKGROUND);

        let mut y = l.y;
        fb.text(x, y, "LINES", label);
        fb.number(x, y + 1, snap.lines, value);
        y += 3;

        fb.text(x, y, "NEXT", label);
        self.draw_preview(fb, x, y + 1, &snap.next_shape, snap.next, false);
        y += 2 + MAX_SHAPE_SIZE as u16;

        fb.text(x, y, "HOLD", label);
        if let (Some(kind), Some(shape)) = (snap.hold, snap.hold_shape.as_ref()) {
            self.draw_preview(fb, x, y + 1, shape, kind, snap.hold_used);
        }
        y += 2 + MAX_SHAPE_SIZE as u16;

        if y + HELP.len() as u16 <= viewport.height {
            let help = Style::new(LABEL, BACKGROUND).dim();
            for (i, line) in HELP.iter().enumerate() {
                fb.text(x, y + i as u16, line, help);
            }
        }
    }

    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        shape: &Shape,
        kind: PieceKind,
        dimmed: bool,
    ) {
        let mut style = Style::new(piece_color(kind), BACKGROUND);
        if dimmed {
            style = style.dim();
        }
        for (dx, dy) in shape.occupied() {
            fb.rect(
                x + dx as u16 * self.cell_w,
                y + dy as u16,
                self.cell_w,
                1,
                Glyph::new(BLOCK, style),
            );
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, l: Layout, title: &str, hint: Option<&str>) {
        let mid = l.y + l.h / 2;
        let style = Style::new(Rgb::new(255, 255, 255), BACKGROUND).bold();
        for (row, text) in [(mid, Some(title)), (mid + 1, hint)] {
            let Some(text) = text else { continue };
            let width = text.chars().count() as u16;
            fb.text(l.x + l.w.saturating_sub(width) / 2, row, text, style);
        }
    }
}

fn cell_glyph(cell: Cell) -> Glyph {
    let fg = PieceKind::from_cell(cell)
        .map(piece_color)
        .unwrap_or(LABEL);
    Glyph::new(BLOCK, Style::new(fg, WELL))
}

fn ghost_glyph(snap: &GameSnapshot) -> Glyph {
    let fg = snap
        .active
        .map(|active| piece_color(active.kind))
        .unwrap_or(LABEL);
    Glyph::new(GHOST, Style::new(fg, WELL).dim())
}
