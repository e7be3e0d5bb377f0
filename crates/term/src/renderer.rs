//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared row by row with the previous one. Rows that did not
//! change are skipped; a changed row is redrawn from its first to its last
//! differing column.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            prev: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode plus alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the previous frame so the next one is drawn in full
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `frame`, then swap it with the retained previous frame.
    ///
    /// After the call `frame` holds stale contents the caller redraws over,
    /// so two buffers cycle without cloning.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.prev.as_ref(), frame, &mut self.buf)?;
        self.flush()?;

        match self.prev.as_mut() {
            Some(prev) => std::mem::swap(prev, frame),
            None => self.prev = Some(frame.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Columns `[start, end)` where two rows differ
pub fn dirty_span(prev: &[Glyph], next: &[Glyph]) -> Option<(u16, u16)> {
    if prev.len() != next.len() {
        return (!next.is_empty()).then_some((0, next.len() as u16));
    }
    let start = prev.iter().zip(next).position(|(a, b)| a != b)?;
    let end = prev
        .iter()
        .zip(next)
        .rposition(|(a, b)| a != b)
        .map_or(start, |i| i + 1);
    Some((start as u16, end as u16))
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// Without a previous frame, or when the size changed, the screen is cleared
/// and every row is written.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut current: Option<Style> = None;
    for y in 0..next.height() {
        let row = next.row(y);
        let span = match prev {
            Some(prev) => dirty_span(prev.row(y), row),
            None => Some((0, next.width())),
        };
        let Some((start, end)) = span else {
            continue;
        };

        out.queue(cursor::MoveTo(start, y))?;
        for glyph in &row[start as usize..end as usize] {
            if current != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                current = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char) -> Glyph {
        Glyph::new(ch, Style::default())
    }

    #[test]
    fn test_dirty_span_covers_first_to_last_change() {
        let prev = [glyph('a'), glyph('b'), glyph('c'), glyph('d'), glyph('e')];
        let mut next = prev;
        next[1] = glyph('x');
        next[3] = glyph('y');
        assert_eq!(dirty_span(&prev, &next), Some((1, 4)));
        assert_eq!(dirty_span(&prev, &prev), None);
    }

    #[test]
    fn test_unchanged_frame_writes_no_glyphs() {
        let mut a = FrameBuffer::new(4, 2);
        a.text(0, 0, "QQQQ", Style::default());
        let mut out = Vec::new();
        encode_frame(Some(&a), &a, &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains('Q'));
    }

    #[test]
    fn test_full_frame_writes_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.text(0, 0, "ab", Style::default());
        fb.text(0, 1, "cd", Style::default());
        let mut out = Vec::new();
        encode_frame(None, &fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ab"));
        assert!(text.contains("cd"));
    }

    #[test]
    fn test_present_swaps_buffers() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let mut frame = FrameBuffer::new(2, 1);
        frame.text(0, 0, "hi", Style::default());
        renderer.present(&mut frame).unwrap();
        assert!(String::from_utf8_lossy(&renderer.out).contains("hi"));

        renderer.out.clear();
        renderer.present(&mut frame).unwrap();
        assert!(!String::from_utf8_lossy(&renderer.out).contains("hi"));
    }
}
