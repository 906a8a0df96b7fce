//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw. Later frames only emit the spans of glyphs that changed.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    /// Undo everything [`enter`](Self::enter) did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        reset_style(&mut self.buf)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (after a resize, say).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. The renderer
    /// diffs against the previous frame and then swaps buffers, so the caller
    /// gets the old one back to draw the next frame into.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if same_size(&prev, fb) => {
                queue_changed_spans(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                queue_full_frame(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Queues glyphs, switching terminal style only when it changes.
struct GlyphWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<Style>,
}

impl<'a> GlyphWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn glyphs(&mut self, glyphs: &[Glyph]) -> Result<()> {
        for glyph in glyphs {
            if self.style != Some(glyph.style) {
                queue_style(self.out, glyph.style)?;
                self.style = Some(glyph.style);
            }
            self.out.queue(Print(glyph.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        reset_style(self.out)
    }
}

/// Queue a clear-screen followed by every row of `fb`.
pub fn queue_full_frame(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut writer = GlyphWriter::new(out);
    for y in 0..fb.height() {
        writer.out.queue(cursor::MoveTo(0, y))?;
        writer.glyphs(fb.row(y).unwrap_or_default())?;
    }
    writer.finish()
}

/// Queue only the horizontal spans where `next` differs from `prev`.
///
/// Both buffers must be the same size; a size mismatch falls back to a full
/// frame.
pub fn queue_changed_spans(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    if !same_size(prev, next) {
        return queue_full_frame(next, out);
    }

    let mut writer = GlyphWriter::new(out);
    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        for span in changed_spans(old, new) {
            writer.out.queue(cursor::MoveTo(span.start as u16, y))?;
            writer.glyphs(&new[span])?;
        }
    }
    writer.finish()
}

/// Maximal ranges of indices where the two rows disagree
fn changed_spans(old: &[Glyph], new: &[Glyph]) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = Vec::new();
    for (i, _) in old.iter().zip(new).enumerate().filter(|(_, (a, b))| a != b) {
        match spans.last_mut() {
            Some(last) if last.end == i => last.end = i + 1,
            _ => spans.push(i..i + 1),
        }
    }
    spans
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(Color::from(style.fg)))?;
    out.queue(SetBackgroundColor(Color::from(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_style(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_changes_form_one_span() {
        let a = FrameBuffer::new(6, 1);
        let mut b = FrameBuffer::new(6, 1);
        b.put_str(1, 0, "XXX", Style::default());
        b.put_char(5, 0, 'Y', Style::default());

        let spans = changed_spans(a.row(0).unwrap(), b.row(0).unwrap());
        assert_eq!(spans, vec![1..4, 5..6]);
    }

    #[test]
    fn identical_frames_queue_no_glyphs() {
        let a = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        queue_changed_spans(&a, &a.clone(), &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains(' '));
    }

    #[test]
    fn diff_only_prints_changed_glyphs() {
        let mut a = FrameBuffer::new(5, 2);
        a.put_str(0, 0, "hello", Style::default());
        let mut b = a.clone();
        b.put_char(4, 1, 'Z', Style::default());

        let mut out = Vec::new();
        queue_changed_spans(&a, &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('Z'));
        assert!(!text.contains("hello"));
    }

    #[test]
    fn full_frame_contains_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", Style::default());
        fb.put_str(0, 1, "def", Style::default());
        let mut out = Vec::new();
        queue_full_frame(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abc"));
        assert!(text.contains("def"));
        assert_eq!(
            Color::from(Style::default().fg),
            Color::Rgb {
                r: 220,
                g: 220,
                b: 220
            }
        );
    }
}
