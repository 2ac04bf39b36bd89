//! Screens the presenter can paint on.
//!
//! The hardware build drives a small LCD; this crate ships a virtual
//! character-cell screen that renders to any `Write` (a terminal by
//! default).  Both follow the same lifecycle: acquire, paint repeatedly,
//! clear and release exactly once on the way out.  [`ScreenGuard`] ties the
//! release to scope so it also happens on error and Ctrl-C paths.

use std::io::Write;
use std::ops::{Deref, DerefMut};

use thiserror::Error;
use tracing::{debug, warn};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("display of {width}x{height} cells is too small (need at least 1x1)")]
    TooSmall { width: u16, height: u16 },

    #[error("display already released")]
    Released,
}

// ── Screen trait ──────────────────────────────────────────────────────────────

/// A display surface that can show one label at a time.
pub trait Screen {
    /// `(width, height)` in the screen's native units.
    fn size(&self) -> (u16, u16);

    /// Blank the whole surface.
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Replace the current content with `label`, bottom-right, highlighted.
    fn show_label(&mut self, label: &str) -> Result<(), DisplayError>;

    /// Shut the device down.  Called once, after a final `clear`.
    fn release(&mut self) -> Result<(), DisplayError>;
}

// ── TerminalScreen ────────────────────────────────────────────────────────────

const ANSI_HOME: &str = "\x1b[H";
const ANSI_CLEAR: &str = "\x1b[2J\x1b[H";
const ANSI_INVERT: &str = "\x1b[7m";
const ANSI_RESET: &str = "\x1b[0m";

/// Character-cell screen rendered with ANSI escapes.
///
/// The label sits one cell in from the right and bottom edges, drawn in
/// inverse video with one cell of padding each side, like the black box the
/// LCD build draws behind white text.
pub struct TerminalScreen<W: Write> {
    out: W,
    width: u16,
    height: u16,
    cells: Vec<Vec<char>>,
    /// `(row, first_col, last_col_exclusive)` of the inverse-video box.
    highlight: Option<(usize, usize, usize)>,
    released: bool,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W, width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 {
            return Err(DisplayError::TooSmall { width, height });
        }
        debug!(width, height, "Terminal screen initialised");
        Ok(Self {
            out,
            width,
            height,
            cells: vec![vec![' '; usize::from(width)]; usize::from(height)],
            highlight: None,
            released: false,
        })
    }

    /// Current framebuffer, one `String` per row.
    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|r| r.iter().collect()).collect()
    }

    /// Highlighted region, if a label is shown.
    pub fn highlight(&self) -> Option<(usize, usize, usize)> {
        self.highlight
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn blank(&mut self) {
        for row in &mut self.cells {
            row.iter_mut().for_each(|c| *c = ' ');
        }
        self.highlight = None;
    }

    fn ensure_live(&self) -> Result<(), DisplayError> {
        if self.released {
            Err(DisplayError::Released)
        } else {
            Ok(())
        }
    }

    fn flush_frame(&mut self) -> Result<(), DisplayError> {
        let mut frame = String::from(ANSI_HOME);
        for (y, row) in self.cells.iter().enumerate() {
            match self.highlight {
                Some((hy, x0, x1)) if hy == y => {
                    frame.extend(&row[..x0]);
                    frame.push_str(ANSI_INVERT);
                    frame.extend(&row[x0..x1]);
                    frame.push_str(ANSI_RESET);
                    frame.extend(&row[x1..]);
                }
                _ => frame.extend(row),
            }
            if y + 1 < self.cells.len() {
                frame.push('\n');
            }
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_live()?;
        self.blank();
        self.out.write_all(ANSI_CLEAR.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn show_label(&mut self, label: &str) -> Result<(), DisplayError> {
        self.ensure_live()?;
        self.blank();

        let width = usize::from(self.width);
        let height = usize::from(self.height);

        // Box = 1 pad + text + 1 pad, kept 1 cell off the right/bottom edge
        // when there is room for it.
        let margin = usize::from(width >= 4);
        // Control characters (newlines, ESC) would break the frame layout.
        let text: Vec<char> = label
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .take(width.saturating_sub(2 + margin).max(1))
            .collect();
        let box_width = (text.len() + 2).min(width);
        let x1 = width - margin;
        let x0 = x1.saturating_sub(box_width);
        let y = height - 1 - usize::from(height >= 3);

        let text_start = if box_width > text.len() { x0 + 1 } else { x0 };
        for (i, c) in text.iter().enumerate() {
            if let Some(cell) = self.cells[y].get_mut(text_start + i) {
                *cell = *c;
            }
        }
        self.highlight = Some((y, x0, x1));

        self.flush_frame()
    }

    fn release(&mut self) -> Result<(), DisplayError> {
        self.ensure_live()?;
        self.released = true;
        debug!("Terminal screen released");
        Ok(())
    }
}

// ── ScreenGuard ───────────────────────────────────────────────────────────────

/// Owns a [`Screen`] and clears + releases it when dropped.
pub struct ScreenGuard<S: Screen> {
    screen: S,
    released: bool,
}

impl<S: Screen> ScreenGuard<S> {
    pub fn new(screen: S) -> Self {
        Self {
            screen,
            released: false,
        }
    }

    /// Clear and release now, reporting any failure.  Dropping afterwards is
    /// a no-op.
    pub fn release(&mut self) -> Result<(), DisplayError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        let cleared = self.screen.clear();
        let released = self.screen.release();
        cleared.and(released)
    }
}

impl<S: Screen> Deref for ScreenGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.screen
    }
}

impl<S: Screen> DerefMut for ScreenGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.screen
    }
}

impl<S: Screen> Drop for ScreenGuard<S> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("Failed to release display: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
