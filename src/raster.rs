//! The 40 column screen of the device.
//!
//! The beam draws one pixel per cycle, left to right, and wraps to the next
//! row every [`SCREEN_WIDTH`] cycles. X holds the horizontal center of a
//! three pixel wide sprite; a pixel is lit when the beam is inside it.

use std::io::{self, Write};

use log::*;

use crate::processor::{Cycle, CycleObserver, Register};

/// Number of pixels in a row
pub const SCREEN_WIDTH: Cycle = 40;
/// Glyph drawn for a lit pixel
pub const LIT: char = '#';
/// Glyph drawn for a dark pixel
pub const DARK: char = ' ';

/// Column the beam is at during `cycle`
///
/// Cycles are counted from 1. Cycle 0 does not exist and is treated like
/// cycle 1.
pub fn beam_column(cycle: Cycle) -> Cycle {
    cycle.saturating_sub(1) % SCREEN_WIDTH
}

/// Whether the sprite centered at `x` covers `column`
pub fn is_lit(column: Cycle, x: Register) -> bool {
    (i64::from(column) - i64::from(x)).abs() <= 1
}

/// Draws the screen into a [`Write`]r, one row at a time
///
/// A row is written and flushed as soon as its last column was drawn. Write
/// errors do not interrupt the processor; the first one is kept and returned
/// by [`RasterRenderer::finish`], and nothing is written after it.
#[derive(Debug)]
pub struct RasterRenderer<W: Write> {
    out: W,
    row: String,
    rows: usize,
    error: Option<io::Error>,
}

impl<W: Write> RasterRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            row: String::with_capacity(SCREEN_WIDTH as usize + 1),
            rows: 0,
            error: None,
        }
    }

    /// Number of completed rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Draws the pixel of `cycle` with the sprite at `x`
    fn draw(&mut self, cycle: Cycle, x: Register) -> io::Result<()> {
        let column = beam_column(cycle);
        self.row.push(if is_lit(column, x) { LIT } else { DARK });

        if column == SCREEN_WIDTH - 1 {
            self.row.push('\n');
            self.out.write_all(self.row.as_bytes())?;
            self.out.flush()?;
            self.row.clear();
            self.rows += 1;

            trace!("Row {} complete at cycle {}", self.rows, cycle);
        }

        Ok(())
    }

    /// Writes a partially drawn row, if any, and returns the writer
    ///
    /// # Errors
    ///
    /// Returns the first error the writer reported while drawing.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }

        if !self.row.is_empty() {
            self.out.write_all(self.row.as_bytes())?;
            self.out.write_all(b"\n")?;
            self.row.clear();
        }
        self.out.flush()?;

        Ok(self.out)
    }
}

impl<W: Write> CycleObserver for RasterRenderer<W> {
    fn observe(&mut self, cycle: Cycle, x: Register) {
        if self.error.is_some() {
            return;
        }

        if let Err(err) = self.draw(cycle, x) {
            error!("Failed to draw cycle {}: {}", cycle, err);
            self.error = Some(err);
        }
    }
}
