//! Overlay painting on top of the game window

use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::board::Board;
use crate::cell::{Cell, Rgb};
use crate::geometry::Rect;
use crate::settings::OverlaySettings;
use crate::Result;

/// Drawing surface of the game window
///
/// Implementations acquire their device context and color resources when they
/// are created and release them on drop.
pub trait Canvas {
    /// Invalidate the window and let it repaint itself
    fn refresh(&mut self) -> Result<()>;

    /// Paint a filled, outlined rectangle in window coordinates
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;
}

/// Paints one marker per known cell
pub struct Overlay<C> {
    canvas: C,
    marker_inset: i32,
    repaint_settle: Duration,
}

impl<C: Canvas> Overlay<C> {
    pub fn new(canvas: C, settings: &OverlaySettings) -> Self {
        Self {
            canvas,
            marker_inset: settings.marker_inset,
            repaint_settle: settings.repaint_settle(),
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Rectangle the marker for `cell` occupies
    pub fn marker_rect(&self, cell: &Cell) -> Rect {
        cell.rect().inset(self.marker_inset)
    }

    /// Repaint the window, then mark every known cell. Returns markers drawn.
    pub fn render(&mut self, board: &Board) -> Result<usize> {
        self.canvas.refresh()?;
        thread::sleep(self.repaint_settle);

        let mut drawn = 0;
        for cell in board.cells() {
            if self.draw_cell(cell)? {
                drawn += 1;
            }
        }

        debug!("Overlay drew {} markers", drawn);
        Ok(drawn)
    }

    /// Mark a single cell without repainting. Unknown cells are skipped.
    pub fn draw_cell(&mut self, cell: &Cell) -> Result<bool> {
        let Some(color) = cell.color() else {
            return Ok(false);
        };
        let rect = self.marker_rect(cell);
        self.canvas.fill_rect(rect, color)?;
        Ok(true)
    }
}
