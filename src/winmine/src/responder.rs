//! Redraw after the user clicks inside the minefield

use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::game::Game;
use crate::geometry::Point;
use crate::memory::MemorySource;
use crate::overlay::{Canvas, Overlay};
use crate::Result;

/// What a single mouse release led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The overlay was repainted with this many markers
    Redrawn(usize),
    /// The click landed outside the grid
    OutsideBoard,
    /// The board could not be read this time
    DecodeFailed,
}

/// Handles left-button releases by refreshing the overlay
pub struct ClickRedraw {
    settle: Duration,
}

impl ClickRedraw {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }

    /// React to a release at screen point `click`
    ///
    /// Decode failures are not errors here: the game may be mid-restart or
    /// exiting, and the next click will try again.
    pub fn on_release<S, C>(
        &self,
        game: &Game<S>,
        overlay: &mut Overlay<C>,
        click: Point,
        window_origin: Point,
    ) -> Result<ClickOutcome>
    where
        S: MemorySource,
        C: Canvas,
    {
        thread::sleep(self.settle);

        let board = match game.board() {
            Ok(board) => board,
            Err(e) => {
                debug!("Skipping redraw: {}", e);
                return Ok(ClickOutcome::DecodeFailed);
            }
        };

        let relative = click - window_origin;
        if !board.contains(relative) {
            return Ok(ClickOutcome::OutsideBoard);
        }

        let drawn = overlay.render(&board)?;
        Ok(ClickOutcome::Redrawn(drawn))
    }
}
