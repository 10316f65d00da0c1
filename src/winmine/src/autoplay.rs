//! Automatic play from a decoded board
//!
//! A run decodes the board once and walks it in row-major order: hidden empty
//! cells get a left click, mines get a right click (flag). The game may change
//! under a running snapshot; the status poll after every cell is the only
//! resynchronization point and only serves to stop once the round is over.
//! Setting `redecode_every` trades that for a fresh snapshot every K cells.

use serde::Serialize;
use std::thread;
use tracing::{debug, info};

use crate::cell::{Cell, CellKind};
use crate::game::Game;
use crate::geometry::Point;
use crate::memory::MemorySource;
use crate::overlay::{Canvas, Overlay};
use crate::settings::AutoPlaySettings;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Synthetic mouse input aimed at the game window
pub trait InputInjector {
    /// Press `button` at a client-area point
    fn button_down(&mut self, at: Point, button: MouseButton) -> Result<()>;

    /// Release `button` at a client-area point
    fn button_up(&mut self, at: Point, button: MouseButton) -> Result<()>;

    fn click(&mut self, at: Point, button: MouseButton) -> Result<()> {
        self.button_down(at, button)?;
        self.button_up(at, button)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Every cell was visited
    Finished,
    /// The game reported its terminal status right after this cell
    GameOver { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoPlayReport {
    pub visited: usize,
    pub revealed: usize,
    pub flagged: usize,
    pub snapshots: usize,
    pub outcome: Outcome,
}

/// One automatic playthrough configuration
pub struct AutoPlay {
    settings: AutoPlaySettings,
}

impl AutoPlay {
    pub fn new(settings: AutoPlaySettings) -> Self {
        Self { settings }
    }

    /// Client-area point clicked for `cell`
    pub fn click_point(&self, cell: &Cell) -> Point {
        let inset = Point::new(self.settings.click_inset, self.settings.click_inset);
        cell.position + inset - self.settings.client_offset
    }

    pub fn run<S, C, I>(
        &self,
        game: &Game<S>,
        overlay: &mut Overlay<C>,
        input: &mut I,
    ) -> Result<AutoPlayReport>
    where
        S: MemorySource,
        C: Canvas,
        I: InputInjector + ?Sized,
    {
        thread::sleep(self.settings.start_delay());

        let mut board = game.board()?;
        let mut report = AutoPlayReport {
            visited: 0,
            revealed: 0,
            flagged: 0,
            snapshots: 1,
            outcome: Outcome::Finished,
        };
        info!(
            "Autoplay on {}x{} board ({} empty, {} mines)",
            board.width(),
            board.height(),
            board.count(CellKind::Empty),
            board.count(CellKind::Bomb)
        );

        // Bounds come from the current snapshot, which may shrink or grow
        let mut last_snapshot = 0;
        let mut row = 0;
        while row < board.height() {
            let mut col = 0;
            while col < board.width() {
                if self.due_for_snapshot(report.visited, last_snapshot) {
                    board = game.board()?;
                    report.snapshots += 1;
                    last_snapshot = report.visited;
                }
                let Some(cell) = board.cell(row, col).copied() else {
                    break;
                };

                self.act(&cell, overlay, input, &mut report)?;
                report.visited += 1;

                let status = game.status()?;
                if status.terminal {
                    debug!("Game over after ({}, {}), status {}", row, col, status.code);
                    report.outcome = Outcome::GameOver { row, col };
                    return Ok(report);
                }

                thread::sleep(self.settings.action_delay());
                col += 1;
            }
            row += 1;
        }

        Ok(report)
    }

    /// Whether K more cells were visited since the last snapshot
    fn due_for_snapshot(&self, visited: usize, last_snapshot: usize) -> bool {
        match self.settings.redecode_every {
            Some(every) => visited - last_snapshot >= every.get(),
            None => false,
        }
    }

    fn act<C, I>(
        &self,
        cell: &Cell,
        overlay: &mut Overlay<C>,
        input: &mut I,
        report: &mut AutoPlayReport,
    ) -> Result<()>
    where
        C: Canvas,
        I: InputInjector + ?Sized,
    {
        match cell.kind {
            CellKind::Empty => {
                input.click(self.click_point(cell), MouseButton::Left)?;
                overlay.draw_cell(cell)?;
                report.revealed += 1;
            }
            CellKind::Bomb => {
                input.click(self.click_point(cell), MouseButton::Right)?;
                report.flagged += 1;
            }
            CellKind::Unknown => {}
        }
        Ok(())
    }
}
