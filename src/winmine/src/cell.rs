//! Cell classification and per-cell values

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Raw byte of a hidden cell with no mine under it
pub const RAW_EMPTY: u8 = 0x0F;
/// Raw byte of a hidden cell holding a mine
pub const RAW_BOMB: u8 = 0x8F;

/// What the overlay knows about a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Unknown,
    Empty,
    Bomb,
}

impl CellKind {
    /// Classify a raw cell byte. Unrecognized bytes map to `Unknown`.
    pub const fn classify(raw: u8) -> Self {
        match raw {
            RAW_EMPTY => CellKind::Empty,
            RAW_BOMB => CellKind::Bomb,
            _ => CellKind::Unknown,
        }
    }

    /// Marker color, `None` for cells that are never drawn
    pub const fn color(self) -> Option<Rgb> {
        match self {
            CellKind::Empty => Some(Rgb::GREEN),
            CellKind::Bomb => Some(Rgb::RED),
            CellKind::Unknown => None,
        }
    }

    /// Single character used for text dumps of a board
    pub const fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Bomb => '*',
            CellKind::Unknown => '?',
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GREEN: Rgb = Rgb(3, 192, 60);
    pub const RED: Rgb = Rgb(255, 0, 0);

    /// Every color the overlay can paint with
    pub const PALETTE: [Rgb; 2] = [Rgb::GREEN, Rgb::RED];
}

/// A decoded cell, positioned in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// Top-left corner relative to the window
    pub position: Point,
    /// Edge length in pixels (cells are square)
    pub size: i32,
    pub kind: CellKind,
    /// Address the raw byte was read from
    pub address: usize,
}

impl Cell {
    pub fn color(&self) -> Option<Rgb> {
        self.kind.color()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size, self.size)
    }
}
