//! Memory-backed board reader for the classic Minesweeper (`winmine.exe`)
//!
//! The game keeps its whole minefield in a fixed-stride byte array inside the
//! process image. This crate reads that array back into a typed [`Board`],
//! paints an overlay of the hidden cells through a [`Canvas`], and can play a
//! round by feeding clicks to an [`InputInjector`].
//!
//! # Memory Layout
//!
//! All offsets are relative to the module base (see [`Layout`]):
//! - `0x5334`: board width (i32)
//! - `0x5338`: board height (i32)
//! - `0x5360`: cell array, 32 bytes per row, first byte of each row is padding
//!   (the border row in front of it at `0x5340` is not part of the grid)
//! - `0x5160`: game status (i32, `3` once the round is over)
//! - `0x579C`: timer (i32)
//! - `0x2FF5`: the instruction that increments the timer
//!
//! Cell bytes: `0x0F` is a hidden empty cell, `0x8F` a hidden mine. Every other
//! value (revealed numbers, flags, borders) is treated as unknown.

mod autoplay;
mod board;
mod cell;
mod decoder;
mod game;
mod geometry;
mod layout;
pub mod memory;
mod overlay;
mod responder;
mod settings;

pub use autoplay::{AutoPlay, AutoPlayReport, InputInjector, MouseButton, Outcome};
pub use board::Board;
pub use cell::{Cell, CellKind, Rgb};
pub use decoder::{decode, read_dimensions};
pub use game::{Game, GameSnapshot, GameStatus};
pub use geometry::{is_inside_board, Geometry, Point, Rect, Size};
pub use layout::{Layout, TIMER_PATCH};
pub use memory::MemorySource;
pub use overlay::{Canvas, Overlay};
pub use responder::{ClickOutcome, ClickRedraw};
pub use settings::{AutoPlaySettings, OverlaySettings, SessionSettings, Settings};

/// Errors raised while talking to the game process or its window
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Game process unavailable: {0}")]
    ProcessUnavailable(String),

    #[error("Memory read failed at {address:#x} ({size} bytes): {reason}")]
    MemoryRead {
        address: usize,
        size: usize,
        reason: String,
    },

    #[error("Memory write failed at {address:#x} ({size} bytes): {reason}")]
    MemoryWrite {
        address: usize,
        size: usize,
        reason: String,
    },

    #[error("Game window not found: {0}")]
    WindowNotFound(String),

    #[error("Implausible board dimensions {width}x{height}")]
    ImplausibleDimensions { width: i32, height: i32 },

    #[error("Not supported on this platform: {0}")]
    Unsupported(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

impl Error {
    /// A single failed snapshot that is worth retrying on the next event
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::MemoryRead { .. } | Error::ImplausibleDimensions { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
