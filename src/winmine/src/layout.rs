//! Offset table for the game image
//!
//! The defaults match the `winmine.exe` that shipped with Windows XP. Other
//! builds move these around and will decode garbage.

use serde::{Deserialize, Serialize};

/// Six NOPs written over the timer increment (`inc dword ptr [timer]`)
pub const TIMER_PATCH: [u8; 6] = [0x90; 6];

/// Offsets relative to the module base, plus build constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Start of the cell array
    pub board: usize,
    pub width: usize,
    pub height: usize,
    /// Remaining-mines counter shown in the top left
    pub mine_count: usize,
    pub timer: usize,
    /// Code address of the timer increment instruction
    pub time_increment: usize,
    pub game_status: usize,
    /// Bytes per row in the cell array, independent of the board width
    pub row_stride: usize,
    /// Status code the game holds once a round is won or lost
    pub terminal_status: i32,
    /// Largest width the game accepts
    pub max_width: usize,
    /// Largest height the game accepts
    pub max_height: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            board: 0x5360,
            width: 0x5334,
            height: 0x5338,
            mine_count: 0x56A4,
            timer: 0x579C,
            time_increment: 0x2FF5,
            game_status: 0x5160,
            row_stride: 32,
            terminal_status: 3,
            max_width: 30,
            max_height: 24,
        }
    }
}

impl Layout {
    /// Bytes covering `height` rows of the cell array
    pub fn board_size(&self, height: usize) -> usize {
        self.row_stride * height
    }
}
