//! Handle to one running game

use serde::Serialize;
use tracing::{debug, info};

use crate::board::Board;
use crate::decoder;
use crate::geometry::Geometry;
use crate::layout::{Layout, TIMER_PATCH};
use crate::memory::MemorySource;
use crate::Result;

/// Raw game status word
///
/// Only the terminal code is meaningful here; every other value means the
/// round is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub code: i32,
    pub terminal: bool,
}

/// Memory source bound to the game's base address and offset table
pub struct Game<S> {
    source: S,
    base: usize,
    layout: Layout,
    geometry: Geometry,
}

impl<S: MemorySource> Game<S> {
    pub fn new(source: S, base: usize, layout: Layout, geometry: Geometry) -> Self {
        Self {
            source,
            base,
            layout,
            geometry,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn address(&self, offset: usize) -> usize {
        self.base + offset
    }

    /// Take a fresh snapshot of the minefield
    pub fn board(&self) -> Result<Board> {
        decoder::decode(&self.source, self.base, &self.layout, self.geometry)
    }

    /// `(width, height)` as currently stored by the game
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        decoder::read_dimensions(&self.source, self.base, &self.layout)
    }

    /// Value of the remaining-mines counter
    pub fn mine_count(&self) -> Result<i32> {
        self.source.read_i32(self.address(self.layout.mine_count))
    }

    pub fn timer(&self) -> Result<i32> {
        self.source.read_i32(self.address(self.layout.timer))
    }

    pub fn set_timer(&self, seconds: i32) -> Result<()> {
        self.source.write_i32(self.address(self.layout.timer), seconds)
    }

    pub fn status(&self) -> Result<GameStatus> {
        let code = self.source.read_i32(self.address(self.layout.game_status))?;
        Ok(GameStatus {
            code,
            terminal: code == self.layout.terminal_status,
        })
    }

    /// Overwrite the timer increment with NOPs and reset the timer to zero
    pub fn freeze_timer(&self) -> Result<()> {
        let site = self.address(self.layout.time_increment);
        self.source.write_bytes(site, &TIMER_PATCH)?;
        self.set_timer(0)?;
        info!("Timer increment patched at {:#x}", site);
        Ok(())
    }

    /// Whether the timer increment has already been patched out
    pub fn timer_frozen(&self) -> Result<bool> {
        let site = self.address(self.layout.time_increment);
        let current = self.source.read_bytes(site, TIMER_PATCH.len())?;
        debug!("Timer increment bytes: {:02x?}", current);
        Ok(current == TIMER_PATCH)
    }

    /// Everything readable about the game at once
    pub fn snapshot(&self) -> Result<GameSnapshot> {
        let board = self.board()?;
        Ok(GameSnapshot {
            width: board.width(),
            height: board.height(),
            mines: self.mine_count()?,
            timer: self.timer()?,
            timer_frozen: self.timer_frozen()?,
            status: self.status()?,
            board,
        })
    }
}

/// Point-in-time view used by the `status` outputs
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub mines: i32,
    pub timer: i32,
    pub timer_frozen: bool,
    pub status: GameStatus,
    pub board: Board,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemorySource;

    const BASE: usize = 0x100_0000;

    fn game() -> Game<MockMemorySource> {
        let layout = Layout::default();
        let source = MockMemorySource::zeroed(0x6000, BASE);
        source.poke_i32(BASE + layout.width, 9);
        source.poke_i32(BASE + layout.height, 9);
        source.poke_i32(BASE + layout.mine_count, 10);
        source.poke_i32(BASE + layout.timer, 42);
        // inc dword ptr [0100579C] followed by a push
        source.poke(
            BASE + layout.time_increment,
            &[0xFF, 0x05, 0x9C, 0x57, 0x00, 0x01],
        );
        Game::new(source, BASE, layout, Geometry::default())
    }

    /// One second of game time: run the increment unless it was patched out
    fn tick(game: &Game<MockMemorySource>) {
        let layout = game.layout();
        let code = game.source().peek(BASE + layout.time_increment, TIMER_PATCH.len());
        if code != TIMER_PATCH {
            let timer = game.timer().unwrap();
            game.source().poke_i32(BASE + layout.timer, timer + 1);
        }
    }

    #[test]
    fn test_counters() {
        let game = game();
        assert_eq!(game.mine_count().unwrap(), 10);
        assert_eq!(game.timer().unwrap(), 42);
        assert_eq!(game.dimensions().unwrap(), (9, 9));
    }

    #[test]
    fn test_timer_runs_until_frozen() {
        let game = game();
        tick(&game);
        tick(&game);
        assert_eq!(game.timer().unwrap(), 44);
        assert!(!game.timer_frozen().unwrap());
    }

    #[test]
    fn test_freeze_timer() {
        let game = game();
        game.freeze_timer().unwrap();

        assert_eq!(
            game.source().peek(BASE + Layout::default().time_increment, 6),
            vec![0x90; 6]
        );
        assert_eq!(game.timer().unwrap(), 0);
        assert!(game.timer_frozen().unwrap());

        for _ in 0..5 {
            tick(&game);
        }
        assert_eq!(game.timer().unwrap(), 0);
    }

    #[test]
    fn test_set_timer() {
        let game = game();
        game.set_timer(7).unwrap();
        assert_eq!(game.timer().unwrap(), 7);
    }

    #[test]
    fn test_status_codes() {
        let game = game();
        let layout = *game.layout();

        for code in [0, 1, 2, 4, -1] {
            game.source().poke_i32(BASE + layout.game_status, code);
            let status = game.status().unwrap();
            assert_eq!(status.code, code);
            assert!(!status.terminal, "code {} should not be terminal", code);
        }

        game.source().poke_i32(BASE + layout.game_status, 3);
        assert!(game.status().unwrap().terminal);
    }

    #[test]
    fn test_snapshot() {
        let game = game();
        let snapshot = game.snapshot().unwrap();
        assert_eq!(snapshot.width, 9);
        assert_eq!(snapshot.height, 9);
        assert_eq!(snapshot.mines, 10);
        assert_eq!(snapshot.timer, 42);
        assert!(!snapshot.status.terminal);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["mines"], 10);
        assert_eq!(json["board"]["rows"].as_array().unwrap().len(), 9);
    }
}
