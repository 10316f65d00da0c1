//! Game status output

use anyhow::{Context, Result};
use winmine::{Game, GameSnapshot, Settings};

use crate::process::WinmineProcess;

/// Handle the `status` subcommand
pub fn handle(settings: &Settings, json: bool) -> Result<()> {
    let process = WinmineProcess::attach(&settings.process_name)
        .context("Failed to attach to the game process")?;
    let base = process.base_address;
    let game = Game::new(process, base, settings.layout, settings.geometry);

    let snapshot = game.snapshot().context("Failed to read game state")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", format_snapshot(&snapshot));
    }
    Ok(())
}

/// Human-readable snapshot, board drawn as text
pub fn format_snapshot(snapshot: &GameSnapshot) -> String {
    let status = if snapshot.status.terminal {
        "over"
    } else {
        "running"
    };
    let timer = if snapshot.timer_frozen {
        format!("{} (frozen)", snapshot.timer)
    } else {
        snapshot.timer.to_string()
    };

    format!(
        "Board: {}x{}\nMines: {}\nTimer: {}\nStatus: {} ({})\n{}",
        snapshot.width,
        snapshot.height,
        snapshot.mines,
        timer,
        status,
        snapshot.status.code,
        snapshot.board
    )
}
