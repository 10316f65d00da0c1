//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "winmine")]
#[command(about = "Minesweeper overlay and autoplay from process memory", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/winmine/config.toml)
    #[arg(long, global = true, env = "WINMINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch the game window and accept interactive commands (default)
    Run,

    /// Print a one-off snapshot of the running game
    #[command(visible_alias = "s")]
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change saved settings
    #[command(visible_alias = "c")]
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Caption of the game window
        #[arg(long)]
        window_title: Option<String>,

        /// Executable name of the game process
        #[arg(long)]
        process_name: Option<String>,

        /// Re-read the board every N cells during autoplay (0 = never)
        #[arg(long)]
        redecode_every: Option<usize>,
    },
}
