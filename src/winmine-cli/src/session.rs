//! Interactive session against the game window
//!
//! A session finds the window, attaches to the process, then serves two
//! inputs: mouse releases (redraw the overlay) and prompt commands. Any failure
//! ends the session; the outer loop logs it, backs off and starts over from
//! window discovery.

use anyhow::{Context, Result};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use winmine::{AutoPlay, ClickRedraw, Error, Game, Outcome, Overlay, Point, Settings};

use crate::commands::prompt::{PromptCommand, PROMPT};
use crate::commands::status::format_snapshot;
use crate::platform::{self, Window, WindowCanvas};
use crate::process::WinmineProcess;

/// State shared by the prompt and the click listener
struct Table {
    game: Game<WinmineProcess>,
    overlay: Overlay<WindowCanvas>,
}

type SharedTable = Arc<Mutex<Table>>;

fn lock(table: &SharedTable) -> MutexGuard<'_, Table> {
    table.lock().unwrap_or_else(|e| e.into_inner())
}

/// Why a session ended early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    ProcessUnavailable,
    TransientRead,
    WindowLost,
    /// Retrying cannot help (no Win32 here)
    Fatal,
    Other,
}

impl Failure {
    pub fn classify(error: &anyhow::Error) -> Self {
        let cause = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<Error>());

        match cause {
            Some(Error::ProcessUnavailable(_)) => Failure::ProcessUnavailable,
            Some(Error::WindowNotFound(_)) => Failure::WindowLost,
            Some(Error::Unsupported(_)) => Failure::Fatal,
            Some(e) if e.is_transient() => Failure::TransientRead,
            _ => Failure::Other,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Failure::ProcessUnavailable => "game process unavailable",
            Failure::TransientRead => "game memory could not be read",
            Failure::WindowLost => "game window lost",
            Failure::Fatal => "unsupported platform",
            Failure::Other => "unexpected error",
        };
        f.write_str(text)
    }
}

/// Run sessions until the user quits
pub fn run(settings: &Settings) -> Result<()> {
    retry_sessions(settings.session.error_backoff(), || run_session(settings))
}

/// Restart `session` after every recoverable failure
fn retry_sessions<F>(backoff: Duration, mut session: F) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    loop {
        match session() {
            Ok(()) => return Ok(()),
            Err(e) => {
                let failure = Failure::classify(&e);
                if failure == Failure::Fatal {
                    return Err(e);
                }
                warn!("Session ended ({}): {:#}", failure, e);
                println!("Something went wrong ({}), restarting...", failure);
                thread::sleep(backoff);
            }
        }
    }
}

fn run_session(settings: &Settings) -> Result<()> {
    let window = wait_for_window(settings)?;
    println!("Found the Minesweeper window, listening for mouse clicks...");

    let process = WinmineProcess::attach(&settings.process_name)
        .context("Failed to attach to the game process")?;
    debug!("{}", process.info());
    let base = process.base_address;
    let game = Game::new(process, base, settings.layout, settings.geometry);
    let overlay = Overlay::new(window.canvas()?, &settings.overlay);
    let table = Arc::new(Mutex::new(Table { game, overlay }));

    let releases = platform::subscribe_releases()?;
    let handler = ClickRedraw::new(settings.session.click_settle());
    spawn_click_listener(table.clone(), window.clone(), releases, handler)?;

    let stdin = io::stdin();
    let result = command_loop(stdin.lock(), &mut io::stdout(), |command, out| {
        execute(settings, &table, &window, command, out)
    });
    platform::unsubscribe_releases();
    result
}

/// Poll for the game window until it shows up
fn wait_for_window(settings: &Settings) -> Result<Window> {
    loop {
        if let Some(window) = Window::find(&settings.window_title)? {
            return Ok(window);
        }
        println!(
            "Minesweeper window {:?} not found, please open the game!",
            settings.window_title
        );
        thread::sleep(settings.session.window_retry());
    }
}

fn spawn_click_listener(
    table: SharedTable,
    window: Window,
    releases: Receiver<Point>,
    handler: ClickRedraw,
) -> Result<()> {
    thread::Builder::new()
        .name("click-redraw".to_string())
        .spawn(move || {
            for click in releases {
                let Ok(origin) = window.origin() else {
                    continue;
                };
                let mut guard = lock(&table);
                let table = &mut *guard;
                match handler.on_release(&table.game, &mut table.overlay, click, origin) {
                    Ok(outcome) => debug!("Release at {:?}: {:?}", click, outcome),
                    Err(e) => warn!("Overlay redraw failed: {}", e),
                }
            }
            debug!("Click listener stopped");
        })
        .context("Failed to start click listener")?;
    Ok(())
}

/// Prompt for commands on `input` until `q` or end of input
///
/// Unknown input is reported on `out` and the prompt repeats.
fn command_loop<R, W, F>(input: R, out: &mut W, mut execute: F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(PromptCommand, &mut W) -> Result<()>,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Failed to read command")?;

        match PromptCommand::parse(&line) {
            Ok(PromptCommand::Quit) => return Ok(()),
            Ok(command) => execute(command, out)?,
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

fn execute<W: Write>(
    settings: &Settings,
    table: &SharedTable,
    window: &Window,
    command: PromptCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        PromptCommand::Quit => {}
        PromptCommand::AutoPlay => autoplay(settings, table, window, out)?,
        PromptCommand::FreezeTimer => {
            lock(table)
                .game
                .freeze_timer()
                .context("Failed to patch the timer")?;
            writeln!(out, "Timer stopped and reset to 0.")?;
        }
        PromptCommand::Status => {
            let snapshot = lock(table)
                .game
                .snapshot()
                .context("Failed to read game state")?;
            write!(out, "{}", format_snapshot(&snapshot))?;
        }
    }
    Ok(())
}

fn autoplay<W: Write>(
    settings: &Settings,
    table: &SharedTable,
    window: &Window,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Starting autoplay, keep the mouse away from the board...")?;
    out.flush()?;

    let mut input = window.input();
    let report = {
        let mut guard = lock(table);
        let table = &mut *guard;
        AutoPlay::new(settings.autoplay.clone())
            .run(&table.game, &mut table.overlay, &mut input)
            .context("Autoplay failed")?
    };

    info!(
        "Autoplay visited {} cells: {} revealed, {} flagged",
        report.visited, report.revealed, report.flagged
    );
    match report.outcome {
        Outcome::Finished => writeln!(out, "Autoplay finished!")?,
        Outcome::GameOver { row, col } => writeln!(
            out,
            "Game over after cell ({}, {}), autoplay stopped.",
            row, col
        )?,
    }
    Ok(())
}
