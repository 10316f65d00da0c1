//! Configuration command handlers
//!
//! Handles the `configure` subcommand for viewing and saving settings.

use crate::config::Config;
use anyhow::{Context, Result};
use std::num::NonZeroUsize;

/// Handle the configure command
pub fn handle(
    mut config: Config,
    show: bool,
    window_title: Option<String>,
    process_name: Option<String>,
    redecode_every: Option<usize>,
) -> Result<()> {
    if show {
        return show_config(&config);
    }

    let changed = apply(&mut config, window_title, process_name, redecode_every);
    if !changed {
        show_usage();
        return Ok(());
    }

    config.save()?;
    println!("Config saved to: {}", config.path.display());
    Ok(())
}

/// Apply the requested changes, returning whether anything was set
fn apply(
    config: &mut Config,
    window_title: Option<String>,
    process_name: Option<String>,
    redecode_every: Option<usize>,
) -> bool {
    let mut changed = false;
    let settings = &mut config.settings;

    if let Some(title) = window_title {
        settings.window_title = title;
        changed = true;
    }
    if let Some(name) = process_name {
        settings.process_name = name;
        changed = true;
    }
    if let Some(every) = redecode_every {
        settings.autoplay.redecode_every = NonZeroUsize::new(every);
        changed = true;
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config) -> Result<()> {
    let text =
        toml::to_string_pretty(&config.settings).context("Failed to serialize config")?;
    println!("{}", text);
    println!("Config file: {}", config.path.display());
    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: winmine configure [--show] [--window-title TITLE] [--process-name NAME] [--redecode-every N]");
}
