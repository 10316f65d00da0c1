mod cli;
mod commands;
mod config;
mod platform;
mod process;
mod session;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "winmine=debug"
    } else {
        "winmine=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load(cli.config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            session::run(&config.settings)?;
        }

        Commands::Status { json } => {
            commands::status::handle(&config.settings, json)?;
        }

        Commands::Configure {
            show,
            window_title,
            process_name,
            redecode_every,
        } => {
            commands::configure::handle(config, show, window_title, process_name, redecode_every)?;
        }
    }

    Ok(())
}
