//! rideup binary entry point.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{AuthAction, Cli, Commands, ConfigAction};
use rideup::pipeline::{self, RunOptions};
use rideup::{dates, Config};

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

/// Log to stderr; `RIDEUP_LOG` overrides the default `info` level.
fn init_logging() {
    let filter = EnvFilter::try_from_env("RIDEUP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Path => commands::config::handle_path(),
            ConfigAction::Init => commands::config::handle_init(),
        },
        Some(Commands::Auth { action }) => match action {
            AuthAction::Login => commands::auth::handle_login(),
            AuthAction::Logout => commands::auth::handle_logout(),
            AuthAction::Status => commands::auth::handle_status(),
        },
        None => {
            // Date validation comes first: a bad argument aborts before
            // any file is touched.
            let dates = dates::parse_dates(&cli.dates)?;
            let config = Config::load()?;
            let options = RunOptions {
                dry_run: cli.dry_run,
                keep_dir: cli.keep,
            };
            pipeline::run(&config, &dates, &options)
        }
    }
}
