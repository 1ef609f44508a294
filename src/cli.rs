//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Version string: plain version for release builds, with git hash and
/// build date for dev builds.
pub fn version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) => {
            let short = &sha[..sha.len().min(7)];
            format!("{version} ({short} {})", env!("RIDEUP_BUILD_DATE"))
        }
        None => version.to_string(),
    }
}

/// Merge an indoor-cycling app's recordings and upload them to Strava.
#[derive(Debug, Parser)]
#[command(name = "rideup", version = &*version().leak(), about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Dates to process (YYYY-MM-DD); today when omitted.
    #[arg(value_name = "DATE")]
    pub dates: Vec<String>,

    /// Run the pipeline but skip Strava authorization and upload.
    #[arg(long)]
    pub dry_run: bool,

    /// Copy each date's cleaned TCX into this directory.
    #[arg(long, value_name = "DIR")]
    pub keep: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage Strava authorization.
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML.
    Show,
    /// Print the configuration file path.
    Path,
    /// Write a default configuration file to edit.
    Init,
}

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Run the browser authorization and cache the tokens.
    Login,
    /// Forget cached tokens.
    Logout,
    /// Show whether tokens are cached and still fresh.
    Status,
}
