//! Auth subcommands handler

use anyhow::Result;
use chrono::Utc;

use rideup::strava::{Authenticator, TokenCache};
use rideup::Config;

/// Run the browser authorization and cache the tokens.
pub fn handle_login() -> Result<()> {
    let config = Config::load()?;
    let auth = Authenticator::new(&config.strava);
    auth.access_token()?;
    println!("Authorized with Strava; tokens cached.");
    Ok(())
}

/// Forget cached tokens.
pub fn handle_logout() -> Result<()> {
    let config = Config::load()?;
    let auth = Authenticator::new(&config.strava);
    auth.logout()?;
    println!("Cached tokens removed.");
    Ok(())
}

/// Show whether tokens are cached and still fresh.
pub fn handle_status() -> Result<()> {
    let cache = match TokenCache::default_path() {
        Some(path) => TokenCache::new(path),
        None => {
            println!("No token cache location available.");
            return Ok(());
        }
    };
    match cache.load() {
        Some(tokens) if tokens.is_fresh(Utc::now().timestamp()) => {
            println!("Authorized; access token is fresh.");
        }
        Some(_) => {
            println!("Authorized; access token expired (will refresh on next upload).");
        }
        None => {
            println!("Not authorized; run `rideup auth login`.");
        }
    }
    Ok(())
}
