//! Config subcommands handler

use anyhow::Result;

use rideup::Config;

/// Show current configuration as TOML.
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// Print the configuration file path.
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write a default configuration file, unless one already exists.
pub fn handle_init() -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    Config::default().save()?;
    println!("Wrote {}", path.display());
    println!("Fill in [strava] client_id and client_secret before uploading.");
    Ok(())
}
