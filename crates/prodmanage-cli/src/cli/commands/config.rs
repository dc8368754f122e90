//! Config command handlers.

use anyhow::{Context, Result};
use prodmanage_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

/// Prints the effective configuration, with the API URL after env override.
pub fn show(config: &config::Config) -> Result<()> {
    let mut effective = config.clone();
    effective.api.base_url = config.effective_base_url()?;
    let rendered = toml::to_string_pretty(&effective).context("render config")?;
    print!("{rendered}");
    Ok(())
}

pub fn set_url(url: &str) -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::save_base_url(url)
        .with_context(|| format!("update config at {}", config_path.display()))?;
    println!("API base URL set to {}", url.trim());
    Ok(())
}
