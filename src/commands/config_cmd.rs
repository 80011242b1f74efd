use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

pub fn show_config(config: &Config) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", contents);
    Ok(())
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if Config::init(path, force)? {
        println!("{} Wrote default configuration to {}", "✓".green(), path.display());
    } else {
        println!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}
