//! Config subcommands handler

use std::path::Path;

use anyhow::{bail, Result};

use subseek::theme::current_theme;
use subseek::Config;

use super::{config_path, load_config};

/// Show the effective configuration as TOML.
pub fn handle_show(explicit: Option<&Path>) -> Result<()> {
    let config = load_config(explicit)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(config.to_toml()?.trim_end()));
    Ok(())
}

pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", config_path(explicit)?.display());
    Ok(())
}

/// Write a default config file.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn handle_init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path(explicit)?;
    let theme = current_theme();

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path)?;
    println!(
        "{}",
        theme.success_text(&format!("Wrote default config to {}", path.display()))
    );
    Ok(())
}
