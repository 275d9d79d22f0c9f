use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use emon_ui::DashboardConfig;

fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => DashboardConfig::config_path().context("could not resolve home directory"),
    }
}

/// Print the effective configuration as TOML with the API key redacted.
pub fn show(config: &DashboardConfig) -> Result<()> {
    let text = toml::to_string_pretty(&config.redacted())?;
    print!("{text}");
    Ok(())
}

pub fn path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", resolve_path(explicit)?.display());
    Ok(())
}

pub fn init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_path(explicit)?;
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    DashboardConfig::default()
        .save_to(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
