pub mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use emon_ui::DashboardConfig;

pub use cli::{build_cli_command, Cli, Commands, ConfigCommands, PageArgs, StoreArgs};

/// Load the config file named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load_from(path)
            .with_context(|| format!("reading config file {}", path.display())),
        None => DashboardConfig::load().context("reading default config file"),
    }
}

/// Config file with command-line overrides applied.
pub fn effective_config(
    path: Option<&Path>,
    store: &StoreArgs,
    page: &PageArgs,
) -> Result<DashboardConfig> {
    let mut config = load_config(path)?;
    store.apply(&mut config);
    page.apply(&mut config);
    Ok(config)
}
