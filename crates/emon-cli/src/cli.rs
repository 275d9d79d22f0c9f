use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use emon_core::Country;
use emon_ui::{DashboardConfig, StoreKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "emon", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    /// Configuration file (defaults to ~/.emon/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the dashboard to the terminal
    Show {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        page: PageArgs,
        /// Disable ANSI colours
        #[arg(long)]
        no_color: bool,
        /// Show the detail line of every chart row
        #[arg(long)]
        expand: bool,
        /// Use ASCII box drawing
        #[arg(long)]
        ascii: bool,
    },
    /// Write the dashboard as an HTML page
    Html {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        page: PageArgs,
        /// Write output to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Check that the dashboard documents are reachable
    Check {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        page: PageArgs,
        /// Skip printing the summary document
        #[arg(long)]
        quiet: bool,
    },
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (API key redacted)
    Show {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Store selection, overriding the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Firestore project id
    #[arg(long, env = "EMON_FIRESTORE_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Firestore web API key
    #[arg(long, env = "EMON_FIRESTORE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Firestore REST endpoint (e.g. the emulator)
    #[arg(long, env = "EMON_FIRESTORE_BASE_URL")]
    pub base_url: Option<String>,

    /// Read documents from JSON files under this directory instead of Firestore
    #[arg(long, env = "EMON_LOCAL_ROOT", value_hint = ValueHint::DirPath)]
    pub local_root: Option<PathBuf>,
}

impl StoreArgs {
    pub fn apply(&self, config: &mut DashboardConfig) {
        if let Some(project_id) = &self.project_id {
            config.firestore.project_id = project_id.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.firestore.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.firestore.base_url = base_url.clone();
        }
        if let Some(root) = &self.local_root {
            config.store.kind = StoreKind::Local;
            config.store.local_root = Some(root.clone());
        }
    }
}

/// Page options, overriding the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Generation date to show (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Show generation from this many days ago
    #[arg(long, conflicts_with = "date")]
    pub days_ago: Option<u32>,

    /// Countries to chart, comma separated
    #[arg(long, value_delimiter = ',', value_parser = parse_country)]
    pub countries: Vec<Country>,

    /// Layout width; below the breakpoint only the top rows are charted
    #[arg(long)]
    pub viewport_width: Option<u32>,

    /// Leave containers blank when a country has no document
    #[arg(long)]
    pub no_missing_notice: bool,
}

impl PageArgs {
    pub fn apply(&self, config: &mut DashboardConfig) {
        let page = &mut config.page;
        if let Some(date) = &self.date {
            page.date = Some(date.clone());
        }
        if let Some(days_ago) = self.days_ago {
            page.days_ago = days_ago;
            page.date = None;
        }
        if !self.countries.is_empty() {
            page.countries = self.countries.clone();
        }
        if let Some(width) = self.viewport_width {
            page.viewport_width = width;
        }
        if self.no_missing_notice {
            page.show_missing_notice = false;
        }
    }
}

fn parse_country(raw: &str) -> Result<Country, String> {
    raw.parse().map_err(|e: emon_core::EmonError| e.to_string())
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli_command().debug_assert();
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "emon",
            "show",
            "--local-root",
            "/srv/docs",
            "--countries",
            "spain,italy",
            "--days-ago",
            "1",
            "--viewport-width",
            "375",
        ])
        .unwrap();
        let Commands::Show { store, page, .. } = cli.command else {
            panic!("expected show");
        };

        let mut config = DashboardConfig::default();
        config.page.date = Some("2026-01-01".to_string());
        store.apply(&mut config);
        page.apply(&mut config);

        assert_eq!(config.store.kind, StoreKind::Local);
        assert_eq!(config.page.countries, vec![Country::Spain, Country::Italy]);
        assert_eq!(config.page.days_ago, 1);
        assert_eq!(config.page.date, None);
        assert!(config.page.viewport().is_narrow());
    }

    #[test]
    fn test_unknown_country_rejected() {
        let parsed = Cli::try_parse_from(["emon", "html", "--countries", "germany"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_date_conflicts_with_days_ago() {
        let parsed =
            Cli::try_parse_from(["emon", "show", "--date", "2026-10-17", "--days-ago", "3"]);
        assert!(parsed.is_err());
    }
}
