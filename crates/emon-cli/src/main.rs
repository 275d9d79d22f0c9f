use std::process::ExitCode;

use clap::Parser;
use emon_cli::{effective_config, Cli, Commands, ConfigCommands};
use tracing::{debug, error};
use tracing_subscriber::FmtSubscriber;

mod commands;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Show {
            store,
            page,
            no_color,
            expand,
            ascii,
        } => {
            let config = effective_config(config_path, store, page)?;
            commands::dashboard::show(&config, *no_color, *expand, *ascii)
        }
        Commands::Html { store, page, out } => {
            let config = effective_config(config_path, store, page)?;
            commands::dashboard::html(&config, out.as_deref())
        }
        Commands::Check { store, page, quiet } => {
            let config = effective_config(config_path, store, page)?;
            commands::check::handle(&config, *quiet)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show { store, page } => {
                let config = effective_config(config_path, store, page)?;
                commands::config::show(&config)
            }
            ConfigCommands::Path => commands::config::path(config_path),
            ConfigCommands::Init { force } => commands::config::init(config_path, *force),
        },
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {e}");
    }

    if let Some(path) = cli.config.as_deref() {
        debug!(path = %path.display(), "using config file");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
