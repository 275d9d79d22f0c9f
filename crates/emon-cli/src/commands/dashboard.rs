use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use emon_ui::terminal::{self, TerminalOptions, Theme, THEME};
use emon_ui::{html, DashboardConfig, DashboardService, Page, PAGE_TITLE};
use tracing::{error, info};

/// Run the load sequence.
///
/// A failure part way through still returns the partially rendered page
/// together with the error.
fn load(config: &DashboardConfig) -> Result<(Page, Option<anyhow::Error>)> {
    let service = DashboardService::from_config(config).context("setting up document store")?;
    info!(store = service.store().name(), "loading dashboard");

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let mut page = service.empty_page();
    let outcome = runtime.block_on(service.load(&mut page));

    match outcome {
        Ok(report) => {
            info!(
                date = %report.date,
                summary = report.summary_found,
                countries = report.countries.len(),
                "dashboard loaded"
            );
            Ok((page, None))
        }
        Err(e) => {
            error!("dashboard load stopped: {e}");
            Ok((page, Some(anyhow::Error::new(e).context("loading dashboard"))))
        }
    }
}

fn finish(failure: Option<anyhow::Error>) -> Result<()> {
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn show(config: &DashboardConfig, no_color: bool, expand: bool, ascii: bool) -> Result<()> {
    let (page, failure) = load(config)?;

    let opts = TerminalOptions {
        color: config.terminal.color && !no_color && io::stdout().is_terminal(),
        expand: config.terminal.expand || expand,
        theme: if ascii { Theme::ascii() } else { (*THEME).clone() },
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(terminal::render_page(&page, PAGE_TITLE, &opts).as_bytes())?;
    stdout.flush()?;

    finish(failure)
}

pub fn html(config: &DashboardConfig, out: Option<&Path>) -> Result<()> {
    let (page, failure) = load(config)?;
    let document = html::render_page(&page, PAGE_TITLE);

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, document)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote dashboard page");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }

    finish(failure)
}
