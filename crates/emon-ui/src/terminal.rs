//! Terminal backend.
//!
//! Renders the page as a plain-text report: the summary figures in a box,
//! then one bar chart per country. Category labels can be coloured with
//! 24-bit ANSI escapes using the chart colours.

use once_cell::sync::Lazy;

use crate::page::{ids, ChartRow, ContainerContent, Page};

/// Box drawing and marker characters.
#[derive(Clone, Debug)]
pub struct Theme {
    pub heavy_border: &'static str,
    pub light_border: &'static str,
    pub vertical: &'static str,
    pub empty_icon: &'static str,
    pub expanded: &'static str,
    pub collapsed: &'static str,
}

impl Theme {
    pub const fn unicode() -> Self {
        Self {
            heavy_border: "━",
            light_border: "─",
            vertical: "│",
            empty_icon: "◌",
            expanded: "▾",
            collapsed: "▸",
        }
    }

    /// ASCII-only theme for terminals without UTF-8 support
    pub const fn ascii() -> Self {
        Self {
            heavy_border: "=",
            light_border: "-",
            vertical: "|",
            empty_icon: "o",
            expanded: "v",
            collapsed: ">",
        }
    }

    /// Unicode when the locale advertises UTF-8 and `fancy-ui` is on.
    pub fn auto() -> Self {
        if cfg!(feature = "fancy-ui") && Self::supports_utf8() {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }

    fn supports_utf8() -> bool {
        ["LC_ALL", "LC_CTYPE", "LANG"].iter().any(|var| {
            std::env::var(var)
                .map(|v| v.to_ascii_lowercase().contains("utf"))
                .unwrap_or(false)
        })
    }
}

pub static THEME: Lazy<Theme> = Lazy::new(Theme::auto);

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Parse `#RRGGBB` into its components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Wrap `text` in a 24-bit foreground colour escape.
pub fn paint(text: &str, color: &str) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m{text}{RESET}"),
        None => text.to_string(),
    }
}

/// Terminal report options.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    pub color: bool,
    /// Show detail lines of collapsed rows too
    pub expand: bool,
    pub theme: Theme,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            color: true,
            expand: false,
            theme: (*THEME).clone(),
        }
    }
}

impl TerminalOptions {
    fn style(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn figure(page: &Page, id: &str) -> String {
    page.text(id).unwrap_or("--").to_string()
}

fn row_lines(row: &ChartRow, label_width: usize, opts: &TerminalOptions) -> Vec<String> {
    let padding = " ".repeat(label_width.saturating_sub(row.label.chars().count()));
    let label = if opts.color {
        paint(&row.label, &row.color)
    } else {
        row.label.clone()
    };
    let show_details = opts.expand || row.details_visible;
    let marker = if show_details {
        opts.theme.expanded
    } else {
        opts.theme.collapsed
    };

    let mut lines = vec![format!(
        "{marker} {label}{padding} {} {}{}{}",
        opts.theme.vertical,
        row.bar(),
        if row.bar_length > 0 { " " } else { "" },
        row.percentage_text()
    )];
    if show_details {
        lines.push(format!("  {}", opts.style(DIM, &row.details_text())));
    }
    lines
}

/// Render the page as report lines.
pub fn render_lines(page: &Page, title: &str, opts: &TerminalOptions) -> Vec<String> {
    let theme = &opts.theme;
    let rule = theme.heavy_border.repeat(60);
    let thin = theme.light_border.repeat(60);
    let mut lines = Vec::new();

    lines.push(rule.clone());
    lines.push(opts.style(BOLD, title));
    lines.push(format!("Analysis date: {}", figure(page, ids::ANALYSIS_DATE)));
    lines.push(rule);

    let summary = [
        ("Annual saving, Italy (bn)", ids::ANNUAL_SAVING),
        ("Annual saving per family", ids::FAMILY_SAVING),
        ("Saving on energy cost", ids::PERCENTAGE_SAVING),
        ("National demand (MWh)", ids::DEMAND),
        ("Actual cost (M EUR)", ids::ACTUAL_COST),
        ("Simulated cost (M EUR)", ids::SIMULATED_COST),
        ("PUN used (EUR/MWh)", ids::PUN_USED),
        ("Daily saving (M EUR)", ids::DAILY_SAVING),
    ];
    for (name, id) in summary {
        if page.element(id).is_none() {
            continue;
        }
        lines.push(format!("{name:<28} {} {}", theme.vertical, figure(page, id)));
    }

    for container in page.containers() {
        lines.push(String::new());
        lines.push(opts.style(BOLD, &container.title));
        lines.push(thin.clone());
        match &container.content {
            ContainerContent::Empty => {}
            ContainerContent::Notice(notice) => {
                lines.push(format!("{} {}", theme.empty_icon, notice));
            }
            ContainerContent::Chart(rows) => {
                let width = rows
                    .iter()
                    .map(|r| r.label.chars().count())
                    .max()
                    .unwrap_or(0);
                for row in rows {
                    lines.extend(row_lines(row, width, opts));
                }
            }
        }
    }

    lines
}

/// Render the page as one string.
pub fn render_page(page: &Page, title: &str, opts: &TerminalOptions) -> String {
    let mut out = render_lines(page, title, opts).join("\n");
    out.push('\n');
    out
}
