//! HTML backend.
//!
//! Produces a self-contained dashboard document. Chart rows keep the
//! `ascii-row` / `ascii-details` structure: each detail line starts hidden
//! and a small inline script toggles it when its row is clicked.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::page::{ids, ChartContainer, ChartRow, ContainerContent, Page};

/// Placeholder for elements the load never wrote.
pub const UNSET: &str = "--";

const STYLE: &str = r#"
body { background: #0d1117; color: #c9d1d9; font-family: "Fira Code", Menlo, Consolas, monospace; margin: 0 auto; max-width: 1100px; padding: 1.5rem; }
h1, h2 { color: #58a6ff; font-weight: normal; }
.kpis { display: flex; flex-wrap: wrap; gap: 1rem; }
.kpi { border: 1px solid #30363d; flex: 1 1 14rem; padding: 1rem; }
.kpi p { font-size: 1.6rem; margin: 0.4rem 0 0; }
table.summary td { padding: 0.2rem 1rem 0.2rem 0; }
.ascii-chart { margin-bottom: 2rem; white-space: pre; }
.ascii-row { cursor: pointer; }
.ascii-label { display: inline-block; min-width: 16rem; }
.ascii-bar { color: #c9d1d9; }
.ascii-percentage { margin-left: 0.5rem; }
.ascii-details { color: #8b949e; display: none; }
.ascii-notice { color: #8b949e; font-style: italic; }
@media (max-width: 767px) { .ascii-label { min-width: 10rem; } }
"#;

const SCRIPT: &str = r#"
document.querySelectorAll('.ascii-row').forEach(function (row) {
    row.addEventListener('click', function () {
        var details = row.nextElementSibling;
        details.style.display = details.style.display === 'block' ? 'none' : 'block';
    });
});
"#;

fn text_of<'a>(page: &'a Page, id: &str) -> &'a str {
    page.text(id).unwrap_or(UNSET)
}

fn write_figure(out: &mut String, page: &Page, id: &str, title: &str) {
    let _ = writeln!(
        out,
        r#"<div class="kpi"><h3>{}</h3><p id="{}">{}</p></div>"#,
        encode_text(title),
        encode_double_quoted_attribute(id),
        encode_text(text_of(page, id))
    );
}

fn write_summary_row(out: &mut String, page: &Page, id: &str, title: &str) {
    let _ = writeln!(
        out,
        r#"<tr><td>{}</td><td id="{}">{}</td></tr>"#,
        encode_text(title),
        encode_double_quoted_attribute(id),
        encode_text(text_of(page, id))
    );
}

/// One chart row and its hidden detail line.
pub fn row_html(row: &ChartRow) -> String {
    let display = if row.details_visible { "block" } else { "none" };
    format!(
        r#"<div class="ascii-row" title="Click for details"><span class="ascii-label" style="color: {};">{}</span><span class="ascii-bar">{}</span><span class="ascii-percentage">{}</span></div><div class="ascii-details" style="display: {display};">{}</div>"#,
        encode_double_quoted_attribute(&row.color),
        encode_text(&row.label),
        row.bar(),
        encode_text(&row.percentage_text()),
        encode_text(&row.details_text()),
    )
}

/// Inner HTML of a chart container.
pub fn container_html(container: &ChartContainer) -> String {
    match &container.content {
        ContainerContent::Empty => String::new(),
        ContainerContent::Chart(rows) => rows.iter().map(row_html).collect::<Vec<_>>().join("\n"),
        ContainerContent::Notice(notice) => format!(
            r#"<div class="ascii-notice">{}</div>"#,
            encode_text(notice)
        ),
    }
}

/// Render the whole page as an HTML document.
pub fn render_page(page: &Page, title: &str) -> String {
    let mut out = String::with_capacity(8 * 1024);

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, r#"<html lang="it">"#);
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"<meta charset="utf-8">"#);
    let _ = writeln!(
        out,
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#
    );
    let _ = writeln!(out, "<title>{}</title>", encode_text(title));
    let _ = writeln!(out, "<style>{STYLE}</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");

    let _ = writeln!(out, "<header>");
    let _ = writeln!(out, "<h1>{}</h1>", encode_text(title));
    let _ = writeln!(
        out,
        r#"<p>Analysis date: <span id="{}">{}</span></p>"#,
        ids::ANALYSIS_DATE,
        encode_text(text_of(page, ids::ANALYSIS_DATE))
    );
    let _ = writeln!(out, "</header>");

    let _ = writeln!(out, r#"<section class="kpis">"#);
    write_figure(&mut out, page, ids::ANNUAL_SAVING, "Annual saving, Italy (billion EUR)");
    write_figure(&mut out, page, ids::FAMILY_SAVING, "Annual saving per family");
    write_figure(&mut out, page, ids::PERCENTAGE_SAVING, "Saving on energy cost");
    let _ = writeln!(out, "</section>");

    let _ = writeln!(out, "<section>");
    let _ = writeln!(out, "<h2>Simulation details</h2>");
    let _ = writeln!(out, r#"<table class="summary">"#);
    write_summary_row(&mut out, page, ids::DEMAND, "National demand (MWh)");
    write_summary_row(&mut out, page, ids::ACTUAL_COST, "Actual cost (million EUR)");
    write_summary_row(&mut out, page, ids::SIMULATED_COST, "Simulated cost (million EUR)");
    write_summary_row(&mut out, page, ids::PUN_USED, "PUN used (EUR/MWh)");
    if page.element(ids::DAILY_SAVING).is_some() {
        write_summary_row(&mut out, page, ids::DAILY_SAVING, "Daily saving (million EUR)");
    }
    let _ = writeln!(out, "</table>");
    let _ = writeln!(out, "</section>");

    let _ = writeln!(out, "<section>");
    let _ = writeln!(out, "<h2>Daily generation mix</h2>");
    for container in page.containers() {
        let _ = writeln!(out, "<h3>{}</h3>", encode_text(&container.title));
        let _ = writeln!(
            out,
            r#"<div id="{}" class="ascii-chart">{}</div>"#,
            encode_double_quoted_attribute(&container.id),
            container_html(container)
        );
    }
    let _ = writeln!(out, "</section>");

    let _ = writeln!(out, "<script>{SCRIPT}</script>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::render_chart;
    use emon_core::units::Megawatts;
    use emon_core::{Country, GenerationRecord, Viewport};

    #[test]
    fn test_row_structure() {
        let row = ChartRow {
            label: "Wind Onshore".to_string(),
            color: "#A4D9A0".to_string(),
            bar_length: 3,
            percentage: 4.5,
            total: Megawatts(1500.0),
            details_visible: false,
        };
        let html = row_html(&row);
        assert!(html.starts_with(r#"<div class="ascii-row" title="Click for details">"#));
        assert!(html.contains(r#"style="color: #A4D9A0;">Wind Onshore</span>"#));
        assert!(html.contains(r#"<span class="ascii-bar">███</span>"#));
        assert!(html.contains("(4.5%)"));
        assert!(html.contains(r#"style="display: none;"> -Total Production: 1,500 MWh</div>"#));
    }

    #[test]
    fn test_labels_are_escaped() {
        let row = ChartRow {
            label: "<script>alert(1)</script>".to_string(),
            color: "\" onmouseover=\"x".to_string(),
            bar_length: 0,
            percentage: 0.0,
            total: Megawatts(0.0),
            details_visible: true,
        };
        let html = row_html(&row);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("\" onmouseover"));
        assert!(html.contains("display: block;"));
    }

    #[test]
    fn test_page_contains_every_id() {
        let mut page = Page::dashboard(&Country::ALL);
        render_chart(
            &mut page,
            "france-chart-container",
            &[GenerationRecord::new("B14", 40000.0)],
            &Viewport::default(),
        );
        page.container_mut("spain-chart-container")
            .unwrap()
            .show_notice("No generation data for 2026-10-17");

        let html = render_page(&page, "Energy Monitor");
        for id in ids::SUMMARY {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing {id}");
        }
        assert!(html.contains(r#"id="italy-chart-container" class="ascii-chart"></div>"#));
        assert!(html.contains("Nuclear"));
        assert!(html.contains("No generation data for 2026-10-17"));
        assert!(html.contains(&format!(r#"id="{}">{UNSET}<"#, ids::DEMAND)));
    }
}
