//! Generation mix bar chart.
//!
//! Renders a day's generation records as horizontal text bars, one row per
//! production category, largest first. Bars use one block character per
//! 1.5 percentage points so a 100 % category spans 67 characters.

use emon_core::{GenerationMix, GenerationRecord, MixEntry, Viewport};
use tracing::debug;

use crate::page::{ChartRow, Page};

fn row_from_entry(entry: &MixEntry) -> ChartRow {
    ChartRow {
        label: entry.label().to_string(),
        color: entry.color().to_string(),
        bar_length: entry.bar_length(),
        percentage: entry.percentage,
        total: entry.total,
        details_visible: false,
    }
}

/// Chart rows for the categories visible on `viewport`, details collapsed.
pub fn chart_rows(records: &[GenerationRecord], viewport: &Viewport) -> Vec<ChartRow> {
    let mix = GenerationMix::from_records(records);
    mix.visible(viewport).iter().map(row_from_entry).collect()
}

/// Render the chart into a container, replacing what it showed before.
///
/// Returns false when the page has no container with that id.
pub fn render_chart(
    page: &mut Page,
    container_id: &str,
    records: &[GenerationRecord],
    viewport: &Viewport,
) -> bool {
    let Some(container) = page.container_mut(container_id) else {
        debug!(container_id, "chart container not on page");
        return false;
    };
    let rows = chart_rows(records, viewport);
    debug!(container_id, rows = rows.len(), "rendered generation chart");
    container.replace_rows(rows);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use emon_core::{Country, DEFAULT_COLOR};

    fn rec(code: &str, mw: f64) -> GenerationRecord {
        GenerationRecord::new(code, mw)
    }

    #[test]
    fn test_solar_wind_rows() {
        let rows = chart_rows(&[rec("B16", 100.0), rec("B19", 300.0)], &Viewport::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Wind Onshore");
        assert_eq!(rows[0].color, "#A4D9A0");
        assert_eq!(rows[0].bar_length, 50);
        assert_eq!(rows[0].percentage_text(), "(75.0%)");
        assert_eq!(rows[1].label, "Solar");
        assert_eq!(rows[1].bar_length, 17);
        assert_eq!(rows[1].percentage_text(), "(25.0%)");
        assert!(rows.iter().all(|r| !r.details_visible));
    }

    #[test]
    fn test_tied_percentage_rounds_up() {
        let rows = chart_rows(&[rec("B14", 351.0), rec("B16", 49.0)], &Viewport::default());
        assert_eq!(rows[1].label, "Solar");
        assert_eq!(rows[1].percentage_text(), "(12.3%)");
    }

    #[test]
    fn test_unmapped_row() {
        let rows = chart_rows(&[rec("TotalLoad", 10.0)], &Viewport::default());
        assert_eq!(rows[0].label, "TotalLoad");
        assert_eq!(rows[0].color, DEFAULT_COLOR);
    }

    #[test]
    fn test_render_replaces_previous_rows() {
        let mut page = Page::dashboard(&[Country::Italy]);
        let records = vec![rec("B04", 10.0), rec("B16", 5.0)];
        let viewport = Viewport::default();

        assert!(render_chart(&mut page, "italy-chart-container", &records, &viewport));
        assert!(render_chart(&mut page, "italy-chart-container", &records, &viewport));

        let container = page.container("italy-chart-container").unwrap();
        assert_eq!(container.rows().len(), 2);
    }

    #[test]
    fn test_render_into_missing_container() {
        let mut page = Page::dashboard(&[Country::Italy]);
        assert!(!render_chart(&mut page, "spain-chart-container", &[rec("B04", 1.0)], &Viewport::default()));
    }

    #[test]
    fn test_narrow_viewport_eight_categories() {
        let codes = ["B01", "B04", "B05", "B10", "B11", "B12", "B14", "B16"];
        let records: Vec<_> = codes
            .iter()
            .enumerate()
            .map(|(i, c)| rec(c, 100.0 + i as f64))
            .collect();

        assert_eq!(chart_rows(&records, &Viewport::new(375)).len(), 5);
        assert_eq!(chart_rows(&records, &Viewport::new(1024)).len(), 8);
    }

    #[test]
    fn test_zero_total_renders_empty_bars() {
        let rows = chart_rows(&[rec("B01", 0.0), rec("B14", 0.0)], &Viewport::default());
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.percentage, 0.0);
            assert_eq!(row.bar(), "");
            assert_eq!(row.percentage_text(), "(0.0%)");
        }
    }
}
