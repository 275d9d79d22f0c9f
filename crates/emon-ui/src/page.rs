//! Page model.
//!
//! The dashboard is a fixed set of text elements and chart containers
//! addressed by element id. Renderers write into the page by id; the HTML
//! and terminal backends read it back out. Writing to an id the page does
//! not declare is a no-op, mirroring a lookup that finds no element.

use emon_core::format::{fixed, grouped_integer, Grouping};
use emon_core::mix::BAR_CHAR;
use emon_core::units::Megawatts;
use emon_core::Country;
use serde::Serialize;
use tracing::debug;

/// Element ids of the summary figures.
pub mod ids {
    pub const ANALYSIS_DATE: &str = "analysis-date";
    pub const ANNUAL_SAVING: &str = "kpi-annual-saving";
    pub const FAMILY_SAVING: &str = "kpi-family-saving";
    pub const PERCENTAGE_SAVING: &str = "kpi-percentage-saving";
    pub const DEMAND: &str = "summary-demand";
    pub const ACTUAL_COST: &str = "summary-actual-cost";
    pub const SIMULATED_COST: &str = "summary-sim-cost";
    pub const PUN_USED: &str = "summary-pun-used";
    pub const DAILY_SAVING: &str = "summary-daily-saving";

    /// The eight figures every summary load writes.
    pub const SUMMARY: [&str; 8] = [
        ANALYSIS_DATE,
        ANNUAL_SAVING,
        FAMILY_SAVING,
        PERCENTAGE_SAVING,
        DEMAND,
        ACTUAL_COST,
        SIMULATED_COST,
        PUN_USED,
    ];
}

/// A text element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextElement {
    pub id: String,
    pub text: Option<String>,
}

/// One rendered chart row: label, bar, percentage and a collapsible detail line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub color: String,
    pub bar_length: usize,
    pub percentage: f64,
    pub total: Megawatts,
    pub details_visible: bool,
}

impl ChartRow {
    pub fn bar(&self) -> String {
        BAR_CHAR.to_string().repeat(self.bar_length)
    }

    /// `(75.0%)`
    pub fn percentage_text(&self) -> String {
        format!("({}%)", fixed(self.percentage, 1))
    }

    /// ` -Total Production: 1,234 MWh`
    pub fn details_text(&self) -> String {
        format!(
            " -Total Production: {} MWh",
            grouped_integer(self.total.value(), Grouping::English)
        )
    }

    /// Show or hide the detail line, as a click on the row does.
    pub fn toggle(&mut self) {
        self.details_visible = !self.details_visible;
    }
}

/// What a chart container currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ContainerContent {
    #[default]
    Empty,
    Chart(Vec<ChartRow>),
    Notice(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartContainer {
    pub id: String,
    pub title: String,
    pub content: ContainerContent,
}

impl ChartContainer {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: ContainerContent::Empty,
        }
    }

    /// Replace the content with chart rows.
    pub fn replace_rows(&mut self, rows: Vec<ChartRow>) {
        self.content = ContainerContent::Chart(rows);
    }

    pub fn show_notice(&mut self, notice: impl Into<String>) {
        self.content = ContainerContent::Notice(notice.into());
    }

    pub fn clear(&mut self) {
        self.content = ContainerContent::Empty;
    }

    pub fn rows(&self) -> &[ChartRow] {
        match &self.content {
            ContainerContent::Chart(rows) => rows,
            _ => &[],
        }
    }

    pub fn rows_mut(&mut self) -> &mut [ChartRow] {
        match &mut self.content {
            ContainerContent::Chart(rows) => rows,
            _ => &mut [],
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match &self.content {
            ContainerContent::Notice(n) => Some(n),
            _ => None,
        }
    }

    /// Toggle the detail line of row `index`; false if there is no such row.
    pub fn toggle_row(&mut self, index: usize) -> bool {
        match self.rows_mut().get_mut(index) {
            Some(row) => {
                row.toggle();
                true
            }
            None => false,
        }
    }
}

/// The dashboard page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    elements: Vec<TextElement>,
    containers: Vec<ChartContainer>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary elements plus one chart container per country, all unset.
    pub fn dashboard(countries: &[Country]) -> Self {
        let mut page = Self::new();
        for id in ids::SUMMARY.iter().chain(std::iter::once(&ids::DAILY_SAVING)) {
            page.add_element(*id);
        }
        for country in countries {
            page.add_container(ChartContainer::new(
                country.container_id(),
                country.display_name(),
            ));
        }
        page
    }

    pub fn add_element(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.element(&id).is_none() {
            self.elements.push(TextElement { id, text: None });
        }
    }

    pub fn add_container(&mut self, container: ChartContainer) {
        if self.container(&container.id).is_none() {
            self.containers.push(container);
        }
    }

    pub fn element(&self, id: &str) -> Option<&TextElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Current text of an element, `None` when unset or undeclared.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.text.as_deref())
    }

    /// Set an element's text. Returns false if the page has no such element.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.text = Some(text.into());
                true
            }
            None => {
                debug!(id, "no such page element");
                false
            }
        }
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    pub fn container(&self, id: &str) -> Option<&ChartContainer> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut ChartContainer> {
        self.containers.iter_mut().find(|c| c.id == id)
    }

    pub fn containers(&self) -> &[ChartContainer] {
        &self.containers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pct: f64, mw: f64) -> ChartRow {
        ChartRow {
            label: "Solar".to_string(),
            color: "#FFCE56".to_string(),
            bar_length: emon_core::bar_length(pct),
            percentage: pct,
            total: Megawatts(mw),
            details_visible: false,
        }
    }

    #[test]
    fn test_dashboard_layout() {
        let page = Page::dashboard(&Country::ALL);
        for id in ids::SUMMARY {
            assert!(page.element(id).is_some(), "missing {id}");
            assert_eq!(page.text(id), None);
        }
        let ids: Vec<_> = page.containers().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["italy-chart-container", "france-chart-container", "spain-chart-container"]
        );
    }

    #[test]
    fn test_set_text_unknown_id() {
        let mut page = Page::new();
        assert!(!page.set_text("nope", "x"));
        assert_eq!(page.text("nope"), None);
    }

    #[test]
    fn test_row_texts() {
        let r = row(25.0, 1234567.4);
        assert_eq!(r.bar().chars().count(), 17);
        assert!(r.bar().chars().all(|c| c == '█'));
        assert_eq!(r.percentage_text(), "(25.0%)");
        assert_eq!(r.details_text(), " -Total Production: 1,234,567 MWh");
    }

    #[test]
    fn test_zero_row_has_empty_bar() {
        assert_eq!(row(0.0, 0.0).bar(), "");
    }

    #[test]
    fn test_toggle_row() {
        let mut c = ChartContainer::new("c", "C");
        assert!(!c.toggle_row(0));
        c.replace_rows(vec![row(50.0, 1.0), row(50.0, 1.0)]);
        assert!(c.toggle_row(1));
        assert!(c.rows()[1].details_visible);
        assert!(!c.rows()[0].details_visible);
        assert!(c.toggle_row(1));
        assert!(!c.rows()[1].details_visible);
    }

    #[test]
    fn test_replace_is_idempotent() {
        let mut c = ChartContainer::new("c", "C");
        c.replace_rows(vec![row(100.0, 5.0)]);
        c.replace_rows(vec![row(100.0, 5.0)]);
        assert_eq!(c.rows().len(), 1);
        c.show_notice("none");
        assert!(c.rows().is_empty());
        assert_eq!(c.notice(), Some("none"));
    }
}
