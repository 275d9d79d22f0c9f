//! Simulation summary renderer.

use emon_core::format::{fixed, grouped_integer, Grouping};
use emon_core::SimulationSummary;

use crate::page::{ids, Page};

/// Text shown for a figure the summary does not provide.
pub const MISSING: &str = "N/A";

/// Formatted summary figures, keyed by element id.
pub fn summary_texts(summary: &SimulationSummary) -> Vec<(&'static str, String)> {
    let or_missing = |value: Option<String>| value.unwrap_or_else(|| MISSING.to_string());

    vec![
        (
            ids::ANALYSIS_DATE,
            or_missing(summary.data_analisi.clone()),
        ),
        (
            ids::ANNUAL_SAVING,
            or_missing(
                summary
                    .risparmio_annuale_italia_eur
                    .map(|v| format!("€ {}", fixed(v.billions(), 2))),
            ),
        ),
        (
            ids::FAMILY_SAVING,
            or_missing(
                summary
                    .risparmio_annuale_famiglia_eur
                    .map(|v| format!("€ {}", fixed(v.value(), 2))),
            ),
        ),
        (
            ids::PERCENTAGE_SAVING,
            or_missing(
                summary
                    .risparmio_percentuale
                    .map(|v| format!("{} %", fixed(v, 2))),
            ),
        ),
        (
            ids::DEMAND,
            or_missing(
                summary
                    .fabbisogno_mwh
                    .map(|v| grouped_integer(v.value(), Grouping::Italian)),
            ),
        ),
        (
            ids::ACTUAL_COST,
            or_missing(summary.costo_attuale_eur.map(|v| fixed(v.millions(), 2))),
        ),
        (
            ids::SIMULATED_COST,
            or_missing(summary.costo_simulato_eur.map(|v| fixed(v.millions(), 2))),
        ),
        (
            ids::PUN_USED,
            or_missing(summary.pun_usato_eur_mwh.map(|v| fixed(v.value(), 2))),
        ),
        (
            ids::DAILY_SAVING,
            or_missing(
                summary
                    .risparmio_giornaliero_eur
                    .map(|v| format!("€ {}", fixed(v.millions(), 2))),
            ),
        ),
    ]
}

/// Write the summary figures into the page.
///
/// Each absent figure is written as [`MISSING`]; the others are unaffected.
pub fn render_summary(page: &mut Page, summary: &SimulationSummary) {
    for (id, text) in summary_texts(summary) {
        page.set_text(id, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emon_core::units::{Euros, EurosPerMwh, MegawattHours};
    use emon_core::Country;

    fn full_summary() -> SimulationSummary {
        SimulationSummary {
            data_analisi: Some("2026-10-17".to_string()),
            risparmio_annuale_italia_eur: Some(Euros(4_218_750_000.0)),
            risparmio_annuale_famiglia_eur: Some(Euros(168.75)),
            risparmio_giornaliero_eur: Some(Euros(11_558_219.18)),
            risparmio_percentuale: Some(26.0),
            fabbisogno_mwh: Some(MegawattHours(812_345.6)),
            costo_attuale_eur: Some(Euros(89_358_016.0)),
            costo_simulato_eur: Some(Euros(66_124_931.84)),
            pun_usato_eur_mwh: Some(EurosPerMwh(110.0)),
        }
    }

    #[test]
    fn test_full_summary() {
        let mut page = Page::dashboard(&Country::ALL);
        render_summary(&mut page, &full_summary());

        assert_eq!(page.text(ids::ANALYSIS_DATE), Some("2026-10-17"));
        assert_eq!(page.text(ids::ANNUAL_SAVING), Some("€ 4.22"));
        assert_eq!(page.text(ids::FAMILY_SAVING), Some("€ 168.75"));
        assert_eq!(page.text(ids::PERCENTAGE_SAVING), Some("26.00 %"));
        assert_eq!(page.text(ids::DEMAND), Some("812.346"));
        assert_eq!(page.text(ids::ACTUAL_COST), Some("89.36"));
        assert_eq!(page.text(ids::SIMULATED_COST), Some("66.12"));
        assert_eq!(page.text(ids::PUN_USED), Some("110.00"));
        assert_eq!(page.text(ids::DAILY_SAVING), Some("€ 11.56"));
    }

    #[test]
    fn test_tied_figures_round_up() {
        let summary = SimulationSummary {
            risparmio_annuale_famiglia_eur: Some(Euros(168.125)),
            risparmio_percentuale: Some(26.125),
            ..SimulationSummary::default()
        };
        let mut page = Page::dashboard(&Country::ALL);
        render_summary(&mut page, &summary);

        assert_eq!(page.text(ids::FAMILY_SAVING), Some("€ 168.13"));
        assert_eq!(page.text(ids::PERCENTAGE_SAVING), Some("26.13 %"));
    }

    #[test]
    fn test_partial_summary_uses_fallbacks() {
        let mut summary = full_summary();
        summary.data_analisi = None;
        summary.costo_simulato_eur = None;

        let mut page = Page::dashboard(&Country::ALL);
        render_summary(&mut page, &summary);

        assert_eq!(page.text(ids::ANALYSIS_DATE), Some(MISSING));
        assert_eq!(page.text(ids::SIMULATED_COST), Some(MISSING));
        assert_eq!(page.text(ids::ACTUAL_COST), Some("89.36"));
    }

    #[test]
    fn test_empty_summary_writes_every_element() {
        let mut page = Page::dashboard(&Country::ALL);
        render_summary(&mut page, &SimulationSummary::default());
        for id in ids::SUMMARY {
            assert_eq!(page.text(id), Some(MISSING));
        }
    }
}
