//! Generation mix aggregation.
//!
//! Records are grouped by display category, summed, ordered by output and
//! expressed as a share of the day's total production. The ordering is
//! stable: categories with equal totals keep the order in which they first
//! appeared in the document.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::format::round_half_up;
use crate::model::GenerationRecord;
use crate::psr::SourceCategory;
use crate::units::Megawatts;

/// Percentage points represented by one bar character.
pub const BAR_SCALE: f64 = 1.5;

/// Character used to draw bars.
pub const BAR_CHAR: char = '█';

/// Viewports narrower than this many layout units count as narrow.
pub const NARROW_BREAKPOINT: u32 = 768;

/// Rows shown on a narrow viewport.
pub const NARROW_ROW_LIMIT: usize = 5;

/// Summed output of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: SourceCategory,
    pub total: Megawatts,
}

/// A category with its share of total production.
#[derive(Debug, Clone, PartialEq)]
pub struct MixEntry {
    pub category: SourceCategory,
    pub total: Megawatts,
    /// Share of total production, 0–100
    pub percentage: f64,
}

impl MixEntry {
    pub fn label(&self) -> &str {
        self.category.label()
    }

    pub fn color(&self) -> &'static str {
        self.category.color()
    }

    pub fn bar_length(&self) -> usize {
        bar_length(self.percentage)
    }
}

/// Bar length in characters for a percentage: `round(pct / 1.5)`.
pub fn bar_length(percentage: f64) -> usize {
    let len = round_half_up(percentage / BAR_SCALE);
    if len.is_finite() && len > 0.0 {
        len as usize
    } else {
        0
    }
}

/// Sum record quantities per category, in first-seen order.
///
/// Records are keyed by display label, so an unmapped code that happens to
/// equal a known label lands in the same bucket.
pub fn category_totals(records: &[GenerationRecord]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let category = SourceCategory::from_code(&record.psr_type);
        match index.get(category.label()) {
            Some(&i) => totals[i].total += record.quantity,
            None => {
                index.insert(category.label().to_string(), totals.len());
                totals.push(CategoryTotal {
                    category,
                    total: record.quantity,
                });
            }
        }
    }

    totals
}

/// Layout width used to decide how many chart rows are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub breakpoint: u32,
    pub narrow_row_limit: usize,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            breakpoint: NARROW_BREAKPOINT,
            narrow_row_limit: NARROW_ROW_LIMIT,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.width < self.breakpoint
    }

    /// Maximum number of rows, `None` when every category is shown.
    pub fn row_limit(&self) -> Option<usize> {
        self.is_narrow().then_some(self.narrow_row_limit)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280)
    }
}

/// A day's generation mix, ordered by descending output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationMix {
    entries: Vec<MixEntry>,
    total: Megawatts,
}

impl GenerationMix {
    pub fn from_records(records: &[GenerationRecord]) -> Self {
        let mut totals = category_totals(records);
        // Vec::sort_by is stable, ties keep first-seen order
        totals.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
        });

        let total: Megawatts = totals.iter().map(|t| t.total).sum();
        let entries = totals
            .into_iter()
            .map(|t| {
                let percentage = if total.value() > 0.0 {
                    t.total / total * 100.0
                } else {
                    0.0
                };
                MixEntry {
                    category: t.category,
                    total: t.total,
                    percentage,
                }
            })
            .collect();

        Self { entries, total }
    }

    pub fn entries(&self) -> &[MixEntry] {
        &self.entries
    }

    /// Total production across all categories.
    pub fn total(&self) -> Megawatts {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries to display on the given viewport.
    pub fn visible(&self, viewport: &Viewport) -> &[MixEntry] {
        match viewport.row_limit() {
            Some(limit) => &self.entries[..limit.min(self.entries.len())],
            None => &self.entries,
        }
    }
}
