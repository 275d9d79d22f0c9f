//! Report date selection.
//!
//! Daily generation documents are keyed by `YYYY-MM-DD`. Upstream data lands
//! with a delay, so the dashboard looks a fixed number of days back.

use chrono::{Days, Local, NaiveDate};

use crate::error::{EmonError, EmonResult};

/// Days between today and the newest complete generation day.
pub const DEFAULT_DAYS_AGO: u32 = 2;

const DOCUMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `today` minus `days_ago`, saturating at the earliest representable date.
pub fn target_date(today: NaiveDate, days_ago: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days_ago)))
        .unwrap_or(NaiveDate::MIN)
}

/// Document id for a generation day.
pub fn document_id(date: NaiveDate) -> String {
    date.format(DOCUMENT_DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date override.
pub fn parse_document_date(raw: &str) -> EmonResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DOCUMENT_DATE_FORMAT)
        .map_err(|e| EmonError::Parse(format!("invalid date '{raw}' (expected YYYY-MM-DD): {e}")))
}
