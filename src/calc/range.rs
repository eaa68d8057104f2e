use anyhow::{Context, Result};
use chrono::NaiveDate;

/// The external date representation shared with the host: `10-03-2024`.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Whole calendar days from `start` to `end`; negative when `end` precedes
/// `start`. Exact day subtraction — `NaiveDate` has no DST or sub-day part
/// to truncate.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// A range is only judged once both endpoints exist; half-selected ranges
/// pass vacuously.
pub fn is_valid_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    min_stay_days: i64,
) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => days_between(s, e) >= min_stay_days,
        _ => true,
    }
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn parse_display_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DISPLAY_FORMAT)
        .with_context(|| format!("invalid date '{raw}' — expected DD-MM-YYYY"))
}

/// The read-only field text: empty until a start exists, a single date for
/// a partial selection, `start → end` once complete. A lingering end with
/// no start renders as empty.
pub fn format_range_display(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (None, _) => String::new(),
        (Some(s), None) => format_display_date(s),
        (Some(s), Some(e)) => format!("{} → {}", format_display_date(s), format_display_date(e)),
    }
}
