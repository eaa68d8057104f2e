use crate::calc::range::{days_between, format_range_display, is_valid_range, parse_display_date};
use crate::data::Settings;
use anyhow::Result;

/// Validates a DD-MM-YYYY range against the configured minimum stay and
/// prints the verdict, without opening the picker.
pub fn run(from: &str, to: &str) -> Result<()> {
    let settings = Settings::load()?;
    let from = parse_display_date(from)?;
    let to = parse_display_date(to)?;
    println!("{}", check_line(from, to, settings.min_stay_days));
    Ok(())
}

fn check_line(from: chrono::NaiveDate, to: chrono::NaiveDate, min_stay_days: i64) -> String {
    let gap = days_between(from, to);
    let display = format_range_display(Some(from), Some(to));
    if is_valid_range(Some(from), Some(to), min_stay_days) {
        format!("{display}: {gap}-day stay, meets the {min_stay_days}-day minimum")
    } else {
        format!("{display}: {gap}-day stay, below the {min_stay_days}-day minimum")
    }
}
