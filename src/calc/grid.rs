use crate::calc::month::days_in_month;
use chrono::{Datelike, NaiveDate};

/// Column headers for the day grid, Sunday-first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// One slot in a 7-column month grid. Leading pad slots carry no date and
/// all-false flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub is_past: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub is_in_range: bool,
}

impl DayCell {
    fn blank() -> Self {
        Self::default()
    }
}

/// Lays out the month containing `base` as leading blanks (one per weekday
/// slot before the 1st, Sunday-first) followed by one tagged cell per day.
///
/// `is_in_range` is strictly between the endpoints — the endpoints
/// themselves are marked by `is_range_start`/`is_range_end` only.
pub fn month_cells(
    base: NaiveDate,
    today: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<DayCell> {
    let year = base.year();
    let month = base.month();
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut cells = vec![DayCell::blank(); lead];
    for day in 1..=days_in_month(year, month) {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        cells.push(DayCell {
            date: Some(date),
            is_past: date < today,
            is_range_start: start == Some(date),
            is_range_end: end == Some(date),
            is_in_range: match (start, end) {
                (Some(s), Some(e)) => s < date && date < e,
                _ => false,
            },
        });
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_february_2024_has_29_cells_and_4_blanks() {
        // 2024-02-01 is a Thursday → Su Mo Tu We pad out as blanks.
        let cells = month_cells(d(2024, 2, 15), d(2024, 2, 1), None, None);
        assert_eq!(cells.len(), 4 + 29);
        assert!(cells[..4].iter().all(|c| c.date.is_none()));
        assert_eq!(cells[4].date, Some(d(2024, 2, 1)));
        assert_eq!(cells.last().unwrap().date, Some(d(2024, 2, 29)));
    }

    #[test]
    fn test_sunday_start_month_has_no_blanks() {
        // 2024-09-01 is a Sunday.
        let cells = month_cells(d(2024, 9, 1), d(2024, 9, 1), None, None);
        assert_eq!(cells.len(), 30);
        assert_eq!(cells[0].date, Some(d(2024, 9, 1)));
    }

    #[test]
    fn test_cells_are_in_ascending_day_order() {
        let cells = month_cells(d(2025, 3, 1), d(2025, 3, 1), None, None);
        let days: Vec<u32> = cells
            .iter()
            .filter_map(|c| c.date.map(|date| date.day()))
            .collect();
        assert_eq!(days, (1..=31).collect::<Vec<u32>>());
    }

    #[test]
    fn test_is_past_before_today_only() {
        let today = d(2025, 3, 10);
        let cells = month_cells(d(2025, 3, 1), today, None, None);
        for cell in cells.iter().filter(|c| c.date.is_some()) {
            let date = cell.date.unwrap();
            assert_eq!(cell.is_past, date < today, "wrong is_past for {date}");
        }
        // Today itself is not past.
        let today_cell = cells.iter().find(|c| c.date == Some(today)).unwrap();
        assert!(!today_cell.is_past);
    }

    #[test]
    fn test_range_flags_strictly_between() {
        let start = d(2025, 3, 10);
        let end = d(2025, 3, 14);
        let cells = month_cells(d(2025, 3, 1), d(2025, 3, 1), Some(start), Some(end));

        let cell_for = |date: NaiveDate| cells.iter().find(|c| c.date == Some(date)).unwrap();

        assert!(cell_for(start).is_range_start);
        assert!(!cell_for(start).is_in_range);
        assert!(cell_for(end).is_range_end);
        assert!(!cell_for(end).is_in_range);
        assert!(cell_for(d(2025, 3, 11)).is_in_range);
        assert!(cell_for(d(2025, 3, 13)).is_in_range);
        assert!(!cell_for(d(2025, 3, 9)).is_in_range);
        assert!(!cell_for(d(2025, 3, 15)).is_in_range);
    }

    #[test]
    fn test_partial_selection_has_no_in_range_fill() {
        let cells = month_cells(d(2025, 3, 1), d(2025, 3, 1), Some(d(2025, 3, 10)), None);
        assert!(cells.iter().all(|c| !c.is_in_range));
        assert!(cells.iter().any(|c| c.is_range_start));
        assert!(cells.iter().all(|c| !c.is_range_end));
    }

    #[test]
    fn test_same_day_range_marks_both_endpoints() {
        let day = d(2025, 3, 10);
        let cells = month_cells(d(2025, 3, 1), d(2025, 3, 1), Some(day), Some(day));
        let cell = cells.iter().find(|c| c.date == Some(day)).unwrap();
        assert!(cell.is_range_start);
        assert!(cell.is_range_end);
        assert!(!cell.is_in_range);
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let a = month_cells(d(2025, 7, 4), d(2025, 7, 1), Some(d(2025, 7, 2)), Some(d(2025, 7, 20)));
        let b = month_cells(d(2025, 7, 4), d(2025, 7, 1), Some(d(2025, 7, 2)), Some(d(2025, 7, 20)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_weekday_labels_sunday_first() {
        assert_eq!(WEEKDAY_LABELS, ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
    }
}
