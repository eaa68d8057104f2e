pub mod grid;
pub mod month;
pub mod range;

pub use grid::{month_cells, DayCell, WEEKDAY_LABELS};
pub use month::{add_months, days_in_month, month_name};
pub use range::{
    days_between, format_display_date, format_range_display, is_valid_range, parse_display_date,
};
