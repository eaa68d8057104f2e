use crate::calc::month::add_months;
use crate::calc::range::{format_display_date, format_range_display, is_valid_range};
use crate::picker::state::{reduce, Action, Direction, Phase, PickerState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The externally-agreed range representation handed to the host:
/// DD-MM-YYYY strings, absent endpoints as null.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExternalRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl ExternalRange {
    pub fn from_dates(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        ExternalRange {
            from: from.map(format_display_date),
            to: to.map(format_display_date),
        }
    }
}

type ChangeHandler = Box<dyn FnMut(&ExternalRange)>;

/// The date-range picker widget: selection state, the minimum-stay rule,
/// and the host notification channel. The presentation layer drives it
/// through the action methods; each accepted range mutation notifies the
/// host synchronously before the method returns.
pub struct RangePicker {
    state: PickerState,
    today: NaiveDate,
    min_stay_days: i64,
    on_change: Option<ChangeHandler>,
}

impl RangePicker {
    pub fn new(today: NaiveDate, min_stay_days: i64) -> Self {
        RangePicker {
            state: PickerState::default(),
            today,
            min_stay_days,
            on_change: None,
        }
    }

    /// One-time external override at construction. Does not notify: seeding
    /// is initialization, not a mutation. A seed with `from > to` keeps
    /// `from` and drops `to` so the ordering invariant holds.
    pub fn seed(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        self.state.start = from;
        self.state.end = match (from, to) {
            (Some(f), Some(t)) if f > t => None,
            _ => to,
        };
    }

    pub fn set_on_change(&mut self, handler: impl FnMut(&ExternalRange) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn min_stay_days(&self) -> i64 {
        self.min_stay_days
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    // ── actions ───────────────────────────────────────────────────────────────

    /// Returns true when the click was accepted. Past dates are silent
    /// no-ops.
    pub fn click_day(&mut self, date: NaiveDate) -> bool {
        self.dispatch(Action::ClickDay(date))
    }

    pub fn clear_selection(&mut self) -> bool {
        self.dispatch(Action::ClearSelection)
    }

    pub fn clear_start(&mut self) -> bool {
        self.dispatch(Action::ClearStart)
    }

    pub fn clear_end(&mut self) -> bool {
        self.dispatch(Action::ClearEnd)
    }

    /// Returns true when the view actually moved; `Previous` at the current
    /// month is a silent no-op.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.dispatch(Action::Navigate(direction))
    }

    fn dispatch(&mut self, action: Action) -> bool {
        let Some(next) = reduce(&self.state, action, self.today) else {
            return false;
        };
        self.state = next;
        if action.mutates_range() {
            if let Some(handler) = self.on_change.as_mut() {
                let range = ExternalRange::from_dates(self.state.start, self.state.end);
                handler(&range);
            }
        }
        true
    }

    // ── derived views ─────────────────────────────────────────────────────────

    pub fn left_month(&self) -> NaiveDate {
        add_months(self.today, self.state.left_offset)
    }

    pub fn right_month(&self) -> NaiveDate {
        add_months(self.today, self.state.right_offset)
    }

    pub fn is_valid_range(&self) -> bool {
        is_valid_range(self.state.start, self.state.end, self.min_stay_days)
    }

    /// Apply is only offered for a complete range that meets the minimum.
    pub fn can_apply(&self) -> bool {
        self.state.phase() == Phase::Complete && self.is_valid_range()
    }

    pub fn display_text(&self) -> String {
        format_range_display(self.state.start, self.state.end)
    }
}
