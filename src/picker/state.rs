use chrono::NaiveDate;

/// Where the two-click selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No start date yet. A lingering end date with no start also counts
    /// as empty — the next click starts a fresh selection.
    Empty,
    /// Start chosen, end pending.
    Partial,
    /// Both endpoints chosen.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Everything the picker mutates: the chosen endpoints plus which two
/// months are on screen, as offsets in months from the current month.
///
/// `right_offset = left_offset + 1` is a convention the reducer maintains
/// when navigating; the fields themselves can be constructed with any
/// drift. Only `left_offset >= 0` is enforced (by rejecting `Previous`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerState {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub left_offset: i32,
    pub right_offset: i32,
}

impl Default for PickerState {
    fn default() -> Self {
        PickerState {
            start: None,
            end: None,
            left_offset: 0,
            right_offset: 1,
        }
    }
}

impl PickerState {
    pub fn phase(&self) -> Phase {
        match (self.start, self.end) {
            (None, _) => Phase::Empty,
            (Some(_), None) => Phase::Partial,
            (Some(_), Some(_)) => Phase::Complete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ClickDay(NaiveDate),
    ClearSelection,
    ClearStart,
    ClearEnd,
    Navigate(Direction),
}

impl Action {
    /// Whether an accepted instance of this action mutates the selection
    /// range (and must therefore notify the host). Navigation only moves
    /// the visible months.
    pub fn mutates_range(&self) -> bool {
        !matches!(self, Action::Navigate(_))
    }
}

/// Applies `action` to `state`, returning the next state, or `None` when
/// the action is rejected: a click strictly before `today`, or `Previous`
/// when the left month is already the current month. Clears always succeed,
/// even when the endpoint is already absent.
///
/// Invariant upheld: whenever both endpoints are present, `start <= end`.
pub fn reduce(state: &PickerState, action: Action, today: NaiveDate) -> Option<PickerState> {
    match action {
        Action::ClickDay(date) => {
            if date < today {
                return None;
            }
            let mut next = *state;
            match (state.start, state.end) {
                // Partial: a click before the start restarts, anything else
                // (including the start itself) completes the range.
                (Some(start), None) => {
                    if date < start {
                        next.start = Some(date);
                        next.end = None;
                    } else {
                        next.end = Some(date);
                    }
                }
                // Empty or complete: begin a fresh selection.
                _ => {
                    next.start = Some(date);
                    next.end = None;
                }
            }
            Some(next)
        }
        Action::ClearSelection => Some(PickerState {
            start: None,
            end: None,
            ..*state
        }),
        Action::ClearStart => Some(PickerState {
            start: None,
            ..*state
        }),
        Action::ClearEnd => Some(PickerState {
            end: None,
            ..*state
        }),
        Action::Navigate(Direction::Previous) => {
            if state.left_offset <= 0 {
                return None;
            }
            Some(PickerState {
                left_offset: state.left_offset - 1,
                right_offset: state.right_offset - 1,
                ..*state
            })
        }
        Action::Navigate(Direction::Next) => Some(PickerState {
            left_offset: state.left_offset + 1,
            right_offset: state.right_offset + 1,
            ..*state
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 3, 1)
    }

    fn click(state: &PickerState, date: NaiveDate) -> PickerState {
        reduce(state, Action::ClickDay(date), today()).expect("click should be accepted")
    }

    // ── click transitions ─────────────────────────────────────────────────────

    #[test]
    fn test_first_click_sets_start() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        assert_eq!(state.start, Some(d(2024, 3, 10)));
        assert_eq!(state.end, None);
        assert_eq!(state.phase(), Phase::Partial);
    }

    #[test]
    fn test_two_ordered_clicks_complete_the_range() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = click(&state, d(2024, 3, 25));
        assert_eq!(state.start, Some(d(2024, 3, 10)));
        assert_eq!(state.end, Some(d(2024, 3, 25)));
        assert_eq!(state.phase(), Phase::Complete);
    }

    #[test]
    fn test_click_before_start_restarts_selection() {
        let state = click(&PickerState::default(), d(2024, 3, 20));
        let state = click(&state, d(2024, 3, 5));
        assert_eq!(state.start, Some(d(2024, 3, 5)));
        assert_eq!(state.end, None);
        assert_eq!(state.phase(), Phase::Partial);
    }

    #[test]
    fn test_click_on_start_completes_same_day_range() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = click(&state, d(2024, 3, 10));
        assert_eq!(state.start, Some(d(2024, 3, 10)));
        assert_eq!(state.end, Some(d(2024, 3, 10)));
    }

    #[test]
    fn test_click_in_complete_state_restarts() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = click(&state, d(2024, 3, 25));
        let state = click(&state, d(2024, 3, 15));
        assert_eq!(state.start, Some(d(2024, 3, 15)));
        assert_eq!(state.end, None);
        assert_eq!(state.phase(), Phase::Partial);
    }

    #[test]
    fn test_past_click_rejected_in_every_phase() {
        let yesterday = d(2024, 2, 29);
        let empty = PickerState::default();
        assert_eq!(reduce(&empty, Action::ClickDay(yesterday), today()), None);

        let partial = click(&empty, d(2024, 3, 10));
        assert_eq!(reduce(&partial, Action::ClickDay(yesterday), today()), None);

        let complete = click(&partial, d(2024, 3, 25));
        assert_eq!(reduce(&complete, Action::ClickDay(yesterday), today()), None);
    }

    #[test]
    fn test_click_on_today_is_accepted() {
        let state = click(&PickerState::default(), today());
        assert_eq!(state.start, Some(today()));
    }

    #[test]
    fn test_ordering_invariant_holds_after_any_click_sequence() {
        let dates = [
            d(2024, 3, 20),
            d(2024, 3, 5),
            d(2024, 3, 28),
            d(2024, 3, 28),
            d(2024, 3, 6),
        ];
        let mut state = PickerState::default();
        for date in dates {
            if let Some(next) = reduce(&state, Action::ClickDay(date), today()) {
                state = next;
            }
            if let (Some(s), Some(e)) = (state.start, state.end) {
                assert!(s <= e, "invariant broken: {s} > {e}");
            }
        }
    }

    // ── clears ────────────────────────────────────────────────────────────────

    #[test]
    fn test_clear_selection_resets_both_endpoints() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = click(&state, d(2024, 3, 25));
        let state = reduce(&state, Action::ClearSelection, today()).unwrap();
        assert_eq!(state.phase(), Phase::Empty);
        assert_eq!(state.start, None);
        assert_eq!(state.end, None);
    }

    #[test]
    fn test_clear_selection_is_idempotent() {
        let state = reduce(&PickerState::default(), Action::ClearSelection, today()).unwrap();
        assert_eq!(state.phase(), Phase::Empty);
        let state = reduce(&state, Action::ClearSelection, today()).unwrap();
        assert_eq!(state.phase(), Phase::Empty);
    }

    #[test]
    fn test_clear_start_leaves_end_in_place() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = click(&state, d(2024, 3, 25));
        let state = reduce(&state, Action::ClearStart, today()).unwrap();
        assert_eq!(state.start, None);
        assert_eq!(state.end, Some(d(2024, 3, 25)));
        // The half-range reads as empty: the next click starts over.
        assert_eq!(state.phase(), Phase::Empty);
    }

    #[test]
    fn test_clear_end_leaves_start_in_place() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = click(&state, d(2024, 3, 25));
        let state = reduce(&state, Action::ClearEnd, today()).unwrap();
        assert_eq!(state.start, Some(d(2024, 3, 10)));
        assert_eq!(state.end, None);
        assert_eq!(state.phase(), Phase::Partial);
    }

    #[test]
    fn test_click_after_clear_start_begins_fresh_selection() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = click(&state, d(2024, 3, 25));
        let state = reduce(&state, Action::ClearStart, today()).unwrap();
        let state = click(&state, d(2024, 3, 12));
        assert_eq!(state.start, Some(d(2024, 3, 12)));
        assert_eq!(state.end, None);
    }

    #[test]
    fn test_clears_preserve_month_offsets() {
        let mut state = PickerState::default();
        state.left_offset = 3;
        state.right_offset = 4;
        let state = reduce(&state, Action::ClearSelection, today()).unwrap();
        assert_eq!((state.left_offset, state.right_offset), (3, 4));
    }

    // ── navigation ────────────────────────────────────────────────────────────

    #[test]
    fn test_previous_at_current_month_is_rejected() {
        let state = PickerState::default();
        assert_eq!(
            reduce(&state, Action::Navigate(Direction::Previous), today()),
            None
        );
    }

    #[test]
    fn test_next_then_previous_returns_to_initial_offsets() {
        let state = PickerState::default();
        let state = reduce(&state, Action::Navigate(Direction::Next), today()).unwrap();
        assert_eq!((state.left_offset, state.right_offset), (1, 2));
        let state = reduce(&state, Action::Navigate(Direction::Previous), today()).unwrap();
        assert_eq!((state.left_offset, state.right_offset), (0, 1));
    }

    #[test]
    fn test_navigation_moves_both_offsets_together() {
        let mut state = PickerState::default();
        // Drifted construction is allowed; navigation preserves the drift.
        state.left_offset = 2;
        state.right_offset = 5;
        let state = reduce(&state, Action::Navigate(Direction::Next), today()).unwrap();
        assert_eq!((state.left_offset, state.right_offset), (3, 6));
        let state = reduce(&state, Action::Navigate(Direction::Previous), today()).unwrap();
        assert_eq!((state.left_offset, state.right_offset), (2, 5));
    }

    #[test]
    fn test_navigation_leaves_selection_untouched() {
        let state = click(&PickerState::default(), d(2024, 3, 10));
        let state = reduce(&state, Action::Navigate(Direction::Next), today()).unwrap();
        assert_eq!(state.start, Some(d(2024, 3, 10)));
        assert_eq!(state.end, None);
    }

    #[test]
    fn test_mutates_range_classification() {
        assert!(Action::ClickDay(today()).mutates_range());
        assert!(Action::ClearSelection.mutates_range());
        assert!(Action::ClearStart.mutates_range());
        assert!(Action::ClearEnd.mutates_range());
        assert!(!Action::Navigate(Direction::Next).mutates_range());
        assert!(!Action::Navigate(Direction::Previous).mutates_range());
    }
}
