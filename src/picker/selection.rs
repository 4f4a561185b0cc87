use crate::data::{DateRange, RangeState, SelectionState};
use chrono::NaiveDate;

/// Click/hover state machine over a [`SelectionState`].
///
/// The state is implied by the range's shape: Empty, PartialStart or
/// Complete. Every transition is total; out-of-month days are filtered by the
/// caller before they get here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeSelector {
    state: SelectionState,
}

impl RangeSelector {
    pub fn new(initial: DateRange) -> Self {
        RangeSelector {
            state: SelectionState::new(initial),
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn range(&self) -> DateRange {
        self.state.range
    }

    pub fn hover(&self) -> Option<NaiveDate> {
        self.state.hover
    }

    /// Applies a click. Returns the range when this click completed it.
    pub fn on_day_click(&mut self, day: NaiveDate) -> Option<DateRange> {
        match self.state.range.state() {
            RangeState::Empty | RangeState::Complete => {
                self.state = SelectionState::new(DateRange::starting_at(day));
                tracing::trace!(%day, "range start picked");
                None
            }
            RangeState::PartialStart => {
                let start = self.state.range.start().unwrap_or(day);
                let range = DateRange::normalized(start, day);
                self.state = SelectionState::new(range);
                tracing::debug!(?range, "range committed");
                Some(range)
            }
        }
    }

    /// Records the hovered day; ignored unless a start is waiting for its end.
    pub fn on_day_hover(&mut self, day: NaiveDate) {
        if self.state.range.state() == RangeState::PartialStart {
            self.state.hover = Some(day);
        }
    }

    pub fn on_hover_leave(&mut self) {
        self.state.hover = None;
    }

    pub fn on_clear(&mut self) {
        self.state = SelectionState::default();
        tracing::debug!("selection cleared");
    }
}
