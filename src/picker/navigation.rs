use crate::calc::calendar_math::{add_months, first_of_month, month_abbrev, month_start};
use crate::data::PickerError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Number of entries offered by each quick-jump grid.
pub const QUICK_JUMP_CHOICES: usize = 12;

/// How many years before the anchor's year the year grid starts.
const YEAR_GRID_LEAD: i32 = 10;

/// Earliest anchor month whose grid fits inside chrono's calendar.
pub fn min_anchor() -> NaiveDate {
    add_months(first_of_month(NaiveDate::MIN), 1).unwrap_or(NaiveDate::MIN)
}

/// Latest anchor month whose grid fits inside chrono's calendar.
pub fn max_anchor() -> NaiveDate {
    add_months(first_of_month(NaiveDate::MAX), -1).unwrap_or(NaiveDate::MAX)
}

/// First of `year`/`month`, if it is a calendar month the view may anchor on.
fn anchor_for(year: i32, month: u32) -> Result<NaiveDate, PickerError> {
    let anchor = month_start(year, month)?;
    if anchor < min_anchor() || anchor > max_anchor() {
        return Err(PickerError::InvalidDate { year, month });
    }
    Ok(anchor)
}

/// Which quick-jump grid, if any, is open over the calendar.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuickJumpMode {
    #[default]
    None,
    Month,
    Year,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavState {
    pub anchor_month: NaiveDate,
    pub quick_jump: QuickJumpMode,
}

/// Tracks the first visible month and the quick-jump mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationState {
    state: NavState,
}

impl NavigationState {
    /// Anchored on `initial_start`'s month when given, otherwise on `today`'s.
    ///
    /// Anchors are kept within [`min_anchor`]..=[`max_anchor`].
    pub fn new(initial_start: Option<NaiveDate>, today: NaiveDate) -> Self {
        let anchor = first_of_month(initial_start.unwrap_or(today));
        NavigationState {
            state: NavState {
                anchor_month: anchor.clamp(min_anchor(), max_anchor()),
                quick_jump: QuickJumpMode::None,
            },
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn anchor_month(&self) -> NaiveDate {
        self.state.anchor_month
    }

    pub fn quick_jump(&self) -> QuickJumpMode {
        self.state.quick_jump
    }

    /// `count` consecutive first-of-month dates starting at the anchor.
    ///
    /// Months past [`max_anchor`] are left out.
    pub fn visible_months(&self, count: usize) -> Vec<NaiveDate> {
        let last = max_anchor();
        (0..count)
            .map_while(|i| {
                let offset = i32::try_from(i).ok()?;
                add_months(self.state.anchor_month, offset).filter(|m| *m <= last)
            })
            .collect()
    }

    /// Moves one month forward. Returns false at the end of the calendar.
    pub fn next(&mut self) -> bool {
        self.shift(1)
    }

    /// Moves one month back. Returns false at the start of the calendar.
    pub fn prev(&mut self) -> bool {
        self.shift(-1)
    }

    fn shift(&mut self, months: i32) -> bool {
        let target = add_months(self.state.anchor_month, months)
            .filter(|a| (min_anchor()..=max_anchor()).contains(a));
        match target {
            Some(anchor) => {
                self.state.anchor_month = anchor;
                tracing::debug!(%anchor, "navigated");
                true
            }
            None => {
                tracing::debug!(anchor = %self.state.anchor_month, "navigation limit reached");
                false
            }
        }
    }

    /// Opens `mode`, or closes it when that mode is already open.
    pub fn toggle_quick_jump(&mut self, mode: QuickJumpMode) {
        self.state.quick_jump = if self.state.quick_jump == mode {
            QuickJumpMode::None
        } else {
            mode
        };
    }

    /// Jumps to `month` (1-12) of the anchor's year and closes the quick jump.
    pub fn pick_month(&mut self, month: u32) -> Result<(), PickerError> {
        self.state.anchor_month = anchor_for(self.state.anchor_month.year(), month)?;
        self.state.quick_jump = QuickJumpMode::None;
        tracing::debug!(anchor = %self.state.anchor_month, "month picked");
        Ok(())
    }

    /// Moves the anchor to `year`, keeping its month, and drills down to the month grid.
    pub fn pick_year(&mut self, year: i32) -> Result<(), PickerError> {
        self.state.anchor_month = anchor_for(year, self.state.anchor_month.month())?;
        self.state.quick_jump = QuickJumpMode::Month;
        tracing::debug!(anchor = %self.state.anchor_month, "year picked");
        Ok(())
    }

    /// The twelve months of the anchor's year, as first-of-month dates.
    pub fn month_choices(&self) -> Vec<NaiveDate> {
        let year = self.state.anchor_month.year();
        (1..=12)
            .filter_map(|m| NaiveDate::from_ymd_opt(year, m, 1))
            .collect()
    }

    /// Twelve consecutive years, starting ten before the anchor's year.
    pub fn year_choices(&self) -> Vec<i32> {
        let first = self.state.anchor_month.year() - YEAR_GRID_LEAD;
        (first..first + QUICK_JUMP_CHOICES as i32).collect()
    }

    /// Header for a span of visible months, e.g. "Mar 2024 - Apr 2024".
    pub fn title(&self, count: usize) -> String {
        let first = self.state.anchor_month;
        let last = self
            .visible_months(count)
            .last()
            .copied()
            .unwrap_or(first);
        if last == first {
            return format!("{} {}", month_abbrev(first.month()), first.year());
        }
        format!(
            "{} {} - {} {}",
            month_abbrev(first.month()),
            first.year(),
            month_abbrev(last.month()),
            last.year()
        )
    }
}
