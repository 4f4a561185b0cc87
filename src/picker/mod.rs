//! The date-range picker core: selection state machine plus navigation,
//! wired to the grid builder.
//!
//! A host UI builds one [`DateRangePicker`], forwards click, hover and
//! navigation events to it, and renders whatever [`DateRangePicker::visible_grids`]
//! returns. Nothing here reads the clock; "today" is always passed in.

pub mod navigation;
pub mod selection;

pub use navigation::{NavState, NavigationState, QUICK_JUMP_CHOICES, QuickJumpMode};
pub use selection::RangeSelector;

use crate::calc::grid::{DayCell, GridOptions, MonthGrid, MonthView, build_grid, effective_range};
use crate::data::{DateRange, PickerConfig, PickerError, SelectionState};
use chrono::NaiveDate;
use std::fmt;

/// Called with the finished range each time a click completes one.
pub type CommitListener = Box<dyn FnMut(&DateRange)>;

pub struct DateRangePicker {
    config: PickerConfig,
    options: GridOptions,
    selector: RangeSelector,
    nav: NavigationState,
    listeners: Vec<CommitListener>,
}

impl fmt::Debug for DateRangePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRangePicker")
            .field("config", &self.config)
            .field("selection", &self.selector.state())
            .field("nav", &self.nav.state())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DateRangePicker {
    /// Validates `config` and seeds selection and navigation.
    ///
    /// The first visible month is the initial range's start month when there
    /// is one, otherwise `today`'s month.
    pub fn initialize(
        initial_range: Option<DateRange>,
        config: PickerConfig,
        today: NaiveDate,
    ) -> Result<Self, PickerError> {
        config.validate()?;
        let initial = initial_range.unwrap_or_default();
        tracing::debug!(?initial, ?config, "picker initialized");
        Ok(DateRangePicker {
            options: GridOptions::from(&config),
            config,
            selector: RangeSelector::new(initial),
            nav: NavigationState::new(initial.start(), today),
            listeners: Vec::new(),
        })
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn selection(&self) -> SelectionState {
        self.selector.state()
    }

    pub fn nav_state(&self) -> NavState {
        self.nav.state()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// The selected range after the week-snapping policy, as reported to listeners.
    pub fn effective_range(&self) -> DateRange {
        effective_range(&self.selector.range(), &self.options)
    }

    /// Registers a listener for completed ranges.
    ///
    /// Listeners run synchronously, after the selection has been updated and
    /// before the click call returns.
    pub fn on_range_committed(&mut self, listener: impl FnMut(&DateRange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Cells outside their own month are shown for layout only.
    pub fn is_interactive(cell: &DayCell) -> bool {
        cell.in_current_month
    }

    pub fn on_day_click(&mut self, day: NaiveDate) -> SelectionState {
        if let Some(range) = self.selector.on_day_click(day) {
            let committed = effective_range(&range, &self.options);
            for listener in &mut self.listeners {
                listener(&committed);
            }
        }
        self.selection()
    }

    pub fn on_day_hover(&mut self, day: NaiveDate) -> SelectionState {
        self.selector.on_day_hover(day);
        self.selection()
    }

    pub fn on_hover_leave(&mut self) -> SelectionState {
        self.selector.on_hover_leave();
        self.selection()
    }

    pub fn on_clear(&mut self) -> SelectionState {
        self.selector.on_clear();
        self.selection()
    }

    pub fn on_prev_month(&mut self) -> NavState {
        self.nav.prev();
        self.nav_state()
    }

    pub fn on_next_month(&mut self) -> NavState {
        self.nav.next();
        self.nav_state()
    }

    pub fn on_pick_month(&mut self, month: u32) -> Result<NavState, PickerError> {
        self.nav.pick_month(month)?;
        Ok(self.nav_state())
    }

    pub fn on_pick_year(&mut self, year: i32) -> Result<NavState, PickerError> {
        self.nav.pick_year(year)?;
        Ok(self.nav_state())
    }

    pub fn on_toggle_quick_jump(&mut self, mode: QuickJumpMode) -> NavState {
        self.nav.toggle_quick_jump(mode);
        self.nav_state()
    }

    /// Header for the visible span, e.g. "Mar 2024 - Apr 2024".
    pub fn title(&self) -> String {
        self.nav.title(self.config.number_of_months)
    }

    /// One grid per visible month, built against the current selection.
    pub fn visible_grids(&self, today: NaiveDate) -> Result<Vec<MonthGrid>, PickerError> {
        let selection = self.selection();
        self.nav
            .visible_months(self.config.number_of_months)
            .into_iter()
            .map(|month| {
                Ok(MonthGrid {
                    view: MonthView::new(month),
                    weeks: build_grid(month, &self.options, &selection, today)?,
                })
            })
            .collect()
    }
}
