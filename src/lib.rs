//! Date-range picker core: calendar math, month grids, and the click/hover
//! selection state machine a UI binds to.

pub mod calc;
pub mod data;
pub mod picker;

pub use calc::{DayCell, GridOptions, MonthGrid, MonthView, WeekRow};
pub use data::{DateRange, PickerConfig, PickerError, RangeState, SelectionState, WeekStart};
pub use picker::{DateRangePicker, NavState, QuickJumpMode};
