pub mod calendar_math;
pub mod grid;

pub use calendar_math::{
    add_months, checked_week_bounds, days_between, days_in_month, first_of_month, month_bounds,
    month_name, week_bounds, week_number,
};
pub use grid::{
    DayCell, GridOptions, Highlight, MonthGrid, MonthView, WeekRow, build_grid, effective_range,
    preview_interval,
};
