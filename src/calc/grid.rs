use crate::calc::calendar_math::{
    checked_week_bounds, days_between, first_of_month, month_bounds, month_name, week_bounds,
    week_number,
};
use crate::data::{DateRange, PickerConfig, PickerError, SelectionState, WeekStart};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The month a grid is built for, identified by its first day.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonthView {
    pub anchor: NaiveDate,
}

impl MonthView {
    pub fn new(day: NaiveDate) -> Self {
        MonthView {
            anchor: first_of_month(day),
        }
    }

    pub fn year(&self) -> i32 {
        self.anchor.year()
    }

    pub fn month(&self) -> u32 {
        self.anchor.month()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.year() && day.month() == self.month()
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month()), self.year())
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub is_in_range: bool,
    pub is_in_preview: bool,
}

/// Seven consecutive cells starting on the configured week start.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WeekRow {
    pub week_number: Option<u32>,
    pub days: [DayCell; 7],
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    pub view: MonthView,
    pub weeks: Vec<WeekRow>,
}

/// Layout and highlight policy for [`build_grid`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridOptions {
    pub week_start: WeekStart,
    pub show_week_numbers: bool,
    pub highlight_full_week_on_hover: bool,
    pub snap_to_week: bool,
}

impl From<&PickerConfig> for GridOptions {
    fn from(config: &PickerConfig) -> Self {
        GridOptions {
            week_start: config.week_start,
            show_week_numbers: config.show_week_numbers,
            highlight_full_week_on_hover: config.highlight_full_week_on_hover,
            snap_to_week: config.default_to_week_start_and_end_dates,
        }
    }
}

/// The committed range after the week-snapping policy.
pub fn effective_range(range: &DateRange, options: &GridOptions) -> DateRange {
    match range.bounds() {
        Some((start, end)) if options.snap_to_week => DateRange::normalized(
            week_bounds(start, options.week_start).0,
            week_bounds(end, options.week_start).1,
        ),
        _ => *range,
    }
}

/// The interval shown as a hover preview, if any.
///
/// Only an open range with a hover strictly after its start previews;
/// hovering on or before the start shows nothing.
pub fn preview_interval(
    selection: &SelectionState,
    options: &GridOptions,
) -> Option<(NaiveDate, NaiveDate)> {
    if selection.range.end().is_some() {
        return None;
    }
    let start = selection.range.start()?;
    let hover = selection.hover.filter(|h| *h > start)?;
    if options.highlight_full_week_on_hover {
        Some((
            week_bounds(start, options.week_start).0,
            week_bounds(hover, options.week_start).1,
        ))
    } else {
        Some((start, hover))
    }
}

/// Range and preview resolved once per grid, then applied to every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub range: DateRange,
    pub preview: Option<(NaiveDate, NaiveDate)>,
}

impl Highlight {
    pub fn resolve(selection: &SelectionState, options: &GridOptions) -> Self {
        Highlight {
            range: effective_range(&selection.range, options),
            preview: preview_interval(selection, options),
        }
    }

    fn cell(&self, date: NaiveDate, view: &MonthView, today: NaiveDate) -> DayCell {
        DayCell {
            date,
            in_current_month: view.contains(date),
            is_today: date == today,
            is_range_start: self.range.start() == Some(date),
            is_range_end: self.range.end() == Some(date),
            is_in_range: self.range.contains(date),
            is_in_preview: self
                .preview
                .is_some_and(|(start, end)| date >= start && date <= end),
        }
    }
}

/// Lays out the month containing `month` as whole weeks.
///
/// Leading and trailing days from the neighbouring months fill the first and
/// last rows; they are tagged `in_current_month = false`. A month whose
/// first or last week runs off chrono's calendar is `InvalidDate`.
pub fn build_grid(
    month: NaiveDate,
    options: &GridOptions,
    selection: &SelectionState,
    today: NaiveDate,
) -> Result<Vec<WeekRow>, PickerError> {
    let view = MonthView::new(month);
    let (first, last) = month_bounds(view.anchor);
    let ((grid_start, _), (_, grid_end)) = checked_week_bounds(first, options.week_start)
        .zip(checked_week_bounds(last, options.week_start))
        .ok_or(PickerError::InvalidDate {
            year: view.year(),
            month: view.month(),
        })?;

    let highlight = Highlight::resolve(selection, options);
    let cells: Vec<DayCell> = days_between(grid_start, grid_end)?
        .into_iter()
        .map(|date| highlight.cell(date, &view, today))
        .collect();
    debug_assert_eq!(cells.len() % 7, 0);

    let weeks = cells
        .chunks_exact(7)
        .filter_map(|chunk| <[DayCell; 7]>::try_from(chunk).ok())
        .map(|days| WeekRow {
            week_number: options
                .show_week_numbers
                .then(|| week_number(days[0].date, options.week_start)),
            days,
        })
        .collect();
    Ok(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calendar_math::add_months;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn monday() -> GridOptions {
        GridOptions {
            week_start: WeekStart::Monday,
            ..GridOptions::default()
        }
    }

    fn cell(weeks: &[WeekRow], date: NaiveDate) -> DayCell {
        *weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .find(|c| c.date == date)
            .unwrap()
    }

    fn all_cells(weeks: &[WeekRow]) -> Vec<DayCell> {
        weeks.iter().flat_map(|w| w.days).collect()
    }

    fn partial(start: NaiveDate, hover: Option<NaiveDate>) -> SelectionState {
        SelectionState {
            range: DateRange::starting_at(start),
            hover,
        }
    }

    #[test]
    fn test_march_2024_monday_layout() {
        let today = d(2024, 3, 15);
        let weeks = build_grid(today, &monday(), &SelectionState::default(), today).unwrap();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0].days[0].date, d(2024, 2, 26));
        assert_eq!(weeks[4].days[6].date, d(2024, 3, 31));
        assert_eq!(all_cells(&weeks).len(), 35);
        for c in all_cells(&weeks) {
            assert_eq!(c.in_current_month, c.date.month() == 3, "{}", c.date);
        }
        assert!(!cell(&weeks, d(2024, 2, 29)).in_current_month);
    }

    #[test]
    fn test_rows_are_aligned_for_every_week_start() {
        let mut month = d(2023, 1, 1);
        for _ in 0..24 {
            for ws in WeekStart::ALL {
                let options = GridOptions {
                    week_start: ws,
                    ..GridOptions::default()
                };
                let weeks =
                    build_grid(month, &options, &SelectionState::default(), month).unwrap();
                assert!((4..=6).contains(&weeks.len()));
                assert_eq!(weeks[0].days[0].date.weekday(), Weekday::from(ws));
                let cells = all_cells(&weeks);
                for pair in cells.windows(2) {
                    assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
                }
                assert!(cells.iter().filter(|c| c.in_current_month).count() >= 28);
            }
            month = add_months(month, 1).unwrap();
        }
    }

    #[test]
    fn test_edge_months_stay_aligned_or_fail() {
        let mut rejected = 0;
        for month in [NaiveDate::MIN, NaiveDate::MAX] {
            for ws in WeekStart::ALL {
                let options = GridOptions {
                    week_start: ws,
                    ..GridOptions::default()
                };
                match build_grid(month, &options, &SelectionState::default(), month) {
                    Ok(weeks) => {
                        assert_eq!(weeks[0].days[0].date.weekday(), Weekday::from(ws));
                    }
                    Err(e) => {
                        assert!(matches!(e, PickerError::InvalidDate { .. }));
                        rejected += 1;
                    }
                }
            }
        }
        assert!(rejected >= 6);
    }

    #[test]
    fn test_month_starting_on_week_start_has_no_leading_days() {
        // February 2015 starts on a Sunday and has 28 days
        let month = d(2015, 2, 1);
        let weeks =
            build_grid(month, &GridOptions::default(), &SelectionState::default(), month).unwrap();
        assert_eq!(weeks.len(), 4);
        assert!(all_cells(&weeks).iter().all(|c| c.in_current_month));
    }

    #[test]
    fn test_today_flag_is_injected() {
        let weeks = build_grid(d(2024, 3, 1), &monday(), &SelectionState::default(), d(2024, 3, 12))
            .unwrap();
        let today: Vec<_> = all_cells(&weeks).into_iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, d(2024, 3, 12));
    }

    #[test]
    fn test_empty_selection_flags_nothing() {
        let weeks = build_grid(d(2024, 3, 1), &monday(), &SelectionState::default(), d(2024, 1, 1))
            .unwrap();
        assert!(all_cells(&weeks).iter().all(|c| !c.is_range_start
            && !c.is_range_end
            && !c.is_in_range
            && !c.is_in_preview));
    }

    #[test]
    fn test_complete_range_flags() {
        let selection = SelectionState::new(DateRange::new(d(2024, 3, 5), d(2024, 3, 8)).unwrap());
        let weeks = build_grid(d(2024, 3, 1), &monday(), &selection, d(2024, 1, 1)).unwrap();
        assert!(cell(&weeks, d(2024, 3, 5)).is_range_start);
        assert!(cell(&weeks, d(2024, 3, 8)).is_range_end);
        let in_range: Vec<_> = all_cells(&weeks)
            .into_iter()
            .filter(|c| c.is_in_range)
            .map(|c| c.date)
            .collect();
        assert_eq!(in_range, days_between(d(2024, 3, 5), d(2024, 3, 8)).unwrap());
        assert!(all_cells(&weeks).iter().all(|c| !c.is_in_preview));
    }

    #[test]
    fn test_single_day_range_is_start_and_end() {
        let selection = SelectionState::new(DateRange::new(d(2024, 3, 5), d(2024, 3, 5)).unwrap());
        let weeks = build_grid(d(2024, 3, 1), &monday(), &selection, d(2024, 1, 1)).unwrap();
        let c = cell(&weeks, d(2024, 3, 5));
        assert!(c.is_range_start && c.is_range_end && c.is_in_range);
    }

    #[test]
    fn test_range_spanning_months_marks_leading_cells() {
        let selection =
            SelectionState::new(DateRange::new(d(2024, 2, 27), d(2024, 3, 2)).unwrap());
        let weeks = build_grid(d(2024, 3, 1), &monday(), &selection, d(2024, 1, 1)).unwrap();
        let c = cell(&weeks, d(2024, 2, 27));
        assert!(c.is_range_start && !c.in_current_month);
        assert!(cell(&weeks, d(2024, 2, 29)).is_in_range);
    }

    #[test]
    fn test_preview_forward_hover() {
        let selection = partial(d(2024, 3, 10), Some(d(2024, 3, 13)));
        let weeks = build_grid(d(2024, 3, 1), &monday(), &selection, d(2024, 1, 1)).unwrap();
        let preview: Vec<_> = all_cells(&weeks)
            .into_iter()
            .filter(|c| c.is_in_preview)
            .map(|c| c.date)
            .collect();
        assert_eq!(preview, days_between(d(2024, 3, 10), d(2024, 3, 13)).unwrap());
        assert!(cell(&weeks, d(2024, 3, 10)).is_range_start);
        assert!(all_cells(&weeks).iter().all(|c| !c.is_in_range && !c.is_range_end));
    }

    #[test]
    fn test_preview_rejects_hover_before_start() {
        let selection = partial(d(2024, 3, 10), Some(d(2024, 3, 5)));
        let weeks = build_grid(d(2024, 3, 1), &monday(), &selection, d(2024, 1, 1)).unwrap();
        assert!(all_cells(&weeks).iter().all(|c| !c.is_in_preview));
    }

    #[test]
    fn test_preview_rejects_hover_on_start() {
        let selection = partial(d(2024, 3, 10), Some(d(2024, 3, 10)));
        assert_eq!(preview_interval(&selection, &monday()), None);
    }

    #[test]
    fn test_no_preview_once_committed() {
        let selection = SelectionState {
            range: DateRange::new(d(2024, 3, 5), d(2024, 3, 8)).unwrap(),
            hover: Some(d(2024, 3, 20)),
        };
        assert_eq!(preview_interval(&selection, &monday()), None);
    }

    #[test]
    fn test_full_week_preview_covers_whole_weeks() {
        let options = GridOptions {
            highlight_full_week_on_hover: true,
            ..monday()
        };
        // Wed 13th to Tue 19th widens to Mon 11th .. Sun 24th
        let selection = partial(d(2024, 3, 13), Some(d(2024, 3, 19)));
        assert_eq!(
            preview_interval(&selection, &options),
            Some((d(2024, 3, 11), d(2024, 3, 24)))
        );
        let weeks = build_grid(d(2024, 3, 1), &options, &selection, d(2024, 1, 1)).unwrap();
        assert_eq!(all_cells(&weeks).iter().filter(|c| c.is_in_preview).count(), 14);
    }

    #[test]
    fn test_full_week_preview_still_needs_forward_hover() {
        let options = GridOptions {
            highlight_full_week_on_hover: true,
            ..monday()
        };
        let selection = partial(d(2024, 3, 13), Some(d(2024, 3, 12)));
        assert_eq!(preview_interval(&selection, &options), None);
    }

    #[test]
    fn test_snap_to_week_widens_committed_range() {
        let options = GridOptions {
            snap_to_week: true,
            ..monday()
        };
        let range = DateRange::new(d(2024, 3, 13), d(2024, 3, 14)).unwrap();
        let snapped = effective_range(&range, &options);
        assert_eq!(snapped.bounds(), Some((d(2024, 3, 11), d(2024, 3, 17))));

        let weeks =
            build_grid(d(2024, 3, 1), &options, &SelectionState::new(range), d(2024, 1, 1))
                .unwrap();
        assert!(cell(&weeks, d(2024, 3, 11)).is_range_start);
        assert!(cell(&weeks, d(2024, 3, 17)).is_range_end);
        assert!(!cell(&weeks, d(2024, 3, 13)).is_range_start);
    }

    #[test]
    fn test_snap_to_week_leaves_partial_range_alone() {
        let options = GridOptions {
            snap_to_week: true,
            ..monday()
        };
        let range = DateRange::starting_at(d(2024, 3, 13));
        assert_eq!(effective_range(&range, &options), range);
    }

    #[test]
    fn test_week_numbers_only_when_enabled() {
        let hidden = build_grid(d(2024, 3, 1), &monday(), &SelectionState::default(), d(2024, 1, 1))
            .unwrap();
        assert!(hidden.iter().all(|w| w.week_number.is_none()));

        let options = GridOptions {
            show_week_numbers: true,
            ..monday()
        };
        let shown = build_grid(d(2024, 3, 1), &options, &SelectionState::default(), d(2024, 1, 1))
            .unwrap();
        for row in &shown {
            assert_eq!(
                row.week_number,
                Some(week_number(row.days[0].date, WeekStart::Monday))
            );
        }
        // 2024-02-26 falls in week 9 when weeks start on Monday
        assert_eq!(shown[0].week_number, Some(9));
    }

    #[test]
    fn test_month_view_title_and_anchor() {
        let view = MonthView::new(d(2024, 3, 15));
        assert_eq!(view.anchor, d(2024, 3, 1));
        assert_eq!(view.title(), "March 2024");
        assert!(view.contains(d(2024, 3, 31)));
        assert!(!view.contains(d(2023, 3, 31)));
    }

    #[test]
    fn test_grid_options_from_config() {
        let config = PickerConfig {
            week_start: WeekStart::Friday,
            show_week_numbers: true,
            number_of_months: 3,
            highlight_full_week_on_hover: true,
            default_to_week_start_and_end_dates: true,
        };
        let options = GridOptions::from(&config);
        assert_eq!(options.week_start, WeekStart::Friday);
        assert!(options.show_week_numbers);
        assert!(options.highlight_full_week_on_hover);
        assert!(options.snap_to_week);
    }
}
