use crate::ui::display_text;
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use rangepick::{DateRange, DateRangePicker, DayCell, MonthGrid, PickerConfig};
use serde::Serialize;
use std::fmt::Write;

pub struct GridArgs {
    pub month: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub today: Option<NaiveDate>,
    pub json: bool,
}

#[derive(Serialize)]
struct GridReport<'a> {
    title: String,
    display: String,
    range: DateRange,
    months: &'a [MonthGrid],
}

pub fn run(settings: &PickerConfig, args: &GridArgs) -> Result<()> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let picker = build_picker(settings, args, today)?;
    let grids = picker.visible_grids(today)?;

    if args.json {
        let report = GridReport {
            title: picker.title(),
            display: display_text(&picker.effective_range()),
            range: picker.effective_range(),
            months: &grids,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&picker, &grids));
    }
    Ok(())
}

fn build_picker(
    settings: &PickerConfig,
    args: &GridArgs,
    today: NaiveDate,
) -> Result<DateRangePicker> {
    let initial = DateRange::from_bounds(args.start, args.end).context("invalid --start/--end")?;
    let mut picker = DateRangePicker::initialize(Some(initial), settings.clone(), today)?;
    if let Some(raw) = &args.month {
        let month = parse_month(raw)?;
        picker.on_pick_year(month.year())?;
        picker.on_pick_month(month.month())?;
    }
    Ok(picker)
}

/// Parses "YYYY-MM" into the first day of that month.
pub(crate) fn parse_month(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .with_context(|| format!("invalid month '{raw}', expected YYYY-MM"))
}

/// Single-character tag printed before a day number.
fn cell_marker(cell: &DayCell) -> char {
    match (cell.is_range_start, cell.is_range_end) {
        (true, true) => '*',
        (true, false) => '>',
        (false, true) => '<',
        _ if cell.is_in_range => '=',
        _ if cell.is_in_preview => '~',
        _ if cell.is_today => '@',
        _ => ' ',
    }
}

fn render_month(out: &mut String, grid: &MonthGrid, picker: &DateRangePicker) {
    let config = picker.config();
    let show_week_numbers = config.show_week_numbers;
    let width = 28 + if show_week_numbers { 3 } else { 0 };

    let _ = writeln!(out, "{:^width$}", grid.view.title());
    if show_week_numbers {
        out.push_str("Wk ");
    }
    for label in config.week_start.header_labels() {
        let _ = write!(out, " {label} ");
    }
    out.push('\n');

    for week in &grid.weeks {
        if let Some(n) = week.week_number {
            let _ = write!(out, "{n:>2} ");
        }
        for cell in &week.days {
            if DateRangePicker::is_interactive(cell) {
                let _ = write!(out, "{}{:>2} ", cell_marker(cell), cell.date.day());
            } else {
                out.push_str("    ");
            }
        }
        // Trailing blanks from out-of-month cells are noise in terminal output
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
}

pub(crate) fn render_text(picker: &DateRangePicker, grids: &[MonthGrid]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", picker.title());
    let _ = writeln!(out, "Range: {}", display_text(&picker.effective_range()));
    for grid in grids {
        out.push('\n');
        render_month(&mut out, grid, picker);
    }
    out.push_str("\n> start  < end  * single day  = in range  ~ preview  @ today\n");
    out
}
