use crate::ui::display_text;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rangepick::{DateRange, DateRangePicker, PickerConfig, RangeState};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Outcome of replaying a sequence of day clicks.
#[derive(Serialize, Debug)]
pub(crate) struct SelectReport {
    /// Every range a click completed, in order.
    pub commits: Vec<DateRange>,
    pub range: DateRange,
    pub state: RangeState,
    pub duration_days: Option<i64>,
    pub display: String,
}

pub fn run(settings: &PickerConfig, days: &[NaiveDate], json: bool) -> Result<()> {
    let report = simulate(settings, days, Local::now().date_naive())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (i, commit) in report.commits.iter().enumerate() {
        println!("Commit {}: {}", i + 1, display_text(commit));
    }
    println!("Range: {}", report.display);
    if let Some(days) = report.duration_days {
        println!("Duration: {days} days");
    }
    Ok(())
}

pub(crate) fn simulate(
    settings: &PickerConfig,
    days: &[NaiveDate],
    today: NaiveDate,
) -> Result<SelectReport> {
    let mut picker = DateRangePicker::initialize(None, settings.clone(), today)?;

    let commits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&commits);
    picker.on_range_committed(move |range| sink.borrow_mut().push(*range));

    for day in days {
        picker.on_day_click(*day);
    }

    let range = picker.effective_range();
    let commits = commits.borrow().clone();
    tracing::info!(clicks = days.len(), commits = commits.len(), "selection replayed");
    Ok(SelectReport {
        commits,
        range,
        state: range.state(),
        duration_days: range.duration_days(),
        display: display_text(&range),
    })
}
