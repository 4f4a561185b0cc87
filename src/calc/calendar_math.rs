//! Pure calendar arithmetic at whole-day granularity.
//!
//! Everything here is total over chrono's supported date range except
//! [`days_between`], which refuses an inverted interval.

use crate::data::{PickerError, WeekStart};
use chrono::{Datelike, Duration, NaiveDate};

/// Calendar month name in English.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub fn month_abbrev(month: u32) -> &'static str {
    let name = month_name(month);
    if month == 0 || month > 12 { name } else { &name[..3] }
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// The first day of an explicit year/month pair.
pub fn month_start(year: i32, month: u32) -> Result<NaiveDate, PickerError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PickerError::InvalidDate { year, month })
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.day0()))
}

/// First and last calendar day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(day);
    let len = days_in_month(first.year(), first.month());
    let last = first + Duration::days(i64::from(len) - 1);
    (first, last)
}

/// Days from the most recent `week_start` on or before `day` up to `day` (0-6).
pub fn weekday_offset(day: NaiveDate, week_start: WeekStart) -> u32 {
    (day.weekday().num_days_from_sunday() + 7 - u32::from(week_start.index())) % 7
}

/// First and last day of the 7-day week containing `day`, or `None` when
/// that week runs past the ends of chrono's calendar.
pub fn checked_week_bounds(
    day: NaiveDate,
    week_start: WeekStart,
) -> Option<(NaiveDate, NaiveDate)> {
    let offset = i64::from(weekday_offset(day, week_start));
    let first = day.checked_sub_signed(Duration::days(offset))?;
    let last = first.checked_add_signed(Duration::days(6))?;
    Some((first, last))
}

/// First and last day of the 7-day week containing `day`.
///
/// Saturates at `NaiveDate::MIN` / `NaiveDate::MAX`; use
/// [`checked_week_bounds`] where alignment must hold.
pub fn week_bounds(day: NaiveDate, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    checked_week_bounds(day, week_start).unwrap_or_else(|| {
        let offset = i64::from(weekday_offset(day, week_start));
        let first = day
            .checked_sub_signed(Duration::days(offset))
            .unwrap_or(NaiveDate::MIN);
        let last = first
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);
        (first, last)
    })
}

/// Every day from `start` to `end`, both included, in ascending order.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, PickerError> {
    if start > end {
        return Err(PickerError::InvalidRange { start, end });
    }
    let len = (end - start).num_days() as usize + 1;
    let mut days = Vec::with_capacity(len);
    let mut current = Some(start);
    while let Some(day) = current.filter(|d| *d <= end) {
        days.push(day);
        current = day.succ_opt();
    }
    Ok(days)
}

/// Week index within `day`'s year.
///
/// Week 1 is the week containing January 1 under `week_start`; days near
/// the end of December stay in the last week of their own year (52, 53 or
/// 54) instead of wrapping into week 1 of the next.
pub fn week_number(day: NaiveDate, week_start: WeekStart) -> u32 {
    let jan_1 = day - Duration::days(i64::from(day.ordinal0()));
    (day.ordinal0() + weekday_offset(jan_1, week_start)) / 7 + 1
}

/// Shifts `date` by whole months, clamping the day to the target month's length.
///
/// `None` when the target month lies outside chrono's calendar.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(months)?;
    let new_year = total.div_euclid(12);
    let new_month = total.rem_euclid(12) as u32 + 1;
    let new_day = date.day().min(days_in_month(new_year, new_month));
    NaiveDate::from_ymd_opt(new_year, new_month, new_day)
}
