use crate::data::error::PickerError;
use chrono::NaiveDate;
use serde::Serialize;

/// Shape of a [`DateRange`], which doubles as the selection state machine's state.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeState {
    Empty,
    PartialStart,
    Complete,
}

/// A possibly incomplete inclusive range of calendar days.
///
/// Fields are private so the invariants hold: `start <= end` whenever both
/// are present, and an end never exists without a start.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub const fn empty() -> Self {
        DateRange {
            start: None,
            end: None,
        }
    }

    /// An open range waiting for its second click.
    pub const fn starting_at(start: NaiveDate) -> Self {
        DateRange {
            start: Some(start),
            end: None,
        }
    }

    /// A complete range; fails when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PickerError> {
        if start > end {
            return Err(PickerError::InvalidRange { start, end });
        }
        Ok(DateRange {
            start: Some(start),
            end: Some(end),
        })
    }

    /// A complete range from two days given in any order.
    pub fn normalized(a: NaiveDate, b: NaiveDate) -> Self {
        DateRange {
            start: Some(a.min(b)),
            end: Some(a.max(b)),
        }
    }

    /// Builds a range from optional bounds as supplied by a host application.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, PickerError> {
        match (start, end) {
            (None, None) => Ok(Self::empty()),
            (Some(s), None) => Ok(Self::starting_at(s)),
            (Some(s), Some(e)) => Self::new(s, e),
            (None, Some(_)) => Err(PickerError::InvalidConfiguration(
                "a range end requires a range start".to_string(),
            )),
        }
    }

    pub const fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn state(&self) -> RangeState {
        match (self.start, self.end) {
            (Some(_), Some(_)) => RangeState::Complete,
            (Some(_), None) => RangeState::PartialStart,
            _ => RangeState::Empty,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == RangeState::Complete
    }

    /// Both bounds, when the range is complete.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    /// True if `day` lies in `[start, end]`. Incomplete ranges contain nothing.
    pub fn contains(&self, day: NaiveDate) -> bool {
        match self.bounds() {
            Some((s, e)) => day >= s && day <= e,
            None => false,
        }
    }

    /// Number of calendar days covered, counting both ends.
    pub fn duration_days(&self) -> Option<i64> {
        self.bounds().map(|(s, e)| (e - s).num_days() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_has_no_bounds() {
        let r = DateRange::empty();
        assert_eq!(r.start(), None);
        assert_eq!(r.end(), None);
        assert_eq!(r.state(), RangeState::Empty);
        assert_eq!(r, DateRange::default());
    }

    #[test]
    fn test_starting_at_is_partial() {
        let r = DateRange::starting_at(d(2024, 3, 10));
        assert_eq!(r.state(), RangeState::PartialStart);
        assert!(!r.is_complete());
        assert!(!r.contains(d(2024, 3, 10)));
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let err = DateRange::new(d(2024, 3, 10), d(2024, 3, 5)).unwrap_err();
        assert_eq!(
            err,
            PickerError::InvalidRange {
                start: d(2024, 3, 10),
                end: d(2024, 3, 5)
            }
        );
    }

    #[test]
    fn test_new_accepts_single_day() {
        let r = DateRange::new(d(2024, 3, 10), d(2024, 3, 10)).unwrap();
        assert!(r.is_complete());
        assert_eq!(r.duration_days(), Some(1));
    }

    #[test]
    fn test_normalized_swaps() {
        let r = DateRange::normalized(d(2024, 3, 10), d(2024, 3, 5));
        assert_eq!(r.start(), Some(d(2024, 3, 5)));
        assert_eq!(r.end(), Some(d(2024, 3, 10)));
    }

    #[test]
    fn test_from_bounds_rejects_end_without_start() {
        assert!(DateRange::from_bounds(None, Some(d(2024, 1, 1))).is_err());
        assert_eq!(
            DateRange::from_bounds(Some(d(2024, 1, 1)), None).unwrap(),
            DateRange::starting_at(d(2024, 1, 1))
        );
        assert_eq!(DateRange::from_bounds(None, None).unwrap(), DateRange::empty());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = DateRange::new(d(2024, 2, 27), d(2024, 3, 2)).unwrap();
        assert!(r.contains(d(2024, 2, 27)));
        assert!(r.contains(d(2024, 2, 29)));
        assert!(r.contains(d(2024, 3, 2)));
        assert!(!r.contains(d(2024, 2, 26)));
        assert!(!r.contains(d(2024, 3, 3)));
    }

    #[test]
    fn test_duration_days_across_leap_day() {
        let r = DateRange::new(d(2024, 2, 28), d(2024, 3, 1)).unwrap();
        assert_eq!(r.duration_days(), Some(3));
        assert_eq!(DateRange::starting_at(d(2024, 2, 28)).duration_days(), None);
    }

    #[test]
    fn test_serializes_absent_bounds_as_null() {
        let json = serde_json::to_string(&DateRange::starting_at(d(2024, 3, 10))).unwrap();
        assert_eq!(json, r#"{"start":"2024-03-10","end":null}"#);
    }
}
