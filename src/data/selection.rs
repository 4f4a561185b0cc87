use crate::data::range::DateRange;
use chrono::NaiveDate;
use serde::Serialize;

/// The mutable part of a picker: the range built so far and the hovered day.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub range: DateRange,
    pub hover: Option<NaiveDate>,
}

impl SelectionState {
    pub fn new(range: DateRange) -> Self {
        SelectionState { range, hover: None }
    }
}
