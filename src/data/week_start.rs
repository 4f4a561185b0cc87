use crate::data::error::PickerError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First day of the week used to lay out calendar rows.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    pub const ALL: [WeekStart; 7] = [
        WeekStart::Sunday,
        WeekStart::Monday,
        WeekStart::Tuesday,
        WeekStart::Wednesday,
        WeekStart::Thursday,
        WeekStart::Friday,
        WeekStart::Saturday,
    ];

    /// Index in the 0 = Sunday .. 6 = Saturday convention.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Result<Self, PickerError> {
        Self::ALL.get(index as usize).copied().ok_or_else(|| {
            PickerError::InvalidConfiguration(format!(
                "week start index must be 0-6, got {index}"
            ))
        })
    }

    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Tuesday => Weekday::Tue,
            WeekStart::Wednesday => Weekday::Wed,
            WeekStart::Thursday => Weekday::Thu,
            WeekStart::Friday => Weekday::Fri,
            WeekStart::Saturday => Weekday::Sat,
        }
    }

    /// The following weekday, wrapping Saturday back to Sunday.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % 7]
    }

    /// Two-letter column headers in display order, starting at this weekday.
    pub fn header_labels(self) -> [&'static str; 7] {
        const LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
        let offset = self.index() as usize;
        std::array::from_fn(|i| LABELS[(offset + i) % 7])
    }
}

impl From<WeekStart> for Weekday {
    fn from(ws: WeekStart) -> Self {
        ws.weekday()
    }
}

impl From<Weekday> for WeekStart {
    fn from(day: Weekday) -> Self {
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
            WeekStart::Tuesday => "tuesday",
            WeekStart::Wednesday => "wednesday",
            WeekStart::Thursday => "thursday",
            WeekStart::Friday => "friday",
            WeekStart::Saturday => "saturday",
        };
        f.write_str(name)
    }
}

/// Accepts full or three-letter names in any case, or a 0-6 index.
impl FromStr for WeekStart {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            return Self::from_index(index);
        }
        let lower = trimmed.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|ws| {
                let name = ws.to_string();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| {
                PickerError::InvalidConfiguration(format!("unknown week start: '{trimmed}'"))
            })
    }
}
