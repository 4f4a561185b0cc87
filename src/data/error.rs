use chrono::NaiveDate;

/// Error type for every fallible operation of the picker core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// An interval whose start lies after its end.
    #[error("invalid range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Rejected at construction time; the picker cannot be built.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A quick-jump target that is not a representable calendar month.
    #[error("invalid date: {year}-{month:02} is not a calendar month")]
    InvalidDate { year: i32, month: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_invalid_range_message() {
        let e = PickerError::InvalidRange {
            start: d(2024, 3, 10),
            end: d(2024, 3, 5),
        };
        assert_eq!(
            e.to_string(),
            "invalid range: start (2024-03-10) is after end (2024-03-05)"
        );
    }

    #[test]
    fn test_invalid_configuration_message() {
        let e =
            PickerError::InvalidConfiguration("number_of_months must be at least 1, got 0".into());
        assert_eq!(
            e.to_string(),
            "invalid configuration: number_of_months must be at least 1, got 0"
        );
    }

    #[test]
    fn test_invalid_date_message() {
        let e = PickerError::InvalidDate { year: 2024, month: 13 };
        assert_eq!(e.to_string(), "invalid date: 2024-13 is not a calendar month");
    }

    #[test]
    fn test_error_is_std_error_and_send_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<PickerError>();
    }
}
