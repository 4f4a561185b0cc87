use crate::data::error::PickerError;
use crate::data::persistence::Persistable;
use crate::data::week_start::WeekStart;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options recognized when a picker is built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PickerConfig {
    pub week_start: WeekStart,
    pub show_week_numbers: bool,
    pub number_of_months: usize,
    /// Hover preview covers whole weeks instead of exact days.
    pub highlight_full_week_on_hover: bool,
    /// A committed range snaps outward to the edges of its weeks.
    pub default_to_week_start_and_end_dates: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            week_start: WeekStart::Sunday,
            show_week_numbers: false,
            number_of_months: 2,
            highlight_full_week_on_hover: false,
            default_to_week_start_and_end_dates: false,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), PickerError> {
        if self.number_of_months == 0 {
            return Err(PickerError::InvalidConfiguration(
                "number_of_months must be at least 1, got 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save(&self) -> Result<()> {
        self.wrapped().save()
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        self.wrapped().save_to(dir)
    }

    fn wrapped(&self) -> SettingsWrapper {
        SettingsWrapper {
            settings: self.clone(),
        }
    }
}

/// Reads the `settings` key from config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: PickerConfig,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let config = PickerConfig::default();
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.number_of_months, 2);
        assert!(!config.show_week_numbers);
        assert!(!config.highlight_full_week_on_hover);
        assert!(!config.default_to_week_start_and_end_dates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_months() {
        let config = PickerConfig {
            number_of_months: 0,
            ..PickerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PickerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_accepts_more_than_a_year_of_months() {
        let config = PickerConfig {
            number_of_months: 13,
            ..PickerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_any_positive_count() {
        for n in [1, 2, 3, 12, 24, 100] {
            let config = PickerConfig {
                number_of_months: n,
                ..PickerConfig::default()
            };
            assert!(config.validate().is_ok(), "{n} months should be valid");
        }
    }

    #[test]
    fn test_missing_settings_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, PickerConfig::default());
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let yaml = "settings:\n  week_start: monday\n  show_week_numbers: true\n";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.week_start, WeekStart::Monday);
        assert!(wrapper.settings.show_week_numbers);
        assert_eq!(wrapper.settings.number_of_months, 2);
    }

    #[test]
    fn test_malformed_week_start_fails_to_parse() {
        let yaml = "settings:\n  week_start: someday\n";
        assert!(serde_norway::from_str::<SettingsWrapper>(yaml).is_err());
    }

    #[test]
    fn test_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let config = PickerConfig {
            week_start: WeekStart::Saturday,
            show_week_numbers: true,
            number_of_months: 3,
            highlight_full_week_on_hover: true,
            default_to_week_start_and_end_dates: true,
        };
        config.save_to(tmp.path()).unwrap();
        assert!(tmp.path().join("config.yaml").exists());
        assert_eq!(PickerConfig::load_from(tmp.path()).unwrap(), config);
    }
}
