pub mod error;
pub mod persistence;
pub mod range;
pub mod selection;
pub mod settings;
pub mod week_start;

pub use error::PickerError;
pub use persistence::Persistable;
pub use range::{DateRange, RangeState};
pub use selection::SelectionState;
pub use settings::PickerConfig;
pub use week_start::WeekStart;
