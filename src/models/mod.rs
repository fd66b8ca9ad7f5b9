pub mod category;
pub mod measurement;
pub mod summary;

pub use category::AqiCategory;
pub use measurement::{CleanedMeasurement, NumericColumn, RawMeasurement};
pub use summary::{round2, StationDaySummary, StationMonthSummary, StationYearSummary};
