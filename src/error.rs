use thiserror::Error;

/// Main library error type
///
/// `DataUnavailable` and `UnmappedCategory` are raised while the dashboard is
/// being prepared and halt startup. The remaining kinds mark calls that the
/// controller or the web layer should never let through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    #[error("Unmapped value {value:?} in column {column}")]
    UnmappedCategory { column: String, value: String },

    #[error("Aggregation over an empty view: {0}")]
    EmptyInput(String),

    #[error("Unknown column {column} in view {view}")]
    UnknownColumn { view: String, column: String },

    #[error("Column {column} in view {view} is not numeric")]
    NonNumericColumn { view: String, column: String },

    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Option {value:?} is not offered by control {control}")]
    UnknownOption { control: String, value: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
