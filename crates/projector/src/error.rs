use chrono::NaiveDate;
use fitter::FitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Daily active users must be positive")]
    InvalidCohortSize,

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("No retention observations supplied for year {0}, which falls inside the analysis range")]
    MissingYearParameters(i32),

    #[error("Failed to fit decay parameters for year {year}: {source}")]
    Fit { year: i32, source: FitError },
}
