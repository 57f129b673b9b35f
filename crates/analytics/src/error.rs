use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Calculation error: Division by zero, no users activated through year {0}")]
    DivisionByZero(i32),

    #[error("Calendar error: could not construct the year-end date for {0}")]
    InvalidYear(i32),
}
