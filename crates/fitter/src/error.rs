use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("Invalid retention observation at day {day}: rate {rate} is not positive")]
    InvalidObservation { day: u32, rate: f64 },

    #[error("Invalid retention observation: day offset 0 is outside the curve's domain")]
    ZeroDayOffset,

    #[error("Underdetermined fit: at least 2 distinct day offsets are required, got {0}")]
    Underdetermined(usize),

    #[error("Least-squares solver failed to converge: {0}")]
    NonConvergence(String),
}
