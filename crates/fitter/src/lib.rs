//! # Horizon Curve Fitter
//!
//! Fits a two-parameter power-law decay curve `retention(t) = a * t^b` to a
//! year's sparse retention observations.
//!
//! The problem is transformed into log space, where it becomes linear:
//! `ln(retention) = ln(a) + b * ln(t)`. The resulting 2-column least-squares
//! system is solved by SVD, which minimizes the squared residuals between
//! `ln(a * t^b)` and the observed log-retention over the supplied points.
//!
//! This is a pure Layer-1 crate: no I/O, no state, input in and parameters
//! out.

use core_types::{DecayParameters, RetentionObservation};
use nalgebra::{DMatrix, DVector};

pub mod curve;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use curve::{log_power, retention_at, sample_curve};
pub use error::FitError;

/// Singular values below this threshold are treated as zero by the solver.
const SVD_EPSILON: f64 = 1e-12;

/// Fits decay parameters to a set of retention observations.
///
/// # Arguments
///
/// * `observations` - Retention rates at known day offsets, typically the
///   day-1/day-7/day-30 triple supplied per calendar year.
///
/// # Returns
///
/// A `Result` containing the fitted `DecayParameters` or a `FitError`.
///
/// # Errors
///
/// Fails when any rate is non-positive (the log transform is undefined),
/// when fewer than 2 distinct day offsets are supplied (the two-parameter
/// system is underdetermined), or when the solver cannot converge. Errors
/// are surfaced to the caller; no fallback curve is ever substituted.
pub fn fit_decay_parameters(
    observations: &[RetentionObservation],
) -> Result<DecayParameters, FitError> {
    for obs in observations {
        if obs.day == 0 {
            return Err(FitError::ZeroDayOffset);
        }
        if obs.rate <= 0.0 {
            return Err(FitError::InvalidObservation { day: obs.day, rate: obs.rate });
        }
    }

    let mut distinct_days: Vec<u32> = observations.iter().map(|obs| obs.day).collect();
    distinct_days.sort_unstable();
    distinct_days.dedup();
    if distinct_days.len() < 2 {
        return Err(FitError::Underdetermined(distinct_days.len()));
    }

    // Design matrix for ln(r) = ln(a) + b * ln(t): an intercept column and
    // a ln(t) column.
    let design = DMatrix::from_fn(observations.len(), 2, |row, col| {
        if col == 0 {
            1.0
        } else {
            f64::from(observations[row].day).ln()
        }
    });
    let log_rates =
        DVector::from_iterator(observations.len(), observations.iter().map(|obs| obs.rate.ln()));

    let svd = design.svd(true, true);
    let coefficients = svd
        .solve(&log_rates, SVD_EPSILON)
        .map_err(|e| FitError::NonConvergence(e.to_string()))?;

    let params = DecayParameters { a: coefficients[0].exp(), b: coefficients[1] };
    tracing::debug!(a = params.a, b = params.b, "fitted decay parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observations_from(a: f64, b: f64) -> Vec<RetentionObservation> {
        [1u32, 7, 30]
            .iter()
            .map(|&day| RetentionObservation { day, rate: a * f64::from(day).powf(b) })
            .collect()
    }

    #[test]
    fn fit_recovers_known_parameters() {
        let params = fit_decay_parameters(&observations_from(1.0, -0.3)).unwrap();
        assert!((params.a - 1.0).abs() < 1e-6, "a = {}", params.a);
        assert!((params.b - (-0.3)).abs() < 1e-6, "b = {}", params.b);
    }

    #[test]
    fn fit_recovers_non_unit_scale() {
        let params = fit_decay_parameters(&observations_from(0.9, -0.25)).unwrap();
        assert!((params.a - 0.9).abs() < 1e-6);
        assert!((params.b - (-0.25)).abs() < 1e-6);
    }

    #[test]
    fn fit_from_two_points_is_exact() {
        // Two distinct offsets fully determine the two parameters.
        let observations = vec![
            RetentionObservation { day: 1, rate: 0.8 },
            RetentionObservation { day: 30, rate: 0.2 },
        ];
        let params = fit_decay_parameters(&observations).unwrap();
        assert!((params.a - 0.8).abs() < 1e-9);
        let expected_b = (0.2f64 / 0.8).ln() / 30f64.ln();
        assert!((params.b - expected_b).abs() < 1e-9);
    }

    #[test]
    fn fit_rejects_zero_rate() {
        let observations = vec![
            RetentionObservation { day: 1, rate: 0.8 },
            RetentionObservation { day: 7, rate: 0.0 },
            RetentionObservation { day: 30, rate: 0.2 },
        ];
        let err = fit_decay_parameters(&observations).unwrap_err();
        assert!(matches!(err, FitError::InvalidObservation { day: 7, .. }));
    }

    #[test]
    fn fit_rejects_negative_rate() {
        let observations = vec![
            RetentionObservation { day: 1, rate: -0.5 },
            RetentionObservation { day: 7, rate: 0.4 },
        ];
        let err = fit_decay_parameters(&observations).unwrap_err();
        assert!(matches!(err, FitError::InvalidObservation { day: 1, .. }));
    }

    #[test]
    fn fit_rejects_single_distinct_offset() {
        let observations = vec![
            RetentionObservation { day: 7, rate: 0.5 },
            RetentionObservation { day: 7, rate: 0.4 },
        ];
        let err = fit_decay_parameters(&observations).unwrap_err();
        assert!(matches!(err, FitError::Underdetermined(1)));
    }

    #[test]
    fn fit_rejects_day_zero_offset() {
        let observations = vec![
            RetentionObservation { day: 0, rate: 1.0 },
            RetentionObservation { day: 7, rate: 0.4 },
        ];
        let err = fit_decay_parameters(&observations).unwrap_err();
        assert!(matches!(err, FitError::ZeroDayOffset));
    }

    #[test]
    fn fit_permits_rates_above_one() {
        // Inputs allow up to 1000%; positivity is the only constraint.
        let observations = vec![
            RetentionObservation { day: 1, rate: 2.4 },
            RetentionObservation { day: 7, rate: 1.1 },
            RetentionObservation { day: 30, rate: 0.9 },
        ];
        let params = fit_decay_parameters(&observations).unwrap();
        assert!(params.a > 1.0);
        assert!(params.b < 0.0);
    }
}
