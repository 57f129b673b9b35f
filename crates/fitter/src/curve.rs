//! Evaluation and sampling of fitted decay curves.
//!
//! Revenue projection evaluates the curve by round-tripping through log
//! space, `exp(ln(a * t^b))`, which mirrors the log-space form the fit
//! minimizes against. For positive `a` this is mathematically identical to
//! evaluating `a * t^b` directly.

use core_types::DecayParameters;

/// Evaluates `ln(a * day^b)`, the log-space form of the decay curve.
pub fn log_power(day: f64, a: f64, b: f64) -> f64 {
    (a * day.powf(b)).ln()
}

/// Evaluates the fitted curve at `day` days after activation.
///
/// Callers must guarantee the fitted `a` is positive; the logarithm is
/// undefined otherwise. Fits produced by this crate satisfy that by
/// construction, since `a` is recovered via `exp`.
pub fn retention_at(params: &DecayParameters, day: f64) -> f64 {
    log_power(day, params.a, params.b).exp()
}

/// Samples the curve at `points` evenly spaced days across `[1, max_day]`.
///
/// Returns `(day, retention)` pairs suitable for rendering a decay chart by
/// a presentation layer. Day 0 is deliberately excluded: activation-day
/// revenue is a fixed constant and is not described by the curve.
pub fn sample_curve(params: &DecayParameters, max_day: f64, points: usize) -> Vec<(f64, f64)> {
    match points {
        0 => Vec::new(),
        1 => vec![(1.0, retention_at(params, 1.0))],
        _ => {
            let step = (max_day - 1.0) / (points as f64 - 1.0);
            (0..points)
                .map(|i| {
                    let day = 1.0 + step * i as f64;
                    (day, retention_at(params, day))
                })
                .collect()
        }
    }
}
