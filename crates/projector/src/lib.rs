//! # Horizon Revenue Projector
//!
//! Expands per-year decay curves into a dense revenue table: one row per
//! activation date in the analysis range, one column per elapsed-day offset.
//!
//! Each cell projects the revenue a cohort generates that many days after
//! activation, using the curve of the cohort's *activation* year (not the
//! year the revenue lands in). Offsets whose elapsed date falls beyond the
//! range end are recorded as absent rather than computed, so late rows end
//! in an absent tail.

use crate::error::ProjectionError;
use chrono::{Datelike, Duration, NaiveDate};
use core_types::{CohortRow, DecayParameters, RetentionTriple, RevenueTable, BASE_DAY_REVENUE};
use fitter::retention_at;
use std::collections::BTreeMap;

pub mod error;

/// Builds revenue tables from a scenario's retention inputs.
///
/// The projector is stateless apart from the day-zero base revenue, which
/// defaults to [`BASE_DAY_REVENUE`] (1000 currency units).
#[derive(Debug, Clone)]
pub struct Projector {
    base_revenue: f64,
}

impl Projector {
    pub fn new() -> Self {
        Self { base_revenue: BASE_DAY_REVENUE }
    }

    /// Overrides the day-zero base revenue constant.
    pub fn with_base_revenue(base_revenue: f64) -> Self {
        Self { base_revenue }
    }

    /// Projects revenue for every cohort activated in `[start_date, end_date]`.
    ///
    /// `yearly_retention` must cover every calendar year the range touches;
    /// coverage is validated up front, before any curve is fitted, and a
    /// missing year fails with an error naming it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCohortSize` when `daily_active_users` is zero,
    /// `InvalidDateRange` when the range is reversed, `MissingYearParameters`
    /// for an uncovered year, and `Fit` (tagged with the year) when a
    /// retention triple cannot be fitted.
    pub fn project(
        &self,
        daily_active_users: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        yearly_retention: &BTreeMap<i32, RetentionTriple>,
    ) -> Result<RevenueTable, ProjectionError> {
        // --- 1. Validation ---
        if daily_active_users == 0 {
            return Err(ProjectionError::InvalidCohortSize);
        }
        if start_date > end_date {
            return Err(ProjectionError::InvalidDateRange { start: start_date, end: end_date });
        }
        for year in start_date.year()..=end_date.year() {
            if !yearly_retention.contains_key(&year) {
                return Err(ProjectionError::MissingYearParameters(year));
            }
        }

        // --- 2. Fit one curve per supplied year ---
        let mut fitted: BTreeMap<i32, DecayParameters> = BTreeMap::new();
        for (&year, triple) in yearly_retention {
            let params = fitter::fit_decay_parameters(&triple.observations())
                .map_err(|source| ProjectionError::Fit { year, source })?;
            fitted.insert(year, params);
        }

        // --- 3. Expand into the revenue table ---
        // The offset range is sized off the whole span, not the days remaining
        // for a given row.
        let total_days = (end_date - start_date).num_days() as usize + 1;
        let mut rows = Vec::with_capacity(total_days);

        for date in start_date.iter_days().take_while(|d| *d <= end_date) {
            let params = fitted
                .get(&date.year())
                .ok_or(ProjectionError::MissingYearParameters(date.year()))?;

            let mut revenue = Vec::with_capacity(total_days);
            for offset in 0..total_days {
                let cell = if date + Duration::days(offset as i64) > end_date {
                    None
                } else if offset == 0 {
                    Some(self.base_revenue)
                } else {
                    Some(self.base_revenue * retention_at(params, offset as f64))
                };
                revenue.push(cell);
            }

            rows.push(CohortRow {
                activation_date: date,
                activation_count: daily_active_users,
                revenue,
            });
        }

        tracing::info!(rows = rows.len(), columns = total_days, "projected revenue table");
        Ok(RevenueTable { start_date, end_date, rows })
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new()
    }
}

/// Projects revenue with the default day-zero base revenue.
pub fn project_revenue(
    daily_active_users: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    yearly_retention: &BTreeMap<i32, RetentionTriple>,
) -> Result<RevenueTable, ProjectionError> {
    Projector::new().project(daily_active_users, start_date, end_date, yearly_retention)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn single_year_2024() -> BTreeMap<i32, RetentionTriple> {
        BTreeMap::from([(2024, RetentionTriple::new(0.8, 0.4, 0.2))])
    }

    #[test]
    fn day_zero_column_is_base_revenue_for_every_row() {
        let table =
            project_revenue(1000, date(2024, 1, 1), date(2024, 1, 10), &single_year_2024())
                .unwrap();
        for row in &table.rows {
            assert_eq!(row.revenue[0], Some(BASE_DAY_REVENUE));
        }
    }

    #[test]
    fn absence_boundary_on_ten_day_range() {
        let table =
            project_revenue(1000, date(2024, 1, 1), date(2024, 1, 10), &single_year_2024())
                .unwrap();
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.width(), 10);

        // First row: every offset lands inside the range.
        assert!(table.rows[0].revenue.iter().all(Option::is_some));

        // Ninth day: only offsets 0 and 1 land inside the range.
        let ninth = &table.rows[8];
        assert!(ninth.revenue[0].is_some());
        assert!(ninth.revenue[1].is_some());
        assert!(ninth.revenue[2..].iter().all(Option::is_none));

        // Last day: activation-day revenue only.
        let last = &table.rows[9];
        assert!(last.revenue[0].is_some());
        assert!(last.revenue[1..].iter().all(Option::is_none));
    }

    #[test]
    fn cells_follow_the_fitted_curve() {
        let retention = single_year_2024();
        let table =
            project_revenue(1000, date(2024, 1, 1), date(2024, 1, 10), &retention).unwrap();
        let params = fitter::fit_decay_parameters(&retention[&2024].observations()).unwrap();

        for offset in 1..10 {
            let expected = BASE_DAY_REVENUE * retention_at(&params, offset as f64);
            let actual = table.rows[0].revenue[offset].unwrap();
            assert!((actual - expected).abs() < 1e-9, "offset {offset}");
        }
    }

    #[test]
    fn curve_selection_follows_activation_year() {
        let retention = BTreeMap::from([
            (2023, RetentionTriple::new(0.9, 0.5, 0.3)),
            (2024, RetentionTriple::new(0.5, 0.2, 0.1)),
        ]);
        let table =
            project_revenue(1000, date(2023, 12, 30), date(2024, 1, 2), &retention).unwrap();

        // The 2023-12-31 cohort's day-1 revenue lands on 2024-01-01 but must
        // still use the 2023 curve.
        let params_2023 = fitter::fit_decay_parameters(&retention[&2023].observations()).unwrap();
        let expected = BASE_DAY_REVENUE * retention_at(&params_2023, 1.0);
        let actual = table.rows[1].revenue[1].unwrap();
        assert!((actual - expected).abs() < 1e-9);

        let params_2024 = fitter::fit_decay_parameters(&retention[&2024].observations()).unwrap();
        let expected = BASE_DAY_REVENUE * retention_at(&params_2024, 1.0);
        let actual = table.rows[2].revenue[1].unwrap();
        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn missing_year_fails_before_any_computation() {
        // 2025 is inside the range but has no observations.
        let err = project_revenue(1000, date(2024, 12, 30), date(2025, 1, 2), &single_year_2024())
            .unwrap_err();
        assert!(matches!(err, ProjectionError::MissingYearParameters(2025)));
    }

    #[test]
    fn zero_cohort_size_is_rejected() {
        let err = project_revenue(0, date(2024, 1, 1), date(2024, 1, 2), &single_year_2024())
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidCohortSize));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = project_revenue(1000, date(2024, 1, 2), date(2024, 1, 1), &single_year_2024())
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidDateRange { .. }));
    }

    #[test]
    fn unfittable_year_is_tagged() {
        let retention = BTreeMap::from([(2024, RetentionTriple::new(0.8, 0.0, 0.2))]);
        let err =
            project_revenue(1000, date(2024, 1, 1), date(2024, 1, 2), &retention).unwrap_err();
        assert!(matches!(err, ProjectionError::Fit { year: 2024, .. }));
    }

    #[test]
    fn custom_base_revenue_scales_the_table() {
        let projector = Projector::with_base_revenue(500.0);
        let table = projector
            .project(1000, date(2024, 1, 1), date(2024, 1, 3), &single_year_2024())
            .unwrap();
        assert_eq!(table.rows[0].revenue[0], Some(500.0));
        // Decayed cells scale off the same base.
        let full = project_revenue(1000, date(2024, 1, 1), date(2024, 1, 3), &single_year_2024())
            .unwrap();
        let halved = table.rows[0].revenue[1].unwrap();
        let reference = full.rows[0].revenue[1].unwrap();
        assert!((halved * 2.0 - reference).abs() < 1e-9);
    }
}
