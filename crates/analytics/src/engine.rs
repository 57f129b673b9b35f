use crate::error::AnalyticsError;
use crate::report::{YearlyResult, YearlyRpdReport};
use chrono::{Datelike, NaiveDate};
use core_types::RevenueTable;

/// A stateless calculator for deriving yearly RPD figures from a projected
/// revenue table.
#[derive(Debug, Default)]
pub struct RpdEngine {}

impl RpdEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes RPD and year-over-year growth for each year in
    /// `[start_year, end_year]`, in ascending order.
    ///
    /// RPD is cumulative: year `y` covers every cohort activated in any year
    /// up to and including `y`, with each cohort's revenue summed from
    /// activation day through December 31 of `y`. Cells the projector marked
    /// absent contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when no cohort in the table activated by the
    /// end of a requested year, which would make the user denominator zero.
    pub fn calculate(
        &self,
        table: &RevenueTable,
        start_year: i32,
        end_year: i32,
    ) -> Result<YearlyRpdReport, AnalyticsError> {
        if start_year > end_year {
            return Err(AnalyticsError::InvalidYearRange { start: start_year, end: end_year });
        }

        let mut report = YearlyRpdReport::new();
        let mut prior_rpd: Option<f64> = None;

        for year in start_year..=end_year {
            let year_end =
                NaiveDate::from_ymd_opt(year, 12, 31).ok_or(AnalyticsError::InvalidYear(year))?;

            let mut cumulative_users: u64 = 0;
            let mut cumulative_revenue = 0.0;

            for row in table.rows.iter().filter(|r| r.activation_date.year() <= year) {
                cumulative_users += u64::from(row.activation_count);

                // Revenue recognized from activation day through this year's
                // end. The selected rows activated on or before December 31,
                // so the day count is never negative.
                let days_until_year_end = (year_end - row.activation_date).num_days() as usize;
                cumulative_revenue +=
                    row.revenue.iter().take(days_until_year_end + 1).flatten().sum::<f64>();
            }

            if cumulative_users == 0 {
                return Err(AnalyticsError::DivisionByZero(year));
            }

            let rpd = cumulative_revenue / cumulative_users as f64;
            let growth_pct = prior_rpd.map(|prior| (rpd / prior - 1.0) * 100.0);
            report.years.insert(year, YearlyResult { rpd, growth_pct });
            prior_rpd = Some(rpd);
        }

        tracing::debug!(years = report.years.len(), "computed yearly RPD");
        Ok(report)
    }
}

/// Convenience wrapper over a fresh [`RpdEngine`].
pub fn compute_yearly_rpd(
    table: &RevenueTable,
    start_year: i32,
    end_year: i32,
) -> Result<YearlyRpdReport, AnalyticsError> {
    RpdEngine::new().calculate(table, start_year, end_year)
}
