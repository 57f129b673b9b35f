use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Revenue attributed to a cohort on its activation day, in currency units.
///
/// Day-0 revenue is a fixed constant, independent of any fitted curve; the
/// decay curve only shapes revenue from day 1 onwards.
pub const BASE_DAY_REVENUE: f64 = 1000.0;

/// The day offsets at which retention is observed for each calendar year.
pub const OBSERVED_DAY_OFFSETS: [u32; 3] = [1, 7, 30];

/// A single observed retention data point: the fraction of activation-day
/// revenue still generated `day` days after activation.
///
/// Rates are typically in `(0, 1]`, but values above 1 are permitted;
/// upstream inputs allow up to 1000%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetentionObservation {
    pub day: u32,
    pub rate: f64,
}

/// The three retention observations supplied per calendar year, at the
/// fixed day offsets 1, 7, and 30.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetentionTriple {
    pub day1: f64,
    pub day7: f64,
    pub day30: f64,
}

impl RetentionTriple {
    pub fn new(day1: f64, day7: f64, day30: f64) -> Self {
        Self { day1, day7, day30 }
    }

    /// Expands the triple into observations at the fixed day offsets.
    pub fn observations(&self) -> [RetentionObservation; 3] {
        let [d1, d7, d30] = OBSERVED_DAY_OFFSETS;
        [
            RetentionObservation { day: d1, rate: self.day1 },
            RetentionObservation { day: d7, rate: self.day7 },
            RetentionObservation { day: d30, rate: self.day30 },
        ]
    }
}

/// Coefficients of a fitted power-law decay curve `retention(t) = a * t^b`.
///
/// One pair per calendar year. Derived by the fitter, never mutated after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayParameters {
    pub a: f64,
    pub b: f64,
}

/// One activation cohort: every user activated on a single calendar date,
/// plus that cohort's projected revenue per elapsed-day offset.
///
/// `revenue[k]` is the revenue projected `k` days after activation, or
/// `None` when the elapsed date falls outside the analysis range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRow {
    pub activation_date: NaiveDate,
    pub activation_count: u32,
    pub revenue: Vec<Option<f64>>,
}

impl CohortRow {
    /// Iterates over the populated revenue cells, in offset order.
    pub fn populated(&self) -> impl Iterator<Item = f64> + '_ {
        self.revenue.iter().flatten().copied()
    }
}

/// The full projected revenue table: one row per activation date in the
/// analysis range (ascending), one column per day offset `0..width`.
///
/// The table is rectangular: every row carries `width` columns, sized off
/// the whole span. Rows activating late in the range therefore end in a
/// run of absent cells. Memory scales with the square of the span length,
/// which is the dominant resource cost for multi-year ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueTable {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rows: Vec<CohortRow>,
}

impl RevenueTable {
    /// The number of day-offset columns (equal to the number of days in the
    /// range, and to the number of rows).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.revenue.len())
    }
}
