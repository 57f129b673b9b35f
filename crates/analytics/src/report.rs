use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The RPD outcome for a single year.
///
/// This struct is the per-year entry of the `YearlyRpdReport` and serves as
/// the data transfer object for results throughout the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyResult {
    /// Cumulative revenue recognized by this year's end, from every cohort
    /// activated up to and including this year, divided by the cumulative
    /// number of activated users.
    pub rpd: f64,

    /// Percentage change against the prior year's RPD. `None` for the first
    /// year in the requested range, where no prior year exists.
    pub growth_pct: Option<f64>,
}

/// Year-by-year RPD results, in ascending year order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyRpdReport {
    pub years: BTreeMap<i32, YearlyResult>,
}

impl YearlyRpdReport {
    /// Creates a new, empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: i32) -> Option<&YearlyResult> {
        self.years.get(&year)
    }

    /// Iterates results in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &YearlyResult)> {
        self.years.iter().map(|(&year, result)| (year, result))
    }
}
