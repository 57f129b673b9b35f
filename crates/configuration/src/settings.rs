use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::RetentionTriple;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// The root configuration structure for a projection scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub projection: ProjectionSettings,
    pub retention: Vec<YearlyRetention>,
}

/// Contains parameters for a single projection run.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionSettings {
    /// The fixed number of users activated on each calendar day.
    pub daily_active_users: u32,
    /// The first activation date in the analysis range (inclusive).
    pub start_date: NaiveDate,
    /// The last activation date in the analysis range (inclusive).
    pub end_date: NaiveDate,
    /// Revenue attributed to a cohort on its activation day, in currency
    /// units. Defaults to 1000.
    #[serde(default = "default_base_revenue")]
    pub base_revenue: f64,
}

fn default_base_revenue() -> f64 {
    core_types::BASE_DAY_REVENUE
}

/// Observed retention percentages for one calendar year.
///
/// Values are entered as percentages (80.0 means 80%), the way the source
/// data is reported; conversion to fractions happens in
/// [`Config::yearly_retention`]. Percentages above 100 are permitted.
#[derive(Debug, Clone, Deserialize)]
pub struct YearlyRetention {
    pub year: i32,
    pub day1_pct: f64,
    pub day7_pct: f64,
    pub day30_pct: f64,
}

impl Config {
    /// Converts the retention settings into per-year fractional triples,
    /// keyed by calendar year.
    pub fn yearly_retention(&self) -> BTreeMap<i32, RetentionTriple> {
        self.retention
            .iter()
            .map(|entry| {
                (
                    entry.year,
                    RetentionTriple::new(
                        entry.day1_pct / 100.0,
                        entry.day7_pct / 100.0,
                        entry.day30_pct / 100.0,
                    ),
                )
            })
            .collect()
    }

    /// Validates that the scenario is internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen_years = BTreeSet::new();
        for entry in &self.retention {
            if !seen_years.insert(entry.year) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate retention entry for year {}",
                    entry.year
                )));
            }
        }
        Ok(())
    }
}
