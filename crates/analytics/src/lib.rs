//! # Horizon RPD Analytics
//!
//! This crate derives the yearly revenue-per-day (RPD) figures from a
//! projected revenue table. It acts as the "unbiased judge" of a scenario:
//! the projector says what each cohort earns, this crate says what that is
//! worth per activated user, year by year.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   curve fitting or configuration. It depends only on `core-types`.
//! - **Stateless Calculation:** The `RpdEngine` is a stateless calculator.
//!   It takes a revenue table as input and produces a `YearlyRpdReport` as
//!   output. This makes it highly reliable and easy to test.
//!
//! ## Public API
//!
//! - `RpdEngine`: The main struct that contains the calculation logic.
//! - `YearlyRpdReport`: The ordered year-to-result mapping.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{compute_yearly_rpd, RpdEngine};
pub use error::AnalyticsError;
pub use report::{YearlyResult, YearlyRpdReport};
