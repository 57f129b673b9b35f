//! # Horizon Core Types
//!
//! This crate defines the shared domain vocabulary of the projection engine:
//! retention observations, fitted decay parameters, activation cohorts, and
//! the revenue table they combine into.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate sits at the bottom of the workspace. It has no
//!   knowledge of fitting, projection, or aggregation; it only describes the
//!   data those layers exchange.
//! - **Transient Data:** Every type here is rebuilt from scratch on each
//!   calculation run. Nothing is cached or persisted across runs.

// Declare the modules that make up this crate.
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use structs::{
    CohortRow, DecayParameters, RetentionObservation, RetentionTriple, RevenueTable,
    BASE_DAY_REVENUE, OBSERVED_DAY_OFFSETS,
};
