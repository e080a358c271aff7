//! # Harvest Ledger Analytics
//!
//! This crate computes the employee performance report: how many trees each
//! harvester plucked in a period, how much sales revenue that work earned, how
//! much salary they were paid, and the resulting balance.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the backend
//!   or of how the report is displayed. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `PerformanceAggregator` takes already-normalized
//!   snapshots as input and produces `EmployeeSummary` rows as output. Calling it twice
//!   with the same inputs yields the same rows.
//!
//! ## Public API
//!
//! - `PerformanceAggregator`: The struct that contains the aggregation logic.
//! - `EmployeeSummary`: One row of the report.
//! - `ReportTotals`: The grand-total row derived from the summaries.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::PerformanceAggregator;
pub use error::AnalyticsError;
pub use report::{EmployeeSummary, ReportTotals};
