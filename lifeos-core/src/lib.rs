//! # lifeos-core
//!
//! Core analytics library for LifeOS habit tracking.
//!
//! This library provides:
//! - Domain types for habits, check-ins, and streak results
//! - Calendar-aware period boundary arithmetic (day/week/month)
//! - Streak and completion-rate computation
//! - Portfolio-level aggregation across a habit roster
//!
//! ## Model
//!
//! Everything here is pure and stateless. The caller supplies a snapshot of
//! check-in timestamps (epoch milliseconds, interpreted in the local
//! calendar) plus each habit's frequency policy; the library buckets those
//! timestamps into calendar periods, finds runs of adjacent completed
//! periods, and returns streak/completion statistics. Nothing is persisted,
//! fetched, or cached — every call recomputes from its inputs.
//!
//! ## Example
//!
//! ```rust
//! use lifeos_core::{habit_streaks, FrequencyPolicy, Granularity};
//!
//! let policy = FrequencyPolicy {
//!     granularity: Granularity::Day,
//!     required_count: 1,
//! };
//! let summary = habit_streaks(&policy, &[]).unwrap();
//! assert_eq!(summary.total, 0);
//! ```

// Re-export commonly used items at the crate root
pub use error::{Error, Result};
pub use period::{advance_period, period_start, periods_in_range};
pub use portfolio::{portfolio_report, HabitReport, PortfolioReport, PortfolioTotals};
pub use streak::{completed_periods, habit_streaks, streaks};
pub use types::*;

// Public modules
pub mod error;
pub mod logging;
pub mod period;
pub mod portfolio;
pub mod streak;
pub mod types;
