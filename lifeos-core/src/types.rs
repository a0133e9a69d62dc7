//! Core domain types for lifeos-core
//!
//! These types form the call contract of the analytics core: the caller
//! owns the habit roster and check-in records (fetched from whatever store
//! it uses) and receives streak summaries back. Periods themselves are
//! never materialized as values here — a period is identified by the epoch
//! milliseconds of its local-calendar start instant and recomputed on every
//! call.

use serde::{Deserialize, Serialize};

/// Epoch milliseconds, interpreted in the local calendar of the running
/// process.
pub type TimestampMs = i64;

// ============================================
// Frequency policy
// ============================================

/// Period size used to bucket check-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Local midnight to the next local midnight
    Day,
    /// Monday 00:00 to the following Monday 00:00
    Week,
    /// The 1st 00:00 to the 1st of the next calendar month
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            _ => Err(crate::Error::InvalidGranularity(s.to_string())),
        }
    }
}

/// How often a habit is meant to be checked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyPolicy {
    /// Period size
    pub granularity: Granularity,
    /// Check-ins needed within one period for it to count as completed
    pub required_count: u32,
}

impl FrequencyPolicy {
    /// Required count with the ≥1 floor applied.
    ///
    /// A caller-supplied zero would make every period trivially complete
    /// and divide expected counts by nothing, so it is coerced up to 1.
    pub fn required(&self) -> u32 {
        self.required_count.max(1)
    }
}

// ============================================
// Roster and check-ins
// ============================================

/// A habit as the aggregation roster sees it.
///
/// `id`, `name`, and `color` are opaque pass-through identity fields: the
/// core copies them into the per-habit report untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub policy: FrequencyPolicy,
}

/// A single check-in against a habit.
///
/// Only the timestamp matters to the streak computation; any value or note
/// recorded alongside a real check-in is ignored by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCheckIn {
    pub habit_id: String,
    /// When the check-in happened (epoch ms, local calendar)
    pub at: TimestampMs,
}

/// An inclusive `[start, end]` query window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: TimestampMs,
    pub end: TimestampMs,
}

impl DateRange {
    pub fn contains(&self, ts: TimestampMs) -> bool {
        ts >= self.start && ts <= self.end
    }
}

// ============================================
// Results
// ============================================

/// Streak statistics for one habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Consecutive completed periods ending at the most recent one
    pub current: u32,
    /// Longest run of adjacent completed periods ever observed
    pub longest: u32,
    /// Total completed periods (not total check-ins)
    pub total: u32,
}
