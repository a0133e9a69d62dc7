//! Completed-period extraction and streak computation.
//!
//! Check-ins are bucketed into calendar periods; a period with at least the
//! required number of check-ins is "completed". Streaks are runs of
//! calendar-adjacent completed periods, where adjacency means advancing the
//! earlier period's start by exactly one period lands on the later one.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::period::{advance_period, period_start};
use crate::types::{FrequencyPolicy, Granularity, StreakSummary, TimestampMs};

/// Period starts whose check-in count meets the required count, ascending.
///
/// `required_count` is clamped to at least 1; only the count of check-ins
/// in a period matters, never their order or payload. Empty input yields an
/// empty result.
pub fn completed_periods(
    granularity: Granularity,
    required_count: u32,
    timestamps: &[TimestampMs],
) -> Result<Vec<TimestampMs>> {
    let required = u64::from(required_count.max(1));

    let mut counts: BTreeMap<TimestampMs, u64> = BTreeMap::new();
    for &ts in timestamps {
        *counts.entry(period_start(granularity, ts)?).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .filter(|&(_, count)| count >= required)
        .map(|(start, _)| start)
        .collect())
}

/// Compute streak statistics from an ascending list of completed period
/// starts.
///
/// Returns all zeros for an empty list. `current` is the run ending at the
/// latest completed period; `longest` is the maximum run anywhere in the
/// history. A single completed period is itself a streak of length 1.
pub fn streaks(granularity: Granularity, completed: &[TimestampMs]) -> Result<StreakSummary> {
    let total = completed.len() as u32;
    if total == 0 {
        return Ok(StreakSummary::default());
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in completed.windows(2) {
        if advance_period(granularity, pair[0], 1)? == pair[1] {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
    }

    // Walk backward from the latest period; the first gap ends the streak.
    let mut current = 1u32;
    for i in (0..completed.len() - 1).rev() {
        if advance_period(granularity, completed[i], 1)? == completed[i + 1] {
            current += 1;
        } else {
            break;
        }
    }

    // Invariant guard: the pairwise scan already covers the tail run.
    longest = longest.max(current);

    Ok(StreakSummary {
        current,
        longest,
        total,
    })
}

/// Streak summary for one habit from its full check-in history.
pub fn habit_streaks(
    policy: &FrequencyPolicy,
    timestamps: &[TimestampMs],
) -> Result<StreakSummary> {
    let completed = completed_periods(policy.granularity, policy.required_count, timestamps)?;
    streaks(policy.granularity, &completed)
}
