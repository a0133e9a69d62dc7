//! Portfolio aggregation across a habit roster.
//!
//! Runs the per-habit streak primitive once per roster entry and folds the
//! results into portfolio totals. Streaks are a property of a habit's full
//! history; the query window scopes only the expected-vs-actual completion
//! rate and the roll-up check-in totals.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::period::{period_start, periods_in_range};
use crate::streak::habit_streaks;
use crate::types::{DateRange, Granularity, Habit, HabitCheckIn, StreakSummary, TimestampMs};

/// Per-habit entry of a portfolio report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitReport {
    /// Pass-through identity fields from the roster entry
    pub habit_id: String,
    pub name: String,
    pub color: Option<String>,
    /// All-time streak statistics
    pub streaks: StreakSummary,
    /// Check-ins that fell inside the query window
    pub checkins_in_window: u64,
    /// required_count × periods overlapping the window
    pub expected_count: u64,
    /// Window check-ins over expected, as a percentage capped at 100
    pub completion_rate: f64,
}

/// Roll-up totals across the roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// All check-ins in the window, across every habit
    pub total_checkins: u64,
    /// Distinct local calendar days with at least one check-in in the
    /// window (day granularity regardless of any habit's own policy)
    pub unique_days: u64,
    /// Maximum all-time longest streak across the roster
    pub longest_streak: u32,
}

/// Aggregated report for a habit roster over a query window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub window: DateRange,
    pub totals: PortfolioTotals,
    pub habits: Vec<HabitReport>,
}

/// Build a portfolio report for `habits` from a flat list of check-ins.
///
/// Check-ins are partitioned by habit id; each habit's streaks are computed
/// against all of its check-ins so that "current" reflects continuity
/// outside the window, while `checkins_in_window`, `expected_count`,
/// `completion_rate`, and the totals honor the inclusive window. Check-ins
/// tagged with an id missing from the roster are ignored.
pub fn portfolio_report(
    habits: &[Habit],
    checkins: &[HabitCheckIn],
    window: DateRange,
) -> Result<PortfolioReport> {
    let mut by_habit: HashMap<&str, Vec<TimestampMs>> = HashMap::new();
    for checkin in checkins {
        by_habit
            .entry(checkin.habit_id.as_str())
            .or_default()
            .push(checkin.at);
    }

    let mut totals = PortfolioTotals::default();
    let mut active_days: HashSet<TimestampMs> = HashSet::new();
    let mut reports = Vec::with_capacity(habits.len());

    for habit in habits {
        let history: &[TimestampMs] = by_habit
            .get(habit.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let streaks = habit_streaks(&habit.policy, history)?;

        let mut checkins_in_window = 0u64;
        for &ts in history {
            if window.contains(ts) {
                checkins_in_window += 1;
                active_days.insert(period_start(Granularity::Day, ts)?);
            }
        }

        let window_periods =
            periods_in_range(habit.policy.granularity, window.start, window.end)?;
        let expected_count = u64::from(habit.policy.required()) * window_periods.max(0) as u64;
        let completion_rate = if expected_count > 0 {
            (checkins_in_window as f64 / expected_count as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        totals.total_checkins += checkins_in_window;
        totals.longest_streak = totals.longest_streak.max(streaks.longest);

        reports.push(HabitReport {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            color: habit.color.clone(),
            streaks,
            checkins_in_window,
            expected_count,
            completion_rate,
        });
    }

    totals.unique_days = active_days.len() as u64;

    tracing::debug!(
        habits = habits.len(),
        total_checkins = totals.total_checkins,
        unique_days = totals.unique_days,
        longest_streak = totals.longest_streak,
        "portfolio report computed"
    );

    Ok(PortfolioReport {
        window,
        totals,
        habits: reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrequencyPolicy;
    use chrono::{Local, TimeZone};

    fn ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .earliest()
            .unwrap()
            .timestamp_millis()
    }

    fn habit(id: &str, granularity: Granularity, required_count: u32) -> Habit {
        Habit {
            id: id.to_string(),
            name: id.to_string(),
            color: None,
            policy: FrequencyPolicy {
                granularity,
                required_count,
            },
        }
    }

    fn checkin(id: &str, at: i64) -> HabitCheckIn {
        HabitCheckIn {
            habit_id: id.to_string(),
            at,
        }
    }

    // Week of Monday 2024-01-01 through Sunday 2024-01-07
    fn january_week() -> DateRange {
        DateRange {
            start: ms(2024, 1, 1, 0),
            end: ms(2024, 1, 7, 23),
        }
    }

    #[test]
    fn test_empty_roster() {
        let report = portfolio_report(&[], &[], january_week()).unwrap();
        assert_eq!(report.totals.total_checkins, 0);
        assert_eq!(report.totals.unique_days, 0);
        assert_eq!(report.totals.longest_streak, 0);
        assert!(report.habits.is_empty());
    }

    #[test]
    fn test_roster_habit_without_checkins() {
        let habits = vec![habit("idle", Granularity::Day, 1)];
        let report = portfolio_report(&habits, &[], january_week()).unwrap();
        assert_eq!(report.habits.len(), 1);
        assert_eq!(report.habits[0].streaks, StreakSummary::default());
        assert_eq!(report.habits[0].expected_count, 7);
        assert_eq!(report.habits[0].completion_rate, 0.0);
    }

    #[test]
    fn test_two_habit_window_rates() {
        // Daily habit with 5 check-ins in a 7-day window, weekly habit
        // needing 2 check-ins with only 1
        let habits = vec![
            habit("x", Granularity::Day, 1),
            habit("y", Granularity::Week, 2),
        ];
        let checkins = vec![
            checkin("x", ms(2024, 1, 1, 12)),
            checkin("x", ms(2024, 1, 2, 12)),
            checkin("x", ms(2024, 1, 3, 12)),
            checkin("x", ms(2024, 1, 5, 12)),
            checkin("x", ms(2024, 1, 6, 12)),
            checkin("y", ms(2024, 1, 3, 18)),
        ];
        let report = portfolio_report(&habits, &checkins, january_week()).unwrap();

        let x = &report.habits[0];
        assert_eq!(x.expected_count, 7);
        assert!((x.completion_rate - 500.0 / 7.0).abs() < 1e-9);
        assert_eq!(x.checkins_in_window, 5);
        assert_eq!(x.streaks.longest, 3);
        assert_eq!(x.streaks.current, 2);

        let y = &report.habits[1];
        assert_eq!(y.expected_count, 2);
        assert_eq!(y.completion_rate, 50.0);
        // One check-in against a two-per-week policy completes nothing
        assert_eq!(y.streaks, StreakSummary::default());

        assert_eq!(report.totals.total_checkins, 6);
        // Days 1,2,3,5,6 (the Jan 3 check-ins share a day)
        assert_eq!(report.totals.unique_days, 5);
        assert_eq!(report.totals.longest_streak, 3);
    }

    #[test]
    fn test_streaks_see_history_outside_window() {
        // Check-ins run Dec 30 .. Jan 2; window covers only Jan 1-7.
        let habits = vec![habit("x", Granularity::Day, 1)];
        let checkins = vec![
            checkin("x", ms(2023, 12, 30, 9)),
            checkin("x", ms(2023, 12, 31, 9)),
            checkin("x", ms(2024, 1, 1, 9)),
            checkin("x", ms(2024, 1, 2, 9)),
        ];
        let report = portfolio_report(&habits, &checkins, january_week()).unwrap();

        let x = &report.habits[0];
        // Streak continuity crosses the window edge
        assert_eq!(x.streaks.current, 4);
        assert_eq!(x.streaks.longest, 4);
        // But only the in-window check-ins count toward the rate
        assert_eq!(x.checkins_in_window, 2);
        assert_eq!(report.totals.total_checkins, 2);
        assert_eq!(report.totals.unique_days, 2);
    }

    #[test]
    fn test_completion_rate_capped_at_100() {
        let habits = vec![habit("x", Granularity::Day, 1)];
        // Two check-ins on each of 7 days: 14 actual vs 7 expected
        let mut checkins = Vec::new();
        for d in 1..=7 {
            checkins.push(checkin("x", ms(2024, 1, d, 8)));
            checkins.push(checkin("x", ms(2024, 1, d, 20)));
        }
        let report = portfolio_report(&habits, &checkins, january_week()).unwrap();
        assert_eq!(report.habits[0].completion_rate, 100.0);
    }

    #[test]
    fn test_unknown_habit_ids_ignored() {
        let habits = vec![habit("x", Granularity::Day, 1)];
        let checkins = vec![
            checkin("x", ms(2024, 1, 2, 9)),
            checkin("ghost", ms(2024, 1, 2, 9)),
        ];
        let report = portfolio_report(&habits, &checkins, january_week()).unwrap();
        assert_eq!(report.totals.total_checkins, 1);
        assert_eq!(report.totals.unique_days, 1);
    }

    #[test]
    fn test_inverted_window_zero_expected() {
        let habits = vec![habit("x", Granularity::Day, 1)];
        let window = DateRange {
            start: ms(2024, 1, 7, 0),
            end: ms(2024, 1, 1, 0),
        };
        let report = portfolio_report(&habits, &[], window).unwrap();
        assert_eq!(report.habits[0].expected_count, 0);
        assert_eq!(report.habits[0].completion_rate, 0.0);
    }
}
