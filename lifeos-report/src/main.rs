//! lifeos-report - LifeOS habit report CLI
//!
//! Loads a JSON snapshot of habits and check-ins, runs the streak and
//! completion-rate analytics, and prints a portfolio report.
//!
//! Snapshot format:
//!
//! ```json
//! {
//!   "habits": [
//!     {"id": "gym", "name": "Gym", "color": "#f97316",
//!      "policy": {"granularity": "week", "required_count": 3}}
//!   ],
//!   "check_ins": [
//!     {"habit_id": "gym", "at": 1704103200000}
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, TimeZone};
use clap::Parser;
use lifeos_core::{portfolio_report, DateRange, Habit, HabitCheckIn, PortfolioReport};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lifeos-report")]
#[command(about = "LifeOS habit streak and completion report")]
#[command(version)]
struct Args {
    /// Path to the habits/check-ins JSON snapshot
    #[arg(long)]
    input: PathBuf,

    /// Window start date (YYYY-MM-DD, default: first of current month)
    #[arg(long)]
    from: Option<String>,

    /// Window end date (YYYY-MM-DD, default: today)
    #[arg(long)]
    to: Option<String>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,
}

/// Caller-fetched snapshot of the habit store.
#[derive(Debug, Deserialize)]
struct Snapshot {
    habits: Vec<Habit>,
    #[serde(default)]
    check_ins: Vec<HabitCheckIn>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    lifeos_core::logging::init("warn");

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read snapshot {}", args.input.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw).context("failed to parse snapshot")?;

    let window = resolve_window(args.from.as_deref(), args.to.as_deref())?;
    let report = portfolio_report(&snapshot.habits, &snapshot.check_ins, window)
        .context("failed to compute portfolio report")?;

    match args.export.as_deref() {
        Some("json") => print_json(&report)?,
        Some("md") => print_markdown(&report),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&report),
    }

    Ok(())
}

/// Resolve the inclusive report window from optional YYYY-MM-DD bounds.
fn resolve_window(from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let today = Local::now().date_naive();

    let start_date = match from {
        Some(s) => parse_date(s)?,
        None => today.with_day(1).unwrap(),
    };
    let end_date = match to {
        Some(s) => parse_date(s)?,
        None => today,
    };

    let start = start_date
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .earliest()
        .with_context(|| format!("no valid local midnight on {}", start_date))?
        .timestamp_millis();
    let end = end_date
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap()
        .and_local_timezone(Local)
        .earliest()
        .with_context(|| format!("no valid local end-of-day on {}", end_date))?
        .timestamp_millis();

    Ok(DateRange { start, end })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}'. Use YYYY-MM-DD", s))
}

fn format_day(ts_ms: i64) -> String {
    match Local.timestamp_millis_opt(ts_ms).earliest() {
        Some(dt) => dt.format("%b %d").to_string(),
        None => "?".to_string(),
    }
}

fn print_terminal(report: &PortfolioReport) {
    println!();
    println!(
        "  Habit Report  {} – {}",
        format_day(report.window.start),
        format_day(report.window.end)
    );
    println!("  {}", "─".repeat(58));

    if report.habits.is_empty() {
        println!("  No habits in snapshot.");
        println!();
        return;
    }

    for habit in &report.habits {
        println!(
            "  {:<20} streak {:>3} (best {:>3})  {:>5.1}%  {}/{} check-ins",
            habit.name,
            habit.streaks.current,
            habit.streaks.longest,
            habit.completion_rate,
            habit.checkins_in_window,
            habit.expected_count,
        );
    }

    println!("  {}", "─".repeat(58));
    println!(
        "  Totals: {} check-ins over {} active day{}, longest streak {}",
        report.totals.total_checkins,
        report.totals.unique_days,
        if report.totals.unique_days == 1 { "" } else { "s" },
        report.totals.longest_streak,
    );
    println!();
}

fn print_markdown(report: &PortfolioReport) {
    println!(
        "# Habit Report: {} – {}",
        format_day(report.window.start),
        format_day(report.window.end)
    );
    println!();

    if report.habits.is_empty() {
        println!("*No habits in snapshot.*");
        return;
    }

    println!("| Habit | Current | Longest | Completed | Rate | In window |");
    println!("|-------|---------|---------|-----------|------|-----------|");
    for habit in &report.habits {
        println!(
            "| {} | {} | {} | {} | {:.1}% | {}/{} |",
            habit.name,
            habit.streaks.current,
            habit.streaks.longest,
            habit.streaks.total,
            habit.completion_rate,
            habit.checkins_in_window,
            habit.expected_count,
        );
    }
    println!();
    println!(
        "**Totals:** {} check-ins, {} active days, longest streak {}",
        report.totals.total_checkins, report.totals.unique_days, report.totals.longest_streak
    );
}

fn print_json(report: &PortfolioReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
