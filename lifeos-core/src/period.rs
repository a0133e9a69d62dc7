//! Calendar-aware period boundary arithmetic.
//!
//! A period is a half-open `[start, next_start)` interval in the local
//! calendar: midnight-to-midnight for days, Monday-to-Monday for weeks
//! (ISO-style week start), and 1st-to-1st for months. All arithmetic moves
//! through calendar dates rather than fixed millisecond deltas, so a
//! 23- or 25-hour DST day and a 28- or 31-day month advance by exactly one
//! period like any other.

use chrono::{Datelike, Days, Local, LocalResult, Months, NaiveDate, TimeZone};

use crate::error::{Error, Result};
use crate::types::{Granularity, TimestampMs};

/// Local calendar date containing an epoch-millisecond instant.
fn local_date(ts_ms: TimestampMs) -> Result<NaiveDate> {
    match Local.timestamp_millis_opt(ts_ms) {
        LocalResult::Single(dt) => Ok(dt.date_naive()),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.date_naive()),
        LocalResult::None => Err(Error::TimestampOutOfRange(ts_ms)),
    }
}

/// Epoch milliseconds of local midnight on `date`.
///
/// If a DST jump skips midnight in the local zone, the period anchors at
/// the earliest valid instant of that calendar day instead. Anchors stay
/// comparable because every caller derives them the same way.
fn local_midnight_ms(date: NaiveDate) -> Result<TimestampMs> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    match midnight.and_local_timezone(Local) {
        LocalResult::Single(dt) => Ok(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.timestamp_millis()),
        LocalResult::None => date
            .and_hms_opt(1, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .ok_or(Error::PeriodOverflow(date)),
    }
}

/// Canonical start instant of the period containing `ts_ms`.
///
/// - day: local midnight
/// - week: local midnight of the most recent Monday
/// - month: local midnight of the 1st of the month
pub fn period_start(granularity: Granularity, ts_ms: TimestampMs) -> Result<TimestampMs> {
    let date = local_date(ts_ms)?;
    let anchor = match granularity {
        Granularity::Day => date,
        Granularity::Week => date
            .checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64))
            .ok_or(Error::PeriodOverflow(date))?,
        Granularity::Month => date.with_day(1).unwrap(),
    };
    local_midnight_ms(anchor)
}

/// Start instant of the period `count` periods after the one starting at
/// `period_start_ms`.
///
/// Month advancement lands on the 1st of the target month regardless of
/// the originating month's length; no end-of-month clamping is involved
/// because period anchors always carry day-of-month 1.
pub fn advance_period(
    granularity: Granularity,
    period_start_ms: TimestampMs,
    count: u32,
) -> Result<TimestampMs> {
    let date = local_date(period_start_ms)?;
    let advanced = match granularity {
        Granularity::Day => date.checked_add_days(Days::new(count as u64)),
        Granularity::Week => date.checked_add_days(Days::new(7 * count as u64)),
        Granularity::Month => date.checked_add_months(Months::new(count)),
    }
    .ok_or(Error::PeriodOverflow(date))?;
    local_midnight_ms(advanced)
}

/// Number of periods overlapping the inclusive window `[start_ms, end_ms]`.
///
/// Used for expected-count math: day = inclusive day-span length, week =
/// `ceil(day_span / 7)`, month = difference of year×12+month indices plus
/// one. An inverted window counts zero periods.
pub fn periods_in_range(
    granularity: Granularity,
    start_ms: TimestampMs,
    end_ms: TimestampMs,
) -> Result<i64> {
    let start = local_date(start_ms)?;
    let end = local_date(end_ms)?;
    if end < start {
        return Ok(0);
    }
    let day_span = (end - start).num_days() + 1;
    Ok(match granularity {
        Granularity::Day => day_span,
        Granularity::Week => (day_span + 6) / 7,
        Granularity::Month => {
            let start_index = start.year() as i64 * 12 + start.month() as i64;
            let end_index = end.year() as i64 * 12 + end.month() as i64;
            end_index - start_index + 1
        }
    })
}
