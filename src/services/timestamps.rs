use crate::domain::errors::SyncError;
use crate::domain::models::Instant;
use chrono::{Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

const SECS_PER_MINUTE: f64 = 60.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_DAY: f64 = 86_400.0;

fn relative_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^([\d.]+)\s+(year|month|week|day|hour|minute|second)s?\s+ago\b")
            .expect("static pattern")
    })
}

fn absolute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\((\d{4}-\d{2}-\d{2} \d{1,2}:\d{2}\s?[AaPp][Mm])\)").expect("static pattern")
    })
}

/// Parses `"<n> <unit> ago"` relative to `now`.
///
/// Returns `None` when the text is not a relative phrase; callers try
/// several fields and keep the first hit. Year, month and week ages are
/// rounded up to whole days; smaller units keep their fractional part.
pub fn parse_relative_at(text: &str, now: Instant) -> Option<Instant> {
    let caps = relative_re().captures(text.trim())?;
    let value: f64 = caps[1].parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let unit = caps[2].to_ascii_lowercase();
    let age = match unit.as_str() {
        "year" => TimeDelta::try_days(ceil_days(value, 366.0)?)?,
        "month" => TimeDelta::try_days(ceil_days(value, 31.0)?)?,
        "week" => TimeDelta::try_days(ceil_days(value, 7.0)?)?,
        "day" => exact(value, SECS_PER_DAY)?,
        "hour" => exact(value, SECS_PER_HOUR)?,
        "minute" => exact(value, SECS_PER_MINUTE)?,
        _ => exact(value, 1.0)?,
    };
    now.checked_sub_signed(age)
}

fn ceil_days(value: f64, days_per_unit: f64) -> Option<i64> {
    let days = (value * days_per_unit).ceil();
    (days <= i64::MAX as f64).then_some(days as i64)
}

fn exact(value: f64, secs_per_unit: f64) -> Option<TimeDelta> {
    let secs = value * secs_per_unit;
    let nanos = (secs * 1e9).round();
    if nanos < i64::MAX as f64 {
        return Some(TimeDelta::nanoseconds(nanos as i64));
    }
    let millis = (secs * 1e3).round();
    if millis >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

/// Parses an absolute `(YYYY-MM-DD h:mmAM)` timestamp embedded in `text`.
///
/// The site renders these in its local wall-clock time; they are read in the
/// local zone and never allowed past the current instant.
pub fn parse_absolute_at(text: &str, now: Instant) -> Result<Instant, SyncError> {
    let caps = absolute_re()
        .captures(text)
        .ok_or_else(|| SyncError::Format(text.trim().to_string()))?;
    let raw = &caps[1];
    let compact = compact_meridiem(raw);
    let naive = NaiveDateTime::parse_from_str(&compact, "%Y-%m-%d %I:%M%p")
        .map_err(|e| SyncError::Format(format!("{}: {}", raw, e)))?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| SyncError::Format(format!("{}: not a valid local time", raw)))?;
    Ok(local.with_timezone(&Utc).min(now))
}

fn compact_meridiem(raw: &str) -> String {
    let trimmed = raw.trim();
    let split = trimmed.len().saturating_sub(2);
    let (head, meridiem) = trimmed.split_at(split);
    format!("{}{}", head.trim_end(), meridiem.to_ascii_uppercase())
}

/// Tries every known timestamp notation in turn: relative phrases first,
/// then parenthesized absolute dates.
pub fn parse_timestamp_at(text: &str, now: Instant) -> Option<Instant> {
    parse_relative_at(text, now).or_else(|| parse_absolute_at(text, now).ok())
}
