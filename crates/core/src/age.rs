//! Age arithmetic over calendar dates.
//!
//! All functions work on [`NaiveDate`], so time-of-day and daylight-saving
//! shifts never affect a result. "Today" is always passed in by the caller.

use chrono::{Datelike, NaiveDate};
use crate::profile::BabyProfile;

/// Date format used for every persisted date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DAYS_PER_YEAR: f64 = 365.25;
const DAYS_PER_MONTH: f64 = 30.44;

/// Parse a `YYYY-MM-DD` date. Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Whole calendar months from `birth` to `reference`.
///
/// A month only counts once the day-of-month has been reached again, so a
/// baby born Jan 15 is 1 month old on Mar 10 and 2 months old on Mar 15.
/// A reference date before the birth date yields 0.
pub fn months_between(birth: NaiveDate, reference: NaiveDate) -> u32 {
    if reference < birth {
        return 0;
    }

    let mut months = (reference.year() - birth.year()) * 12
        + (reference.month() as i32 - birth.month() as i32);

    if reference.day() < birth.day() {
        months -= 1;
    }

    months.max(0) as u32
}

/// [`months_between`] over persisted date strings; 0 if either fails to parse.
pub fn months_between_str(birth: &str, reference: &str) -> u32 {
    match (parse_date(birth), parse_date(reference)) {
        (Some(birth), Some(reference)) => months_between(birth, reference),
        _ => 0,
    }
}

/// Current age in whole months, 0 when the profile has no usable birth date.
pub fn chronological_age(profile: &BabyProfile, today: NaiveDate) -> u32 {
    profile
        .birth_date()
        .map(|birth| months_between(birth, today))
        .unwrap_or(0)
}

/// Whole days elapsed from `birth` to `today`, clamped at 0.
///
/// Day resolution is only meant for bounding date input; month ages always
/// come from [`months_between`].
pub fn elapsed_days(birth: NaiveDate, today: NaiveDate) -> u32 {
    let days = today.signed_duration_since(birth).num_days();
    days.max(0) as u32
}

/// Human summary such as `"1 year, 2 months old"` or `"3 days old"`.
///
/// Uses average year and month lengths over the elapsed days. Returns `None`
/// when the birth date lies after `today`.
pub fn describe_age(birth: NaiveDate, today: NaiveDate) -> Option<String> {
    if birth > today {
        return None;
    }

    let total_days = elapsed_days(birth, today) as f64;
    let years = (total_days / DAYS_PER_YEAR).floor();
    let remaining = total_days - (years * DAYS_PER_YEAR).floor();
    let months = (remaining / DAYS_PER_MONTH).floor();
    let days = (remaining - months * DAYS_PER_MONTH).floor();

    let (years, months, days) = (years as u32, months as u32, days as u32);

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(plural(years, "year"));
    }
    if months > 0 {
        parts.push(plural(months, "month"));
    }
    if days > 0 && years == 0 {
        parts.push(plural(days, "day"));
    }

    if parts.is_empty() {
        Some("Born today!".to_string())
    } else {
        Some(format!("{} old", parts.join(", ")))
    }
}

/// Format a month count: `"5 months"`, `"2 years"`, `"1y 3m"`.
pub fn format_months(months: u32) -> String {
    if months < 12 {
        return plural(months, "month");
    }

    let years = months / 12;
    let remaining = months % 12;
    if remaining == 0 {
        plural(years, "year")
    } else {
        format!("{}y {}m", years, remaining)
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
