//! Date parsing collaborator for the time-range inputs.
//!
//! [`DateParser`] is the seam: the query builder only needs `text -> Option<timestamp>`.
//! [`NaturalDateParser`] is the implementation used by the application.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Turns user text into a UTC timestamp, or `None` if the text is not a date.
pub trait DateParser: Send + Sync {
    /// Parse `text`, or `None` when it is not a recognised date.
    fn parse(&self, text: &str) -> Option<DateTime<Utc>>;
}

impl<F> DateParser for F
where
    F: Fn(&str) -> Option<DateTime<Utc>> + Send + Sync,
{
    fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        self(text)
    }
}

/// Naive date-time layouts, tried in order. Interpreted as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts, tried in order. Midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%m/%d/%Y"];

/// Parser for the formats people actually type into a time-range box.
///
/// Accepts, after trimming and case-folding:
/// - RFC 3339 with an offset, normalized to UTC
/// - naive date-times and dates (see [`DATETIME_FORMATS`], [`DATE_FORMATS`]), read as UTC
/// - `now`, `today`, `yesterday`
/// - `N <unit> ago`, `N<unit>`, `-N<unit>` for seconds, minutes, hours, days, weeks
///
/// Results are truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDateParser {
    fixed_now: Option<DateTime<Utc>>,
}

impl NaturalDateParser {
    /// Parser using the wall clock for relative phrases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser whose notion of "now" is pinned (relative phrases become deterministic).
    pub fn with_now(now: DateTime<Utc>) -> Self {
        Self {
            fixed_now: Some(now),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    fn parse_absolute(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        // RFC 3339 requires an upper-case T/Z; accept what a user is likely to type too.
        let upper = text.to_ascii_uppercase();
        if let Ok(dt) = DateTime::parse_from_rfc3339(&upper.replacen(' ', "T", 1)) {
            return Some(dt.with_timezone(&Utc));
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&upper, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
                return Some(midnight(date));
            }
        }
        None
    }

    fn parse_relative(&self, text: &str) -> Option<DateTime<Utc>> {
        let now = self.now();
        match text {
            "now" => return Some(now),
            "today" => return Some(midnight(now.date_naive())),
            "yesterday" => return Some(midnight(now.date_naive()) - Duration::days(1)),
            _ => {}
        }

        let body = text.strip_suffix("ago").map(str::trim_end).unwrap_or(text);
        let body = body.strip_prefix('-').unwrap_or(body).trim_start();

        let split = body.find(|c: char| !c.is_ascii_digit())?;
        let (amount, unit) = body.split_at(split);
        let amount: i64 = amount.parse().ok()?;
        let offset = unit_duration(unit.trim(), amount)?;
        now.checked_sub_signed(offset)
    }
}

impl DateParser for NaturalDateParser {
    fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let lowered = text.to_lowercase();
        Self::parse_absolute(text)
            .or_else(|| self.parse_relative(&lowered))
            .map(truncate_to_seconds)
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn truncate_to_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(ts.timestamp(), 0).unwrap_or(ts)
}

fn unit_duration(unit: &str, amount: i64) -> Option<Duration> {
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Duration::try_seconds(amount),
        "m" | "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(amount),
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::try_hours(amount),
        "d" | "day" | "days" => Duration::try_days(amount),
        "w" | "week" | "weeks" => Duration::try_weeks(amount),
        _ => None,
    }
}
