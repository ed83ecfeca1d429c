//! Natural-language date and duration parsing.
//!
//! Inputs are classified by a fixed list of rules, first match wins:
//! `today`/`now`, epoch seconds or milliseconds, relative offsets
//! (`8h ago`, `2d after`), wall clock times in a city (`10pm in Paris`),
//! bare durations (`5m`), unit conversions (`5m to s`) and finally a handful
//! of common calendar formats.

pub mod period;

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

/// Order in which abbreviations are prefix-matched.
const PREFIX_ORDER: [TimeUnit; 6] = [
    TimeUnit::Seconds,
    TimeUnit::Minutes,
    TimeUnit::Hours,
    TimeUnit::Days,
    TimeUnit::Weeks,
    TimeUnit::Milliseconds,
];

impl TimeUnit {
    /// Length of one unit in milliseconds.
    pub fn millis(self) -> f64 {
        match self {
            TimeUnit::Milliseconds => 1.0,
            TimeUnit::Seconds => 1_000.0,
            TimeUnit::Minutes => 60_000.0,
            TimeUnit::Hours => 3_600_000.0,
            TimeUnit::Days => 86_400_000.0,
            TimeUnit::Weeks => 604_800_000.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DateParseResult {
    PointInTime {
        date_time: DateTime<Utc>,
    },
    Duration {
        count: f64,
        unit: TimeUnit,
    },
    UnitConversion {
        in_count: f64,
        in_unit: TimeUnit,
        out_count: f64,
        out_unit: TimeUnit,
    },
}

/// Resolves a unit spelling (`ms`, `hrs`, `min`, `weeks`, ...) to a [`TimeUnit`].
///
/// A lone `m` always means minutes.
///
/// # Example
/// ```
/// use devtools_core::datetime::{TimeUnit, normalize_unit};
/// assert_eq!(normalize_unit("m"), Some(TimeUnit::Minutes));
/// assert_eq!(normalize_unit("Hrs"), Some(TimeUnit::Hours));
/// assert_eq!(normalize_unit("mil"), Some(TimeUnit::Milliseconds));
/// assert_eq!(normalize_unit("months"), None);
/// ```
pub fn normalize_unit(text: &str) -> Option<TimeUnit> {
    let text = text.trim().to_lowercase();
    let irregular = match text.as_str() {
        "" => return None,
        "ms" => Some(TimeUnit::Milliseconds),
        "secs" => Some(TimeUnit::Seconds),
        "m" | "mins" => Some(TimeUnit::Minutes),
        "hs" | "hr" | "hrs" => Some(TimeUnit::Hours),
        "ds" => Some(TimeUnit::Days),
        "ws" | "wk" | "wks" => Some(TimeUnit::Weeks),
        _ => None,
    };
    irregular.or_else(|| {
        PREFIX_ORDER
            .into_iter()
            .find(|unit| unit.name().starts_with(text.as_str()))
    })
}

/// Parses `input` relative to the current instant.
pub fn parse_date(input: &str) -> Option<DateParseResult> {
    parse_date_at(input, Utc::now())
}

/// Parses `input` relative to `now`.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use devtools_core::datetime::{DateParseResult, TimeUnit, parse_date_at};
/// let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
/// assert_eq!(
///     parse_date_at("8h ago", now),
///     Some(DateParseResult::PointInTime { date_time: Utc.with_ymd_and_hms(2024, 7, 1, 4, 0, 0).unwrap() })
/// );
/// assert_eq!(
///     parse_date_at("5m to s", now),
///     Some(DateParseResult::UnitConversion {
///         in_count: 5.0,
///         in_unit: TimeUnit::Minutes,
///         out_count: 300.0,
///         out_unit: TimeUnit::Seconds,
///     })
/// );
/// ```
pub fn parse_date_at(input: &str, now: DateTime<Utc>) -> Option<DateParseResult> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let lower = input.to_lowercase();
    let point = |date_time| Some(DateParseResult::PointInTime { date_time });

    if lower == "today" || lower == "now" {
        return point(now);
    }
    if let Some(date_time) = epoch(input) {
        tracing::debug!(input, "parsed epoch timestamp");
        return point(date_time);
    }

    let patterns = patterns();
    if let Some(caps) = patterns.relative.captures(&lower) {
        if let Some(date_time) = relative(&caps[1], &caps[2], &caps[3], now) {
            tracing::debug!(input, "parsed relative offset");
            return point(date_time);
        }
    }
    if let Some(caps) = patterns.zoned.captures(&lower) {
        let minute = caps.get(2).map_or("0", |m| m.as_str());
        let meridian = caps.get(3).map(|m| m.as_str());
        if let Some(date_time) = zoned(&caps[1], minute, meridian, &caps[4], now) {
            tracing::debug!(input, "parsed wall clock in city");
            return point(date_time);
        }
    }
    if let Some(caps) = patterns.duration.captures(&lower) {
        if let (Ok(count), Some(unit)) = (caps[1].parse::<f64>(), normalize_unit(&caps[2])) {
            return Some(DateParseResult::Duration { count, unit });
        }
    }
    if let Some(caps) = patterns.conversion.captures(&lower) {
        let in_count = caps[1].parse::<f64>().ok();
        let units = normalize_unit(&caps[2]).zip(normalize_unit(&caps[3]));
        if let (Some(in_count), Some((in_unit, out_unit))) = (in_count, units) {
            return Some(DateParseResult::UnitConversion {
                in_count,
                in_unit,
                out_count: in_count * in_unit.millis() / out_unit.millis(),
                out_unit,
            });
        }
    }

    let parsed = calendar(input);
    if parsed.is_none() {
        tracing::debug!(input, "no date rule matched");
    }
    parsed.and_then(point)
}

struct Patterns {
    relative: Regex,
    zoned: Regex,
    duration: Regex,
    conversion: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();
static CITY_TO_ZONE: OnceLock<HashMap<String, Tz>> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        relative: Regex::new(r"^(\d+)\s*(h|hours?|d|days?|w|weeks?)\s+(ago|later|after)$")
            .expect("relative pattern compiles"),
        zoned: Regex::new(r"^(\d\d?)(?::(\d\d))?(?:\s*([ap]m))?\s*in\s*([a-z_\s]+)$")
            .expect("zoned pattern compiles"),
        duration: Regex::new(r"^(\d+(?:\.\d+)?)\s*([a-z]+)$").expect("duration pattern compiles"),
        conversion: Regex::new(r"^(\d+(?:\.\d+)?)\s*([a-z]+)\s+to\s+([a-z]+)$")
            .expect("conversion pattern compiles"),
    })
}

/// Zones keyed by their city segment, e.g. `newyork` -> `America/New_York`.
fn city_to_zone() -> &'static HashMap<String, Tz> {
    CITY_TO_ZONE.get_or_init(|| {
        let mut zones = HashMap::new();
        for zone in chrono_tz::TZ_VARIANTS {
            if let Some(city) = zone.name().split('/').nth(1) {
                zones.insert(city_key(city), zone);
            }
        }
        zones
    })
}

fn city_key(city: &str) -> String {
    city.chars()
        .filter(|ch| *ch != '_' && !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn epoch(input: &str) -> Option<DateTime<Utc>> {
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = input.parse().ok()?;
    match input.len() {
        10 => Utc.timestamp_opt(value, 0).single(),
        13 => Utc.timestamp_millis_opt(value).single(),
        _ => None,
    }
}

fn relative(count: &str, unit: &str, direction: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let count: i64 = count.parse().ok()?;
    let count = if direction == "ago" { -count } else { count };
    let delta = match unit.as_bytes().first()? {
        b'w' => TimeDelta::try_weeks(count)?,
        b'd' => TimeDelta::try_days(count)?,
        _ => TimeDelta::try_hours(count)?,
    };
    now.checked_add_signed(delta)
}

/// Wall clock time today in the zone named by `city`, as a UTC instant.
fn zoned(
    hour: &str,
    minute: &str,
    meridian: Option<&str>,
    city: &str,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let Some(zone) = city_to_zone().get(&city_key(city)) else {
        tracing::debug!(city, "unknown city");
        return None;
    };
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    let hour = match meridian {
        Some(_) if !(1..=12).contains(&hour) => return None,
        Some("pm") => hour % 12 + 12,
        Some(_) => hour % 12,
        None => hour,
    };
    let wall_clock = now.date_naive().and_hms_opt(hour, minute, 0)?;
    let offset = zone
        .offset_from_utc_datetime(&now.naive_utc())
        .fix()
        .local_minus_utc();
    wall_clock
        .and_utc()
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset)))
}

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%B %d %Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%A, %d %B %Y",
    "%A %B %d %Y",
];

/// Common calendar spellings; naive times are read as UTC.
fn calendar(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Some(date_time.with_timezone(&Utc));
    }
    if let Ok(date_time) = DateTime::parse_from_rfc2822(input) {
        return Some(date_time.with_timezone(&Utc));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
}
