// Time periods such as `1h10m5s`, `3m10.7s` or `1:10:05` to seconds.
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Time period is empty")]
    Empty,
    #[error("Invalid time period '{0}'")]
    Invalid(String),
}

static DESIGNATORS: OnceLock<Regex> = OnceLock::new();

/// Converts a time period to seconds.
///
/// Accepts a bare number of seconds, `h`/`m`/`s` designators in that order,
/// or a clock form with up to three colon separated parts.
///
/// # Example
/// ```
/// use devtools_core::datetime::period::time_period_to_seconds;
/// assert_eq!(time_period_to_seconds("1h10m5s")?, 4205.0);
/// assert_eq!(time_period_to_seconds("1:10:05")?, 4205.0);
/// # Ok::<(), devtools_core::datetime::period::PeriodError>(())
/// ```
pub fn time_period_to_seconds(input: &str) -> Result<f64, PeriodError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(PeriodError::Empty);
    }
    let invalid = || PeriodError::Invalid(text.to_string());

    if text.contains(':') {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }
        return parts.iter().try_fold(0.0, |total, part| {
            let value = number(part).ok_or_else(invalid)?;
            Ok(total * 60.0 + value)
        });
    }
    if let Some(value) = number(text) {
        return Ok(value);
    }

    let pattern = DESIGNATORS.get_or_init(|| {
        Regex::new(r"(?i)^(?:(\d+(?:\.\d+)?)h)?(?:(\d+(?:\.\d+)?)m)?(?:(\d+(?:\.\d+)?)s)?$")
            .expect("designator pattern compiles")
    });
    let caps = pattern.captures(text).ok_or_else(invalid)?;
    let mut total = 0.0;
    for (idx, factor) in [(1, 3600.0), (2, 60.0), (3, 1.0)] {
        if let Some(value) = caps.get(idx) {
            total += number(value.as_str()).ok_or_else(invalid)? * factor;
        }
    }
    Ok(total)
}

fn number(text: &str) -> Option<f64> {
    let digits = !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit() || ch == '.');
    digits.then(|| text.parse().ok()).flatten()
}
