//! Cron expression describer.
//!
//! Accepts the standard five-field syntax, Go's six-field syntax (leading
//! seconds) and the seven-field Quartz/Oracle syntax (trailing year), and
//! produces one English inference per axis: time of day, days, month and,
//! when present, year. Each axis reports its own error so a broken month
//! field never hides the weekday description.

use serde::Serialize;
use thiserror::Error;

use crate::english::{concatenate_english, ordinal};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTH_SHORTS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const WEEKDAY_SHORTS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronError {
    #[error("Invalid weekday range '{0}'")]
    InvalidWeekdayRange(String),
    #[error("Invalid weekday spec '{0}'")]
    InvalidWeekdaySpec(String),
    #[error("Invalid month range '{0}'")]
    InvalidMonthRange(String),
    #[error("Invalid month spec '{0}'")]
    InvalidMonthSpec(String),
    #[error("Invalid minute '{0}'")]
    InvalidMinute(String),
    #[error("Invalid hour '{0}'")]
    InvalidHour(String),
    #[error("Expected 5 to 7 fields, got {0}")]
    FieldCount(usize),
}

/// One line of the description, serialized as `{"message": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Inference {
    Message(String),
    Error(String),
}

impl Inference {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(text) => Some(text),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Message(_) => None,
            Self::Error(text) => Some(text),
        }
    }
}

impl<T: Into<String>> From<Result<T, CronError>> for Inference {
    fn from(result: Result<T, CronError>) -> Self {
        match result {
            Ok(text) => Self::Message(text.into()),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

/// Describes a cron expression, one inference per axis.
///
/// # Example
/// ```
/// use devtools_core::cron::{infer, Inference};
/// let lines = infer("0 6 2,3,4 * *");
/// assert_eq!(lines[0], Inference::Message("At 6:00 AM".into()));
/// assert_eq!(lines[1], Inference::Message("Dated: 2nd, 3rd, and 4th".into()));
/// assert_eq!(lines[2], Inference::Message("Every month".into()));
/// ```
pub fn infer(expression: &str) -> Vec<Inference> {
    let mut fields: Vec<&str> = expression.split_whitespace().collect();
    if !(5..=7).contains(&fields.len()) {
        return vec![Inference::from(Err::<String, _>(CronError::FieldCount(
            fields.len(),
        )))];
    }

    let year = (fields.len() == 7).then(|| fields.remove(6));
    if fields.len() == 6 {
        // Seconds do not change the description.
        fields.remove(0);
    }
    let [minute, hour, day_of_month, month, day_of_week] = fields[..] else {
        return vec![Inference::from(Err::<String, _>(CronError::FieldCount(
            fields.len(),
        )))];
    };

    let mut inferences = vec![
        Inference::from(describe_time(minute, hour)),
        Inference::from(describe_days(day_of_month, day_of_week)),
        Inference::from(describe_months(month)),
    ];
    if let Some(year) = year.filter(|year| !is_wildcard(year)) {
        inferences.push(Inference::Message(describe_years(year)));
    }
    inferences
}

/// Resolves a day-of-week field into weekday names, expanding ranges.
///
/// # Example
/// ```
/// use devtools_core::cron::compute_effective_weekdays_from_spec;
/// let days = compute_effective_weekdays_from_spec("TUE-THU")?;
/// assert_eq!(days, ["Tuesday", "Wednesday", "Thursday"]);
/// assert!(compute_effective_weekdays_from_spec("THU-MON").unwrap_err().to_string().contains("THU-MON"));
/// # Ok::<(), devtools_core::cron::CronError>(())
/// ```
pub fn compute_effective_weekdays_from_spec(day_of_week: &str) -> Result<Vec<String>, CronError> {
    Ok(weekday_indices(day_of_week)?
        .into_iter()
        .map(|idx| WEEKDAYS[idx].to_string())
        .collect())
}

/// Resolves a month field into month names; ranges stay as `March to May`.
pub fn compute_effective_months_from_spec(month: &str) -> Result<Vec<String>, CronError> {
    let mut months = Vec::new();
    for token in month.split(',') {
        let token = token.trim();
        if let Some(idx) = month_index(token) {
            months.push(MONTHS[idx].to_string());
        } else if let Some((start, end)) = split_range(token) {
            let (Some(start), Some(end)) = (month_index(start), month_index(end)) else {
                return Err(CronError::InvalidMonthSpec(token.to_string()));
            };
            if start > end {
                return Err(CronError::InvalidMonthRange(token.to_string()));
            }
            months.push(format!("{} to {}", MONTHS[start], MONTHS[end]));
        } else {
            return Err(CronError::InvalidMonthSpec(token.to_string()));
        }
    }
    Ok(months)
}

fn weekday_indices(day_of_week: &str) -> Result<Vec<usize>, CronError> {
    let mut days = Vec::new();
    for token in day_of_week.split(',') {
        let token = token.trim();
        if let Some(idx) = weekday_index(token) {
            days.push(idx);
        } else if let Some((start, end)) = split_range(token) {
            let (Some(start), Some(end)) = (weekday_index(start), weekday_index(end)) else {
                return Err(CronError::InvalidWeekdaySpec(token.to_string()));
            };
            if start > end {
                return Err(CronError::InvalidWeekdayRange(token.to_string()));
            }
            days.extend(start..=end);
        } else {
            return Err(CronError::InvalidWeekdaySpec(token.to_string()));
        }
    }
    Ok(days)
}

fn weekday_index(token: &str) -> Option<usize> {
    if is_number(token) {
        return token.parse::<usize>().ok().filter(|idx| *idx < WEEKDAYS.len());
    }
    short_name_index(&WEEKDAY_SHORTS, token)
}

fn month_index(token: &str) -> Option<usize> {
    if is_number(token) {
        return token
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=MONTHS.len()).contains(n))
            .map(|n| n - 1);
    }
    short_name_index(&MONTH_SHORTS, token)
}

fn short_name_index(names: &[&str], token: &str) -> Option<usize> {
    names
        .iter()
        .position(|name| name.eq_ignore_ascii_case(token))
}

/// Splits `start-end` when both sides are numbers or both are names.
fn split_range(token: &str) -> Option<(&str, &str)> {
    let (start, end) = token.split_once('-')?;
    let numeric = is_number(start) && is_number(end);
    let named = is_name(start) && is_name(end);
    (numeric || named).then_some((start, end))
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_name(token: &str) -> bool {
    token.len() == 3 && token.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_wildcard(field: &str) -> bool {
    field == "*" || field == "?"
}

/// Minute or hour field after validation.
#[derive(Debug)]
enum TimeField {
    Any,
    At(u32),
    Range(u32, u32),
    Every { start: u32, step: u32 },
    /// Lists and stepped ranges, expanded, sorted and deduplicated.
    Values(Vec<u32>),
}

impl TimeField {
    /// `*`, `N`, `A-B`, `*/S`, `N/S`, or a comma list of those where ranges
    /// may also carry a step.
    fn parse(field: &str, max: u32) -> Option<Self> {
        if field == "*" {
            return Some(TimeField::Any);
        }
        if !field.contains(',') {
            if let Some(value) = parse_bounded(field, max) {
                return Some(TimeField::At(value));
            }
            if let Some((start, end)) = split_range(field) {
                let start = parse_bounded(start, max)?;
                let end = parse_bounded(end, max)?;
                return (start <= end).then_some(TimeField::Range(start, end));
            }
            if let Some((start, step)) = field.split_once('/') {
                if start == "*" || is_number(start) {
                    let start = if start == "*" { 0 } else { parse_bounded(start, max)? };
                    let step = parse_step(step, max)?;
                    return Some(TimeField::Every { start, step });
                }
            }
        }
        let mut values = Vec::new();
        for item in field.split(',') {
            values.extend(expand_item(item, max)?);
        }
        values.sort_unstable();
        values.dedup();
        Some(TimeField::Values(values))
    }

    /// The field as explicit values when it names only a few.
    fn points(&self) -> Option<Vec<u32>> {
        match self {
            TimeField::At(value) => Some(vec![*value]),
            TimeField::Values(values) => Some(values.clone()),
            _ => None,
        }
    }
}

fn parse_step(step: &str, max: u32) -> Option<u32> {
    parse_bounded(step, max).filter(|step| *step > 0)
}

fn expand_item(item: &str, max: u32) -> Option<Vec<u32>> {
    let (base, step) = match item.split_once('/') {
        Some((base, step)) => (base, Some(parse_step(step, max)?)),
        None => (item, None),
    };
    let (start, end) = if base == "*" {
        (0, max)
    } else if let Some((start, end)) = split_range(base) {
        (parse_bounded(start, max)?, parse_bounded(end, max)?)
    } else {
        let start = parse_bounded(base, max)?;
        (start, if step.is_some() { max } else { start })
    };
    if start > end {
        return None;
    }
    let step = step.unwrap_or(1) as usize;
    Some((start..=end).step_by(step).collect())
}

fn parse_bounded(token: &str, max: u32) -> Option<u32> {
    if !is_number(token) {
        return None;
    }
    token.parse::<u32>().ok().filter(|value| *value <= max)
}

fn describe_time(minute: &str, hour: &str) -> Result<String, CronError> {
    let minute =
        TimeField::parse(minute, 59).ok_or_else(|| CronError::InvalidMinute(minute.to_string()))?;
    let hour = TimeField::parse(hour, 23).ok_or_else(|| CronError::InvalidHour(hour.to_string()))?;

    if let (Some(hours), Some(minutes)) = (hour.points(), minute.points()) {
        let times: Vec<String> = hours
            .iter()
            .flat_map(|hour| minutes.iter().map(move |minute| render_time(*hour, *minute)))
            .collect();
        return Ok(format!("At {}", concatenate_english(&times)));
    }
    Ok(match (hour, minute) {
        (TimeField::Any, TimeField::At(minute)) => format!("Every hour, at *:{minute:02}"),
        (TimeField::Any, TimeField::Values(minutes)) => {
            format!("Every hour, at {}", past_the_hour(&minutes))
        }
        (TimeField::Any, minute) => minute_phrase(&minute),
        (TimeField::At(hour), TimeField::Any) => format!(
            "Every minute, from {} to {}",
            render_time(hour, 0),
            render_time(hour, 59)
        ),
        (TimeField::At(hour), TimeField::Range(start, end)) => format!(
            "Every minute, from {} to {}",
            render_time(hour, start),
            render_time(hour, end)
        ),
        (TimeField::At(hour), TimeField::Every { start, step }) => {
            let last = start + (59 - start) / step * step;
            format!(
                "Every {step} minutes, from {} to {}",
                render_time(hour, start),
                render_time(hour, last)
            )
        }
        (TimeField::Range(first, last), TimeField::At(minute)) => format!(
            "Every hour, at *:{minute:02}, from {} to {}",
            render_time(first, minute),
            render_time(last, minute)
        ),
        (TimeField::Every { start, step }, TimeField::At(minute)) => {
            let mut message = format!("Every {step} hours, at *:{minute:02}");
            if start > 0 {
                message.push_str(&format!(", starting at {}", render_time(start, minute)));
            }
            message
        }
        (hour, minute) => format!("{}, {}", minute_phrase(&minute), hour_phrase(&hour)),
    })
}

/// What happens within each matching hour.
fn minute_phrase(minute: &TimeField) -> String {
    match minute {
        TimeField::Any => "Every minute".to_string(),
        TimeField::At(minute) => format!("At *:{minute:02}"),
        TimeField::Range(start, end) => format!("Every minute, from *:{start:02} to *:{end:02}"),
        TimeField::Every { start: 0, step } => format!("Every {step} minutes"),
        TimeField::Every { start, step } => {
            format!("Every {step} minutes, starting at *:{start:02}")
        }
        TimeField::Values(minutes) => format!("At {}", past_the_hour(minutes)),
    }
}

/// Which hours match, for combinations without a dedicated sentence.
fn hour_phrase(hour: &TimeField) -> String {
    match hour {
        TimeField::Any => "every hour".to_string(),
        TimeField::At(hour) => format!("during the {} hour", render_time(*hour, 0)),
        TimeField::Range(first, last) => {
            format!("from {} to {}", render_time(*first, 0), render_time(*last, 59))
        }
        TimeField::Every { start: 0, step } => format!("every {step} hours"),
        TimeField::Every { start, step } => {
            format!("every {step} hours, starting at {}", render_time(*start, 0))
        }
        TimeField::Values(hours) => {
            let hours: Vec<String> = hours.iter().map(|hour| render_time(*hour, 0)).collect();
            format!("during the hours starting at {}", concatenate_english(&hours))
        }
    }
}

fn past_the_hour(minutes: &[u32]) -> String {
    let minutes: Vec<String> = minutes.iter().map(|minute| format!("*:{minute:02}")).collect();
    concatenate_english(&minutes)
}

/// 12-hour clock; midnight renders as 12 AM and midday as `12:00 Noon`.
fn render_time(hour: u32, minute: u32) -> String {
    let clock_hour = if hour % 12 == 0 { 12 } else { hour % 12 };
    let meridian = match hour {
        12 => "Noon",
        0..=11 => "AM",
        _ => "PM",
    };
    format!("{clock_hour}:{minute:02} {meridian}")
}

fn describe_days(day_of_month: &str, day_of_week: &str) -> Result<String, CronError> {
    match (is_wildcard(day_of_month), is_wildcard(day_of_week)) {
        (true, true) => Ok("Every day".to_string()),
        (true, false) => {
            let days = weekday_indices(day_of_week)?;
            if covers_week(&days) {
                Ok("Every day".to_string())
            } else {
                Ok(format!("Only on: {}", weekday_names(&days)))
            }
        }
        (false, true) => Ok(format!("Dated: {}", describe_dates(day_of_month))),
        (false, false) => {
            let days = weekday_indices(day_of_week)?;
            let mut message = format!("Dated: {}", describe_dates(day_of_month));
            if !covers_week(&days) {
                message.push_str("; but only on ");
                message.push_str(&weekday_names(&days));
            }
            Ok(message)
        }
    }
}

fn covers_week(days: &[usize]) -> bool {
    let mut seen = [false; 7];
    for idx in days {
        seen[*idx] = true;
    }
    seen.iter().all(|day| *day)
}

fn weekday_names(days: &[usize]) -> String {
    let names: Vec<&str> = days.iter().map(|idx| WEEKDAYS[*idx]).collect();
    concatenate_english(&names)
}

fn describe_dates(day_of_month: &str) -> String {
    let dates: Vec<String> = day_of_month
        .split(',')
        .map(|token| match token.split_once('-') {
            None if is_number(token) => ordinal(token),
            Some((start, end)) if is_number(start) && is_number(end) => {
                format!("{} to {}", ordinal(start), ordinal(end))
            }
            _ => token.to_string(),
        })
        .collect();
    concatenate_english(&dates)
}

fn describe_months(month: &str) -> Result<String, CronError> {
    if is_wildcard(month) {
        return Ok("Every month".to_string());
    }
    let months = compute_effective_months_from_spec(month)?;
    Ok(format!("During: {}", concatenate_english(&months)))
}

fn describe_years(year: &str) -> String {
    let years: Vec<String> = year
        .split(',')
        .map(|token| match token.split_once('-') {
            Some((start, end)) if is_number(start) && is_number(end) => {
                format!("{start} to {end}")
            }
            _ => token.to_string(),
        })
        .collect();
    format!("Year(s): {}", concatenate_english(&years))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(expression: &str) -> Vec<String> {
        infer(expression)
            .iter()
            .map(|inference| match inference {
                Inference::Message(text) | Inference::Error(text) => text.clone(),
            })
            .collect()
    }

    #[test]
    fn describes_standard_expressions() {
        let cases: &[(&str, &[&str])] = &[
            ("* * * * *", &["Every minute", "Every day", "Every month"]),
            ("0 * * * *", &["Every hour, at *:00", "Every day", "Every month"]),
            (
                "* 1 * * *",
                &["Every minute, from 1:00 AM to 1:59 AM", "Every day", "Every month"],
            ),
            ("0 6 * * *", &["At 6:00 AM", "Every day", "Every month"]),
            ("0 6 2 * *", &["At 6:00 AM", "Dated: 2nd", "Every month"]),
            ("0 6 2,3 * *", &["At 6:00 AM", "Dated: 2nd, and 3rd", "Every month"]),
            ("0 6 2,3,4 * *", &["At 6:00 AM", "Dated: 2nd, 3rd, and 4th", "Every month"]),
            ("0 6 2-10 * *", &["At 6:00 AM", "Dated: 2nd to 10th", "Every month"]),
            ("0 6 1,4-10 * *", &["At 6:00 AM", "Dated: 1st, and 4th to 10th", "Every month"]),
            ("* * * 1 *", &["Every minute", "Every day", "During: January"]),
            ("* * * 3 *", &["Every minute", "Every day", "During: March"]),
            ("* * * 1,3,5 *", &["Every minute", "Every day", "During: January, March, and May"]),
            ("* * * 1-3 *", &["Every minute", "Every day", "During: January to March"]),
            (
                "* * * 1-3,12 *",
                &["Every minute", "Every day", "During: January to March, and December"],
            ),
        ];
        for (expression, expected) in cases {
            assert_eq!(messages(expression), *expected, "for {expression}");
        }
    }

    #[test]
    fn renders_twelve_hour_clock() {
        assert_eq!(messages("0 12 * * *")[0], "At 12:00 Noon");
        assert_eq!(messages("0 16 * * *")[0], "At 4:00 PM");
        assert_eq!(messages("5 0 * * *")[0], "At 12:05 AM");
    }

    #[test]
    fn weekday_only_constraints() {
        assert_eq!(messages("0 9 * * MON-FRI")[1], "Only on: Monday, Tuesday, Wednesday, Thursday, and Friday");
        assert_eq!(messages("0 9 * * 0-6")[1], "Every day");
        assert_eq!(messages("0 9 ? * 1")[1], "Only on: Monday");
    }

    #[test]
    fn dates_and_weekdays_combine() {
        assert_eq!(messages("0 9 1,15 * 1")[1], "Dated: 1st, and 15th; but only on Monday");
        assert_eq!(messages("0 9 1 * SUN-SAT")[1], "Dated: 1st");
    }

    #[test]
    fn six_and_seven_field_forms() {
        assert_eq!(messages("0 15 10 * * ?"), ["At 10:15 AM", "Every day", "Every month"]);
        assert_eq!(
            messages("0 15 10 * * ? 2005"),
            ["At 10:15 AM", "Every day", "Every month", "Year(s): 2005"]
        );
        assert_eq!(messages("0 15 10 * * ? 2002-2005,2010")[3], "Year(s): 2002 to 2005, and 2010");
        assert_eq!(messages("0 15 10 * * ? *").len(), 3);
    }

    #[test]
    fn minute_steps() {
        assert_eq!(messages("0/5 14 * * ?")[0], "Every 5 minutes, from 2:00 PM to 2:55 PM");
        assert_eq!(messages("*/15 * * * *")[0], "Every 15 minutes");
    }

    #[test]
    fn minute_and_hour_lists_ranges_and_steps() {
        let cases: &[(&str, &[&str])] = &[
            ("0,30 * * * *", &["Every hour, at *:00, and *:30", "Every day", "Every month"]),
            (
                "0 9-17 * * 1-5",
                &[
                    "Every hour, at *:00, from 9:00 AM to 5:00 PM",
                    "Only on: Monday, Tuesday, Wednesday, Thursday, and Friday",
                    "Every month",
                ],
            ),
            ("15 */2 * * *", &["Every 2 hours, at *:15", "Every day", "Every month"]),
            (
                "30 1/3 * * *",
                &["Every 3 hours, at *:30, starting at 1:30 AM", "Every day", "Every month"],
            ),
            ("0 9,17 * * *", &["At 9:00 AM, and 5:00 PM", "Every day", "Every month"]),
            ("0,30 9 * * *", &["At 9:00 AM, and 9:30 AM", "Every day", "Every month"]),
            ("0-10 * * * *", &["Every minute, from *:00 to *:10", "Every day", "Every month"]),
            ("0-30/10 * * * *", &["Every hour, at *:00, *:10, *:20, and *:30", "Every day", "Every month"]),
            ("5-7 14 * * *", &["Every minute, from 2:05 PM to 2:07 PM", "Every day", "Every month"]),
            ("*/15 9-17 * * *", &["Every 15 minutes, from 9:00 AM to 5:59 PM", "Every day", "Every month"]),
            ("* 9-17 * * *", &["Every minute, from 9:00 AM to 5:59 PM", "Every day", "Every month"]),
            (
                "*/20 1,13 * * *",
                &[
                    "Every 20 minutes, during the hours starting at 1:00 AM, and 1:00 PM",
                    "Every day",
                    "Every month",
                ],
            ),
        ];
        for (expression, expected) in cases {
            assert_eq!(messages(expression), *expected, "for {expression}");
        }
    }

    #[test]
    fn malformed_minute_and_hour_fields() {
        assert_eq!(infer("60 * * * *")[0].error(), Some("Invalid minute '60'"));
        assert_eq!(infer("30-10 * * * *")[0].error(), Some("Invalid minute '30-10'"));
        assert_eq!(infer("*/0 * * * *")[0].error(), Some("Invalid minute '*/0'"));
        assert_eq!(infer("0,,5 * * * *")[0].error(), Some("Invalid minute '0,,5'"));
        assert_eq!(infer("0 9-24 * * *")[0].error(), Some("Invalid hour '9-24'"));
        assert_eq!(infer("0 ? * * *")[0].error(), Some("Invalid hour '?'"));
    }

    #[test]
    fn errors_are_collected_per_axis() {
        let inferences = infer("0 6 * 6-2 MON");
        assert_eq!(inferences[1], Inference::Message("Only on: Monday".into()));
        assert!(inferences[2].error().unwrap().contains("6-2"));

        let inferences = infer("99 6 * * THU-MON");
        assert_eq!(inferences[0].error(), Some("Invalid minute '99'"));
        assert_eq!(inferences[1].error(), Some("Invalid weekday range 'THU-MON'"));
        assert_eq!(inferences[2].message(), Some("Every month"));
    }

    #[test]
    fn wrong_field_count_is_an_error() {
        assert_eq!(infer(""), [Inference::Error("Expected 5 to 7 fields, got 0".into())]);
        assert_eq!(infer("* * *").len(), 1);
        assert!(infer("* * * * * * * *")[0].error().is_some());
    }

    #[test]
    fn month_specs() {
        let cases: &[(&str, &[&str])] = &[
            ("1", &["January"]),
            ("3", &["March"]),
            ("11", &["November"]),
            ("12", &["December"]),
            ("1-3", &["January to March"]),
            ("8-11", &["August to November"]),
            ("1,3,5", &["January", "March", "May"]),
            ("1,3-5,8", &["January", "March to May", "August"]),
            ("JAN", &["January"]),
            ("SEP", &["September"]),
            ("MAR-AUG", &["March to August"]),
        ];
        for (spec, expected) in cases {
            assert_eq!(compute_effective_months_from_spec(spec).unwrap(), *expected, "for {spec}");
        }
    }

    #[test]
    fn invalid_month_specs() {
        assert!(compute_effective_months_from_spec("").is_err());
        assert!(compute_effective_months_from_spec("6-2").unwrap_err().to_string().contains("6-2"));
        assert!(compute_effective_months_from_spec("SEP-FEB").unwrap_err().to_string().contains("SEP-FEB"));
        assert_eq!(
            compute_effective_months_from_spec("13"),
            Err(CronError::InvalidMonthSpec("13".into()))
        );
    }

    #[test]
    fn weekday_specs() {
        let cases: &[(&str, &[&str])] = &[
            ("0", &["Sunday"]),
            ("2", &["Tuesday"]),
            ("2,5", &["Tuesday", "Friday"]),
            ("2-4", &["Tuesday", "Wednesday", "Thursday"]),
            ("SAT", &["Saturday"]),
            ("TUE-FRI", &["Tuesday", "Wednesday", "Thursday", "Friday"]),
        ];
        for (spec, expected) in cases {
            assert_eq!(compute_effective_weekdays_from_spec(spec).unwrap(), *expected, "for {spec}");
        }
    }

    #[test]
    fn invalid_weekday_specs() {
        assert!(compute_effective_weekdays_from_spec("").is_err());
        assert_eq!(
            compute_effective_weekdays_from_spec("6-2"),
            Err(CronError::InvalidWeekdayRange("6-2".into()))
        );
        assert!(compute_effective_weekdays_from_spec("THU-MON").unwrap_err().to_string().contains("THU-MON"));
        assert_eq!(
            compute_effective_weekdays_from_spec("7"),
            Err(CronError::InvalidWeekdaySpec("7".into()))
        );
    }
}
