//! Small English rendering helpers shared by the cron describer and the
//! date parser.

/// Joins items the way the describers phrase lists: `a, b, and c`.
///
/// Two items keep the comma too (`2nd, and 3rd`), matching how the cron
/// widget has always rendered them.
///
/// # Example
/// ```
/// use devtools_core::english::concatenate_english;
/// let items = vec!["2nd".to_string(), "3rd".to_string(), "4th".to_string()];
/// assert_eq!(concatenate_english(&items), "2nd, 3rd, and 4th");
/// ```
pub fn concatenate_english<S: AsRef<str>>(values: &[S]) -> String {
    match values {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Ordinal suffix for a decimal number given as text (`1` -> `st`, `12` -> `th`).
pub fn num_suffix(n: &str) -> &'static str {
    let mut digits = n.chars().rev();
    let last = digits.next();
    let tens = digits.next();
    if tens == Some('1') {
        return "th";
    }
    match last {
        Some('1') => "st",
        Some('2') => "nd",
        Some('3') => "rd",
        _ => "th",
    }
}

/// Number followed by its ordinal suffix, e.g. `21st`.
pub fn ordinal(n: &str) -> String {
    format!("{n}{}", num_suffix(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenate_handles_short_lists() {
        let empty: [&str; 0] = [];
        assert_eq!(concatenate_english(&empty), "");
        assert_eq!(concatenate_english(&["January"]), "January");
        assert_eq!(concatenate_english(&["2nd", "3rd"]), "2nd, and 3rd");
    }

    #[test]
    fn concatenate_joins_longer_lists() {
        assert_eq!(
            concatenate_english(&["January", "March", "May"]),
            "January, March, and May"
        );
    }

    #[test]
    fn suffixes_follow_teen_rule() {
        let cases = [
            ("1", "st"),
            ("2", "nd"),
            ("3", "rd"),
            ("4", "th"),
            ("5", "th"),
            ("10", "th"),
            ("11", "th"),
            ("12", "th"),
            ("13", "th"),
            ("14", "th"),
            ("15", "th"),
            ("21", "st"),
            ("112", "th"),
        ];
        for (n, suffix) in cases {
            assert_eq!(num_suffix(n), suffix, "suffix for {n}");
        }
    }

    #[test]
    fn ordinal_appends_suffix() {
        assert_eq!(ordinal("22"), "22nd");
    }
}
