//! Display helpers shared by the console report and the chart labels.

use crate::types::Money;
use chrono::Weekday;

/// All weekdays, Monday first. Row order of the peak-hour matrix.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Formats an amount with a currency symbol and thousands separators.
pub fn format_currency(amount: Money, symbol: &str) -> String {
    let plain = amount.to_string();
    let (sign, unsigned) = plain
        .strip_prefix('-')
        .map_or(("", plain.as_str()), |rest| ("-", rest));
    let (whole, cents) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

/// Formats an amount rounded to whole units, for bar annotations.
pub fn format_currency_whole(amount: Money, symbol: &str) -> String {
    let rounded = amount.checked_div(100).unwrap_or(Money::ZERO).minor();
    let sign = if rounded < 0 { "-" } else { "" };
    format!(
        "{sign}{symbol}{}",
        group_thousands(&rounded.unsigned_abs().to_string())
    )
}

/// Inserts `,` between every group of three digits.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an hour of the day as `HH:00`.
pub fn format_hour(hour: u8) -> String {
    format!("{hour:02}:00")
}

/// Three-letter weekday label.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Parses a three-letter weekday label produced by [`weekday_label`].
pub fn parse_weekday_label(label: &str) -> Option<Weekday> {
    WEEKDAYS
        .into_iter()
        .find(|day| weekday_label(*day).eq_ignore_ascii_case(label.trim()))
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::from_minor(123_456_78), "£"), "£123,456.78");
        assert_eq!(format_currency(Money::from_minor(5), "$"), "$0.05");
        assert_eq!(format_currency(Money::from_minor(-100_000), ""), "-1,000.00");
    }

    #[test]
    fn test_format_currency_whole() {
        assert_eq!(format_currency_whole(Money::from_minor(1_234_50), "£"), "£1,235");
        assert_eq!(format_currency_whole(Money::ZERO, "£"), "£0");
    }

    #[test]
    fn test_weekday_labels_round_trip() {
        for day in WEEKDAYS {
            assert_eq!(parse_weekday_label(weekday_label(day)), Some(day));
        }
        assert_eq!(parse_weekday_label("mon"), Some(Weekday::Mon));
        assert_eq!(parse_weekday_label("Funday"), None);
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(9), "09:00");
        assert_eq!(format_hour(17), "17:00");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
        assert_eq!(truncate_string("Éléphant Salon", 8), "Éléph...");
    }
}
