//! Currency and date normalization for narrative prose.
//!
//! Both formatters are total: any input the bank systems hand us produces a
//! renderable string rather than an error, because a half-empty narrative a
//! reviewer can edit beats a failed assembly.

use chrono::NaiveDate;
use log::warn;
use regex::Regex;
use std::sync::OnceLock;

/// Formats a dollar amount with thousands separators and exactly two decimal
/// places, e.g. `1234.5` -> `"$1,234.50"`. Negative amounts render as
/// `"$-1,234.50"`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${}{}.{}", sign, grouped, frac_part)
}

/// Parses a currency string, tolerating `$` prefixes and `,` separators.
/// Returns `None` when nothing numeric remains.
pub fn parse_currency(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect::<String>()
        .trim()
        .to_string();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Formats a currency string, substituting `"$0.00"` when the input does not
/// parse as a number.
pub fn format_currency_str(value: &str) -> String {
    match parse_currency(value) {
        Some(amount) => format_currency(amount),
        None => {
            if !value.trim().is_empty() {
                warn!("Unparsable currency value {:?}, substituting $0.00", value);
            }
            "$0.00".to_string()
        }
    }
}

fn slash_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2,4})").expect("valid regex"))
}

// Alternate shapes tried after the M/D/YY form, in order.
const ALT_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m-%d-%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Normalizes a date string to `MM/DD/YYYY`.
///
/// Inputs already shaped like `M/D/YY[YY]` are zero-padded, with two-digit
/// years expanded as `<50 -> 20xx, >=50 -> 19xx`. Otherwise a fixed list of
/// alternate patterns is tried before giving up and returning the input
/// verbatim. Empty input yields an empty string.
pub fn format_date(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(caps) = slash_date_pattern().captures(trimmed) {
        let month: u32 = caps[1].parse().unwrap_or(0);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year_text = &caps[3];
        let year: i32 = if year_text.len() == 2 {
            let short: i32 = year_text.parse().unwrap_or(0);
            if short < 50 {
                2000 + short
            } else {
                1900 + short
            }
        } else {
            year_text.parse().unwrap_or(0)
        };
        return format!("{:02}/{:02}/{}", month, day, year);
    }

    for fmt in ALT_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, fmt) {
            return parsed.format("%m/%d/%Y").to_string();
        }
    }

    warn!("Unrecognized date shape {:?}, passing through unchanged", trimmed);
    trimmed.to_string()
}

/// `format_date` over an optional field, with absent values rendering empty.
pub fn format_opt_date(value: Option<&str>) -> String {
    value.map(format_date).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(15000.5), "$15,000.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.89), "$1,234,567.89");
        assert_eq!(format_currency(-1234.5), "$-1,234.50");
    }

    #[test]
    fn test_parse_currency_round_trip() {
        for amount in [0.0, 0.01, 15000.5, 1234567.89, 8999.99] {
            let rendered = format_currency(amount);
            let parsed = parse_currency(&rendered).unwrap();
            assert!((parsed - amount).abs() < 0.005, "{} -> {}", amount, parsed);
        }
    }

    #[test]
    fn test_format_currency_str_fallbacks() {
        assert_eq!(format_currency_str("$9,500.00"), "$9,500.00");
        assert_eq!(format_currency_str("1200"), "$1,200.00");
        assert_eq!(format_currency_str("abc"), "$0.00");
        assert_eq!(format_currency_str(""), "$0.00");
    }

    #[test]
    fn test_format_date_slash_shapes() {
        assert_eq!(format_date("1/5/2024"), "01/05/2024");
        assert_eq!(format_date("01/31/2024"), "01/31/2024");
        assert_eq!(format_date("3/7/24"), "03/07/2024");
        assert_eq!(format_date("3/7/99"), "03/07/1999");
    }

    #[test]
    fn test_format_date_alternate_patterns() {
        assert_eq!(format_date("2024-01-15"), "01/15/2024");
        assert_eq!(format_date("01-15-2024"), "01/15/2024");
        assert_eq!(format_date("15-01-2024"), "01/15/2024");
        assert_eq!(format_date("2024/01/15"), "01/15/2024");
    }

    #[test]
    fn test_format_date_passthrough_and_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
        assert_eq!(format_date("January 15th"), "January 15th");
    }
}
