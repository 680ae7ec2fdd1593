// Utility helpers for parsing cells and formatting numbers for the console.
use num_format::{Locale, ToFormattedString};

/// Parse a CSV cell into `f64`, forgiving about the formatting issues common
/// in spreadsheet exports.
///
/// - Trims whitespace.
/// - Strips thousands separators like `","` before parsing.
/// - Accepts exponent notation (`2.5E3`).
/// - Returns `None` for blanks, text, `NaN` and infinities.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an indicator cell: a number, or a boolean word
/// (`true`/`false`, `yes`/`no`, any case) read as `1`/`0`.
pub fn parse_flag_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(1.0),
        "false" | "no" => Some(0.0),
        _ => parse_f64_safe(Some(s)),
    }
}

/// An indicator flag is set when it holds a non-zero number.
pub fn is_truthy(v: f64) -> bool {
    v != 0.0
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234.50`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_separated_numbers() {
        assert_eq!(parse_f64_safe(Some(" 3 ")), Some(3.0));
        assert_eq!(parse_f64_safe(Some("1,250.5")), Some(1250.5));
        assert_eq!(parse_f64_safe(Some("0")), Some(0.0));
    }

    #[test]
    fn rejects_blank_and_text() {
        assert_eq!(parse_f64_safe(None), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("yes")), None);
        assert_eq!(parse_f64_safe(Some("NaN")), None);
        assert_eq!(parse_f64_safe(Some("inf")), None);
        assert_eq!(parse_f64_safe(Some("-infinity")), None);
    }

    #[test]
    fn accepts_exponent_notation() {
        assert_eq!(parse_f64_safe(Some("1e1")), Some(10.0));
        assert_eq!(parse_f64_safe(Some("2.5E3")), Some(2500.0));
    }

    #[test]
    fn flags_accept_booleans_and_numbers() {
        assert_eq!(parse_flag_safe(Some("True")), Some(1.0));
        assert_eq!(parse_flag_safe(Some(" FALSE ")), Some(0.0));
        assert_eq!(parse_flag_safe(Some("yes")), Some(1.0));
        assert_eq!(parse_flag_safe(Some("No")), Some(0.0));
        assert_eq!(parse_flag_safe(Some("1")), Some(1.0));
        assert_eq!(parse_flag_safe(Some("0.0")), Some(0.0));
        assert_eq!(parse_flag_safe(Some("maybe")), None);
        assert_eq!(parse_flag_safe(Some("")), None);
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-12.0, 0), "-12");
        assert_eq!(format_number(0.0, 1), "0.0");
        assert_eq!(format_int(9855usize), "9,855");
    }

    #[test]
    fn truthiness_is_non_zero() {
        assert!(is_truthy(1.0));
        assert!(is_truthy(2.0));
        assert!(!is_truthy(0.0));
    }
}
