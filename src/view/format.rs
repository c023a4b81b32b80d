//! Display formatting shared by every tab and by `crypto-query`.

use crate::utils::NOT_AVAILABLE;

/// `1234567.891` with 2 decimals -> `1,234,567.89`. Non-finite or missing -> `N/A`.
pub fn amount(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => with_thousands(&format!("{:.*}", decimals, v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Prices and volumes.
pub fn money(value: Option<f64>) -> String {
    amount(value, 2)
}

/// Market caps and ranking volumes, no decimals.
pub fn whole(value: Option<f64>) -> String {
    amount(value, 0)
}

/// `2.5` -> `2.50%`
pub fn percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.2}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// "bitcoin" -> "Bitcoin"
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn with_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits = int_part.len();
    let mut grouped = String::with_capacity(digits + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(money(Some(1_234_567.891)), "1,234,567.89");
        assert_eq!(money(Some(999.0)), "999.00");
        assert_eq!(money(Some(-1234.5)), "-1,234.50");
        assert_eq!(whole(Some(1.2e10)), "12,000,000,000");
        assert_eq!(amount(Some(0.5), 8), "0.50000000");
    }

    #[test]
    fn missing_or_non_numeric_is_na() {
        assert_eq!(money(None), "N/A");
        assert_eq!(money(Some(f64::NAN)), "N/A");
        assert_eq!(percent(None), "N/A");
        assert_eq!(percent(Some(f64::INFINITY)), "N/A");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(percent(Some(2.5)), "2.50%");
        assert_eq!(percent(Some(-0.456)), "-0.46%");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("bitcoin"), "Bitcoin");
        assert_eq!(capitalize(""), "");
    }
}
