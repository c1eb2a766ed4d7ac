//! Value formatting for labels and tooltips
//!
//! All functions are total: non-finite numbers render as `NON_FINITE`
//! instead of failing, so a bad value never breaks a whole chart.

/// Text shown for NaN and infinite values
pub const NON_FINITE: &str = "—";

/// Hundredths at or above 2^50 are returned unrounded: the scaled value is
/// too coarse for `round(x * 100) / 100` to be stable, and may overflow.
const ROUNDING_LIMIT: f64 = 1_125_899_906_842_624.0;

/// Round to two decimals, biased by machine epsilon so that values like
/// 1.005 (stored as 1.00499...) round up. Ties go away from zero.
///
/// Non-finite values, and values too large to carry cents, are returned
/// unchanged.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scaled = (x + f64::EPSILON) * 100.0;
    if scaled.abs() >= ROUNDING_LIMIT {
        return x;
    }
    scaled.round() / 100.0
}

/// `$` amount with thousands separators and exactly two decimals
///
/// Negative amounts keep the sign after the symbol: `$-1,234.50`.
pub fn format_currency(x: f64) -> String {
    if !x.is_finite() {
        return NON_FINITE.to_string();
    }

    let (negative, digits) = group_thousands(round2(x), 2);
    format!("${}{}", if negative { "-" } else { "" }, digits)
}

/// Number with thousands separators and up to three decimals, trailing
/// zeros dropped (`1,950`, `12,345.679`)
pub fn format_locale(x: f64) -> String {
    if !x.is_finite() {
        return NON_FINITE.to_string();
    }

    let (negative, digits) = group_thousands(x, 3);
    let digits = if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        digits
    };

    if negative {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Right-pad `s` with spaces to `width` characters
pub fn pad_label(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut padded = String::with_capacity(s.len() + width - len);
    padded.push_str(s);
    padded.extend(std::iter::repeat(' ').take(width - len));
    padded
}

/// Fixed-point digits of |x| with `,` between thousands
///
/// Returns whether a minus sign is needed: values that print as zero are
/// never negative.
fn group_thousands(x: f64, decimals: usize) -> (bool, String) {
    let fixed = format!("{:.*}", decimals, x.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    (x < 0.0 && !is_zero, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(1234.5), 1234.5);
        assert_eq!(round2(0.001), 0.0);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn test_round2_idempotent() {
        let samples = [
            0.0, 0.005, 1.005, 2.675, 10.0 / 3.0, 12382.060446624211, 13522.688451442293,
            -7.125, 1e9 + 0.125, 99.995,
        ];
        for x in samples {
            assert_eq!(round2(round2(x)), round2(x), "round2 not idempotent for {x}");
        }
    }

    #[test]
    fn test_round2_idempotent_across_magnitudes() {
        let mut x = 1e-3;
        while x < 1e300 {
            for v in [x, -x, x + 0.005, x * 1.0001] {
                let once = round2(v);
                assert!(once.is_finite(), "round2 overflowed for {v}");
                assert_eq!(round2(once), once, "round2 not idempotent for {v}");
            }
            x *= 1.7;
        }
        assert_eq!(round2(35300731336497.086), round2(round2(35300731336497.086)));
        assert_eq!(round2(40720657870381.336), round2(round2(40720657870381.336)));
    }

    #[test]
    fn test_round2_large_values_unchanged() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert_eq!(round2(-f64::MAX), -f64::MAX);
    }

    #[test]
    fn test_round2_non_finite_passthrough() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.001), "$0.00");
        assert_eq!(format_currency(12382.060446624211), "$12,382.06");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-1234.5), "$-1,234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_currency(f64::NAN), NON_FINITE);
        assert_eq!(format_currency(f64::NEG_INFINITY), NON_FINITE);
        assert_eq!(format_locale(f64::INFINITY), NON_FINITE);
    }

    #[test]
    fn test_format_currency_huge_values() {
        for x in [1e307, f64::MAX, -f64::MAX] {
            let text = format_currency(x);
            assert!(!text.contains("inf"), "{x} formatted as {text}");
            assert!(text.ends_with(".00"));
            let digits = text.trim_start_matches('$').trim_start_matches('-');
            assert!(digits.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.'));
        }
        assert!(format_currency(-f64::MAX).starts_with("$-1"));
    }

    #[test]
    fn test_format_locale() {
        assert_eq!(format_locale(1950.0), "1,950");
        assert_eq!(format_locale(12345.6789), "12,345.679");
        assert_eq!(format_locale(0.5), "0.5");
        assert_eq!(format_locale(100.0), "100");
        assert_eq!(format_locale(-2500.25), "-2,500.25");
    }

    #[test]
    fn test_pad_label() {
        assert_eq!(pad_label("ABC", 5), "ABC  ");
        assert_eq!(pad_label("ABC", 5).len(), 5);
        assert_eq!(pad_label("ABCDEF", 5), "ABCDEF");
        assert_eq!(pad_label("ABCDE", 5), "ABCDE");
        assert_eq!(pad_label("é", 3).chars().count(), 3);
    }
}
