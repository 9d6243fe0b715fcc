//! Number rendering used by the advice and prompt text.

pub fn round2(v: f64) -> f64 {
    let scaled = v * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        v
    }
}

pub fn fixed1(v: f64) -> String {
    format!("{:.1}", v)
}

pub fn fixed2(v: f64) -> String {
    format!("{:.2}", v)
}

/// `part` as a percentage of `whole`, or 0 when `whole` is not positive.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    let pct = part * 100.0 / whole;
    if pct.is_finite() {
        pct
    } else {
        // part * 100 overflowed
        part / whole * 100.0
    }
}

/// Thousands-separated amount with at most two fraction digits,
/// e.g. `20000.0 -> "20,000"` and `1234.5 -> "1,234.5"`.
pub fn grouped(v: f64) -> String {
    let rendered = format!("{:.2}", round2(v).abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    if round2(v) < 0.0 {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_inserts_separators() {
        assert_eq!(grouped(0.0), "0");
        assert_eq!(grouped(999.0), "999");
        assert_eq!(grouped(20000.0), "20,000");
        assert_eq!(grouped(1234567.891), "1,234,567.89");
        assert_eq!(grouped(1234.5), "1,234.5");
        assert_eq!(grouped(-2000.0), "-2,000");
    }

    #[test]
    fn test_fixed_precision() {
        assert_eq!(fixed2(12000.0), "12000.00");
        assert_eq!(fixed1(60.0), "60.0");
        assert_eq!(fixed2(-2000.0), "-2000.00");
    }

    #[test]
    fn test_percent_of_guards_zero_denominator() {
        assert_eq!(percent_of(50.0, 200.0), 25.0);
        assert_eq!(percent_of(50.0, 0.0), 0.0);
    }

    #[test]
    fn test_percent_of_huge_values_stays_finite() {
        assert_eq!(percent_of(1e307, 1e307), 100.0);
        assert_eq!(percent_of(-1e307, 2e307), -50.0);
        assert!(round2(1e307).is_finite());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(1200.0), 1200.0);
    }
}
