//! Result formatting for a single-line calculator display.

/// Format a computed value for the display.
///
/// Integer-valued results are shown without a decimal point, everything
/// else is trimmed to 12 significant digits so float noise like
/// `0.49999999999999994` reads as `0.5`. Magnitudes outside the fixed
/// notation range fall back to scientific notation.
///
/// # Examples
///
/// ```
/// use scieval::{evaluate, format_value, AngleMode};
///
/// assert_eq!(format_value(evaluate("sqrt(16)", AngleMode::Radians).unwrap()), "4");
/// assert_eq!(format_value(evaluate("sin(30)", AngleMode::Degrees).unwrap()), "0.5");
/// ```
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        // the evaluator refuses non-finite results, but don't panic if one
        // shows up anyway
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }

    let scientific = format!("{:.11e}", value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .expect("{:e} output contains an exponent");
    let exponent: i32 = exponent.parse().expect("{:e} exponent is numeric");

    if exponent < -4 || exponent >= 12 {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        format!("{}e{}", mantissa, exponent)
    } else {
        // 12 significant digits in fixed notation
        let decimals = (11 - exponent).max(0) as usize;
        let fixed = format!("{:.prec$}", value, prec = decimals);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_value;

    #[test]
    fn integers_without_decimal_point() {
        assert_eq!(format_value(4.0), "4");
        assert_eq!(format_value(-4.0), "-4");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(120.0), "120");
        assert_eq!(format_value(123_456_789_012_345.0), "123456789012345");
    }

    #[test]
    fn float_noise_is_trimmed() {
        assert_eq!(format_value(0.499_999_999_999_999_94), "0.5");
        assert_eq!(format_value(0.999_999_999_999_999_9), "1");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-2.5), "-2.5");
        assert_eq!(format_value(123.456), "123.456");
    }

    #[test]
    fn long_fractions_keep_twelve_digits() {
        assert_eq!(format_value(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_value(2.0f64.sqrt()), "1.41421356237");
    }

    #[test]
    fn extremes_use_scientific_notation() {
        assert_eq!(format_value(1e20), "1e20");
        assert_eq!(format_value(1e-5), "1e-5");
        assert_eq!(format_value(-1e20), "-1e20");
        assert_eq!(format_value(2.5e-9), "2.5e-9");
    }
}
