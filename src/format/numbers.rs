// Number rendering shared by the recurrence and asymptotics formatters

/// Decimal places kept by [`format_number`]
pub const DISPLAY_DIGITS: usize = 5;

/// Round `x` to the nearest integer if it lies within `tolerance` of it.
///
/// Non-finite values pass through unchanged.
///
/// ```
/// use recurtty::format::numbers::snap_to_integer;
///
/// assert_eq!(snap_to_integer(1.9999999, 1e-6), 2.0);
/// assert_eq!(snap_to_integer(2.25, 1e-6), 2.25);
/// ```
pub fn snap_to_integer(x: f64, tolerance: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let nearest = x.round();
    if (x - nearest).abs() <= tolerance {
        nearest + 0.0
    } else {
        x
    }
}

/// Format `x` with at most [`DISPLAY_DIGITS`] decimals, rounding up.
///
/// Trailing zeros and a trailing decimal point are trimmed. Rounding is a
/// ceiling so a displayed growth base never understates the true one.
pub fn format_number(x: f64) -> String {
    format_number_with(x, DISPLAY_DIGITS)
}

/// [`format_number`] with an explicit number of decimals.
pub fn format_number_with(x: f64, digits: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let factor = 10f64.powi(digits as i32);
    let scaled = x * factor;
    // 1.1 * 1e5 is 110000.00000000001; don't ceil representation noise.
    // A true value within a few ulps above a multiple rounds down on purpose.
    let nearest = scaled.round();
    let ceiled = if (scaled - nearest).abs() <= scaled.abs() * 4.0 * f64::EPSILON {
        nearest
    } else {
        scaled.ceil()
    };
    let rounded = ceiled / factor + 0.0;

    let text = format!("{:.*}", digits, rounded);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Format a coefficient, constant or shift so that it parses back to the
/// same `f64`.
///
/// `Display` for `f64` prints the shortest exact decimal and never an
/// exponent, which is what the lexer accepts.
pub fn format_constant(x: f64) -> String {
    format!("{}", x + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_trims() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(2.1234), "2.1234");
        assert_eq!(format_number(1.1), "1.1");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(2.123456), "2.12346");
        assert_eq!(format_number(2.123451), "2.12346");
        assert_eq!(format_number(1.618033988749895), "1.61804");
        assert_eq!(format_number(1.8392867552141612), "1.83929");
        assert_eq!(format_number(1.999999999), "2");
    }

    #[test]
    fn test_format_number_negative() {
        // ceiling moves toward zero for negatives
        assert_eq!(format_number(-0.123456), "-0.12345");
        assert_eq!(format_number(-0.000001), "0");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_number_with_digits() {
        assert_eq!(format_number_with(3.14159265, 2), "3.15");
        assert_eq!(format_number_with(3.14159265, 0), "4");
    }

    #[test]
    fn test_format_constant() {
        assert_eq!(format_constant(5.0), "5");
        assert_eq!(format_constant(-3.0), "-3");
        assert_eq!(format_constant(-0.0), "0");
        assert_eq!(format_constant(0.5), "0.5");
        assert_eq!(format_constant(1e15), "1000000000000000");
    }

    #[test]
    fn test_format_constant_keeps_every_digit() {
        assert_eq!(format_constant(0.123456), "0.123456");
        assert_eq!(format_constant(1.000001), "1.000001");
        assert_eq!(format_constant(-0.0000001), "-0.0000001");
        assert_eq!(format_constant(1.1), "1.1");
        for x in [0.123456, 1.000001, -0.0000001, 2.0 / 3.0, 1e-12] {
            assert_eq!(format_constant(x).parse::<f64>(), Ok(x));
        }
    }

    #[test]
    fn test_snap_to_integer() {
        assert_eq!(snap_to_integer(2.0000001, 1e-6), 2.0);
        assert_eq!(snap_to_integer(2.00001, 1e-6), 2.00001);
        assert_eq!(snap_to_integer(-0.0000001, 1e-6), 0.0);
        assert!(snap_to_integer(-0.0000001, 1e-6).is_sign_positive());
        assert_eq!(snap_to_integer(f64::INFINITY, 1e-6), f64::INFINITY);
    }
}
