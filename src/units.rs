//! Force unit conversion for display.

/// Pounds-force per newton, as used by the hand dynamometer readouts.
pub const POUNDS_PER_NEWTON: f64 = 0.22481;

/// Format a force reading in newtons as pounds with two decimals.
///
/// Negative readings (sensor drift below zero) and non-numbers display as
/// a bare `"0"`.
pub fn format_to_pounds(newtons: f64) -> String {
    if newtons.is_nan() || newtons < 0.0 {
        return "0".to_string();
    }
    // Adding +0.0 turns a -0.0 product into +0.0.
    to_fixed_2(newtons * POUNDS_PER_NEWTON + 0.0)
}

/// Two-decimal rendering of a non-negative value where exact halves round
/// up rather than to even.
///
/// A value sits exactly halfway between two hundredths only when it is an
/// odd multiple of 1/8; everything else is left to `{:.2}`, which rounds
/// from the exact binary value.
fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 && eighths < 2f64.powi(52) {
        let hundredths = (eighths as u64 * 25 + 1) / 2;
        return format!("{}.{:02}", hundredths / 100, hundredths % 100);
    }
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_is_bare_zero() {
        assert_eq!(format_to_pounds(-0.01), "0");
        assert_eq!(format_to_pounds(-250.0), "0");
        assert_eq!(format_to_pounds(f64::NAN), "0");
    }

    #[test]
    fn test_zero_has_no_sign() {
        assert_eq!(format_to_pounds(0.0), "0.00");
        assert_eq!(format_to_pounds(-0.0), "0.00");
    }

    #[test]
    fn test_scaled_to_two_decimals() {
        assert_eq!(format_to_pounds(100.0), "22.48");
        assert_eq!(format_to_pounds(400.0), "89.92");
        assert_eq!(format_to_pounds(1.0), "0.22");
    }

    #[test]
    fn test_exact_halves_round_up() {
        assert_eq!(to_fixed_2(0.125), "0.13");
        assert_eq!(to_fixed_2(0.375), "0.38");
        assert_eq!(to_fixed_2(0.625), "0.63");
        assert_eq!(to_fixed_2(12.875), "12.88");
        assert_eq!(to_fixed_2(0.25), "0.25");
        assert_eq!(to_fixed_2(3.0), "3.00");
        // 0.5560250878519639 N is exactly 0.125 lbs after scaling.
        assert_eq!(format_to_pounds(0.5560250878519639), "0.13");
    }
}
