//! Fixed formatting for floating-point values.
//!
//! Floats are rendered in the "general" notation: six significant digits,
//! trailing zeros dropped, switching to scientific notation when the decimal
//! exponent is below -4 or at least 6.
//!
//! ```text
//! 0.0            0
//! 2.0            2
//! 3.14           3.14
//! 10f64.sqrt()   3.16228
//! 1234567.0      1.23457e+06
//! 0.00001234     1.234e-05
//! ```

/// Significant digits kept by [`format_general`].
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Format `value` with [`SIGNIFICANT_DIGITS`] significant digits.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to the kept digits first fixes the exponent (9.999995 -> 1e+01).
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Drop trailing zeros after the decimal point, and the point itself.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
