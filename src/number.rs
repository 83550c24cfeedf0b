//! Conversions between display text and `f64`, plus the limiter every
//! computed value goes through.
//!
//! Display text always uses `,` as the decimal separator. The swap to and
//! from `.` happens here and nowhere else.

pub const DECIMAL_SEPARATOR: char = ',';
/// Largest magnitude shown as a plain number.
pub const MAGNITUDE_BOUND: f64 = 10_000_000_000.0;
pub const DECIMAL_PLACES: i32 = 6;

pub const INFINITY: &str = "Infinity";
pub const NEG_INFINITY: &str = "-Infinity";
pub const ERROR: &str = "Error";

/// Round to six decimal places, then collapse anything beyond the magnitude
/// bound to an infinity of the same sign. NaN passes through.
pub fn limit(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMAL_PLACES);
    let rounded = (value * scale).round() / scale;
    if rounded > MAGNITUDE_BOUND {
        f64::INFINITY
    } else if rounded < -MAGNITUDE_BOUND {
        f64::NEG_INFINITY
    } else {
        rounded
    }
}

/// Parse display text into a number. Anything unparseable (`Error`) is NaN.
pub fn parse_value(text: &str) -> f64 {
    text.replace(DECIMAL_SEPARATOR, ".")
        .parse::<f64>()
        .unwrap_or(f64::NAN)
}

/// Render a number as display text.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return ERROR.to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            INFINITY.to_owned()
        } else {
            NEG_INFINITY.to_owned()
        };
    }
    // -0 shows as 0
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value).replace('.', &DECIMAL_SEPARATOR.to_string())
}

/// True for the sentinel texts that are not numerals.
pub fn is_special(text: &str) -> bool {
    matches!(text, INFINITY | NEG_INFINITY | ERROR)
}

/// Drop a dangling separator so operands read `12` rather than `12,`.
pub fn tidy(text: &str) -> String {
    let trimmed = text.strip_suffix(DECIMAL_SEPARATOR).unwrap_or(text);
    match trimmed {
        "" | "-" => "0".to_owned(),
        _ => trimmed.to_owned(),
    }
}
