//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>
//!
//! Helpers for pulling the numeric magnitude out of a length string and
//! printing it back in the shortest form a stylesheet would carry.

/// Return the leading numeric prefix of `text`, ignoring any unit after it.
///
/// Accepts an optional sign, integer digits, a fraction, and an exponent
/// (`"-1.5e2px"` is `-150`). Leading whitespace is skipped. Returns `NaN`
/// when the text does not start with a number.
pub fn strip_unit(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    end = skip_digits(bytes, end);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        let frac_digits = frac_end - (end + 1);
        if frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // An exponent only counts when at least one digit follows it, so "1em"
    // stays 1 rather than failing.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_end = skip_digits(bytes, cursor);
        if exp_end > cursor {
            end = exp_end;
        }
    }

    trimmed
        .get(..end)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn skip_digits(bytes: &[u8], start: usize) -> usize {
    let mut cursor = start;
    while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
        cursor += 1;
    }
    cursor
}

/// Format a magnitude the way it appears in generated CSS.
///
/// Integral values print without a fraction (`1`, not `1.0`), negative zero
/// prints as `0`, and non-finite values print as `NaN` / `Infinity`.
/// Magnitudes below `1e-6` or from `1e21` up use exponent notation
/// (`6.25e-7`, `1e+21`), matching how browsers serialize script numbers.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        };
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    if !(1e-6..1e21).contains(&value.abs()) {
        let exponential = format!("{value:e}");
        return match exponential.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exponential,
        };
    }
    format!("{value}")
}
