use serde_json::Value;

use crate::models::{RawUbicacion, Ubicacion};

/// Parse a coordinate: numbers pass through, strings are read from their
/// longest leading decimal prefix.
///
/// Returns `None` for anything that does not yield a finite number, so
/// `"Infinity"` and overflowing exponents are rejected even though a plain
/// prefix parse would accept them. Coordinates must be finite.
pub fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Longest `[+-]digits[.digits][e[+-]digits]` prefix after leading whitespace
fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Keep a record only if both coordinates parse; carry every other field through
pub fn normalize_ubicacion(raw: RawUbicacion) -> Option<Ubicacion> {
    let latitud = raw.latitud.as_ref().and_then(parse_float)?;
    let longitud = raw.longitud.as_ref().and_then(parse_float)?;

    Some(Ubicacion {
        id: raw.id,
        latitud,
        longitud,
        lugar: raw.lugar,
        extra: raw.extra,
    })
}

/// Drop records with unusable coordinates, preserving the order of the rest
pub fn normalize_ubicaciones(raw: Vec<RawUbicacion>) -> Vec<Ubicacion> {
    raw.into_iter().filter_map(normalize_ubicacion).collect()
}
