//! Raw token to typed scalar conversion.

use super::value::Scalar;

/// Convert a raw text token into a typed scalar.
///
/// Checked in order: integer/decimal number, `true`/`false`, `null`
/// (case-insensitive), otherwise text with one matching pair of
/// surrounding quotes removed.
pub fn coerce(token: &str) -> Scalar {
    if is_numeric(token) {
        if let Ok(n) = token.parse::<f64>() {
            return Scalar::Number(n);
        }
    }

    if token.eq_ignore_ascii_case("true") {
        return Scalar::Bool(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Scalar::Bool(false);
    }
    if token.eq_ignore_ascii_case("null") {
        return Scalar::Null;
    }

    Scalar::String(strip_quotes(token).to_string())
}

/// `-?\d+(\.\d+)?`
fn is_numeric(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

fn strip_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(quote) && token.ends_with(quote) {
            return &token[1..token.len() - 1];
        }
    }
    token
}
