//! Prefix parsers that coerce number-input text the way a browser form does.
//!
//! Neither parser rejects trailing garbage: the longest numeric prefix wins
//! and `None` stands for "not a number".

/// Parse the leading integer of `raw`, ignoring anything after it.
///
/// `"2.7"` is 2, `"12abc"` is 12, `""` and `"-"` are `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse().ok()
}

/// Parse the leading decimal literal of `raw`, ignoring anything after it.
///
/// Accepts `[sign] digits [. digits] [e [sign] digits]` where at least one
/// mantissa digit is present, plus a signed `Infinity`.
pub fn parse_decimal_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let infinity = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -infinity } else { infinity });
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut fraction_end = end + 1;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
            mantissa_digits += 1;
        }
        end = fraction_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    // An exponent only counts when digits follow it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// How a stored decimal reads back into a number input. Infinities use the
/// spelling `parse_decimal_prefix` accepts, NaN reads back empty.
pub fn decimal_text(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}

/// Characters a number input lets through while typing.
pub fn is_number_input_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}
