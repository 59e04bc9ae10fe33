//! Lenient amount parsing and display formatting
//!
//! Form inputs are free text. Anything that does not start with a number is
//! treated as "not entered yet" and becomes `0.0`; it is never an error.

/// Currency prefix used in recommendation texts
pub const CURRENCY_SYMBOL: &str = "₹";

/// Parse a free-form amount the way a lenient form field would
///
/// Surrounding whitespace is ignored and the longest leading decimal literal
/// wins, so `"1200abc"` parses as `1200.0`. Empty, non-numeric or non-finite
/// input yields `0.0`. Negative values are kept as-is.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut i = 0;
    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let mut has_digits = false;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
        has_digits = true;
    }
    if i < len && bytes[i] == b'.' {
        i += 1;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
            has_digits = true;
        }
    }
    if !has_digits {
        return 0.0;
    }

    let mut end = i;

    // Optional exponent, only consumed when it carries digits ("1e" stays "1")
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Round half up (`floor(x + 0.5)`), matching how action amounts are rounded
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Format an amount with thousands separators and at most three fraction
/// digits, trailing zeros trimmed: `150000.0` → `"150,000"`, `1234.5` → `"1,234.5"`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an amount with the currency prefix (`₹150,000`)
pub fn format_currency(value: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_amount(value))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
