/// Maximum fraction digits kept when grouping a number for display.
const MAX_FRACTION_DIGITS: usize = 3;

/// Formats a price the way the storefront labels it, e.g. `KSH 125,000`.
pub fn format_price(price: f64) -> String {
    format!("KSH {}", group_thousands(price))
}

/// Groups the integer part of `value` with commas (en-US style) and keeps at
/// most three fraction digits, trimming trailing zeros.
///
/// ```
/// use lapbytes::util::group_thousands;
///
/// assert_eq!(group_thousands(125000.0), "125,000");
/// assert_eq!(group_thousands(1234.5), "1,234.5");
/// assert_eq!(group_thousands(999.0), "999");
/// ```
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Renders a size-like number without a trailing `.0`, e.g. `512` or `15.6`.
pub fn format_quantity(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        "0".to_string()
    }
}
