//! Number formatting helpers for dashboard figures.
//!
//! Figures are shown with a fixed number of decimals or as rounded integers
//! with locale digit grouping. Only the two groupings used by the dashboard
//! are supported.

/// Digit grouping convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// `it-IT`: `.` separator, integers below 10 000 are not grouped
    Italian,
    /// `en-US`: `,` separator from 1 000 upwards
    English,
}

impl Grouping {
    fn separator(self) -> char {
        match self {
            Grouping::Italian => '.',
            Grouping::English => ',',
        }
    }

    /// Minimum number of integer digits before grouping kicks in.
    fn min_digits(self) -> usize {
        match self {
            Grouping::Italian => 5,
            Grouping::English => 4,
        }
    }
}

/// Round half towards positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Enough fractional digits to print any `f64` exactly (the smallest
/// subnormal has 1074).
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Fixed-point rendering with `decimals` digits after the point.
///
/// Rounds the exact binary value half away from zero, like JavaScript's
/// `toFixed`: `12.25 -> "12.3"` but `0.15 -> "0.1"` since `0.15` is stored
/// as `0.1499...`.
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value:.decimals$}");
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + digit));
    }
    out
}

/// Round to an integer and insert group separators.
pub fn grouped_integer(value: f64, grouping: Grouping) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = round_half_up(value);
    let digits = format!("{:.0}", rounded.abs());
    let negative = rounded < 0.0;

    let body = if digits.len() < grouping.min_digits() {
        digits
    } else {
        let sep = grouping.separator();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}
