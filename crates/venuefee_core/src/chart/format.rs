//! Display strings for volumes, rates and cumulative fees.
//!
//! Decimal rounding is done on the exact binary value with ties going away
//! from zero, so `0.25` renders as `0.3` at one decimal. `format!("{:.1}")`
//! alone would give `0.2`.

/// Fractional digits in the longest terminating expansion of a finite `f64`
/// (the smallest subnormal, 2^-1074). Formatting at this precision is exact,
/// which leaves a single rounding step in [`to_fixed`].
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Volume in millions: `$1.5B`, `$25.0M`, `$500K`.
pub fn format_volume(volume: f64) -> String {
    if volume >= 1000.0 {
        format!("${}B", to_fixed(volume / 1000.0, 1))
    } else if volume >= 1.0 {
        format!("${}M", to_fixed(volume, 1))
    } else {
        format!("${}K", to_fixed(volume * 1000.0, 0))
    }
}

/// Rate in bps with an explicit sign for non-negative values: `+1.5bps`, `-0.2bps`.
pub fn format_fee(fee: f64) -> String {
    let sign = if fee >= 0.0 { "+" } else { "" };
    format!("{sign}{}bps", to_fixed(fee, 1))
}

/// Whole currency units with thousands separators: `$3,550`.
pub fn format_cumulative_fees(fees: f64) -> String {
    if fees.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if fees.is_sign_negative() { "-" } else { "" };
    if fees.is_infinite() {
        return format!("${sign}∞");
    }
    let whole = to_fixed(fees.abs(), 0);
    format!("${sign}{}", group_thousands(&whole))
}

/// Fixed-point rendering with `digits` decimals, ties away from zero.
fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let negative = value < 0.0;
    let precision = (digits + 1).max(EXACT_FRACTION_DIGITS);
    let expanded = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = expanded
        .split_once('.')
        .unwrap_or((expanded.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    let round_up = frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|digit| *digit >= b'5');
    if round_up {
        increment_digits(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(std::str::from_utf8(&kept[..int_len]).unwrap_or("0"));
    if digits > 0 {
        out.push('.');
        out.push_str(std::str::from_utf8(&kept[int_len..]).unwrap_or("0"));
    }
    out
}

/// Add one unit in the last place to a buffer of ASCII digits.
fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
