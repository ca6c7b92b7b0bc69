//! Text <-> numeric conversions
//!
//! - `string_to_number`: StringToNumber (the `Number("...")` grammar)
//! - `string_to_bigint`: StringToBigInt (the `BigInt("...")` grammar)
//! - `number_to_string`: Number::toString with radix 10
//! - exact comparisons between BigInt and Number values

use num_bigint::BigInt as NumBigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use std::cmp::Ordering;

/// Whitespace and line terminators stripped by StringToNumber.
///
/// Rust's `char::is_whitespace` agrees with the language set except for
/// U+0085 (not whitespace here) and U+FEFF (whitespace here).
pub fn is_js_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        c => c.is_whitespace(),
    }
}

fn trim_js_whitespace(s: &str) -> &str {
    s.trim_matches(is_js_whitespace)
}

/// Split off a `0x` / `0o` / `0b` prefix (either case).
fn radix_prefix(s: &str) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<NumBigInt> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    NumBigInt::parse_bytes(digits.as_bytes(), radix)
}

/// Check the StrDecimalLiteral grammar without its `Infinity` alternative.
fn is_decimal_literal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let bytes = body.as_bytes();
    let mut i = 0;
    let mut mantissa_digits = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exponent_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exponent_start {
            return false;
        }
    }
    i == bytes.len()
}

/// StringToNumber
///
/// Empty (after trimming) text is `0`; anything outside the numeric
/// literal grammar is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = trim_js_whitespace(s);
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some((radix, digits)) = radix_prefix(trimmed) {
        return parse_radix_digits(digits, radix)
            .and_then(|b| b.to_f64())
            .unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if !is_decimal_literal(trimmed) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// StringToBigInt
///
/// Returns `None` when the text is not an integer literal. Decimal
/// literals may carry a sign; prefixed literals may not.
pub fn string_to_bigint(s: &str) -> Option<NumBigInt> {
    let trimmed = trim_js_whitespace(s);
    if trimmed.is_empty() {
        return Some(NumBigInt::from(0));
    }

    if let Some((radix, digits)) = radix_prefix(trimmed) {
        return parse_radix_digits(digits, radix);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = parse_radix_digits(digits, 10)?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Shortest round-trip decimal digits of a positive finite number.
///
/// Returns the significant digits (no leading or trailing zeros) and the
/// position of the decimal point relative to the first digit, so that
/// `x = 0.DIGITS * 10^point`.
fn shortest_digits(x: f64) -> (String, i32) {
    let mut buffer = ryu::Buffer::new();
    let formatted = buffer.format_finite(x);

    let (mantissa, exponent) = match formatted.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (formatted, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let mut point = int_part.len() as i32 + exponent;

    let leading_zeros = digits.len() - digits.trim_start_matches('0').len();
    digits.drain(..leading_zeros);
    point -= leading_zeros as i32;

    let significant = digits.trim_end_matches('0').len();
    digits.truncate(significant);

    (digits, point)
}

/// Number::toString(10)
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string(); // -0 prints as "0"
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n < 0.0 {
        return format!("-{}", number_to_string(-n));
    }

    let (digits, point) = shortest_digits(n);
    let k = digits.len() as i32;

    if k <= point && point <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat_n('0', (point - k) as usize));
        out
    } else if 0 < point && point <= 21 {
        let (whole, frac) = digits.split_at(point as usize);
        format!("{}.{}", whole, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let e = point - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, e.abs())
        }
    }
}

/// Exact mathematical equality of a BigInt and a Number.
///
/// NaN, infinities and non-integral numbers equal no BigInt.
pub fn bigint_equals_number(b: &NumBigInt, n: f64) -> bool {
    if !n.is_finite() || n.fract() != 0.0 {
        return false;
    }
    NumBigInt::from_f64(n).is_some_and(|m| &m == b)
}

/// Exact ordering of a BigInt against a Number (`None` when `n` is NaN).
pub fn compare_bigint_number(b: &NumBigInt, n: f64) -> Option<Ordering> {
    if n.is_nan() {
        return None;
    }
    if n.is_infinite() {
        return Some(if n > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let floor = n.floor();
    let floor_big = NumBigInt::from_f64(floor)?;
    match b.cmp(&floor_big) {
        Ordering::Equal if n > floor => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_number_whitespace() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("   "), 0.0);
        assert_eq!(string_to_number("\t\n 12 \r"), 12.0);
        assert_eq!(string_to_number("\u{FEFF}7\u{3000}"), 7.0);
        assert!(string_to_number("\u{0085}1").is_nan());
    }

    #[test]
    fn test_string_to_number_decimal() {
        assert_eq!(string_to_number("42"), 42.0);
        assert_eq!(string_to_number("-1.5"), -1.5);
        assert_eq!(string_to_number("+.5"), 0.5);
        assert_eq!(string_to_number("5."), 5.0);
        assert_eq!(string_to_number("1e3"), 1000.0);
        assert_eq!(string_to_number("2E-2"), 0.02);
        assert!(string_to_number("-0").is_sign_negative());
    }

    #[test]
    fn test_string_to_number_rejects_garbage() {
        assert!(string_to_number("2a").is_nan());
        assert!(string_to_number(".").is_nan());
        assert!(string_to_number("1e").is_nan());
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("nan").is_nan());
        assert!(string_to_number("1_000").is_nan());
        assert!(string_to_number("1 2").is_nan());
        assert!(string_to_number("-0x10").is_nan());
    }

    #[test]
    fn test_string_to_number_special_forms() {
        assert_eq!(string_to_number("Infinity"), f64::INFINITY);
        assert_eq!(string_to_number(" -Infinity "), f64::NEG_INFINITY);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0o17"), 15.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert!(string_to_number("0x").is_nan());
        assert!(string_to_number("0b2").is_nan());
    }

    #[test]
    fn test_string_to_bigint() {
        assert_eq!(string_to_bigint(""), Some(NumBigInt::from(0)));
        assert_eq!(string_to_bigint(" 10 "), Some(NumBigInt::from(10)));
        assert_eq!(string_to_bigint("-12"), Some(NumBigInt::from(-12)));
        assert_eq!(string_to_bigint("0xff"), Some(NumBigInt::from(255)));
        assert_eq!(string_to_bigint("1.5"), None);
        assert_eq!(string_to_bigint("1e3"), None);
        assert_eq!(string_to_bigint("Infinity"), None);
        assert_eq!(string_to_bigint("-"), None);
        assert_eq!(string_to_bigint("1_0"), None);
    }

    #[test]
    fn test_number_to_string_integers() {
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-7.0), "-7");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
        assert_eq!(
            number_to_string(123456789012345680000.0),
            "123456789012345680000"
        );
    }

    #[test]
    fn test_number_to_string_fractions() {
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(0.000001), "0.000001");
        assert_eq!(number_to_string(-123.456), "-123.456");
    }

    #[test]
    fn test_number_to_string_exponent_forms() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e300), "1.5e+300");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(-1.25e-7), "-1.25e-7");
        assert_eq!(number_to_string(5e-324), "5e-324");
    }

    #[test]
    fn test_number_to_string_specials() {
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_bigint_number_equality() {
        let ten = NumBigInt::from(10);
        assert!(bigint_equals_number(&ten, 10.0));
        assert!(!bigint_equals_number(&ten, 10.5));
        assert!(!bigint_equals_number(&ten, f64::NAN));
        assert!(bigint_equals_number(&NumBigInt::from(0), -0.0));
        assert!(!bigint_equals_number(&ten, f64::INFINITY));
    }

    #[test]
    fn test_bigint_number_ordering() {
        let three = NumBigInt::from(3);
        assert_eq!(compare_bigint_number(&three, 3.5), Some(Ordering::Less));
        assert_eq!(compare_bigint_number(&three, 2.5), Some(Ordering::Greater));
        assert_eq!(compare_bigint_number(&three, 3.0), Some(Ordering::Equal));
        assert_eq!(
            compare_bigint_number(&three, f64::NEG_INFINITY),
            Some(Ordering::Greater)
        );
        assert_eq!(compare_bigint_number(&three, f64::NAN), None);
    }
}
