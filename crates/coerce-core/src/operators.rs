//! Operator coercion
//!
//! Binary `+` and the relational operators, which drive ToPrimitive with
//! different hints than equality does: `+` uses the default hint and
//! concatenates if either side became a string, relational comparison
//! prefers numbers and only compares text when both sides are strings.

use crate::convert::{Numeric, PreferredType, to_numeric, to_primitive, to_string_value};
use crate::error::{ConversionError, ConversionResult};
use crate::number::{compare_bigint_number, string_to_bigint};
use crate::value::Value;
use std::cmp::Ordering;
use std::fmt;

/// Relational operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl fmt::Display for RelationalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        };
        write!(f, "{}", symbol)
    }
}

/// Binary `+`
pub fn add(a: &Value, b: &Value) -> ConversionResult<Value> {
    let lprim = to_primitive(a, PreferredType::Default)?;
    let rprim = to_primitive(b, PreferredType::Default)?;

    if lprim.is_string() || rprim.is_string() {
        let mut out = to_string_value(&lprim)?;
        out.push_str(&to_string_value(&rprim)?);
        return Ok(Value::string(out));
    }

    match (to_numeric(&lprim)?, to_numeric(&rprim)?) {
        (Numeric::Number(x), Numeric::Number(y)) => Ok(Value::number(x + y)),
        (Numeric::BigInt(x), Numeric::BigInt(y)) => Ok(Value::bigint(x + y)),
        _ => Err(ConversionError::MixedBigInt),
    }
}

/// IsLessThan. `left_first` fixes the order in which operands are
/// converted; `None` is the "undefined" outcome (a NaN was involved).
fn is_less_than(x: &Value, y: &Value, left_first: bool) -> ConversionResult<Option<bool>> {
    let (px, py) = if left_first {
        let px = to_primitive(x, PreferredType::Number)?;
        let py = to_primitive(y, PreferredType::Number)?;
        (px, py)
    } else {
        let py = to_primitive(y, PreferredType::Number)?;
        let px = to_primitive(x, PreferredType::Number)?;
        (px, py)
    };

    match (&px, &py) {
        (Value::String(sx), Value::String(sy)) => {
            // Code unit order, not code point order
            return Ok(Some(sx.encode_utf16().cmp(sy.encode_utf16()) == Ordering::Less));
        }
        (Value::BigInt(bx), Value::String(sy)) => {
            return Ok(string_to_bigint(sy).map(|ny| **bx < ny));
        }
        (Value::String(sx), Value::BigInt(by)) => {
            return Ok(string_to_bigint(sx).map(|nx| nx < **by));
        }
        _ => {}
    }

    let (nx, ny) = if left_first {
        let nx = to_numeric(&px)?;
        (nx, to_numeric(&py)?)
    } else {
        let ny = to_numeric(&py)?;
        (to_numeric(&px)?, ny)
    };

    Ok(match (nx, ny) {
        (Numeric::Number(x), Numeric::Number(y)) => {
            if x.is_nan() || y.is_nan() {
                None
            } else {
                Some(x < y)
            }
        }
        (Numeric::BigInt(x), Numeric::BigInt(y)) => Some(x < y),
        (Numeric::BigInt(x), Numeric::Number(y)) => {
            compare_bigint_number(&x, y).map(|o| o == Ordering::Less)
        }
        (Numeric::Number(x), Numeric::BigInt(y)) => {
            compare_bigint_number(&y, x).map(|o| o == Ordering::Greater)
        }
    })
}

/// `a < b` before the undefined outcome is collapsed to `false`
pub fn less_than(a: &Value, b: &Value) -> ConversionResult<Option<bool>> {
    is_less_than(a, b, true)
}

/// Evaluate a relational operator
pub fn compare(op: RelationalOp, a: &Value, b: &Value) -> ConversionResult<bool> {
    Ok(match op {
        RelationalOp::Lt => is_less_than(a, b, true)?.unwrap_or(false),
        RelationalOp::Gt => is_less_than(b, a, false)?.unwrap_or(false),
        RelationalOp::Le => is_less_than(b, a, false)?.is_some_and(|r| !r),
        RelationalOp::Ge => is_less_than(a, b, true)?.is_some_and(|r| !r),
    })
}
