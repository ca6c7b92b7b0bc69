//! Equality relations
//!
//! - `loose_equals`: abstract equality (`==`), with coercion
//! - `strict_equals`: strict equality (`===`), no coercion
//! - `same_value`: `Object.is`
//! - `same_value_zero`: `Array.prototype.includes` / Map key equality
//!
//! Loose equality is a loop over the pair of operand tags. Each iteration
//! either settles the comparison or replaces one operand by a "simpler"
//! value (Boolean -> Number, String -> Number/BigInt, Object -> primitive),
//! so it terminates after a handful of hops. `loose_equals_traced` records
//! every iteration as an [`EqualityStep`].

use crate::convert::{PreferredType, to_primitive};
use crate::error::ConversionError;
use crate::number::{bigint_equals_number, string_to_bigint, string_to_number};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The rule of the loose equality algorithm applied in one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EqualityRule {
    /// Same type: compared with strict equality
    SameType,
    /// `null == undefined`
    Nullish,
    /// `null`/`undefined` against anything else
    NullishMismatch,
    /// String operand converted with StringToNumber
    StringToNumber,
    /// String operand converted with StringToBigInt
    StringToBigInt,
    /// Boolean operand converted to 0 or 1
    BooleanToNumber,
    /// Object operand converted with ToPrimitive
    ObjectToPrimitive,
    /// BigInt compared against a Number by mathematical value
    NumberBigInt,
    /// ToPrimitive threw; the comparison is false
    ConversionFailed(ConversionError),
    /// No rule relates the two types
    Incomparable,
}

impl fmt::Display for EqualityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameType => write!(f, "same type, strict comparison"),
            Self::Nullish => write!(f, "null and undefined are loosely equal"),
            Self::NullishMismatch => write!(f, "null/undefined only equal each other"),
            Self::StringToNumber => write!(f, "string converted to number"),
            Self::StringToBigInt => write!(f, "string converted to bigint"),
            Self::BooleanToNumber => write!(f, "boolean converted to number"),
            Self::ObjectToPrimitive => write!(f, "object converted to primitive"),
            Self::NumberBigInt => write!(f, "number and bigint compared by value"),
            Self::ConversionFailed(err) => write!(f, "conversion failed ({})", err),
            Self::Incomparable => write!(f, "types are never loosely equal"),
        }
    }
}

/// One iteration of loose equality: the rule and the operands it produced
#[derive(Debug, Clone)]
pub struct EqualityStep {
    /// Rule applied
    pub rule: EqualityRule,
    /// Left operand after the rule
    pub left: Value,
    /// Right operand after the rule
    pub right: Value,
}

impl fmt::Display for EqualityStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} == {:?}  ({})", self.left, self.right, self.rule)
    }
}

enum Dispatch {
    Settled(EqualityRule, bool),
    Coerced(EqualityRule, Value, Value),
}

fn dispatch(left: &Value, right: &Value) -> Dispatch {
    use Value::*;

    if left.kind() == right.kind() {
        return Dispatch::Settled(EqualityRule::SameType, strict_equals(left, right));
    }

    match (left, right) {
        (Null | Undefined, Null | Undefined) => Dispatch::Settled(EqualityRule::Nullish, true),
        (Null | Undefined, _) | (_, Null | Undefined) => {
            Dispatch::Settled(EqualityRule::NullishMismatch, false)
        }
        (Number(_), String(s)) => Dispatch::Coerced(
            EqualityRule::StringToNumber,
            left.clone(),
            Value::number(string_to_number(s)),
        ),
        (String(s), Number(_)) => Dispatch::Coerced(
            EqualityRule::StringToNumber,
            Value::number(string_to_number(s)),
            right.clone(),
        ),
        (BigInt(_), String(s)) => match string_to_bigint(s) {
            Some(n) => Dispatch::Coerced(EqualityRule::StringToBigInt, left.clone(), Value::bigint(n)),
            None => Dispatch::Settled(EqualityRule::StringToBigInt, false),
        },
        (String(s), BigInt(_)) => match string_to_bigint(s) {
            Some(n) => Dispatch::Coerced(EqualityRule::StringToBigInt, Value::bigint(n), right.clone()),
            None => Dispatch::Settled(EqualityRule::StringToBigInt, false),
        },
        (Boolean(b), _) => Dispatch::Coerced(
            EqualityRule::BooleanToNumber,
            Value::number(if *b { 1.0 } else { 0.0 }),
            right.clone(),
        ),
        (_, Boolean(b)) => Dispatch::Coerced(
            EqualityRule::BooleanToNumber,
            left.clone(),
            Value::number(if *b { 1.0 } else { 0.0 }),
        ),
        (Object(_), _) => match to_primitive(left, PreferredType::Default) {
            Ok(prim) => Dispatch::Coerced(EqualityRule::ObjectToPrimitive, prim, right.clone()),
            Err(err) => Dispatch::Settled(EqualityRule::ConversionFailed(err), false),
        },
        (_, Object(_)) => match to_primitive(right, PreferredType::Default) {
            Ok(prim) => Dispatch::Coerced(EqualityRule::ObjectToPrimitive, left.clone(), prim),
            Err(err) => Dispatch::Settled(EqualityRule::ConversionFailed(err), false),
        },
        (BigInt(b), Number(n)) | (Number(n), BigInt(b)) => {
            Dispatch::Settled(EqualityRule::NumberBigInt, bigint_equals_number(b, *n))
        }
        _ => Dispatch::Settled(EqualityRule::Incomparable, false),
    }
}

fn loose_equals_with(a: &Value, b: &Value, mut on_step: impl FnMut(EqualityStep)) -> bool {
    let mut left = a.clone();
    let mut right = b.clone();

    loop {
        match dispatch(&left, &right) {
            Dispatch::Settled(rule, result) => {
                trace!(%rule, ?left, ?right, result, "loose equality settled");
                on_step(EqualityStep { rule, left, right });
                return result;
            }
            Dispatch::Coerced(rule, l, r) => {
                trace!(%rule, left = ?l, right = ?r, "loose equality coerced");
                left = l;
                right = r;
                on_step(EqualityStep {
                    rule,
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }
    }
}

/// Abstract equality comparison (==). Total: never fails.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    loose_equals_with(a, b, |_| {})
}

/// Abstract equality comparison that also returns the rules applied
pub fn loose_equals_traced(a: &Value, b: &Value) -> (bool, Vec<EqualityStep>) {
    let mut steps = Vec::new();
    let result = loose_equals_with(a, b, |step| steps.push(step));
    (result, steps)
}

/// Strict equality comparison (===)
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y, // NaN !== NaN, +0 === -0
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => Arc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// SameValue comparison (`Object.is`).
/// Like strict equality but NaN is NaN and +0 is not -0.
pub fn same_value(a: &Value, b: &Value) -> bool {
    if let (Some(n1), Some(n2)) = (a.as_number(), b.as_number()) {
        if n1.is_nan() && n2.is_nan() {
            return true;
        }
        if n1 == 0.0 && n2 == 0.0 {
            return n1.is_sign_positive() == n2.is_sign_positive();
        }
        n1 == n2
    } else {
        strict_equals(a, b)
    }
}

/// SameValueZero comparison (used by Array.prototype.includes, Set, Map).
/// Like strict equality but NaN equals NaN.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    if let (Some(n1), Some(n2)) = (a.as_number(), b.as_number()) {
        if n1.is_nan() && n2.is_nan() {
            return true;
        }
        n1 == n2
    } else {
        strict_equals(a, b)
    }
}
