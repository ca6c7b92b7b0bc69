//! Type conversion abstract operations
//!
//! `to_boolean`, `to_number`, `to_numeric`, `to_primitive` and
//! `to_string_value` follow the language's ToBoolean / ToNumber /
//! ToNumeric / ToPrimitive / ToString operations over [`Value`].
//!
//! `FromValue` and `IntoValue` at the bottom of the file bridge between
//! `Value` and plain Rust types using those same conversions.

use crate::error::{ConversionError, ConversionResult};
use crate::number::{number_to_string, string_to_number};
use crate::object::{MAX_NESTING_DEPTH, ObjectRef};
use crate::value::Value;
use num_bigint::BigInt as NumBigInt;
use rustc_hash::FxHashSet;
use tracing::trace;

/// Preferred result type for ToPrimitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    /// No preference (`==`, binary `+`). Ordinary objects treat it as Number.
    Default,
    /// Prefer a number (`valueOf` first)
    Number,
    /// Prefer a string (`toString` first)
    String,
}

impl PreferredType {
    /// Hint name as passed to `[Symbol.toPrimitive]`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Result of ToNumeric
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    /// A Number
    Number(f64),
    /// A BigInt
    BigInt(NumBigInt),
}

#[derive(Debug, Clone, Copy)]
enum ConversionMethod {
    ValueOf,
    ToString,
}

impl ConversionMethod {
    fn name(self) -> &'static str {
        match self {
            Self::ValueOf => "valueOf",
            Self::ToString => "toString",
        }
    }
}

/// State shared across one top-level conversion.
///
/// Tracks the arrays currently being joined so that a self-referencing
/// array joins to `""` at the point of recursion instead of looping, and
/// how deep the join has nested.
#[derive(Default)]
struct Coercer {
    joining: FxHashSet<usize>,
    depth: usize,
}

impl Coercer {
    fn to_primitive(&mut self, value: &Value, hint: PreferredType) -> ConversionResult<Value> {
        let Value::Object(obj) = value else {
            return Ok(value.clone());
        };

        if let Some(result) = obj.hooks().and_then(|h| h.to_primitive(hint)) {
            let prim = result?;
            trace!(hint = hint.as_str(), result = ?prim, "exotic to_primitive");
            if prim.is_object() {
                return Err(ConversionError::ExoticReturnedObject);
            }
            return Ok(prim);
        }

        self.ordinary_to_primitive(obj, hint)
    }

    fn ordinary_to_primitive(
        &mut self,
        obj: &ObjectRef,
        hint: PreferredType,
    ) -> ConversionResult<Value> {
        let order = match hint {
            PreferredType::String => [ConversionMethod::ToString, ConversionMethod::ValueOf],
            PreferredType::Number | PreferredType::Default => {
                [ConversionMethod::ValueOf, ConversionMethod::ToString]
            }
        };

        for method in order {
            let result = self.call_method(obj, method)?;
            if !result.is_object() {
                trace!(
                    hint = hint.as_str(),
                    method = method.name(),
                    result = ?result,
                    "ordinary to_primitive"
                );
                return Ok(result);
            }
        }

        Err(ConversionError::NoPrimitive)
    }

    fn call_method(&mut self, obj: &ObjectRef, method: ConversionMethod) -> ConversionResult<Value> {
        let overridden = obj.hooks().and_then(|hooks| match method {
            ConversionMethod::ValueOf => hooks.value_of(),
            ConversionMethod::ToString => hooks.to_string(),
        });
        if let Some(result) = overridden {
            return result;
        }

        match method {
            // Object.prototype.valueOf returns the receiver
            ConversionMethod::ValueOf => Ok(Value::Object(obj.clone())),
            ConversionMethod::ToString => match obj.elements() {
                Some(elements) => self.join(obj, &elements).map(Value::string),
                None => Ok(Value::string("[object Object]")),
            },
        }
    }

    /// Array.prototype.join(",")
    fn join(&mut self, obj: &ObjectRef, elements: &[Value]) -> ConversionResult<String> {
        if !self.joining.insert(obj.addr()) {
            return Ok(String::new());
        }
        if self.depth >= MAX_NESTING_DEPTH {
            self.joining.remove(&obj.addr());
            trace!(depth = self.depth, "array join nested too deep");
            return Err(ConversionError::NestingTooDeep);
        }

        self.depth += 1;
        let result = self.join_elements(elements);
        self.depth -= 1;
        self.joining.remove(&obj.addr());
        result
    }

    fn join_elements(&mut self, elements: &[Value]) -> ConversionResult<String> {
        let mut parts = Vec::with_capacity(elements.len());
        for element in elements {
            if element.is_nullish() {
                parts.push(String::new());
                continue;
            }
            parts.push(self.to_string(element)?);
        }
        Ok(parts.join(","))
    }

    fn to_number(&mut self, value: &Value) -> ConversionResult<f64> {
        match value {
            Value::Undefined => Ok(f64::NAN),
            Value::Null => Ok(0.0),
            Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(*n),
            Value::String(s) => Ok(string_to_number(s)),
            Value::BigInt(_) => Err(ConversionError::BigIntToNumber),
            Value::Symbol(_) => Err(ConversionError::symbol_to_number()),
            Value::Object(_) => {
                let prim = self.to_primitive(value, PreferredType::Number)?;
                self.to_number(&prim)
            }
        }
    }

    fn to_string(&mut self, value: &Value) -> ConversionResult<String> {
        match value {
            Value::Undefined => Ok("undefined".to_string()),
            Value::Null => Ok("null".to_string()),
            Value::Boolean(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            Value::Number(n) => Ok(number_to_string(*n)),
            Value::BigInt(b) => Ok(b.to_string()),
            Value::String(s) => Ok(s.to_string()),
            Value::Symbol(_) => Err(ConversionError::symbol_to_string()),
            Value::Object(_) => {
                let prim = self.to_primitive(value, PreferredType::String)?;
                self.to_string(&prim)
            }
        }
    }
}

/// ToBoolean. Never fails.
pub fn to_boolean(value: &Value) -> bool {
    value.to_boolean()
}

/// ToPrimitive
///
/// Primitives are returned unchanged. Objects try `[Symbol.toPrimitive]`
/// first, then `valueOf`/`toString` in the order the hint selects.
pub fn to_primitive(value: &Value, hint: PreferredType) -> ConversionResult<Value> {
    Coercer::default().to_primitive(value, hint)
}

/// ToNumber
///
/// BigInt and Symbol operands are rejected; every other failure mode
/// produces `NaN` rather than an error.
pub fn to_number(value: &Value) -> ConversionResult<f64> {
    Coercer::default().to_number(value)
}

/// ToNumeric: like ToNumber, but a BigInt primitive is kept as a BigInt.
pub fn to_numeric(value: &Value) -> ConversionResult<Numeric> {
    let mut coercer = Coercer::default();
    let prim = coercer.to_primitive(value, PreferredType::Number)?;
    match prim {
        Value::BigInt(b) => Ok(Numeric::BigInt((*b).clone())),
        other => coercer.to_number(&other).map(Numeric::Number),
    }
}

/// ToString
pub fn to_string_value(value: &Value) -> ConversionResult<String> {
    Coercer::default().to_string(value)
}

/// ToInt32
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let wrapped = n.trunc().rem_euclid(4294967296.0);
    if wrapped >= 2147483648.0 {
        (wrapped - 4294967296.0) as i32
    } else {
        wrapped as i32
    }
}

/// ToUint32
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    n.trunc().rem_euclid(4294967296.0) as u32
}

/// Convert a `Value` into a Rust type using the language's coercions.
pub trait FromValue: Sized {
    /// Convert from a Value, failing where the coercion would throw.
    fn from_value(value: &Value) -> ConversionResult<Self>;
}

/// Convert a Rust type into a `Value`.
pub trait IntoValue {
    /// Convert into a Value.
    fn into_value(self) -> Value;
}

// ---------------------------------------------------------------------------
// FromValue implementations
// ---------------------------------------------------------------------------

impl FromValue for f64 {
    fn from_value(value: &Value) -> ConversionResult<Self> {
        to_number(value)
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> ConversionResult<Self> {
        to_number(value).map(to_int32)
    }
}

impl FromValue for u32 {
    fn from_value(value: &Value) -> ConversionResult<Self> {
        to_number(value).map(to_uint32)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> ConversionResult<Self> {
        Ok(value.to_boolean())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> ConversionResult<Self> {
        to_string_value(value)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> ConversionResult<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> ConversionResult<Self> {
        if value.is_nullish() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

// ---------------------------------------------------------------------------
// IntoValue implementations
// ---------------------------------------------------------------------------

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::number(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::int32(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::boolean(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::undefined()
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::undefined(),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::array(self.into_iter().map(IntoValue::into_value))
    }
}
