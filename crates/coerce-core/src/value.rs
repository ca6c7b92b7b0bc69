//! Dynamically typed values
//!
//! `Value` is an explicit tagged union over the eight language types.
//! Every payload that is not a scalar lives behind an `Arc`, so cloning a
//! value is cheap and values can be shared across threads.
//!
//! Identity matters for two variants:
//!
//! - `Symbol` values are equal only when they are the same symbol instance.
//! - `Object` values are equal only when they point at the same heap record.

use crate::object::{JsObject, ObjectRef};
use num_bigint::BigInt as NumBigInt;
use num_traits::Zero;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A JavaScript Symbol
#[derive(Debug)]
pub struct Symbol {
    /// Symbol description
    pub description: Option<String>,
    /// Unique ID
    pub id: u64,
}

impl Symbol {
    /// Allocate a fresh symbol with a process-unique id
    pub fn new(description: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            description: description.map(str::to_string),
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// `Symbol(desc)` rendering used by explicit `String(sym)`
    pub fn descriptive_string(&self) -> String {
        match &self.description {
            Some(desc) => format!("Symbol({})", desc),
            None => "Symbol()".to_string(),
        }
    }
}

/// A JavaScript value
#[derive(Clone)]
pub enum Value {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// IEEE 754 double (including NaN and -0)
    Number(f64),
    /// Arbitrary precision integer
    BigInt(Arc<NumBigInt>),
    /// Immutable text
    String(Arc<str>),
    /// Unique symbol
    Symbol(Arc<Symbol>),
    /// Reference to a heap object
    Object(ObjectRef),
}

impl Value {
    /// Create undefined value
    #[inline]
    pub const fn undefined() -> Self {
        Self::Undefined
    }

    /// Create null value
    #[inline]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create boolean value
    #[inline]
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Create number value
    #[inline]
    pub const fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Create number value from a 32-bit integer
    #[inline]
    pub fn int32(n: i32) -> Self {
        Self::Number(n as f64)
    }

    /// Create NaN
    #[inline]
    pub const fn nan() -> Self {
        Self::Number(f64::NAN)
    }

    /// Create string value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Self::String(s.into())
    }

    /// Create BigInt value
    pub fn bigint(value: impl Into<NumBigInt>) -> Self {
        Self::BigInt(Arc::new(value.into()))
    }

    /// Create a value holding a fresh symbol
    pub fn new_symbol(description: Option<&str>) -> Self {
        Self::Symbol(Symbol::new(description))
    }

    /// Wrap an existing symbol
    pub fn symbol(sym: Arc<Symbol>) -> Self {
        Self::Symbol(sym)
    }

    /// Wrap an existing object reference
    pub fn object(obj: ObjectRef) -> Self {
        Self::Object(obj)
    }

    /// Allocate a fresh ordinary object with no conversion hooks
    pub fn new_object() -> Self {
        Self::Object(JsObject::ordinary())
    }

    /// Allocate a fresh array holding `elements`
    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Object(JsObject::array(elements))
    }

    /// Check if undefined
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check if null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if null or undefined
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Check if boolean
    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Check if number
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Check if NaN
    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    /// Check if string
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Check if BigInt
    #[inline]
    pub fn is_bigint(&self) -> bool {
        matches!(self, Self::BigInt(_))
    }

    /// Check if symbol
    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Check if object (arrays included)
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Check if array
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Object(obj) if obj.is_array())
    }

    /// Check if primitive (anything but an object)
    #[inline]
    pub fn is_primitive(&self) -> bool {
        !self.is_object()
    }

    /// Get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as BigInt
    pub fn as_bigint(&self) -> Option<&NumBigInt> {
        match self {
            Self::BigInt(b) => Some(b),
            _ => None,
        }
    }

    /// Get as symbol
    pub fn as_symbol(&self) -> Option<&Arc<Symbol>> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get as object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Convert to boolean (ToBoolean)
    pub fn to_boolean(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => !n.is_nan() && *n != 0.0,
            Self::BigInt(b) => !b.is_zero(),
            Self::String(s) => !s.is_empty(),
            // Objects are always truthy, empty arrays included
            Self::Symbol(_) | Self::Object(_) => true,
        }
    }

    /// Get the type name (for typeof)
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "object", // typeof null === "object" (historical bug)
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Object(_) => "object",
        }
    }

    /// Tag of the variant, used for same-type dispatch
    pub(crate) fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Object(_) => ValueKind::Object,
        }
    }
}

/// Variant tag of a `Value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
    Object,
}

impl Default for Value {
    fn default() -> Self {
        Self::undefined()
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", crate::number::number_to_string(*n)),
            Self::BigInt(b) => write!(f, "{}n", b),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Symbol(s) => write!(f, "{}", s.descriptive_string()),
            Self::Object(obj) => write!(f, "{:?}", obj),
        }
    }
}

/// `==` on `Value` is strict equality: NaN != NaN, objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::equality::strict_equals(self, other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::int32(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::string(s)
    }
}

impl From<NumBigInt> for Value {
    fn from(b: NumBigInt) -> Self {
        Self::BigInt(Arc::new(b))
    }
}
