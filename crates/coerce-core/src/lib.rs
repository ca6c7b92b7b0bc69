//! # Coerce Core
//!
//! JavaScript value coercion and equality semantics as a Rust library.
//!
//! ## Design Principles
//!
//! - **Explicit sum type**: every conversion matches exhaustively on [`Value`]
//! - **Pure**: no operation mutates its inputs or keeps state between calls
//! - **Thread-safe**: values are `Send + Sync`
//! - **Total comparisons**: `==`, `===` and `Object.is` never fail; only
//!   explicit conversions return [`ConversionError`]
//!
//! ```
//! use coerce_core::{Value, loose_equals, same_value, strict_equals};
//!
//! assert!(loose_equals(&Value::array([]), &Value::number(0.0)));
//! assert!(!loose_equals(&Value::null(), &Value::number(0.0)));
//! assert!(strict_equals(&Value::number(0.0), &Value::number(-0.0)));
//! assert!(!same_value(&Value::number(0.0), &Value::number(-0.0)));
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod convert;
pub mod equality;
pub mod error;
pub mod number;
pub mod object;
pub mod operators;
pub mod value;

pub use convert::{
    FromValue, IntoValue, Numeric, PreferredType, to_boolean, to_number, to_numeric,
    to_primitive, to_string_value,
};
pub use equality::{
    EqualityRule, EqualityStep, loose_equals, loose_equals_traced, same_value, same_value_zero,
    strict_equals,
};
pub use error::{ConversionError, ConversionResult};
pub use number::{number_to_string, string_to_bigint, string_to_number};
pub use object::{ConversionHooks, FixedHooks, JsObject, MAX_NESTING_DEPTH, ObjectKind, ObjectRef};
pub use operators::{RelationalOp, add, compare, less_than};
pub use value::{Symbol, Value};

/// `typeof` operator
pub fn type_of(value: &Value) -> &'static str {
    value.type_of()
}
