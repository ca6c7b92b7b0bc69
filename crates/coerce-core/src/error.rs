//! Conversion error types

use thiserror::Error;

/// Failure of an explicit primitive conversion.
///
/// Comparisons never produce this error; it only escapes from the
/// conversion operations (`to_primitive`, `to_number`, `to_string_value`,
/// `to_numeric`) and the operator helpers built on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Every conversion method of an object returned another object
    #[error("TypeError: Cannot convert object to primitive value")]
    NoPrimitive,

    /// An exotic `to_primitive` hook returned an object
    #[error("TypeError: Symbol.toPrimitive returned a non-primitive value")]
    ExoticReturnedObject,

    /// A Symbol was implicitly converted to a number or string
    #[error("TypeError: Cannot convert a Symbol value to a {target}")]
    SymbolConversion {
        /// Target type name ("number" or "string")
        target: &'static str,
    },

    /// A BigInt was converted with ToNumber
    #[error("TypeError: Cannot convert a BigInt value to a number")]
    BigIntToNumber,

    /// Arithmetic mixed a BigInt with a Number
    #[error("TypeError: Cannot mix BigInt and other types, use explicit conversions")]
    MixedBigInt,

    /// Array nesting exceeded [`MAX_NESTING_DEPTH`](crate::object::MAX_NESTING_DEPTH)
    #[error("RangeError: Maximum call stack size exceeded")]
    NestingTooDeep,

    /// A conversion hook threw
    #[error("TypeError: {0}")]
    Thrown(String),
}

impl ConversionError {
    /// Create a symbol-to-number conversion error
    pub fn symbol_to_number() -> Self {
        Self::SymbolConversion { target: "number" }
    }

    /// Create a symbol-to-string conversion error
    pub fn symbol_to_string() -> Self {
        Self::SymbolConversion { target: "string" }
    }

    /// Create an error representing a throwing conversion hook
    pub fn thrown(msg: impl Into<String>) -> Self {
        Self::Thrown(msg.into())
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConversionError::NoPrimitive.to_string(),
            "TypeError: Cannot convert object to primitive value"
        );
        assert_eq!(
            ConversionError::symbol_to_string().to_string(),
            "TypeError: Cannot convert a Symbol value to a string"
        );
        assert_eq!(
            ConversionError::thrown("boom").to_string(),
            "TypeError: boom"
        );
        assert_eq!(
            ConversionError::NestingTooDeep.to_string(),
            "RangeError: Maximum call stack size exceeded"
        );
    }
}
