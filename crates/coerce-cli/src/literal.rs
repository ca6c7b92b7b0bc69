//! Value literal parser for command-line operands.
//!
//! Accepts the literal forms of the language's values only, never
//! expressions: `undefined`, `null`, `true`, `false`, numbers (`-0`,
//! `1.5e3`, `0x1f`, `NaN`, `Infinity`), BigInts (`10n`), quoted strings,
//! `Symbol()` / `Symbol("desc")`, arrays `[a, b]`, and objects `{}` or
//! `{ valueOf: <lit>, toString: <lit>, toPrimitive: <lit> }` whose methods
//! return the given literal.
//!
//! Every parse allocates fresh objects and symbols, so `{}` parsed twice
//! yields two distinct objects.

use coerce_core::{
    FixedHooks, JsObject, MAX_NESTING_DEPTH, ObjectKind, Value, string_to_bigint, string_to_number,
};
use thiserror::Error;

/// Literal parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// Input ended in the middle of a literal
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A character that cannot start or continue the current literal
    #[error("unexpected '{found}' at offset {offset}")]
    Unexpected { found: char, offset: usize },

    /// Malformed numeric or BigInt literal
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    /// Identifier that is not a value keyword
    #[error("unknown identifier '{name}' at offset {offset}")]
    UnknownIdentifier { name: String, offset: usize },

    /// Object key other than valueOf / toString / toPrimitive
    #[error("unsupported object method '{name}' at offset {offset}")]
    UnknownMethod { name: String, offset: usize },

    /// Arrays or objects nested deeper than the engine converts
    #[error("literal nested too deep at offset {offset}")]
    NestingTooDeep { offset: usize },

    /// Input continues after a complete literal
    #[error("trailing input at offset {offset}")]
    Trailing { offset: usize },
}

type ParseResult<T> = Result<T, LiteralError>;

/// Parse a single value literal.
pub fn parse_literal(src: &str) -> ParseResult<Value> {
    let mut parser = Parser {
        src,
        pos: 0,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos < src.len() {
        return Err(LiteralError::Trailing { offset: parser.pos });
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        self.skip_whitespace();
        let offset = self.pos;
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(found) => Err(LiteralError::Unexpected { found, offset }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn value(&mut self) -> ParseResult<Value> {
        self.skip_whitespace();
        let offset = self.pos;
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('"' | '\'') => self.string().map(Value::string),
            Some('[') => self.nested(Self::array),
            Some('{') => self.nested(Self::object),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.keyword(),
            Some(found) => Err(LiteralError::Unexpected { found, offset }),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> ParseResult<Value>) -> ParseResult<Value> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(LiteralError::NestingTooDeep { offset: self.pos });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn identifier(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.bump();
        }
        &src[start..self.pos]
    }

    fn keyword(&mut self) -> ParseResult<Value> {
        let offset = self.pos;
        let name = self.identifier();
        match name {
            "undefined" => Ok(Value::undefined()),
            "null" => Ok(Value::null()),
            "true" => Ok(Value::boolean(true)),
            "false" => Ok(Value::boolean(false)),
            "NaN" => Ok(Value::nan()),
            "Infinity" => Ok(Value::number(f64::INFINITY)),
            "Symbol" => self.symbol(),
            _ => Err(LiteralError::UnknownIdentifier {
                name: name.to_string(),
                offset,
            }),
        }
    }

    fn symbol(&mut self) -> ParseResult<Value> {
        self.expect('(')?;
        self.skip_whitespace();
        let description = match self.peek() {
            Some('"' | '\'') => Some(self.string()?),
            _ => None,
        };
        self.expect(')')?;
        Ok(Value::new_symbol(description.as_deref()))
    }

    fn number(&mut self) -> ParseResult<Value> {
        let offset = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };

        if self.peek() == Some('I') {
            let name_offset = self.pos;
            return match self.identifier() {
                "Infinity" => Ok(Value::number(if negative {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                })),
                other => Err(LiteralError::UnknownIdentifier {
                    name: other.to_string(),
                    offset: name_offset,
                }),
            };
        }

        let start = self.pos;
        let mut prev = None;
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-') && matches!(prev, Some('e' | 'E'));
            if !(c.is_ascii_alphanumeric() || c == '.' || exponent_sign) {
                break;
            }
            prev = Some(c);
            self.bump();
        }
        let src = self.src;
        let token = &src[start..self.pos];
        let invalid = || LiteralError::InvalidNumber {
            text: src[offset..self.pos].to_string(),
            offset,
        };

        if let Some(digits) = token.strip_suffix('n') {
            let magnitude = string_to_bigint(digits)
                .filter(|_| !digits.is_empty() && !digits.contains(['+', '-']))
                .ok_or_else(invalid)?;
            return Ok(Value::bigint(if negative { -magnitude } else { magnitude }));
        }

        let n = string_to_number(token);
        if token.is_empty() || n.is_nan() {
            return Err(invalid());
        }
        Ok(Value::number(if negative { -n } else { n }))
    }

    fn string(&mut self) -> ParseResult<String> {
        let quote = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let mut out = String::new();
        loop {
            let offset = self.pos;
            match self.bump() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = match self.bump() {
                        None => return Err(LiteralError::UnexpectedEnd),
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some(c @ ('\\' | '"' | '\'')) => c,
                        Some(found) => return Err(LiteralError::Unexpected { found, offset }),
                    };
                    out.push(escaped);
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn array(&mut self) -> ParseResult<Value> {
        self.expect('[')?;
        let mut elements = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(Value::array(elements));
        }
        loop {
            elements.push(self.value()?);
            self.skip_whitespace();
            let offset = self.pos;
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Value::array(elements)),
                Some(found) => return Err(LiteralError::Unexpected { found, offset }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn object(&mut self) -> ParseResult<Value> {
        self.expect('{')?;
        let mut hooks = FixedHooks::default();

        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(Value::new_object());
        }

        loop {
            self.skip_whitespace();
            let offset = self.pos;
            let name = self.identifier();
            let slot = match name {
                "valueOf" => &mut hooks.value_of,
                "toString" => &mut hooks.to_string,
                "toPrimitive" => &mut hooks.to_primitive,
                _ => {
                    return Err(LiteralError::UnknownMethod {
                        name: name.to_string(),
                        offset,
                    });
                }
            };
            self.expect(':')?;
            *slot = Some(self.value()?);

            self.skip_whitespace();
            let offset = self.pos;
            match self.bump() {
                Some(',') => continue,
                Some('}') => break,
                Some(found) => return Err(LiteralError::Unexpected { found, offset }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }

        Ok(Value::object(JsObject::with_hooks(ObjectKind::Ordinary, hooks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coerce_core::{loose_equals, same_value, to_string_value};

    #[test]
    fn test_keywords() {
        assert!(parse_literal("undefined").unwrap().is_undefined());
        assert!(parse_literal(" null ").unwrap().is_null());
        assert_eq!(parse_literal("true").unwrap().as_boolean(), Some(true));
        assert!(parse_literal("NaN").unwrap().is_nan());
        assert_eq!(
            parse_literal("-Infinity").unwrap().as_number(),
            Some(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_literal("42").unwrap().as_number(), Some(42.0));
        assert_eq!(parse_literal("1.5e3").unwrap().as_number(), Some(1500.0));
        assert_eq!(parse_literal("2e-1").unwrap().as_number(), Some(0.2));
        assert_eq!(parse_literal("0x1f").unwrap().as_number(), Some(31.0));
        assert!(same_value(
            &parse_literal("-0").unwrap(),
            &Value::number(-0.0)
        ));
        assert!(matches!(
            parse_literal("12abc"),
            Err(LiteralError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_bigints() {
        assert_eq!(parse_literal("10n").unwrap(), Value::bigint(10));
        assert_eq!(parse_literal("-7n").unwrap(), Value::bigint(-7));
        assert_eq!(parse_literal("0xffn").unwrap(), Value::bigint(255));
        assert!(parse_literal("1.5n").is_err());
        assert!(parse_literal("n").is_err());
    }

    #[test]
    fn test_strings() {
        assert_eq!(parse_literal("\"a b\"").unwrap().as_str(), Some("a b"));
        assert_eq!(parse_literal("'it\\'s'").unwrap().as_str(), Some("it's"));
        assert_eq!(parse_literal("\"\\t\"").unwrap().as_str(), Some("\t"));
        assert_eq!(parse_literal("\"open"), Err(LiteralError::UnexpectedEnd));
    }

    #[test]
    fn test_symbols_are_fresh() {
        let a = parse_literal("Symbol(\"k\")").unwrap();
        let b = parse_literal("Symbol(\"k\")").unwrap();
        assert!(a.is_symbol());
        assert!(!loose_equals(&a, &b));
        assert!(parse_literal("Symbol()").unwrap().is_symbol());
    }

    #[test]
    fn test_arrays() {
        let arr = parse_literal("[1, \"2\", [null], []]").unwrap();
        assert!(arr.is_array());
        assert_eq!(to_string_value(&arr).unwrap(), "1,2,,");
        assert!(parse_literal("[]").unwrap().is_array());
        assert_eq!(parse_literal("[1,"), Err(LiteralError::UnexpectedEnd));
    }

    #[test]
    fn test_objects() {
        let plain = parse_literal("{}").unwrap();
        assert!(plain.is_object());
        assert!(!plain.is_array());
        assert!(!loose_equals(&plain, &parse_literal("{}").unwrap()));

        assert!(plain.as_object().unwrap().hooks().is_none());

        let hooked = parse_literal("{ valueOf: 3, toString: \"three\" }").unwrap();
        assert!(hooked.as_object().unwrap().hooks().is_some());
        assert!(loose_equals(&hooked, &Value::int32(3)));
        assert_eq!(to_string_value(&hooked).unwrap(), "three");

        assert!(matches!(
            parse_literal("{ foo: 1 }"),
            Err(LiteralError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = "[".repeat(100_000);
        assert_eq!(
            parse_literal(&deep),
            Err(LiteralError::NestingTooDeep {
                offset: MAX_NESTING_DEPTH
            })
        );

        let at_limit = format!(
            "{}1{}",
            "[".repeat(MAX_NESTING_DEPTH),
            "]".repeat(MAX_NESTING_DEPTH)
        );
        assert!(parse_literal(&at_limit).unwrap().is_array());

        let objects = "{ valueOf: ".repeat(MAX_NESTING_DEPTH + 1);
        assert!(matches!(
            parse_literal(&objects),
            Err(LiteralError::NestingTooDeep { .. })
        ));
    }

    #[test]
    fn test_rejects_expressions() {
        assert_eq!(
            parse_literal("1 + 2"),
            Err(LiteralError::Trailing { offset: 2 })
        );
        assert!(matches!(
            parse_literal("foo"),
            Err(LiteralError::UnknownIdentifier { .. })
        ));
        assert_eq!(parse_literal(""), Err(LiteralError::UnexpectedEnd));
    }
}
