//! Reports printed by the `convert`, `compare` and `table` commands.
//!
//! Each report is a plain serializable struct; `render_text` produces the
//! terminal layout and `serde_json` the machine-readable one.

use coerce_core::{
    ConversionResult, PreferredType, RelationalOp, Value, add, compare, loose_equals,
    loose_equals_traced, number_to_string, same_value, same_value_zero, strict_equals,
    to_number, to_primitive, to_string_value, type_of,
};
use serde::Serialize;
use std::fmt::Write;

/// Result of a conversion that may throw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Rendered result
    Ok(String),
    /// Error message
    Error(String),
}

impl Outcome {
    fn from_result<T>(result: ConversionResult<T>, render: impl FnOnce(T) -> String) -> Self {
        match result {
            Ok(v) => Self::Ok(render(v)),
            Err(err) => Self::Error(err.to_string()),
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Ok(s) | Self::Error(s) => s,
        }
    }
}

fn show(value: &Value) -> String {
    format!("{:?}", value)
}

/// `coerce convert`
#[derive(Debug, Serialize)]
pub struct ConvertReport {
    /// Operand as parsed
    pub value: String,
    /// `typeof`
    pub type_of: &'static str,
    /// ToBoolean
    pub to_boolean: bool,
    /// ToNumber
    pub to_number: Outcome,
    /// ToString
    pub to_string: Outcome,
    /// ToPrimitive with the number hint
    pub to_primitive_number: Outcome,
    /// ToPrimitive with the string hint
    pub to_primitive_string: Outcome,
}

impl ConvertReport {
    /// Run every conversion on `value`
    pub fn new(value: &Value) -> Self {
        Self {
            value: show(value),
            type_of: type_of(value),
            to_boolean: value.to_boolean(),
            to_number: Outcome::from_result(to_number(value), number_to_string),
            to_string: Outcome::from_result(to_string_value(value), |s| format!("{:?}", s)),
            to_primitive_number: Outcome::from_result(
                to_primitive(value, PreferredType::Number),
                |v| show(&v),
            ),
            to_primitive_string: Outcome::from_result(
                to_primitive(value, PreferredType::String),
                |v| show(&v),
            ),
        }
    }

    /// Terminal layout
    pub fn render_text(&self) -> String {
        let rows = [
            ("typeof", self.type_of.to_string()),
            ("ToBoolean", self.to_boolean.to_string()),
            ("ToNumber", self.to_number.text().to_string()),
            ("ToString", self.to_string.text().to_string()),
            ("ToPrimitive(number)", self.to_primitive_number.text().to_string()),
            ("ToPrimitive(string)", self.to_primitive_string.text().to_string()),
        ];
        let mut out = format!("{}\n", self.value);
        for (label, result) in rows {
            let _ = writeln!(out, "  {:<20} {}", label, result);
        }
        out
    }
}

/// `coerce compare`
#[derive(Debug, Serialize)]
pub struct CompareReport {
    /// Left operand as parsed
    pub left: String,
    /// Right operand as parsed
    pub right: String,
    /// `left == right`
    pub loose: bool,
    /// `left === right`
    pub strict: bool,
    /// `Object.is(left, right)`
    pub same_value: bool,
    /// SameValueZero
    pub same_value_zero: bool,
    /// `left < right`
    pub less_than: Outcome,
    /// `left + right`
    pub add: Outcome,
    /// Loose equality steps, when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

impl CompareReport {
    /// Compare two operands with every relation
    pub fn new(left: &Value, right: &Value, trace: bool) -> Self {
        let (loose, steps) = if trace {
            let (result, steps) = loose_equals_traced(left, right);
            (result, steps.iter().map(ToString::to_string).collect())
        } else {
            (loose_equals(left, right), Vec::new())
        };

        Self {
            left: show(left),
            right: show(right),
            loose,
            strict: strict_equals(left, right),
            same_value: same_value(left, right),
            same_value_zero: same_value_zero(left, right),
            less_than: Outcome::from_result(compare(RelationalOp::Lt, left, right), |b| {
                b.to_string()
            }),
            add: Outcome::from_result(add(left, right), |v| show(&v)),
            steps,
        }
    }

    /// Terminal layout
    pub fn render_text(&self) -> String {
        let (l, r) = (&self.left, &self.right);
        let mut out = String::new();
        let _ = writeln!(out, "{} == {}  ->  {}", l, r, self.loose);
        let _ = writeln!(out, "{} === {}  ->  {}", l, r, self.strict);
        let _ = writeln!(out, "Object.is({}, {})  ->  {}", l, r, self.same_value);
        let _ = writeln!(out, "SameValueZero({}, {})  ->  {}", l, r, self.same_value_zero);
        let _ = writeln!(out, "{} < {}  ->  {}", l, r, self.less_than.text());
        let _ = writeln!(out, "{} + {}  ->  {}", l, r, self.add.text());
        if !self.steps.is_empty() {
            let _ = writeln!(out, "steps:");
            for (i, step) in self.steps.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, step);
            }
        }
        out
    }
}

/// Operands of the classic `==` table
pub const TABLE_OPERANDS: &[&str] = &[
    "true", "false", "1", "0", "-1", "\"true\"", "\"false\"", "\"1\"", "\"0\"", "\"-1\"", "\"\"",
    "null", "undefined", "Infinity", "-Infinity", "[]", "{}", "[[]]", "[0]", "[1]", "NaN",
];

/// `coerce table`
#[derive(Debug, Serialize)]
pub struct TableReport {
    /// Row and column labels
    pub operands: Vec<String>,
    /// `rows[i][j]` is `operands[i] == operands[j]`
    pub rows: Vec<Vec<bool>>,
}

impl TableReport {
    /// Build the matrix. Each operand is a single value, so the diagonal
    /// compares an object with itself.
    pub fn new(labels: &[&str], values: &[Value]) -> Self {
        let rows = values
            .iter()
            .map(|a| values.iter().map(|b| loose_equals(a, b)).collect())
            .collect();
        Self {
            operands: labels.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    /// Terminal layout: `#` marks equal pairs
    pub fn render_text(&self) -> String {
        let width = self.operands.iter().map(String::len).max().unwrap_or(0);
        let mut out = String::new();
        for (label, row) in self.operands.iter().zip(&self.rows) {
            let cells: String = row
                .iter()
                .map(|&eq| if eq { " #" } else { " ." })
                .collect();
            let _ = writeln!(out, "{:>width$} {}", label, cells, width = width);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::parse_literal;

    #[test]
    fn test_convert_report() {
        let report = ConvertReport::new(&Value::array([Value::int32(1), Value::int32(2)]));
        assert_eq!(report.type_of, "object");
        assert!(report.to_boolean);
        assert_eq!(report.to_number, Outcome::Ok("NaN".to_string()));
        assert_eq!(report.to_string, Outcome::Ok("\"1,2\"".to_string()));
        assert!(report.render_text().contains("ToPrimitive(number)"));
    }

    #[test]
    fn test_convert_report_symbol_errors() {
        let report = ConvertReport::new(&Value::new_symbol(Some("s")));
        assert!(matches!(report.to_number, Outcome::Error(_)));
        assert!(matches!(report.to_string, Outcome::Error(_)));
        assert_eq!(report.to_primitive_string, Outcome::Ok("Symbol(s)".to_string()));
    }

    #[test]
    fn test_compare_report_with_steps() {
        let report = CompareReport::new(&Value::array([]), &Value::boolean(false), true);
        assert!(report.loose);
        assert!(!report.strict);
        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.add, Outcome::Ok("\"false\"".to_string()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["loose"], serde_json::json!(true));
        assert_eq!(json["add"]["ok"], serde_json::json!("\"false\""));
    }

    #[test]
    fn test_compare_report_omits_steps_without_trace() {
        let report = CompareReport::new(&Value::int32(1), &Value::string("1"), false);
        assert!(report.steps.is_empty());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("steps").is_none());
    }

    #[test]
    fn test_table_report() {
        let values: Vec<Value> = TABLE_OPERANDS
            .iter()
            .map(|s| parse_literal(s).unwrap())
            .collect();
        let table = TableReport::new(TABLE_OPERANDS, &values);
        let index = |label: &str| TABLE_OPERANDS.iter().position(|s| *s == label).unwrap();

        assert!(table.rows[index("null")][index("undefined")]);
        assert!(table.rows[index("false")][index("[]")]);
        assert!(table.rows[index("[]")][index("[]")]);
        assert!(!table.rows[index("NaN")][index("NaN")]);
        assert!(!table.rows[index("{}")][index("[]")]);
        assert_eq!(table.render_text().lines().count(), TABLE_OPERANDS.len());
    }
}
