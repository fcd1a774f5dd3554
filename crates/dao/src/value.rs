//! Literal values and data truthiness.

use serde_json::{Number, Value};
use std::fmt;

/// Scalar attribute value or text content.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
}

impl Literal {
    /// `false` and the empty string are skipped when they appear as children.
    pub fn is_skipped(&self) -> bool {
        match self {
            Literal::Bool(b) => !b,
            Literal::String(s) => s.is_empty(),
            Literal::Number(_) => false,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => number_to_json(*n),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }
}

/// Largest magnitude at which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integral numbers export as JSON integers so `2` reads back as `2`.
fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => f.write_str(s),
            Literal::Number(n) => write_number(f, *n),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Integral numbers print without a fractional part (`5`, not `5.0`).
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value as f64)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// Data truthiness: `null`, `false`, `0`, NaN and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Scalar data as a literal; `None` for null, arrays and objects.
pub fn literal_from_data(value: &Value) -> Option<Literal> {
    match value {
        Value::String(s) => Some(Literal::String(s.clone())),
        Value::Number(n) => n.as_f64().map(Literal::Number),
        Value::Bool(b) => Some(Literal::Bool(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_display_like_data_values() {
        assert_eq!(Literal::Number(5.0).to_string(), "5");
        assert_eq!(Literal::Number(-2.0).to_string(), "-2");
        assert_eq!(Literal::Number(2.5).to_string(), "2.5");
        assert_eq!(Literal::Bool(true).to_string(), "true");
    }

    #[test]
    fn integral_numbers_export_as_integers() {
        assert_eq!(serde_json::to_string(&Literal::Number(2.0).to_json()).unwrap(), "2");
        assert_eq!(serde_json::to_string(&Literal::Number(-7.0).to_json()).unwrap(), "-7");
        assert_eq!(serde_json::to_string(&Literal::Number(1.5).to_json()).unwrap(), "1.5");
        assert_eq!(Literal::Number(1e300).to_json(), json!(1e300));
        assert_eq!(Literal::Number(f64::NAN).to_json(), json!(null));
    }

    #[test]
    fn truthiness_follows_data_semantics() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!(0.0)] {
            assert!(!is_truthy(&falsy), "{falsy}");
        }
        for truthy in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy}");
        }
    }

    #[test]
    fn only_false_and_empty_text_are_skipped() {
        assert!(Literal::Bool(false).is_skipped());
        assert!(Literal::from("").is_skipped());
        assert!(!Literal::Number(0.0).is_skipped());
        assert!(!Literal::Bool(true).is_skipped());
    }
}
