use std::fmt;

use rust_decimal::Decimal;

/// A resolved token value.
///
/// # Examples
///
/// ```
/// use quarksy::Value;
/// use rust_decimal::Decimal;
///
/// let number = Value::Number(Decimal::from(8));
/// let text = Value::Text("bold".to_string());
///
/// assert_eq!(number.to_string(), "8");
/// assert_eq!(text.to_string(), "bold");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Result of a formula made only of numbers and references to numbers
    Number(Decimal),

    /// Verbatim text, produced as soon as any literal is not a number
    Text(String),
}

impl Value {
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Output of the [`Evaluator`](crate::Evaluator): a value plus the unit of
/// the first unit-suffixed literal met while resolving it.
///
/// Text values never carry a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub value: Value,
    pub unit: Option<String>,
}

impl Evaluated {
    pub fn number(value: Decimal, unit: Option<String>) -> Self {
        Evaluated {
            value: Value::Number(value),
            unit,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Evaluated {
            value: Value::Text(value.into()),
            unit: None,
        }
    }
}

/// Value immediately followed by its unit, e.g. `8px` or `bold`.
impl fmt::Display for Evaluated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_deref().unwrap_or(""))
    }
}
