use rust_decimal::Decimal;

use crate::ast::Operator;

/// One typed piece of a token value.
///
/// A value is split into atoms by the [`Lexer`](crate::Lexer). Joining the
/// source text of all atoms gives back the (whitespace-stripped) value.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Arithmetic operator preceding the next term
    ///
    /// # Examples
    /// ```text
    /// 4+2      // Operator(Add) before `2`
    /// -{a}     // Operator(Subtract) before `{a}`
    /// ```
    Operator(Operator),

    /// Number with an optional unit suffix
    ///
    /// # Examples
    /// ```text
    /// 4        // value 4, unit ""
    /// 1.5rem   // value 1.5, unit "rem"
    /// 50%      // value 50, unit "%"
    /// ```
    Number {
        value: Decimal,
        unit: String,
        text: String,
    },

    /// Any literal that is not a number
    ///
    /// Evaluating an expression that contains one yields a string.
    ///
    /// # Examples
    /// ```text
    /// bold
    /// #ff0000
    /// ```
    Opaque(String),

    /// Brace-delimited path to another token, braces included
    ///
    /// # Examples
    /// ```text
    /// {spacing.sm}
    /// {color.base.value}
    /// ```
    Reference(String),
}

impl Atom {
    /// Text this atom was parsed from.
    pub fn source_text(&self) -> String {
        match self {
            Atom::Operator(op) => op.to_string(),
            Atom::Number { text, .. } => text.clone(),
            Atom::Opaque(text) => text.clone(),
            Atom::Reference(reference) => reference.clone(),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Atom::Reference(_))
    }

    /// The dotted path of a reference atom, without braces.
    pub fn reference_path(&self) -> Option<&str> {
        match self {
            Atom::Reference(reference) => Some(strip_braces(reference)),
            _ => None,
        }
    }
}

/// Strip the surrounding `{` `}` of a reference text.
pub fn strip_braces(reference: &str) -> &str {
    reference
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
        .unwrap_or(reference)
}
