use crate::{
    ast::Atom,
    lexer::{LexError, Lexer},
};

/// One parsed token value.
///
/// Expressions are built once from the token tree and never change
/// afterwards. Values nested through references are parsed on demand by the
/// evaluator with [`Expression::parse`] and carry neither path nor type.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    /// Dot-path of the value inside the tree, ending in `.value` or `.value.<key>`
    pub path: Option<String>,

    /// Type tag of the enclosing token (`color`, `spacing`, `typography`, ...)
    pub token_type: Option<String>,

    /// Sub-key when the value is one member of a composite token
    pub member: Option<String>,

    /// Whitespace-stripped source text
    pub source: String,

    /// Atoms in source order
    pub atoms: Vec<Atom>,

    /// False as soon as one literal is not a number
    pub can_be_evaluated_to_number: bool,
}

impl Expression {
    /// Parse a value that belongs to a token at `path` of type `token_type`.
    pub fn new(
        text: &str,
        path: impl Into<String>,
        token_type: impl Into<String>,
    ) -> Result<Self, LexError> {
        let mut expression = Self::parse(text)?;
        expression.path = Some(path.into());
        expression.token_type = Some(token_type.into());
        Ok(expression)
    }

    /// Parse one member of a composite token, e.g. `fontSize` of a typography token.
    pub fn member(
        text: &str,
        path: impl Into<String>,
        token_type: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, LexError> {
        let mut expression = Self::new(text, path, token_type)?;
        expression.member = Some(key.into());
        Ok(expression)
    }

    /// Parse a free-standing value with no path or type.
    pub fn parse(text: &str) -> Result<Self, LexError> {
        let lexed = Lexer::new(text).tokenize()?;

        Ok(Expression {
            path: None,
            token_type: None,
            member: None,
            source: lexed.source,
            atoms: lexed.atoms,
            can_be_evaluated_to_number: lexed.numeric,
        })
    }

    /// Reference atoms, in source order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().filter_map(|atom| match atom {
            Atom::Reference(reference) => Some(reference.as_str()),
            _ => None,
        })
    }

    /// Sub-key of a composite token member (`fontSize` in `heading.value.fontSize`).
    pub fn composite_key(&self) -> Option<&str> {
        self.member.as_deref()
    }

    pub fn is_composite_member(&self) -> bool {
        self.composite_key().is_some()
    }
}

#[test]
fn test_composite_key() {
    let simple = Expression::new("4px", "spacing.sm.value", "spacing").unwrap();
    assert_eq!(simple.composite_key(), None);

    let member =
        Expression::member("16px", "heading.value.fontSize", "typography", "fontSize").unwrap();
    assert_eq!(member.composite_key(), Some("fontSize"));
    assert!(member.is_composite_member());
}

#[test]
fn test_references_in_order() {
    let expr = Expression::parse("{a.b}+{c}*2").unwrap();
    let refs: Vec<_> = expr.references().collect();
    assert_eq!(refs, vec!["{a.b}", "{c}"]);
}
