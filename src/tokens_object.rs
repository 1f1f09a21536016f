use std::{fmt, str::FromStr};

use crate::{
    ast::Expression,
    evaluator::{EvalError, Evaluator},
    flatten::flatten,
    lexer::LexError,
    parser::{DEFAULT_TYPE, ParserRegistry},
    tree::{TokenTree, TreeError},
};

/// Errors raised while loading a token tree or answering a key lookup.
#[derive(Debug, thiserror::Error)]
pub enum TokensError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] LexError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    /// No expression path starts with the requested prefix
    #[error("No matching expressions found for path {0}")]
    NotFound(String),

    /// The prefix matched tokens of more than one type
    #[error("Wrong path. For path {path} found expressions with different types: {}", .types.join(", "))]
    ConflictingTypes { path: String, types: Vec<String> },

    /// Several expressions matched but only the single-value default parser applies
    #[error(
        "Found {count} expressions for path {path} - to support multiple matching expressions register a parser for their type"
    )]
    AmbiguousMatch { path: String, count: usize },

    #[error("Parser for type {0} not found")]
    UnknownParser(String),
}

/// A token tree with its parsed expressions, its evaluator and the parsers
/// used to format lookups.
///
/// # Examples
///
/// ```
/// use quarksy::TokensObject;
///
/// let tokens: TokensObject = r#"{
///     "spacing": { "sm": { "value": "4", "type": "spacing" } }
/// }"#.parse().unwrap();
///
/// assert_eq!(tokens.get_value_for_key("spacing.sm").unwrap(), "4px");
/// ```
pub struct TokensObject {
    tree: TokenTree,
    expressions: Vec<Expression>,
    evaluator: Evaluator,
    parsers: ParserRegistry,
}

impl TokensObject {
    /// Builds the container with only the default parser registered.
    pub fn new(tree: TokenTree) -> Result<Self, TokensError> {
        Self::with_parsers(tree, ParserRegistry::new())
    }

    /// Parses every value of `tree` and resolves every reference up front.
    pub fn with_parsers(tree: TokenTree, parsers: ParserRegistry) -> Result<Self, TokensError> {
        let expressions = flatten(&tree)?;
        let evaluator = Evaluator::new(&expressions, &tree)?;
        tracing::debug!(
            expressions = expressions.len(),
            references = evaluator.lookup().len(),
            "loaded token tree"
        );

        Ok(TokensObject {
            tree,
            expressions,
            evaluator,
            parsers,
        })
    }

    pub fn from_json(json: serde_json::Value) -> Result<Self, TokensError> {
        Self::new(TokenTree::from_json(json)?)
    }

    pub fn tree(&self) -> &TokenTree {
        &self.tree
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// Expressions whose path starts with `prefix`, in document order.
    pub fn matching(&self, prefix: &str) -> Vec<&Expression> {
        self.expressions
            .iter()
            .filter(|e| e.path.as_deref().is_some_and(|p| p.starts_with(prefix)))
            .collect()
    }

    /// Formats the value found under `prefix`.
    ///
    /// All matches must share one type. The parser registered for that type
    /// is used; when there is none, the default parser is, which accepts a
    /// single match only.
    pub fn get_value_for_key(&self, prefix: &str) -> Result<String, TokensError> {
        let matching = self.matching(prefix);

        if matching.is_empty() {
            return Err(TokensError::NotFound(prefix.to_string()));
        }

        let mut types: Vec<&str> = Vec::new();
        for expression in &matching {
            let token_type = expression.token_type.as_deref().unwrap_or(DEFAULT_TYPE);
            if !types.contains(&token_type) {
                types.push(token_type);
            }
        }

        if types.len() > 1 {
            return Err(TokensError::ConflictingTypes {
                path: prefix.to_string(),
                types: types.iter().map(|t| t.to_string()).collect(),
            });
        }

        let declared = types.first().copied().unwrap_or(DEFAULT_TYPE);
        let effective = if self.parsers.contains(declared) {
            declared
        } else {
            DEFAULT_TYPE
        };

        if effective == DEFAULT_TYPE && matching.len() > 1 {
            return Err(TokensError::AmbiguousMatch {
                path: prefix.to_string(),
                count: matching.len(),
            });
        }

        let parser = self
            .parsers
            .get(effective)
            .ok_or_else(|| TokensError::UnknownParser(effective.to_string()))?;

        tracing::debug!(prefix, token_type = effective, matches = matching.len(), "dispatching");
        parser.parse(&matching, &self.evaluator, self)
    }
}

impl FromStr for TokensObject {
    type Err = TokensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.parse::<TokenTree>()?)
    }
}

impl fmt::Debug for TokensObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokensObject")
            .field("expressions", &self.expressions.len())
            .field("parsers", &self.parsers)
            .finish()
    }
}
