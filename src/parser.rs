//! Output strategies keyed by token type.
//!
//! A [`Parser`] turns the expressions matched by
//! [`TokensObject::get_value_for_key`] into one output string. Parsers are
//! collected in a [`ParserRegistry`] before the [`TokensObject`] is built;
//! supporting a new token type means registering a new parser, the dispatch
//! itself never changes.

pub mod default;

use std::{collections::HashMap, fmt};

use crate::{
    ast::Expression,
    evaluator::Evaluator,
    tokens_object::{TokensError, TokensObject},
};

pub use default::DefaultParser;

/// Type tag of the parser used when no parser matches a token's own type.
pub const DEFAULT_TYPE: &str = "default";

/// Formats the expressions found for one key.
pub trait Parser: Send + Sync {
    /// Token type this parser handles.
    fn token_type(&self) -> &str;

    /// `tokens` gives access to the rest of the tree, so a parser can look up
    /// other keys while formatting.
    fn parse(
        &self,
        expressions: &[&Expression],
        evaluator: &Evaluator,
        tokens: &TokensObject,
    ) -> Result<String, TokensError>;
}

/// Fixed mapping from token type to [`Parser`].
///
/// # Examples
///
/// ```
/// use quarksy::{ParserRegistry, DEFAULT_TYPE};
///
/// let registry = ParserRegistry::new();
/// assert!(registry.contains(DEFAULT_TYPE));
///
/// let empty = ParserRegistry::empty();
/// assert!(!empty.contains(DEFAULT_TYPE));
/// ```
pub struct ParserRegistry {
    parsers: HashMap<String, Box<dyn Parser>>,
}

impl ParserRegistry {
    /// Registry holding only the [`DefaultParser`].
    pub fn new() -> Self {
        Self::empty().with(DefaultParser)
    }

    /// Registry without any parser, not even the default one.
    pub fn empty() -> Self {
        ParserRegistry {
            parsers: HashMap::new(),
        }
    }

    /// Adds `parser`, replacing any parser already registered for its type.
    pub fn with(mut self, parser: impl Parser + 'static) -> Self {
        self.parsers
            .insert(parser.token_type().to_string(), Box::new(parser));
        self
    }

    pub fn get(&self, token_type: &str) -> Option<&dyn Parser> {
        self.parsers.get(token_type).map(|p| p.as_ref())
    }

    pub fn contains(&self, token_type: &str) -> bool {
        self.parsers.contains_key(token_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.types().collect();
        types.sort_unstable();
        f.debug_struct("ParserRegistry").field("types", &types).finish()
    }
}
