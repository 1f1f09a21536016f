pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod flatten;
pub mod lexer;
pub mod lookup;
pub mod parser;
pub mod platform;
pub mod tokens_object;
pub mod tree;
pub mod value;

pub use ast::{Atom, Expression, Operator};
pub use evaluator::{EvalError, Evaluator, MAX_REFERENCE_DEPTH};
pub use flatten::{flatten, flatten_with_prefix};
pub use lexer::{LexError, Lexer};
pub use lookup::{LookupTable, ReferenceSource};
pub use parser::{DEFAULT_TYPE, DefaultParser, Parser, ParserRegistry};
pub use platform::{CssPlatform, CssPlatformOptions, Platform, PlatformOutput};
pub use tokens_object::{TokensError, TokensObject};
pub use tree::{RawValue, TokenNode, TokenTree, TokenValue, TreeError};
pub use value::{Evaluated, Value};
