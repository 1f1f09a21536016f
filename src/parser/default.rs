use crate::{
    ast::Expression,
    evaluator::Evaluator,
    parser::{DEFAULT_TYPE, Parser},
    tokens_object::{TokensError, TokensObject},
    value::Value,
};

/// Formats the first of the matched expressions.
///
/// Numbers without a unit are assumed to be pixel lengths and get `px`
/// appended; everything else is printed as evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParser;

impl Parser for DefaultParser {
    fn token_type(&self) -> &str {
        DEFAULT_TYPE
    }

    fn parse(
        &self,
        expressions: &[&Expression],
        evaluator: &Evaluator,
        _tokens: &TokensObject,
    ) -> Result<String, TokensError> {
        // Dispatch rejects several matches for the default type before this runs
        let Some(expression) = expressions.first() else {
            return Err(TokensError::NotFound(String::new()));
        };

        let evaluated = evaluator.evaluate(expression)?;

        // TODO: pick the fallback unit from the token type once non-length
        // numeric types (opacity, font weight) need it
        Ok(match (&evaluated.value, &evaluated.unit) {
            (Value::Number(n), None) => format!("{}px", n),
            _ => evaluated.to_string(),
        })
    }
}
