use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    ast::{Atom, Expression, Operator},
    lexer::LexError,
    lookup::{LookupTable, ReferenceSource},
    value::{Evaluated, Value},
};

/// Longest chain of references followed while evaluating one expression.
pub const MAX_REFERENCE_DEPTH: usize = 64;

/// Errors that can occur while resolving token values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// A resolved value could not be tokenized
    #[error("Syntax error: {0}")]
    Syntax(#[from] LexError),

    /// A reference points at nothing in the tree
    #[error("Value for reference {0} not found in the token tree")]
    ReferenceNotFound(String),

    /// A reference chain came back to itself or grew too deep
    #[error("Reference cycle: {}", .0.join(" -> "))]
    ReferenceCycle(Vec<String>),

    /// Numeric formula that is not `[+-]term (op term)*`
    #[error("Malformed formula: '{0}'")]
    MalformedFormula(String),

    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    #[error("Arithmetic overflow in '{0}'")]
    Overflow(String),
}

/// Resolves expressions against the references of one token tree.
///
/// The lookup table is built once, when the evaluator is created, and shared
/// by every later evaluation.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    lookup: LookupTable,
}

/// State of one `evaluate` call: the reference chain being followed and the
/// references already resolved.
#[derive(Default)]
struct Resolution {
    in_progress: Vec<String>,
    resolved: HashMap<String, Evaluated>,
}

/// Piece of a numeric formula after references have been resolved.
#[derive(Debug, Clone, Copy)]
enum Term {
    Operator(Operator),
    Number(Decimal),
}

impl Evaluator {
    /// Builds the lookup table for every reference used by `expressions`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quarksy::{Evaluator, TokenTree, flatten};
    ///
    /// let tree: TokenTree = r#"{
    ///     "spacing": { "sm": { "value": "4px", "type": "spacing" } },
    ///     "spacing2": { "value": "{spacing.sm.value}*2", "type": "spacing" }
    /// }"#.parse().unwrap();
    ///
    /// let expressions = flatten(&tree).unwrap();
    /// let evaluator = Evaluator::new(&expressions, &tree).unwrap();
    ///
    /// let result = evaluator.evaluate(&expressions[1]).unwrap();
    /// assert_eq!(result.to_string(), "8px");
    /// ```
    pub fn new<'a, S>(
        expressions: impl IntoIterator<Item = &'a Expression>,
        source: &S,
    ) -> Result<Self, EvalError>
    where
        S: ReferenceSource + ?Sized,
    {
        Ok(Evaluator {
            lookup: LookupTable::build(expressions, source)?,
        })
    }

    pub fn from_lookup(lookup: LookupTable) -> Self {
        Evaluator { lookup }
    }

    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    /// Evaluates an expression to a number with its first unit, or to text.
    ///
    /// Each reference is evaluated once per call and reused wherever it
    /// appears again. The formula is computed only if no literal anywhere in
    /// the chain is opaque; otherwise the concatenated text is returned.
    pub fn evaluate(&self, expression: &Expression) -> Result<Evaluated, EvalError> {
        self.evaluate_in(expression, &mut Resolution::default())
    }

    fn evaluate_in(
        &self,
        expression: &Expression,
        state: &mut Resolution,
    ) -> Result<Evaluated, EvalError> {
        tracing::trace!(source = %expression.source, depth = state.in_progress.len(), "evaluating");

        let mut numeric = expression.can_be_evaluated_to_number;
        let mut unit: Option<String> = None;
        let mut text = String::new();
        let mut terms = Vec::with_capacity(expression.atoms.len());

        for atom in &expression.atoms {
            match atom {
                Atom::Operator(op) => {
                    text.push(op.as_char());
                    terms.push(Term::Operator(*op));
                }
                Atom::Number {
                    value,
                    unit: suffix,
                    ..
                } => {
                    text.push_str(&value.normalize().to_string());
                    if unit.is_none() && !suffix.is_empty() {
                        unit = Some(suffix.clone());
                    }
                    terms.push(Term::Number(*value));
                }
                Atom::Opaque(raw) => {
                    text.push_str(raw);
                    numeric = false;
                }
                Atom::Reference(reference) => {
                    let resolved = self.resolve(reference, state)?;
                    if unit.is_none() {
                        unit = resolved.unit;
                    }
                    match resolved.value {
                        Value::Number(n) => {
                            text.push_str(&n.to_string());
                            terms.push(Term::Number(n));
                        }
                        Value::Text(s) => {
                            text.push_str(&s);
                            numeric = false;
                        }
                    }
                }
            }
        }

        if numeric {
            let value = fold(&terms, &text)?;
            Ok(Evaluated::number(value.normalize(), unit))
        } else {
            Ok(Evaluated::text(text))
        }
    }

    fn resolve(&self, reference: &str, state: &mut Resolution) -> Result<Evaluated, EvalError> {
        if state.in_progress.iter().any(|r| r == reference)
            || state.in_progress.len() >= MAX_REFERENCE_DEPTH
        {
            let mut chain = state.in_progress.clone();
            chain.push(reference.to_string());
            return Err(EvalError::ReferenceCycle(chain));
        }

        if let Some(done) = state.resolved.get(reference) {
            return Ok(done.clone());
        }

        let raw = self
            .lookup
            .get(reference)
            .ok_or_else(|| EvalError::ReferenceNotFound(reference.to_string()))?;
        let nested = Expression::parse(raw)?;

        state.in_progress.push(reference.to_string());
        let result = self.evaluate_in(&nested, state);
        state.in_progress.pop();

        let evaluated = result?;
        state
            .resolved
            .insert(reference.to_string(), evaluated.clone());
        Ok(evaluated)
    }
}

/// Computes `[+-]n (op n)*` with `*` `/` binding tighter than `+` `-`.
fn fold(terms: &[Term], formula: &str) -> Result<Decimal, EvalError> {
    let malformed = || EvalError::MalformedFormula(formula.to_string());
    let overflow = || EvalError::Overflow(formula.to_string());

    let mut pairs: Vec<(Option<Operator>, Decimal)> = Vec::new();
    let mut pending: Option<Operator> = None;

    for term in terms {
        match *term {
            Term::Operator(op) => {
                if pending.replace(op).is_some() {
                    return Err(malformed());
                }
            }
            Term::Number(n) => {
                let op = pending.take();
                if op.is_none() && !pairs.is_empty() {
                    return Err(malformed());
                }
                pairs.push((op, n));
            }
        }
    }

    if pending.is_some() {
        return Err(malformed());
    }

    let ((first_op, first), rest) = pairs.split_first().ok_or_else(malformed)?;
    let mut product = match first_op {
        None | Some(Operator::Add) => *first,
        Some(Operator::Subtract) => -*first,
        Some(_) => return Err(malformed()),
    };
    let mut total = Decimal::ZERO;

    for (op, n) in rest {
        match op {
            Some(Operator::Multiply) => {
                product = product.checked_mul(*n).ok_or_else(overflow)?;
            }
            Some(Operator::Divide) => {
                if n.is_zero() {
                    return Err(EvalError::DivisionByZero(formula.to_string()));
                }
                product = product.checked_div(*n).ok_or_else(overflow)?;
            }
            Some(Operator::Add) => {
                total = total.checked_add(product).ok_or_else(overflow)?;
                product = *n;
            }
            Some(Operator::Subtract) => {
                total = total.checked_add(product).ok_or_else(overflow)?;
                product = -*n;
            }
            None => return Err(malformed()),
        }
    }

    total.checked_add(product).ok_or_else(overflow)
}
