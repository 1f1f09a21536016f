use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;

use crate::ast::{Atom, Operator};

/// One `(operator, term)` pair. Only the very first term may go without an operator.
static TERM_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<operator>^|[-+*/])(?P<term>\{[\w.#]+\}|[\w.#%]+)").expect("valid term pattern")
});

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{[\w.#]+\}$").expect("valid reference pattern"));

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<number>\d+(?:\.\d*)?|\.\d+)(?P<unit>[A-Za-z%]*)$")
        .expect("valid number pattern")
});

/// Errors raised while splitting a value into atoms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    /// The value contains `(`
    #[error(
        "Unsupported syntax in '{text}': found '(' - function calls and nested expressions are not supported"
    )]
    UnsupportedSyntax { text: String },
}

/// Output of [`Lexer::tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub source: String,
    pub atoms: Vec<Atom>,
    /// False when at least one literal is not a number
    pub numeric: bool,
}

/// Splits a token value into [`Atom`]s.
pub struct Lexer {
    raw: String,
    input: String,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            raw: input.to_string(),
            input: input.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    pub fn tokenize(self) -> Result<Lexed, LexError> {
        if self.raw.contains('(') {
            return Err(LexError::UnsupportedSyntax { text: self.raw });
        }

        let mut atoms = Vec::new();
        let mut numeric = true;
        let mut position = 0;

        for caps in TERM_PAIR.captures_iter(&self.input) {
            let Some(whole) = caps.get(0) else { continue };

            // Text the pattern skipped over is kept verbatim
            if whole.start() > position {
                atoms.push(Atom::Opaque(self.input[position..whole.start()].to_string()));
                numeric = false;
            }
            position = whole.end();

            if let Some(op) = caps
                .name("operator")
                .and_then(|m| m.as_str().chars().next())
                .and_then(Operator::from_char)
            {
                atoms.push(Atom::Operator(op));
            }

            let term = caps.name("term").map_or("", |m| m.as_str());
            let atom = classify(term);
            if matches!(atom, Atom::Opaque(_)) {
                numeric = false;
            }
            atoms.push(atom);
        }

        if position < self.input.len() {
            atoms.push(Atom::Opaque(self.input[position..].to_string()));
            numeric = false;
        }

        if atoms
            .iter()
            .any(|atom| matches!(atom, Atom::Opaque(text) if text.starts_with('{')))
        {
            tracing::warn!(source = %self.input, "value looks like a reference but is kept as text");
        }

        // An empty value is an empty string, not a formula
        if atoms.is_empty() {
            numeric = false;
        }

        Ok(Lexed {
            source: self.input,
            atoms,
            numeric,
        })
    }
}

fn classify(term: &str) -> Atom {
    if REFERENCE.is_match(term) {
        return Atom::Reference(term.to_string());
    }

    if let Some(caps) = NUMBER.captures(term)
        && let Some(value) = caps.name("number").and_then(|m| parse_decimal(m.as_str()))
    {
        return Atom::Number {
            value,
            unit: caps.name("unit").map_or("", |m| m.as_str()).to_string(),
            text: term.to_string(),
        };
    }

    Atom::Opaque(term.to_string())
}

/// Parse `4`, `4.`, `4.25` or `.25`. Values too large for a decimal yield `None`.
fn parse_decimal(number: &str) -> Option<Decimal> {
    let number = number.trim_end_matches('.');
    if let Some(fraction) = number.strip_prefix('.') {
        Decimal::from_str(&format!("0.{}", fraction)).ok()
    } else {
        Decimal::from_str(number).ok()
    }
}

#[test]
fn test_operator_precedes_term() {
    let lexed = Lexer::new("4 + {a.b}").tokenize().unwrap();
    assert_eq!(lexed.source, "4+{a.b}");
    assert_eq!(lexed.atoms.len(), 3);
    assert!(matches!(lexed.atoms[1], Atom::Operator(Operator::Add)));
    assert_eq!(lexed.atoms[2], Atom::Reference("{a.b}".to_string()));
    assert!(lexed.numeric);
}

#[test]
fn test_skipped_text_is_opaque() {
    let lexed = Lexer::new("Inter, sans-serif").tokenize().unwrap();
    let joined: String = lexed.atoms.iter().map(Atom::source_text).collect();
    assert_eq!(joined, "Inter,sans-serif");
    assert!(!lexed.numeric);
}

#[test]
fn test_reference_with_dash_stays_text() {
    let lexed = Lexer::new("{color.brand-primary}").tokenize().unwrap();
    assert!(!lexed.atoms.iter().any(Atom::is_reference));
    let joined: String = lexed.atoms.iter().map(Atom::source_text).collect();
    assert_eq!(joined, "{color.brand-primary}");
    assert!(!lexed.numeric);
}
