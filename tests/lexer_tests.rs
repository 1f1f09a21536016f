// tests/lexer_tests.rs

use quarksy::{Atom, Expression, LexError, Lexer, Operator};
use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;

fn atoms(input: &str) -> Vec<Atom> {
    Lexer::new(input).tokenize().unwrap().atoms
}

fn number(value: &str, unit: &str, text: &str) -> Atom {
    Atom::Number {
        value: Decimal::from_str(value).unwrap(),
        unit: unit.to_string(),
        text: text.to_string(),
    }
}

// ============================================================================
// Numeric Literals
// ============================================================================

#[rstest]
#[case("4", "4", "")]
#[case("4px", "4", "px")]
#[case("1.5rem", "1.5", "rem")]
#[case("50%", "50", "%")]
#[case(".25em", "0.25", "em")]
#[case("12", "12", "")]
fn test_numeric_literal(#[case] input: &str, #[case] value: &str, #[case] unit: &str) {
    let lexed = Lexer::new(input).tokenize().unwrap();
    assert_eq!(lexed.atoms, vec![number(value, unit, input)]);
    assert!(lexed.numeric, "Failed for input: {}", input);
}

#[test]
fn test_trailing_decimal_point() {
    let lexed = Lexer::new("4.").tokenize().unwrap();
    assert_eq!(lexed.atoms, vec![number("4", "", "4.")]);
}

// ============================================================================
// Opaque Literals
// ============================================================================

#[rstest]
#[case("bold")]
#[case("#ff0000")]
#[case("4px2")]
#[case("1e3")]
fn test_opaque_literal(#[case] input: &str) {
    let lexed = Lexer::new(input).tokenize().unwrap();
    assert_eq!(lexed.atoms, vec![Atom::Opaque(input.to_string())]);
    assert!(!lexed.numeric, "Failed for input: {}", input);
}

#[test]
fn test_one_opaque_literal_poisons_expression() {
    let lexed = Lexer::new("4px + bold").tokenize().unwrap();
    assert_eq!(
        lexed.atoms,
        vec![
            number("4", "px", "4px"),
            Atom::Operator(Operator::Add),
            Atom::Opaque("bold".to_string()),
        ]
    );
    assert!(!lexed.numeric);
}

#[test]
fn test_empty_value_is_not_numeric() {
    let lexed = Lexer::new("   ").tokenize().unwrap();
    assert!(lexed.atoms.is_empty());
    assert!(!lexed.numeric);
}

// ============================================================================
// References
// ============================================================================

#[test]
fn test_reference() {
    assert_eq!(
        atoms("{color.base.value}"),
        vec![Atom::Reference("{color.base.value}".to_string())]
    );
}

#[test]
fn test_reference_in_formula() {
    assert_eq!(
        atoms("{spacing.sm} * 2"),
        vec![
            Atom::Reference("{spacing.sm}".to_string()),
            Atom::Operator(Operator::Multiply),
            number("2", "", "2"),
        ]
    );
}

#[test]
fn test_reference_path() {
    let reference = Atom::Reference("{spacing.sm}".to_string());
    assert_eq!(reference.reference_path(), Some("spacing.sm"));
    assert!(reference.is_reference());
    assert_eq!(number("4", "", "4").reference_path(), None);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_all_operators() {
    assert_eq!(
        atoms("1+2-3*4/5"),
        vec![
            number("1", "", "1"),
            Atom::Operator(Operator::Add),
            number("2", "", "2"),
            Atom::Operator(Operator::Subtract),
            number("3", "", "3"),
            Atom::Operator(Operator::Multiply),
            number("4", "", "4"),
            Atom::Operator(Operator::Divide),
            number("5", "", "5"),
        ]
    );
}

#[test]
fn test_leading_minus() {
    assert_eq!(
        atoms("-4px"),
        vec![Atom::Operator(Operator::Subtract), number("4", "px", "4px")]
    );
}

// ============================================================================
// Whitespace and Source Text
// ============================================================================

#[test]
fn test_whitespace_is_stripped() {
    let expression = Expression::parse(" 4 px \t+\n 2 ").unwrap();
    assert_eq!(expression.source, "4px+2");
}

#[rstest]
#[case("{a.b}*2+4px")]
#[case("Inter, sans-serif")]
#[case("#fff")]
#[case("4px+-2")]
fn test_atoms_reproduce_source(#[case] input: &str) {
    let expression = Expression::parse(input).unwrap();
    let joined: String = expression.atoms.iter().map(Atom::source_text).collect();
    assert_eq!(joined, expression.source);
}

// ============================================================================
// Unsupported Syntax
// ============================================================================

#[rstest]
#[case("rgba(0, 0, 0, 0.5)")]
#[case("(4+2)*3")]
#[case("calc(100% - {spacing.sm})")]
#[case("(")]
fn test_parenthesis_is_rejected(#[case] input: &str) {
    match Lexer::new(input).tokenize() {
        Err(LexError::UnsupportedSyntax { text }) => assert_eq!(text, input),
        other => panic!("expected UnsupportedSyntax, got {:?}", other),
    }
}
