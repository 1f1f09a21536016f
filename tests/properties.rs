// tests/properties.rs

use proptest::prelude::*;
use quarksy::{Atom, Evaluator, Expression, LexError, Lexer, Value};
use rust_decimal::Decimal;
use std::str::FromStr;

proptest! {
    #[test]
    fn numeric_literal_is_one_atom(
        int in "[0-9]{1,9}",
        frac in proptest::option::of("[0-9]{1,6}"),
        unit in prop_oneof![Just(""), Just("px"), Just("rem"), Just("em"), Just("%")],
    ) {
        let number = match &frac {
            Some(f) => format!("{}.{}", int, f),
            None => int.clone(),
        };
        let text = format!("{}{}", number, unit);

        let lexed = Lexer::new(&text).tokenize().unwrap();

        prop_assert_eq!(lexed.atoms.len(), 1);
        match &lexed.atoms[0] {
            Atom::Number { value, unit: parsed_unit, .. } => {
                prop_assert_eq!(*value, Decimal::from_str(&number).unwrap());
                prop_assert_eq!(parsed_unit.as_str(), unit);
            }
            other => prop_assert!(false, "expected a number, got {:?}", other),
        }
        prop_assert!(lexed.numeric);
    }

    #[test]
    fn parenthesis_is_always_rejected(before in "[a-z0-9{}.+* -]{0,12}", after in "[a-z0-9{}.+*) -]{0,12}") {
        let text = format!("{}({}", before, after);
        let is_unsupported = matches!(Expression::parse(&text), Err(LexError::UnsupportedSyntax { .. }));
        prop_assert!(is_unsupported);
    }

    #[test]
    fn arithmetic_matches_integer_precedence(
        numbers in proptest::collection::vec(1i64..1000, 1..6),
        ops in proptest::collection::vec(prop_oneof![Just('+'), Just('-'), Just('*')], 5),
    ) {
        let mut text = numbers[0].to_string();
        for (n, op) in numbers[1..].iter().zip(&ops) {
            text.push(*op);
            text.push_str(&n.to_string());
        }

        // sum of products
        let mut total = 0i64;
        let mut product = numbers[0];
        for (n, op) in numbers[1..].iter().zip(&ops) {
            match op {
                '*' => product *= n,
                '+' => { total += product; product = *n; }
                _ => { total += product; product = -n; }
            }
        }
        total += product;

        let expression = Expression::parse(&text).unwrap();
        let result = Evaluator::default().evaluate(&expression).unwrap();
        prop_assert_eq!(result.value, Value::Number(Decimal::from(total)));
    }

    #[test]
    fn opaque_literal_forces_text(word in "[a-z]{2,8}", n in 0u32..100) {
        let text = format!("{}+{}", n, word);
        let expression = Expression::parse(&text).unwrap();
        let result = Evaluator::default().evaluate(&expression).unwrap();
        prop_assert_eq!(result.value, Value::Text(text));
        prop_assert_eq!(result.unit, None);
    }
}
