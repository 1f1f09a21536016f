use std::collections::{HashMap, VecDeque};

use crate::{
    ast::{Expression, atoms::strip_braces},
    evaluator::EvalError,
    tree::TokenTree,
};

/// Where reference paths are looked up.
///
/// The [`TokenTree`] is the only production source; the seam exists so the
/// lookup table can be exercised against instrumented doubles.
pub trait ReferenceSource {
    /// Raw, unparsed value for a dotted reference path given without braces.
    fn raw_value(&self, path: &str) -> Option<String>;
}

impl ReferenceSource for TokenTree {
    /// `a.b` resolves to the leaf at `a.b.value`; when there is none the path is
    /// tried as written, so `a.b.value` and `a.value.fontSize` work as well.
    fn raw_value(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path.split('.').collect();
        let mut with_value = segments.clone();
        with_value.push("value");

        self.leaf(&with_value)
            .or_else(|| self.leaf(&segments))
            .map(str::to_string)
    }
}

/// Map from reference text (braces included) to the raw value it points at.
///
/// Raw values are stored exactly as found; they are parsed and evaluated
/// only when an expression that uses them is evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupTable {
    entries: HashMap<String, String>,
}

impl LookupTable {
    /// Resolve every reference used by `expressions`, and every reference used
    /// by the values those resolve to.
    ///
    /// Each distinct reference text is looked up in `source` once.
    pub fn build<'a, S>(
        expressions: impl IntoIterator<Item = &'a Expression>,
        source: &S,
    ) -> Result<Self, EvalError>
    where
        S: ReferenceSource + ?Sized,
    {
        let mut table = LookupTable::default();
        let mut pending: VecDeque<String> = expressions
            .into_iter()
            .flat_map(|expression| expression.references())
            .map(str::to_string)
            .collect();

        while let Some(reference) = pending.pop_front() {
            if table.entries.contains_key(&reference) {
                continue;
            }

            let raw = source
                .raw_value(strip_braces(&reference))
                .ok_or_else(|| EvalError::ReferenceNotFound(reference.clone()))?;
            tracing::debug!(reference = %reference, raw = %raw, "resolved reference");

            for nested in Expression::parse(&raw)?.references() {
                if !table.entries.contains_key(nested) {
                    pending.push_back(nested.to_string());
                }
            }

            table.entries.insert(reference, raw);
        }

        Ok(table)
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries.get(reference).map(String::as_str)
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.entries.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct CountingSource {
        values: HashMap<&'static str, &'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl ReferenceSource for CountingSource {
        fn raw_value(&self, path: &str) -> Option<String> {
            self.calls.borrow_mut().push(path.to_string());
            self.values.get(path).map(|v| v.to_string())
        }
    }

    fn source(values: &[(&'static str, &'static str)]) -> CountingSource {
        CountingSource {
            values: values.iter().copied().collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_each_reference_is_resolved_once() {
        let src = source(&[("spacing.sm", "4px")]);
        let expressions = vec![
            Expression::parse("{spacing.sm}*2").unwrap(),
            Expression::parse("{spacing.sm}+{spacing.sm}").unwrap(),
        ];

        let table = LookupTable::build(&expressions, &src).unwrap();

        assert_eq!(table.get("{spacing.sm}"), Some("4px"));
        assert_eq!(src.calls.borrow().as_slice(), ["spacing.sm"]);
    }

    #[test]
    fn test_raw_values_are_not_evaluated() {
        let src = source(&[("a", "{b}*2"), ("b", "3px")]);
        let expressions = vec![Expression::parse("{a}").unwrap()];

        let table = LookupTable::build(&expressions, &src).unwrap();

        assert_eq!(table.get("{a}"), Some("{b}*2"));
        assert_eq!(table.get("{b}"), Some("3px"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_cyclic_references_terminate() {
        let src = source(&[("a", "{b}"), ("b", "{a}")]);
        let expressions = vec![Expression::parse("{a}").unwrap()];

        let table = LookupTable::build(&expressions, &src).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(src.calls.borrow().len(), 2);
    }

    #[test]
    fn test_missing_reference() {
        let src = source(&[]);
        let expressions = vec![Expression::parse("{does.not.exist}").unwrap()];

        match LookupTable::build(&expressions, &src) {
            Err(EvalError::ReferenceNotFound(reference)) => {
                assert_eq!(reference, "{does.not.exist}")
            }
            other => panic!("expected ReferenceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_tree_source_appends_value() {
        let tree: TokenTree = r#"{
            "spacing": { "sm": { "value": "4px", "type": "spacing" } },
            "heading": { "value": { "fontSize": "16px" }, "type": "typography" }
        }"#
        .parse()
        .unwrap();

        assert_eq!(tree.raw_value("spacing.sm").as_deref(), Some("4px"));
        assert_eq!(tree.raw_value("spacing.sm.value").as_deref(), Some("4px"));
        assert_eq!(tree.raw_value("heading.value.fontSize").as_deref(), Some("16px"));
        assert_eq!(tree.raw_value("heading"), None);
    }
}
