//! Code generators that turn a resolved token set into output files.

pub mod css;

use crate::{evaluator::EvalError, tokens_object::TokensObject};

pub use css::{CssPlatform, CssPlatformOptions};

/// One generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformOutput {
    pub file_name: String,
    pub content: String,
}

/// A target format such as CSS.
///
/// Platforms read the expressions and the evaluator of a [`TokensObject`]
/// directly instead of going through key lookups.
pub trait Platform {
    /// Name used to select the platform on the command line.
    fn name(&self) -> &str;

    fn run(&self, tokens: &TokensObject) -> Result<Vec<PlatformOutput>, EvalError>;
}

/// Converts `fontSize` to `font-size`.
///
/// A run of capitals not followed by a lowercase letter stays one word, so
/// `HTMLColor` becomes `html-color`.
pub fn camel_to_kebab(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let mut run_end = i;
        while run_end < chars.len() && chars[run_end].is_ascii_uppercase() {
            run_end += 1;
        }

        let word_end = match chars.get(run_end) {
            Some(c) if c.is_ascii_lowercase() && run_end - i >= 2 => run_end - 1,
            Some(c) if c.is_ascii_lowercase() => i + 1,
            _ => run_end,
        };

        if i > 0 {
            result.push('-');
        }
        result.extend(chars[i..word_end].iter().map(|c| c.to_ascii_lowercase()));
        i = word_end;
    }

    result
}

#[test]
fn test_camel_to_kebab() {
    assert_eq!(camel_to_kebab("fontSize"), "font-size");
    assert_eq!(camel_to_kebab("lineHeight"), "line-height");
    assert_eq!(camel_to_kebab("HTMLColor"), "html-color");
    assert_eq!(camel_to_kebab("colorRGB"), "color-rgb");
    assert_eq!(camel_to_kebab("spacing-sm"), "spacing-sm");
    assert_eq!(camel_to_kebab("Primary"), "primary");
}
