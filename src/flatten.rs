use crate::{
    ast::Expression,
    lexer::LexError,
    tree::{RawValue, TokenNode, TokenTree},
};

/// Walk the tree and parse every token value into an [`Expression`].
///
/// Simple tokens yield one expression at `<path>.value`; composite tokens
/// yield one per member at `<path>.value.<key>`, all sharing the token's type.
/// Expressions come out in document order.
pub fn flatten(tree: &TokenTree) -> Result<Vec<Expression>, LexError> {
    let mut expressions = Vec::new();
    flatten_into(tree, "", &mut expressions)?;
    Ok(expressions)
}

/// Like [`flatten`], for a subtree located at `prefix`.
pub fn flatten_with_prefix(tree: &TokenTree, prefix: &str) -> Result<Vec<Expression>, LexError> {
    let mut expressions = Vec::new();
    flatten_into(tree, prefix, &mut expressions)?;
    Ok(expressions)
}

fn flatten_into(
    tree: &TokenTree,
    prefix: &str,
    expressions: &mut Vec<Expression>,
) -> Result<(), LexError> {
    for (key, node) in tree.entries() {
        let current_path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };

        match node {
            TokenNode::Token(token) => match &token.value {
                RawValue::Scalar(value) => {
                    expressions.push(Expression::new(
                        value,
                        format!("{}.value", current_path),
                        &token.token_type,
                    )?);
                }
                RawValue::Composite(members) => {
                    for (member, value) in members {
                        expressions.push(Expression::member(
                            value,
                            format!("{}.value.{}", current_path, member),
                            &token.token_type,
                            member,
                        )?);
                    }
                }
            },
            TokenNode::Group(group) => flatten_into(group, &current_path, expressions)?,
        }
    }

    Ok(())
}
