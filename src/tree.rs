//! Typed design token tree.
//!
//! Token files are JSON documents of nested groups whose leaves are token
//! objects with a `value` and a `type`:
//!
//! ```json
//! {
//!   "spacing": {
//!     "sm": { "value": "4px", "type": "spacing" },
//!     "md": { "value": "{spacing.sm} * 2", "type": "spacing" }
//!   },
//!   "heading": {
//!     "value": { "fontSize": "16px", "fontWeight": "bold" },
//!     "type": "typography"
//!   }
//! }
//! ```
//!
//! Key order follows the source document.

use std::str::FromStr;

use serde_json::{Map, Value as Json};

/// Errors raised while converting JSON into a [`TokenTree`].
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token tree must be a JSON object")]
    NotAnObject,

    #[error("Token at '{path}' has a type but no value")]
    MissingValue { path: String },

    #[error("Token at '{path}' has an unsupported value (expected a string, number, boolean or flat object)")]
    InvalidValue { path: String },
}

/// Nested groups of tokens, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTree {
    entries: Vec<(String, TokenNode)>,
}

/// A node of the tree: either a token or another group.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Group(TokenTree),
    Token(TokenValue),
}

/// A token object: `{ "value": ..., "type": ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenValue {
    pub value: RawValue,
    pub token_type: String,
}

/// The unparsed value of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A single value such as `4px` or `{spacing.sm} * 2`
    Scalar(String),
    /// Named members of a composite token such as typography
    Composite(Vec<(String, String)>),
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and embedders that do not start from JSON.
    pub fn with(mut self, key: impl Into<String>, node: TokenNode) -> Self {
        self.entries.push((key.into(), node));
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert a deserialized JSON document.
    pub fn from_json(json: Json) -> Result<Self, TreeError> {
        match json {
            Json::Object(map) => convert_group(map, ""),
            _ => Err(TreeError::NotAnObject),
        }
    }

    /// Raw scalar found at a dotted path, e.g. `["spacing", "sm", "value"]`.
    ///
    /// Returns `None` when the path ends on a group, a whole token or a
    /// composite value, or leads nowhere.
    pub fn leaf(&self, segments: &[&str]) -> Option<&str> {
        let (first, rest) = segments.split_first()?;
        match self.get(first)? {
            TokenNode::Group(group) => group.leaf(rest),
            TokenNode::Token(token) => token.leaf(rest),
        }
    }
}

impl FromStr for TokenTree {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let json: Json = serde_json::from_str(s)?;
        TokenTree::from_json(json)
    }
}

impl TokenValue {
    pub fn scalar(value: impl Into<String>, token_type: impl Into<String>) -> Self {
        TokenValue {
            value: RawValue::Scalar(value.into()),
            token_type: token_type.into(),
        }
    }

    pub fn composite<K, V>(members: impl IntoIterator<Item = (K, V)>, token_type: impl Into<String>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        TokenValue {
            value: RawValue::Composite(
                members
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            token_type: token_type.into(),
        }
    }

    fn leaf(&self, segments: &[&str]) -> Option<&str> {
        match (segments, &self.value) {
            (["value"], RawValue::Scalar(value)) => Some(value.as_str()),
            (["value", key], RawValue::Composite(members)) => members
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn convert_group(map: Map<String, Json>, prefix: &str) -> Result<TokenTree, TreeError> {
    let mut tree = TokenTree::new();

    for (key, json) in map {
        let path = join_path(prefix, &key);
        let node = match json {
            Json::Object(object) if is_token_object(&object) => {
                TokenNode::Token(convert_token(object, &path)?)
            }
            Json::Object(object) => TokenNode::Group(convert_group(object, &path)?),
            other => {
                tracing::debug!(path = %path, value = %other, "skipping non-token entry");
                continue;
            }
        };
        tree.entries.push((key, node));
    }

    Ok(tree)
}

fn is_token_object(object: &Map<String, Json>) -> bool {
    matches!(object.get("type"), Some(Json::String(t)) if !t.is_empty())
}

fn convert_token(mut object: Map<String, Json>, path: &str) -> Result<TokenValue, TreeError> {
    let Some(Json::String(token_type)) = object.remove("type") else {
        return Err(TreeError::InvalidValue {
            path: path.to_string(),
        });
    };

    let value = match object.remove("value") {
        None | Some(Json::Null) => {
            return Err(TreeError::MissingValue {
                path: path.to_string(),
            });
        }
        Some(Json::Object(members)) => {
            let mut converted = Vec::with_capacity(members.len());
            for (key, member) in members {
                let scalar = scalar_to_string(member).ok_or_else(|| TreeError::InvalidValue {
                    path: format!("{}.value.{}", path, key),
                })?;
                converted.push((key, scalar));
            }
            RawValue::Composite(converted)
        }
        Some(other) => RawValue::Scalar(scalar_to_string(other).ok_or_else(|| {
            TreeError::InvalidValue {
                path: path.to_string(),
            }
        })?),
    };

    Ok(TokenValue { value, token_type })
}

fn scalar_to_string(json: Json) -> Option<String> {
    match json {
        Json::String(s) => Some(s),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_and_tokens() {
        let tree: TokenTree = r#"{
            "spacing": { "sm": { "value": 4, "type": "spacing" } },
            "$schema": "https://example.com/schema.json"
        }"#
        .parse()
        .unwrap();

        assert_eq!(tree.entries().count(), 1);
        assert_eq!(tree.leaf(&["spacing", "sm", "value"]), Some("4"));
        assert_eq!(tree.leaf(&["spacing", "sm"]), None);
    }

    #[test]
    fn test_composite_leaf() {
        let tree: TokenTree = r#"{
            "heading": { "value": { "fontSize": "16px" }, "type": "typography" }
        }"#
        .parse()
        .unwrap();

        assert_eq!(tree.leaf(&["heading", "value", "fontSize"]), Some("16px"));
        assert_eq!(tree.leaf(&["heading", "value"]), None);
    }

    #[test]
    fn test_document_order_is_kept() {
        let tree: TokenTree = r#"{
            "z": { "value": "1", "type": "spacing" },
            "a": { "value": "2", "type": "spacing" }
        }"#
        .parse()
        .unwrap();

        let keys: Vec<_> = tree.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            "[1, 2]".parse::<TokenTree>(),
            Err(TreeError::NotAnObject)
        ));
        assert!(matches!(
            r#"{ "a": { "type": "color" } }"#.parse::<TokenTree>(),
            Err(TreeError::MissingValue { path }) if path == "a"
        ));
        assert!(matches!(
            r#"{ "a": { "value": { "x": [1] }, "type": "typography" } }"#.parse::<TokenTree>(),
            Err(TreeError::InvalidValue { path }) if path == "a.value.x"
        ));
    }
}
