//! JSON document loader.
//!
//! The input is a single node object:
//!
//! ```json
//! {"tag": "body", "attrs": {"class": "main"}, "children": [
//!     {"tag": "p", "children": [{"text": "Hello"}]}
//! ]}
//! ```
//!
//! A node with a `text` key is a text node. Anything else must carry a
//! `tag`. A top-level array is read as a list of document children.

use std::fs;
use std::path::Path;

use koala_dom::{DomTree, ElementData, NodeId};
use serde_json::Value;
use thiserror::Error;

/// Reasons a document could not be loaded.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A node is neither a text node nor an element.
    #[error("node at {path} has neither \"tag\" nor \"text\"")]
    MissingTag {
        /// Location of the node, e.g. `/children/2`.
        path: String,
    },
    /// A field has the wrong JSON type.
    #[error("node at {path}: \"{field}\" must be {expected}")]
    WrongType {
        /// Location of the node.
        path: String,
        /// The offending field.
        field: &'static str,
        /// What the field should have been.
        expected: &'static str,
    },
}

/// Read and parse a document file.
pub fn load_document(path: &Path) -> Result<DomTree, DocumentError> {
    let source = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&source)
}

/// Parse a document from JSON text.
pub fn parse_document(source: &str) -> Result<DomTree, DocumentError> {
    let value: Value = serde_json::from_str(source)?;
    let mut tree = DomTree::new();
    match &value {
        Value::Array(nodes) => {
            for (index, node) in nodes.iter().enumerate() {
                append_node(&mut tree, NodeId::ROOT, node, &format!("/{index}"))?;
            }
        }
        node => append_node(&mut tree, NodeId::ROOT, node, "")?,
    }
    Ok(tree)
}

fn append_node(
    tree: &mut DomTree,
    parent: NodeId,
    node: &Value,
    path: &str,
) -> Result<(), DocumentError> {
    let Value::Object(fields) = node else {
        return Err(wrong_type(path, "node", "an object"));
    };

    if let Some(text) = fields.get("text") {
        let text = text
            .as_str()
            .ok_or_else(|| wrong_type(path, "text", "a string"))?;
        let _ = tree.append_text(parent, text);
        return Ok(());
    }

    let tag = match fields.get("tag") {
        Some(Value::String(tag)) => tag,
        Some(_) => return Err(wrong_type(path, "tag", "a string")),
        None => {
            return Err(DocumentError::MissingTag {
                path: display_path(path),
            });
        }
    };

    let mut element = ElementData::new(tag);
    match fields.get("attrs") {
        None | Some(Value::Null) => {}
        Some(Value::Object(attrs)) => {
            for (name, value) in attrs {
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return Err(wrong_type(path, "attrs", "an object of scalars")),
                };
                element = element.with_attr(&name.to_ascii_lowercase(), &value);
            }
        }
        Some(_) => return Err(wrong_type(path, "attrs", "an object")),
    }
    let id = tree.append_element(parent, element);

    match fields.get("children") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(children)) => {
            for (index, child) in children.iter().enumerate() {
                append_node(tree, id, child, &format!("{path}/children/{index}"))?;
            }
            Ok(())
        }
        Some(_) => Err(wrong_type(path, "children", "an array")),
    }
}

fn wrong_type(path: &str, field: &'static str, expected: &'static str) -> DocumentError {
    DocumentError::WrongType {
        path: display_path(path),
        field,
        expected,
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_document() {
        let tree = parse_document(
            r#"{"tag": "BODY", "attrs": {"class": "main", "colspan": 2},
                "children": [{"tag": "p", "children": [{"text": "Hi"}]}]}"#,
        )
        .unwrap();
        let body = tree.document_element().unwrap();
        let element = tree.as_element(body).unwrap();
        assert_eq!(element.tag_name, "body");
        assert_eq!(element.attr("class"), Some("main"));
        assert_eq!(element.attr("colspan"), Some("2"));
        assert_eq!(tree.text_content(body), "Hi");
    }

    #[test]
    fn test_top_level_array() {
        let tree = parse_document(r#"[{"tag": "div"}, {"text": "tail"}]"#).unwrap();
        assert_eq!(tree.children(NodeId::ROOT).len(), 2);
    }

    #[test]
    fn test_missing_tag_reports_path() {
        let err = parse_document(r#"{"tag": "div", "children": [{"attrs": {}}]}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingTag { ref path } if path == "/children/0"));
    }

    #[test]
    fn test_wrong_children_type() {
        let err = parse_document(r#"{"tag": "div", "children": "nope"}"#).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::WrongType {
                field: "children",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_document("{not json"),
            Err(DocumentError::Json(_))
        ));
    }
}
