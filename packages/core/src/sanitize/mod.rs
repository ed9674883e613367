//! Document Sanitization
//!
//! Normalizes an arbitrary JSON value purporting to be a rich-text document
//! into the allowed node set. The pass runs on every content write, before
//! persistence, so everything downstream (the typed model and the renderer)
//! can assume a well-formed tree.
//!
//! Guarantees:
//!
//! - Never fails on malformed input; the worst case is a root with empty
//!   `children`.
//! - Keeps as much original text and structure as possible: unknown node
//!   types are demoted to paragraphs of their recoverable inline content,
//!   orphaned list items are rewritten as paragraphs, invalid heading/list
//!   attributes are coerced to defaults.
//! - Idempotent: sanitizing sanitizer output reports no changes.
//! - Stripped node types are reported once per document, aggregated, via
//!   `tracing::warn!` and the returned [`SanitizeReport`].
//!
//! The sanitizer deliberately works on raw [`serde_json::Value`] rather than
//! the typed model: its input is by definition outside the allowed set.

use serde_json::{json, Map, Value};
use std::collections::BTreeSet;


/// Diagnostic context attached to the aggregated warning
#[derive(Debug, Clone, Default)]
pub struct SanitizeContext {
    /// Collection field holding the document (e.g. `contentALS`)
    pub field: Option<String>,
    /// Id of the document being written
    pub doc_id: Option<String>,
}

impl SanitizeContext {
    pub fn new(field: impl Into<String>, doc_id: Option<String>) -> Self {
        Self {
            field: Some(field.into()),
            doc_id,
        }
    }

    fn location(&self) -> Option<String> {
        let parts: Vec<&str> = [self.doc_id.as_deref(), self.field.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" :: "))
        }
    }
}

/// What the sanitizer did to a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Whether the output differs from the input
    pub changed: bool,
    /// Node types that were stripped or demoted, deduplicated
    pub unknown_types: BTreeSet<String>,
}

struct SanitizedNode {
    node: Option<Value>,
    changed: bool,
}

fn is_allowed_type(node_type: &str) -> bool {
    matches!(
        node_type,
        "root"
            | "text"
            | "paragraph"
            | "linebreak"
            | "heading"
            | "quote"
            | "list"
            | "listitem"
            | "horizontalrule"
            | "link"
            | "autolink"
            | "callout-block"
            | "certification-level"
    )
}

fn is_inline_type(node_type: &str) -> bool {
    matches!(
        node_type,
        "text" | "linebreak" | "link" | "autolink" | "certification-level"
    )
}

fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn node_type_of(map: &Map<String, Value>) -> &str {
    map.get("type").and_then(Value::as_str).unwrap_or("")
}

fn version_of(map: &Map<String, Value>) -> i64 {
    map.get("version").and_then(Value::as_i64).unwrap_or(1)
}

/// Concatenated plain text of a subtree, space-joined.
///
/// A node's own `text` attribute wins over its children.
pub fn extract_plain_text(node: &Value) -> String {
    let Some(map) = node.as_object() else {
        return String::new();
    };

    if let Some(Value::String(text)) = map.get("text") {
        return text.clone();
    }

    if let Some(Value::Array(children)) = map.get("children") {
        return children
            .iter()
            .map(extract_plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    String::new()
}

fn create_text_node(text: &str, version: i64) -> Value {
    json!({
        "type": "text",
        "version": version,
        "detail": 0,
        "format": 0,
        "mode": "normal",
        "style": "",
        "text": text,
    })
}

/// Positional attributes shared by rebuilt block nodes, taken from the
/// original node on a best-effort basis.
fn block_attrs(original: Option<&Map<String, Value>>, version: i64) -> (i64, String, i64, String) {
    let orig_version = original
        .and_then(|map| map.get("version"))
        .and_then(Value::as_i64)
        .unwrap_or(version);
    let format = original
        .and_then(|map| map.get("format"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let indent = original
        .and_then(|map| map.get("indent"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let direction = original
        .and_then(|map| map.get("direction"))
        .and_then(Value::as_str)
        .unwrap_or("ltr")
        .to_string();
    (orig_version, format, indent, direction)
}

fn create_paragraph_node(
    children: Vec<Value>,
    version: i64,
    original: Option<&Map<String, Value>>,
) -> Value {
    let (version, format, indent, direction) = block_attrs(original, version);
    json!({
        "type": "paragraph",
        "version": version,
        "format": format,
        "indent": indent,
        "direction": direction,
        "children": children,
    })
}

fn create_list_item_node(
    children: Vec<Value>,
    version: i64,
    original: Option<&Map<String, Value>>,
) -> Value {
    let (version, format, indent, direction) = block_attrs(original, version);
    let mut item = Map::new();
    item.insert("type".to_string(), json!("listitem"));
    item.insert("version".to_string(), json!(version));
    item.insert("format".to_string(), json!(format));
    item.insert("indent".to_string(), json!(indent));
    item.insert("direction".to_string(), json!(direction));
    item.insert("children".to_string(), Value::Array(children));

    // list-specific attributes survive when present
    if let Some(map) = original {
        if let Some(value) = map.get("value").filter(|v| v.is_i64()) {
            item.insert("value".to_string(), value.clone());
        }
        if let Some(checked) = map.get("checked").filter(|v| v.is_boolean()) {
            item.insert("checked".to_string(), checked.clone());
        }
    }

    Value::Object(item)
}

/// Flatten a child sequence down to inline nodes.
///
/// Inline nodes pass through; paragraph/root/listitem wrappers are unwrapped
/// recursively; anything else contributes its plain text as a fresh text
/// node.
fn build_inline_children(children: &[Value], version: i64) -> Vec<Value> {
    let mut result = Vec::new();

    for child in children {
        let child_type = child
            .as_object()
            .map(node_type_of)
            .unwrap_or("");

        if is_inline_type(child_type) {
            result.push(child.clone());
            continue;
        }

        if matches!(child_type, "paragraph" | "root" | "listitem") {
            if let Some(Value::Array(nested)) = child.get("children") {
                result.extend(build_inline_children(nested, version));
                continue;
            }
        }

        let text = extract_plain_text(child);
        if !text.is_empty() {
            result.push(create_text_node(&text, version));
        }
    }

    result
}

fn sanitize_node(
    node: &Value,
    parent_type: &str,
    unknown_types: &mut BTreeSet<String>,
) -> SanitizedNode {
    let Some(map) = node.as_object() else {
        return SanitizedNode {
            node: None,
            changed: true,
        };
    };

    let node_type = node_type_of(map).to_string();
    let version = version_of(map);

    let mut changed = false;
    let mut sanitized_children: Vec<Value> = Vec::new();
    let original_children = map.get("children").and_then(Value::as_array);

    if let Some(children) = original_children {
        let child_parent = if node_type.is_empty() {
            parent_type
        } else {
            node_type.as_str()
        };
        for child in children {
            let result = sanitize_node(child, child_parent, unknown_types);
            if result.changed {
                changed = true;
            }
            match result.node {
                Some(value) => sanitized_children.push(value),
                None => changed = true,
            }
        }

        if sanitized_children.len() != children.len() {
            changed = true;
        }
    }

    if node_type == "root" {
        let format = map.get("format").and_then(Value::as_str).unwrap_or("");
        let indent = map.get("indent").and_then(Value::as_i64).unwrap_or(0);
        let direction = map.get("direction").and_then(Value::as_str).unwrap_or("ltr");

        if map.get("format") != Some(&json!(format))
            || map.get("indent") != Some(&json!(indent))
            || map.get("direction") != Some(&json!(direction))
        {
            changed = true;
        }

        return SanitizedNode {
            node: Some(json!({
                "type": "root",
                "version": version,
                "format": format,
                "indent": indent,
                "direction": direction,
                "children": sanitized_children,
            })),
            changed,
        };
    }

    if node_type == "text" {
        let text = map.get("text").and_then(Value::as_str).unwrap_or("");
        let detail = map.get("detail").and_then(Value::as_i64).unwrap_or(0);
        let format = map.get("format").and_then(Value::as_i64).unwrap_or(0);
        let mode = map.get("mode").and_then(Value::as_str).unwrap_or("normal");
        let style = map.get("style").and_then(Value::as_str).unwrap_or("");

        if map.get("text") != Some(&json!(text))
            || map.get("detail") != Some(&json!(detail))
            || map.get("format") != Some(&json!(format))
            || map.get("mode") != Some(&json!(mode))
            || map.get("style") != Some(&json!(style))
        {
            changed = true;
        }

        // a text node cannot have children
        if original_children.is_some_and(|children| !children.is_empty()) {
            changed = true;
        }

        return SanitizedNode {
            node: Some(json!({
                "type": "text",
                "version": version,
                "text": text,
                "detail": detail,
                "format": format,
                "mode": mode,
                "style": style,
            })),
            changed,
        };
    }

    // a list item outside a list is invalid; rewrite it as a paragraph of
    // its inline content
    if node_type == "listitem" && parent_type != "list" {
        let inline_children = build_inline_children(&sanitized_children, version);
        if inline_children.is_empty() {
            return SanitizedNode {
                node: None,
                changed: true,
            };
        }

        return SanitizedNode {
            node: Some(create_paragraph_node(inline_children, version, Some(map))),
            changed: true,
        };
    }

    if is_allowed_type(&node_type) {
        let mut sanitized = map.clone();

        if !sanitized_children.is_empty() {
            sanitized.insert(
                "children".to_string(),
                Value::Array(sanitized_children.clone()),
            );
        } else {
            sanitized.remove("children");
        }

        if node_type == "heading" {
            let tag = map
                .get("tag")
                .and_then(Value::as_str)
                .filter(|tag| is_heading_tag(tag))
                .unwrap_or("h2");
            sanitized.insert("tag".to_string(), json!(tag));

            if map.get("tag") != Some(&json!(tag)) {
                changed = true;
            }
        }

        if node_type == "list" {
            let list_type = map
                .get("listType")
                .and_then(Value::as_str)
                .filter(|t| matches!(*t, "number" | "bullet"))
                .unwrap_or("bullet");
            sanitized.insert("listType".to_string(), json!(list_type));

            if map.get("listType") != Some(&json!(list_type)) {
                changed = true;
            }
        }

        if let Some(children) = original_children {
            for (sanitized_child, original_child) in sanitized_children.iter().zip(children) {
                if sanitized_child != original_child {
                    changed = true;
                    break;
                }
            }
        }

        return SanitizedNode {
            node: Some(Value::Object(sanitized)),
            changed,
        };
    }

    // unknown node type: record it, then recover whatever inline content we can
    if node_type.is_empty() {
        unknown_types.insert("(unknown)".to_string());
    } else {
        unknown_types.insert(node_type.clone());
    }

    let mut inline_children = build_inline_children(&sanitized_children, version);

    if let Some(text) = map.get("text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            inline_children.insert(0, create_text_node(text, version));
        }
    }

    if inline_children.is_empty() {
        let fallback_text = extract_plain_text(node);
        if !fallback_text.trim().is_empty() {
            inline_children.push(create_text_node(&fallback_text, version));
        }
    }

    if inline_children.is_empty() {
        return SanitizedNode {
            node: None,
            changed: true,
        };
    }

    if parent_type == "list" {
        let paragraph = create_paragraph_node(inline_children, version, Some(map));
        return SanitizedNode {
            node: Some(create_list_item_node(vec![paragraph], version, Some(map))),
            changed: true,
        };
    }

    SanitizedNode {
        node: Some(create_paragraph_node(inline_children, version, Some(map))),
        changed: true,
    }
}

/// Sanitize a persisted document value, returning the (possibly rebuilt)
/// value and a report of what happened.
///
/// Non-object values pass through untouched. Object values always come back
/// with a valid `root`; when nothing needed changing the input is returned
/// as-is.
pub fn sanitize_document_with_report(
    value: Value,
    context: Option<&SanitizeContext>,
) -> (Value, SanitizeReport) {
    let Some(record) = value.as_object() else {
        return (value, SanitizeReport::default());
    };

    let mut unknown_types = BTreeSet::new();
    let root_input = record.get("root").unwrap_or(&Value::Null);
    let result = sanitize_node(root_input, "root", &mut unknown_types);

    let original_root = root_input.as_object();
    let base_version = original_root.map(version_of).unwrap_or(1);
    let base_format = original_root
        .and_then(|map| map.get("format"))
        .and_then(Value::as_str)
        .unwrap_or("");
    let base_indent = original_root
        .and_then(|map| map.get("indent"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let base_direction = original_root
        .and_then(|map| map.get("direction"))
        .and_then(Value::as_str)
        .unwrap_or("ltr");

    let final_root = match result.node {
        Some(node) if node.get("type") == Some(&json!("root")) => node,
        other => {
            let children: Vec<Value> = other.into_iter().collect();
            json!({
                "type": "root",
                "version": base_version,
                "format": base_format,
                "indent": base_indent,
                "direction": base_direction,
                "children": children,
            })
        }
    };

    if !unknown_types.is_empty() {
        let stripped = unknown_types
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        match context.and_then(SanitizeContext::location) {
            Some(location) => {
                tracing::warn!("Stripped unsupported rich text nodes ({location}): {stripped}")
            }
            None => tracing::warn!("Stripped unsupported rich text nodes: {stripped}"),
        }
    }

    if !result.changed && unknown_types.is_empty() {
        return (
            value,
            SanitizeReport {
                changed: false,
                unknown_types,
            },
        );
    }

    let mut sanitized = record.clone();
    sanitized.insert("root".to_string(), final_root);

    (
        Value::Object(sanitized),
        SanitizeReport {
            changed: true,
            unknown_types,
        },
    )
}

/// Sanitize a persisted document value.
///
/// Convenience wrapper over [`sanitize_document_with_report`] for callers
/// that only need the cleaned value (the content-write hook).
pub fn sanitize_document(value: Value, context: Option<&SanitizeContext>) -> Value {
    sanitize_document_with_report(value, context).0
}
