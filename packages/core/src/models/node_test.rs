//! Tests for the typed document tree

#[cfg(test)]
mod tests {
    use crate::models::{
        Document, DocumentNode, HeadingTag, ListType, TEXT_FORMAT_BOLD, TEXT_FORMAT_STRIKETHROUGH,
    };
    use serde_json::json;

    fn doc(root_children: serde_json::Value) -> Document {
        Document::from_value(&json!({
            "root": { "type": "root", "children": root_children }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_dispatches_on_type_tag() {
        let document = doc(json!([
            { "type": "paragraph", "children": [
                { "type": "text", "text": "Give oxygen" }
            ]},
            { "type": "horizontalrule" },
            { "type": "list", "listType": "number", "children": [
                { "type": "listitem", "children": [
                    { "type": "text", "text": "Step one" }
                ]}
            ]}
        ]));

        let children = document.root.children().unwrap();
        assert!(matches!(children[0], DocumentNode::Paragraph(_)));
        assert!(matches!(children[1], DocumentNode::HorizontalRule(_)));
        match &children[2] {
            DocumentNode::List(list) => assert_eq!(list.list_type, ListType::Number),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = Document::from_value(&json!({
            "root": { "type": "root", "children": [ { "type": "bogus-widget" } ] }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_text_format_accessors() {
        let document = doc(json!([
            { "type": "paragraph", "children": [
                { "type": "text", "text": "x",
                  "format": (TEXT_FORMAT_BOLD | TEXT_FORMAT_STRIKETHROUGH) }
            ]}
        ]));

        let paragraph = document.root.children().unwrap()[0].children().unwrap();
        match &paragraph[0] {
            DocumentNode::Text(text) => {
                assert!(text.is_bold());
                assert!(text.is_strikethrough());
                assert!(!text.is_italic());
                assert!(!text.is_underline());
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_heading_tag_defaults_to_h2() {
        let document = doc(json!([
            { "type": "heading", "children": [ { "type": "text", "text": "Airway" } ] }
        ]));
        match &document.root.children().unwrap()[0] {
            DocumentNode::Heading(heading) => {
                assert_eq!(heading.tag, HeadingTag::H2);
                assert_eq!(heading.tag.level(), 2);
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn test_certification_span_leaf_and_container_forms() {
        let document = doc(json!([
            { "type": "paragraph", "children": [
                { "type": "certification-level", "certLevel": "als", "text": "aspirin" },
                { "type": "certification-level", "certLevel": "cct", "children": [
                    { "type": "text", "text": "ketamine" }
                ]}
            ]}
        ]));

        let spans = document.root.children().unwrap()[0].children().unwrap();
        match &spans[0] {
            DocumentNode::CertificationSpan(span) => {
                assert_eq!(span.cert_level, "als");
                assert_eq!(span.text, "aspirin");
                assert!(span.children.is_none());
            }
            other => panic!("expected span, got {other:?}"),
        }
        match &spans[1] {
            DocumentNode::CertificationSpan(span) => {
                assert_eq!(span.children.as_ref().unwrap().len(), 1);
            }
            other => panic!("expected span, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_round_trip_preserves_tags() {
        let document = doc(json!([
            { "type": "callout-block", "presetId": "dosing", "children": [
                { "type": "paragraph", "children": [
                    { "type": "text", "text": "1mg/kg" }
                ]}
            ]}
        ]));

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["root"]["type"], "root");
        assert_eq!(value["root"]["children"][0]["type"], "callout-block");
        assert_eq!(value["root"]["children"][0]["presetId"], "dosing");

        let reparsed = Document::from_value(&value).unwrap();
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_has_content_empty_root() {
        let document = doc(json!([]));
        assert!(!document.has_content());
    }

    #[test]
    fn test_has_content_whitespace_paragraphs_only() {
        let document = doc(json!([
            { "type": "paragraph", "children": [
                { "type": "text", "text": "   " }
            ]},
            { "type": "paragraph", "children": [] }
        ]));
        assert!(!document.has_content());
    }

    #[test]
    fn test_has_content_counts_non_paragraph_blocks() {
        let document = doc(json!([ { "type": "horizontalrule" } ]));
        assert!(document.has_content());
    }

    #[test]
    fn test_has_content_counts_cert_span_text() {
        let document = doc(json!([
            { "type": "paragraph", "children": [
                { "type": "certification-level", "certLevel": "als", "text": "epinephrine" }
            ]}
        ]));
        assert!(document.has_content());
    }
}
