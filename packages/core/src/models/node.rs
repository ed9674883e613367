//! Typed Document Tree
//!
//! The rich-text editor persists protocol content as a JSON tree of tagged
//! nodes under a single `root`. This module is the typed view of that tree:
//! a closed `DocumentNode` enum dispatched on the serialized `type` tag.
//!
//! Unknown tags are not represented here. The sanitizer demotes them to
//! paragraphs/text on the write path, so by the time content reaches the
//! renderer the tag set is fixed.
//!
//! # Examples
//!
//! ```rust
//! use aircare_core::models::Document;
//! use serde_json::json;
//!
//! let value = json!({
//!     "root": {
//!         "type": "root",
//!         "children": [
//!             { "type": "paragraph", "children": [
//!                 { "type": "text", "text": "Assess airway" }
//!             ]}
//!         ]
//!     }
//! });
//!
//! let doc = Document::from_value(&value).unwrap();
//! assert!(doc.has_content());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default version value for serde deserialization (version 1)
fn default_version() -> i64 {
    1
}

fn default_direction() -> String {
    "ltr".to_string()
}

fn default_mode() -> String {
    "normal".to_string()
}

/// Text format bitmask: bold
pub const TEXT_FORMAT_BOLD: u32 = 1;
/// Text format bitmask: italic
pub const TEXT_FORMAT_ITALIC: u32 = 2;
/// Text format bitmask: strikethrough
pub const TEXT_FORMAT_STRIKETHROUGH: u32 = 4;
/// Text format bitmask: underline
pub const TEXT_FORMAT_UNDERLINE: u32 = 8;

/// Errors raised at the typed document boundary
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The JSON value does not deserialize into the allowed node set
    #[error("Invalid document shape: {0}")]
    InvalidShape(#[from] serde_json::Error),

    /// A service line string outside BLS/ALS/CCT (configuration error)
    #[error("Unknown service line: {0}")]
    UnknownServiceLine(String),
}

/// A node in the protocol document tree.
///
/// The enum is internally tagged on the serialized `type` field, mirroring
/// the editor's JSON exactly. Node structs tolerate missing attributes via
/// serde defaults so that pre-sanitizer legacy documents still deserialize
/// when their tags are in the allowed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentNode {
    #[serde(rename = "root")]
    Root(RootNode),
    #[serde(rename = "text")]
    Text(TextNode),
    #[serde(rename = "linebreak")]
    Linebreak(LinebreakNode),
    #[serde(rename = "paragraph")]
    Paragraph(ParagraphNode),
    #[serde(rename = "heading")]
    Heading(HeadingNode),
    #[serde(rename = "quote")]
    Quote(QuoteNode),
    #[serde(rename = "list")]
    List(ListNode),
    #[serde(rename = "listitem")]
    ListItem(ListItemNode),
    #[serde(rename = "horizontalrule")]
    HorizontalRule(HorizontalRuleNode),
    #[serde(rename = "link")]
    Link(LinkNode),
    #[serde(rename = "autolink")]
    Autolink(LinkNode),
    #[serde(rename = "certification-level")]
    CertificationSpan(CertificationSpanNode),
    #[serde(rename = "callout-block")]
    CalloutBlock(CalloutBlockNode),
}

impl DocumentNode {
    /// Child nodes, for the node kinds that own any.
    ///
    /// Text, linebreak, and horizontal rule nodes are leaves and return
    /// `None`, as does the legacy leaf form of a certification span.
    pub fn children(&self) -> Option<&[DocumentNode]> {
        match self {
            DocumentNode::Root(n) => Some(&n.children),
            DocumentNode::Paragraph(n) => Some(&n.children),
            DocumentNode::Heading(n) => Some(&n.children),
            DocumentNode::Quote(n) => Some(&n.children),
            DocumentNode::List(n) => Some(&n.children),
            DocumentNode::ListItem(n) => Some(&n.children),
            DocumentNode::Link(n) | DocumentNode::Autolink(n) => Some(&n.children),
            DocumentNode::CalloutBlock(n) => Some(&n.children),
            DocumentNode::CertificationSpan(n) => n.children.as_deref(),
            DocumentNode::Text(_)
            | DocumentNode::Linebreak(_)
            | DocumentNode::HorizontalRule(_) => None,
        }
    }

    /// Whether this subtree carries any non-whitespace text.
    ///
    /// Counts the `text` attribute of any node that has one (including the
    /// leaf form of a certification span), then recurses into children.
    /// Used by [`Document::has_content`].
    pub fn has_meaningful_text(&self) -> bool {
        let own_text = match self {
            DocumentNode::Text(t) => Some(t.text.as_str()),
            DocumentNode::CertificationSpan(s) => Some(s.text.as_str()),
            _ => None,
        };
        if own_text.is_some_and(|t| !t.trim().is_empty()) {
            return true;
        }
        self.children()
            .is_some_and(|children| children.iter().any(DocumentNode::has_meaningful_text))
    }
}

/// Top-level document node (`type: "root"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub indent: i64,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// Inline text run with a format bitmask (`type: "text"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub detail: i64,
    #[serde(default)]
    pub format: u32,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub style: String,
}

impl TextNode {
    pub fn is_bold(&self) -> bool {
        self.format & TEXT_FORMAT_BOLD != 0
    }

    pub fn is_italic(&self) -> bool {
        self.format & TEXT_FORMAT_ITALIC != 0
    }

    pub fn is_strikethrough(&self) -> bool {
        self.format & TEXT_FORMAT_STRIKETHROUGH != 0
    }

    pub fn is_underline(&self) -> bool {
        self.format & TEXT_FORMAT_UNDERLINE != 0
    }
}

/// Hard line break (`type: "linebreak"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinebreakNode {
    #[serde(default = "default_version")]
    pub version: i64,
}

/// Paragraph container (`type: "paragraph"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// Heading tag, h1 through h6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl Default for HeadingTag {
    /// The sanitizer coerces invalid tags to h2
    fn default() -> Self {
        HeadingTag::H2
    }
}

impl HeadingTag {
    /// Numeric heading level (1-6)
    pub fn level(self) -> u8 {
        match self {
            HeadingTag::H1 => 1,
            HeadingTag::H2 => 2,
            HeadingTag::H3 => 3,
            HeadingTag::H4 => 4,
            HeadingTag::H5 => 5,
            HeadingTag::H6 => 6,
        }
    }
}

/// Heading container (`type: "heading"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub tag: HeadingTag,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// Blockquote container (`type: "quote"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// List ordering, serialized as the editor's `listType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Number,
    Bullet,
}

impl Default for ListType {
    fn default() -> Self {
        ListType::Bullet
    }
}

/// Ordered/unordered list container (`type: "list"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(rename = "listType", default)]
    pub list_type: ListType,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// List item container (`type: "listitem"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItemNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// Horizontal rule (`type: "horizontalrule"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalRuleNode {
    #[serde(default = "default_version")]
    pub version: i64,
}

/// Hyperlink container, covering both `link` and `autolink`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "newTab", default)]
    pub new_tab: bool,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// Inline span tagging a run of text with a required certification level
/// (`type: "certification-level"`).
///
/// The legacy form is a leaf carrying raw `text`; the nestable container
/// form carries `children` instead. The renderer prefers `children` when
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationSpanNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(rename = "certLevel", default)]
    pub cert_level: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocumentNode>>,
}

/// Callout rendering variant.
///
/// `alert` callouts always render, even with an empty body; `callout`
/// variants require meaningful body content or they are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    Callout,
    Alert,
}

impl Default for CalloutVariant {
    fn default() -> Self {
        CalloutVariant::Callout
    }
}

/// Block-level colored callout box (`type: "callout-block"`).
///
/// Display attributes resolve per-instance value first, then the named
/// preset, then hard defaults. See `render::resolve_callout_display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlockNode {
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(rename = "presetId", default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
    #[serde(
        rename = "customLabel",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<CalloutVariant>,
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

/// A complete protocol document, the persisted `{ "root": ... }` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub root: DocumentNode,
}

impl Document {
    /// Deserialize a persisted JSON value into the typed tree.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidShape`] when the value does not match
    /// the allowed node set - for legacy content, run the sanitizer first.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Whether the document has anything worth showing.
    ///
    /// An empty root, or a root holding only paragraphs of whitespace, counts
    /// as empty. Non-paragraph block nodes (lists, callouts, rules) count as
    /// content on their own.
    pub fn has_content(&self) -> bool {
        let Some(children) = self.root.children() else {
            return false;
        };

        children.iter().any(|child| match child {
            DocumentNode::Paragraph(p) => {
                p.children.iter().any(DocumentNode::has_meaningful_text)
            }
            _ => true,
        })
    }
}
