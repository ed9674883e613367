//! Visibility Renderer
//!
//! Walks a sanitized document tree and produces toolkit-independent display
//! fragments, applying the certification authorization predicate to tagged
//! spans along the way.
//!
//! The walk is pure and synchronous: the viewing context is threaded in
//! explicitly through [`RenderOptions`], never ambient state. A missing
//! `viewer_rank` means unrestricted editor-preview mode.
//!
//! The empty-collapse rule applies uniformly: blank fragments are dropped
//! before a container decides whether it has any content, and a container
//! with zero surviving children renders nothing (root simply yields an empty
//! sequence).

use crate::models::{
    callout_preset, can_view, cert_level, CalloutBlockNode, CalloutVariant, CertificationSpanNode,
    Document, DocumentNode, HeadingTag, ListType, ServiceLine, TextNode, DEFAULT_CALLOUT_COLOR,
    DEFAULT_CALLOUT_ICON, DEFAULT_CALLOUT_LABEL,
};
use crate::utils::color::{hex_to_rgba, normalize_hex_color};
use serde_json::Value;


/// Shown when a protocol has no stored content at all
pub const NO_CONTENT_PLACEHOLDER: &str = "No content available";
/// Body shown for an alert callout with no authored details
pub const EMPTY_CALLOUT_PLACEHOLDER: &str = "No additional details provided.";

/// Viewing context for a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Whether certification spans render their badge wrapper
    pub show_badges: bool,
    /// Viewer clearance rank; `None` renders everything (editor preview)
    pub viewer_rank: Option<u8>,
}

impl RenderOptions {
    pub fn new(show_badges: bool, viewer_rank: Option<u8>) -> Self {
        Self {
            show_badges,
            viewer_rank,
        }
    }

    /// Options for a viewer on the given service line
    pub fn for_service_line(line: ServiceLine, show_badges: bool) -> Self {
        Self {
            show_badges,
            viewer_rank: Some(line.rank()),
        }
    }

    /// Badges on, no filtering
    pub fn unrestricted() -> Self {
        Self {
            show_badges: true,
            viewer_rank: None,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::unrestricted()
    }
}

/// Resolved display attributes for a callout box
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutDisplay {
    pub label: String,
    /// Accent color, normalized hex
    pub color: String,
    pub icon: String,
    /// Translucent background derived from the accent color
    pub background: String,
}

/// A renderable piece of protocol content.
///
/// Deliberately independent of any UI toolkit; the frontend maps fragments
/// to its own elements. Formatting wrappers nest strikethrough innermost,
/// then underline, italic, and bold outermost.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Bold(Box<Fragment>),
    Italic(Box<Fragment>),
    Underline(Box<Fragment>),
    Strikethrough(Box<Fragment>),
    Linebreak,
    HorizontalRule,
    Paragraph(Vec<Fragment>),
    Heading {
        tag: HeadingTag,
        children: Vec<Fragment>,
    },
    Quote(Vec<Fragment>),
    List {
        ordered: bool,
        items: Vec<Fragment>,
    },
    ListItem(Vec<Fragment>),
    Link {
        url: String,
        new_tab: bool,
        children: Vec<Fragment>,
    },
    /// Certification badge wrapping the span's inner content
    Badge {
        label: String,
        color: String,
        children: Vec<Fragment>,
    },
    Callout {
        display: CalloutDisplay,
        alert: bool,
        body: Vec<Fragment>,
    },
    Placeholder(String),
}

impl Fragment {
    /// Blank fragments are dropped by the empty-collapse rule.
    ///
    /// Only a bare empty text run counts as blank; whitespace renders.
    fn is_blank(&self) -> bool {
        matches!(self, Fragment::Text(text) if text.is_empty())
    }
}

/// Render stored content for a viewer.
///
/// Missing or rootless content yields the "no content" placeholder instead
/// of an error. Legacy values that do not deserialize into the allowed node
/// set are run through the sanitizer once and retried.
pub fn render_rich_text(content: Option<&Value>, options: &RenderOptions) -> Vec<Fragment> {
    let placeholder = || vec![Fragment::Placeholder(NO_CONTENT_PLACEHOLDER.to_string())];

    let Some(value) = content else {
        return placeholder();
    };
    // a null (or otherwise non-object) root is missing content, not a
    // document to repair
    if !value.get("root").is_some_and(Value::is_object) {
        return placeholder();
    }

    match Document::from_value(value) {
        Ok(document) => render_document(&document, options),
        Err(_) => {
            let sanitized = crate::sanitize::sanitize_document(value.clone(), None);
            match Document::from_value(&sanitized) {
                Ok(document) => render_document(&document, options),
                Err(_) => placeholder(),
            }
        }
    }
}

/// Render a typed document for a viewer.
pub fn render_document(document: &Document, options: &RenderOptions) -> Vec<Fragment> {
    render_node(&document.root, options)
}

fn render_children(children: &[DocumentNode], options: &RenderOptions) -> Vec<Fragment> {
    children
        .iter()
        .flat_map(|child| render_node(child, options))
        .filter(|fragment| !fragment.is_blank())
        .collect()
}

/// Wrap rendered children, or nothing if they all collapsed.
fn container(children: Vec<Fragment>, wrap: impl FnOnce(Vec<Fragment>) -> Fragment) -> Vec<Fragment> {
    if children.is_empty() {
        Vec::new()
    } else {
        vec![wrap(children)]
    }
}

fn render_node(node: &DocumentNode, options: &RenderOptions) -> Vec<Fragment> {
    match node {
        DocumentNode::Root(root) => render_children(&root.children, options),
        DocumentNode::Text(text) => vec![render_text(text)],
        DocumentNode::Linebreak(_) => vec![Fragment::Linebreak],
        DocumentNode::HorizontalRule(_) => vec![Fragment::HorizontalRule],
        DocumentNode::Paragraph(paragraph) => {
            container(render_children(&paragraph.children, options), Fragment::Paragraph)
        }
        DocumentNode::Heading(heading) => {
            let tag = heading.tag;
            container(render_children(&heading.children, options), |children| {
                Fragment::Heading { tag, children }
            })
        }
        DocumentNode::Quote(quote) => {
            container(render_children(&quote.children, options), Fragment::Quote)
        }
        DocumentNode::List(list) => {
            let ordered = list.list_type == ListType::Number;
            container(render_children(&list.children, options), |items| {
                Fragment::List { ordered, items }
            })
        }
        DocumentNode::ListItem(item) => {
            container(render_children(&item.children, options), Fragment::ListItem)
        }
        DocumentNode::Link(link) | DocumentNode::Autolink(link) => {
            let url = link.url.clone();
            let new_tab = link.new_tab;
            container(render_children(&link.children, options), |children| {
                Fragment::Link {
                    url,
                    new_tab,
                    children,
                }
            })
        }
        DocumentNode::CertificationSpan(span) => render_certification_span(span, options),
        DocumentNode::CalloutBlock(callout) => render_callout_block(callout, options),
    }
}

/// Formatting wrappers nest in a fixed order: strikethrough innermost, then
/// underline, italic, bold outermost. Presentation convention, reproduced
/// for visual parity with the frontend.
fn render_text(text: &TextNode) -> Fragment {
    let mut fragment = Fragment::Text(text.text.clone());
    if text.is_strikethrough() {
        fragment = Fragment::Strikethrough(Box::new(fragment));
    }
    if text.is_underline() {
        fragment = Fragment::Underline(Box::new(fragment));
    }
    if text.is_italic() {
        fragment = Fragment::Italic(Box::new(fragment));
    }
    if text.is_bold() {
        fragment = Fragment::Bold(Box::new(fragment));
    }
    fragment
}

fn render_certification_span(
    span: &CertificationSpanNode,
    options: &RenderOptions,
) -> Vec<Fragment> {
    let inner = match &span.children {
        Some(children) => render_children(children, options),
        None if span.text.is_empty() => Vec::new(),
        None => vec![Fragment::Text(span.text.clone())],
    };

    // Unknown key: cert metadata cannot be resolved. Render the text plain
    // rather than suppressing it; silently hiding clinical content is worse
    // than showing it unbadged.
    let Some(cert) = cert_level(&span.cert_level) else {
        return inner;
    };

    if let Some(viewer_rank) = options.viewer_rank {
        if !can_view(viewer_rank, cert.level) {
            return Vec::new();
        }
    }

    if !options.show_badges {
        return inner;
    }

    vec![Fragment::Badge {
        label: cert.label.to_string(),
        color: cert.color.to_string(),
        children: inner,
    }]
}

/// Resolve a callout's display attributes: instance value first, then its
/// named preset, then hard defaults. Pure; independent of the render pass.
pub fn resolve_callout_display(node: &CalloutBlockNode, has_body: bool) -> CalloutDisplay {
    let preset = node.preset_id.as_deref().and_then(callout_preset);

    let label = node
        .label
        .as_deref()
        .filter(|label| !label.is_empty())
        .or(node
            .custom_label
            .as_deref()
            .filter(|label| !label.is_empty()))
        .or(preset.map(|preset| preset.label))
        .unwrap_or(DEFAULT_CALLOUT_LABEL)
        .to_string();

    let color = normalize_hex_color(
        node.color
            .as_deref()
            .filter(|color| !color.is_empty())
            .or(preset.map(|preset| preset.color))
            .unwrap_or(DEFAULT_CALLOUT_COLOR),
    );

    let icon = node
        .icon
        .as_deref()
        .filter(|icon| !icon.is_empty())
        .or(preset.map(|preset| preset.icon))
        .unwrap_or(DEFAULT_CALLOUT_ICON)
        .to_string();

    let background = hex_to_rgba(&color, if has_body { 0.12 } else { 0.15 });

    CalloutDisplay {
        label,
        color,
        icon,
        background,
    }
}

/// Whether any descendant *text node* carries non-whitespace text.
///
/// Deliberately narrow: a callout whose only content is a leaf
/// certification span counts as empty. Matches the stored-content check the
/// frontend has always used.
fn has_meaningful_content(children: &[DocumentNode]) -> bool {
    children.iter().any(|child| match child {
        DocumentNode::Text(text) => !text.text.trim().is_empty(),
        other => other
            .children()
            .is_some_and(has_meaningful_content),
    })
}

fn render_callout_block(node: &CalloutBlockNode, options: &RenderOptions) -> Vec<Fragment> {
    let preset = node.preset_id.as_deref().and_then(callout_preset);
    let variant = node
        .variant
        .or(preset.map(|preset| preset.variant))
        .unwrap_or_default();

    let has_body = has_meaningful_content(&node.children);
    let body = render_children(&node.children, options);

    match variant {
        CalloutVariant::Callout => {
            // no meaningful content, or everything suppressed for this
            // viewer: the whole box goes away
            if !has_body || body.is_empty() {
                return Vec::new();
            }
            vec![Fragment::Callout {
                display: resolve_callout_display(node, true),
                alert: false,
                body,
            }]
        }
        CalloutVariant::Alert => {
            let display = resolve_callout_display(node, has_body);
            let body = if body.is_empty() {
                vec![Fragment::Text(EMPTY_CALLOUT_PLACEHOLDER.to_string())]
            } else {
                body
            };
            vec![Fragment::Callout {
                display,
                alert: true,
                body,
            }]
        }
    }
}
