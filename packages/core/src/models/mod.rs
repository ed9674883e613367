//! Data Models
//!
//! This module contains the core data structures for protocol content:
//!
//! - `Document` / `DocumentNode` - Typed rich-text document tree
//! - `CertLevel` - Certification level registry and authorization predicate
//! - `CalloutPreset` - Named default bundles for callout blocks
//!
//! The document tree mirrors the JSON the rich-text editor produces. The
//! sanitizer rejects or demotes unknown node types at the write boundary, so
//! the enum here is closed: the renderer never sees a stringly-typed tag.

mod callout_preset;
mod cert_level;
mod node;

#[cfg(test)]
mod cert_level_test;
#[cfg(test)]
mod node_test;

pub use callout_preset::{
    callout_preset, callout_preset_options, CalloutPreset, CALLOUT_PRESETS,
    DEFAULT_CALLOUT_COLOR, DEFAULT_CALLOUT_ICON, DEFAULT_CALLOUT_LABEL,
};
pub use cert_level::{
    all_cert_levels, can_view, cert_level, cert_levels_up_to, CertLevel, ServiceLine, CERT_LEVELS,
};
pub use node::{
    CalloutBlockNode, CalloutVariant, CertificationSpanNode, Document, DocumentError,
    DocumentNode, HeadingNode, HeadingTag, HorizontalRuleNode, LinebreakNode, LinkNode,
    ListItemNode, ListNode, ListType, ParagraphNode, QuoteNode, RootNode, TextNode,
    TEXT_FORMAT_BOLD, TEXT_FORMAT_ITALIC, TEXT_FORMAT_STRIKETHROUGH, TEXT_FORMAT_UNDERLINE,
};
