//! AirCare Protocol Content Core
//!
//! This crate provides the content model, sanitization, and visibility
//! rendering for AirCare EMS clinical protocols.
//!
//! # Architecture
//!
//! - **Editor JSON boundary**: protocol text is authored in a rich-text
//!   editor and persisted as a `{ "root": ... }` JSON tree. That tree is the
//!   only contract with the editor; everything else in this crate is pure,
//!   in-memory tree processing.
//! - **Sanitize on write**: [`sanitize::sanitize_document`] normalizes
//!   arbitrary/legacy JSON into the allowed node set before persistence. It
//!   never fails; unrecoverable nodes are demoted or dropped.
//! - **Render on read**: [`render::render_rich_text`] walks the typed
//!   [`models::Document`] and produces toolkit-independent display
//!   fragments, suppressing certification-gated spans the viewer is not
//!   cleared for.
//!
//! # Modules
//!
//! - [`models`] - Document node model, certification registry, callout presets
//! - [`sanitize`] - JSON tree normalization pass (content-write path)
//! - [`render`] - Visibility renderer (content-read path)
//! - [`utils`] - Color helpers shared by the renderer

pub mod models;
pub mod render;
pub mod sanitize;
pub mod utils;

// Re-export commonly used types
pub use models::*;
pub use render::{render_document, render_rich_text, Fragment, RenderOptions};
pub use sanitize::{
    sanitize_document, sanitize_document_with_report, SanitizeContext, SanitizeReport,
};
