//! Shared utilities

pub mod color;

pub use color::{hex_to_rgba, normalize_hex_color};
