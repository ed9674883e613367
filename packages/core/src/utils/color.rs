//! Color helpers for callout display resolution
//!
//! Author-supplied colors come from a free-form admin field, so they arrive
//! with or without a leading `#` and occasionally malformed. These helpers
//! normalize and derive the translucent backgrounds the frontend paints.

/// Fallback when a color string is empty
const FALLBACK_HEX: &str = "#0ea5e9";

/// Fallback background when a hex color cannot be parsed (blue 500)
const FALLBACK_RGB: (u8, u8, u8) = (59, 130, 246);

/// Ensure a hex color carries its `#` prefix; empty input falls back to the
/// default sky blue.
pub fn normalize_hex_color(color: &str) -> String {
    if color.is_empty() {
        return FALLBACK_HEX.to_string();
    }
    if color.starts_with('#') {
        color.to_string()
    } else {
        format!("#{color}")
    }
}

/// Translate a 6-digit hex color to an `rgba(...)` string at the given
/// alpha. Malformed input degrades to a neutral blue rather than erroring.
pub fn hex_to_rgba(hex: &str, alpha: f32) -> String {
    let digits = hex.trim_start_matches('#');

    let parsed = if digits.len() == 6 {
        u8::from_str_radix(&digits[0..2], 16)
            .and_then(|r| u8::from_str_radix(&digits[2..4], 16).map(|g| (r, g)))
            .and_then(|(r, g)| u8::from_str_radix(&digits[4..6], 16).map(|b| (r, g, b)))
            .ok()
    } else {
        None
    };

    let (r, g, b) = parsed.unwrap_or(FALLBACK_RGB);
    format!("rgba({r}, {g}, {b}, {alpha})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_prefix() {
        assert_eq!(normalize_hex_color("dc2626"), "#dc2626");
        assert_eq!(normalize_hex_color("#dc2626"), "#dc2626");
    }

    #[test]
    fn test_normalize_empty_falls_back() {
        assert_eq!(normalize_hex_color(""), "#0ea5e9");
    }

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(hex_to_rgba("#0ea5e9", 0.12), "rgba(14, 165, 233, 0.12)");
        assert_eq!(hex_to_rgba("ffffff", 1.0), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn test_hex_to_rgba_malformed_falls_back() {
        assert_eq!(hex_to_rgba("#abc", 0.5), "rgba(59, 130, 246, 0.5)");
        assert_eq!(hex_to_rgba("#zzzzzz", 0.5), "rgba(59, 130, 246, 0.5)");
    }
}
