//! Certification Level Registry
//!
//! The ordered clearance hierarchy for protocol content, lowest to highest:
//!
//! basic(0) < emt(1) < aemt(2) < als(3) < cct(4) < physician(5)
//!
//! A viewer at rank R can see any content tagged at rank <= R. Viewers pick
//! a coarser three-way service line (BLS/ALS/CCT) which maps to a rank via
//! [`ServiceLine::rank`]; the editor preview passes no rank at all and sees
//! everything.

use crate::models::DocumentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry in the certification hierarchy.
///
/// `level` is the rank used for filtering; `color` is the badge color shown
/// next to tagged spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertLevel {
    pub value: &'static str,
    pub label: &'static str,
    pub level: u8,
    pub color: &'static str,
    pub description: &'static str,
}

/// The six certification levels, in rank order.
pub const CERT_LEVELS: [CertLevel; 6] = [
    CertLevel {
        value: "basic",
        label: "Basic/EMR",
        level: 0,
        color: "#6b7280",
        description: "Basic life support content",
    },
    CertLevel {
        value: "emt",
        label: "EMT",
        level: 1,
        color: "#10b981",
        description: "Emergency Medical Technician",
    },
    CertLevel {
        value: "aemt",
        label: "AEMT",
        level: 2,
        color: "#3b82f6",
        description: "Advanced Emergency Medical Technician",
    },
    CertLevel {
        value: "als",
        label: "ALS/Paramedic",
        level: 3,
        color: "#8b5cf6",
        description: "Advanced Life Support / Paramedic",
    },
    CertLevel {
        value: "cct",
        label: "CCT",
        level: 4,
        color: "#ef4444",
        description: "Critical Care Transport",
    },
    CertLevel {
        value: "physician",
        label: "Physician",
        level: 5,
        color: "#f59e0b",
        description: "Physician-only procedures",
    },
];

/// Look up a certification level by its key.
///
/// Returns `None` for unknown keys; the renderer treats that as "cannot
/// resolve cert metadata" and falls back to plain text rather than hiding
/// clinical content.
pub fn cert_level(key: &str) -> Option<&'static CertLevel> {
    CERT_LEVELS.iter().find(|cert| cert.value == key)
}

/// Whether a viewer at `viewer_rank` may see content tagged `content_rank`.
///
/// Pure and total; out-of-range ranks are a caller bug, not a runtime
/// condition, and simply compare.
///
/// # Examples
///
/// ```rust
/// use aircare_core::models::can_view;
///
/// assert!(can_view(4, 3)); // CCT can see ALS content
/// assert!(!can_view(2, 4)); // AEMT cannot see CCT content
/// ```
pub fn can_view(viewer_rank: u8, content_rank: u8) -> bool {
    viewer_rank >= content_rank
}

/// All certification levels in rank order.
pub fn all_cert_levels() -> &'static [CertLevel] {
    &CERT_LEVELS
}

/// Levels a user at `rank` may tag content with (their own tier and below).
///
/// Populates the editor's tagging menu.
pub fn cert_levels_up_to(rank: u8) -> Vec<&'static CertLevel> {
    CERT_LEVELS.iter().filter(|cert| cert.level <= rank).collect()
}

/// The three-way service line selector viewers choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceLine {
    Bls,
    Als,
    Cct,
}

impl ServiceLine {
    /// The certification rank this service line is cleared for.
    ///
    /// BLS covers the basic/emt tier, so it maps to the emt rank.
    pub fn rank(self) -> u8 {
        match self {
            ServiceLine::Bls => 1,
            ServiceLine::Als => 3,
            ServiceLine::Cct => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceLine::Bls => "BLS",
            ServiceLine::Als => "ALS",
            ServiceLine::Cct => "CCT",
        }
    }
}

impl fmt::Display for ServiceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceLine {
    type Err = DocumentError;

    /// An unknown service line is a configuration error, not content to
    /// recover from.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLS" => Ok(ServiceLine::Bls),
            "ALS" => Ok(ServiceLine::Als),
            "CCT" => Ok(ServiceLine::Cct),
            other => Err(DocumentError::UnknownServiceLine(other.to_string())),
        }
    }
}
