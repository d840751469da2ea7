//! QR Code requests.
//!
//! The matrix itself is generated by the renderer; this module only carries
//! what it needs to do so.

use serde::{Deserialize, Serialize};

/// Error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrLevel {
    /// ~7% recovery
    #[default]
    L,
    /// ~15% recovery
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl QrLevel {
    /// Parse the single-letter `option` token.
    pub fn from_letter(token: &str) -> Option<Self> {
        match token {
            "l" => Some(QrLevel::L),
            "m" => Some(QrLevel::M),
            "q" => Some(QrLevel::Q),
            "h" => Some(QrLevel::H),
            _ => None,
        }
    }
}

/// A QR code parsed from a `code` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrSymbol {
    pub data: String,
    pub level: QrLevel,
    /// Cell size in dots (3-8)
    pub cell: u32,
    pub quiet_zone: bool,
}

/// What the renderer receives to draw a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRequest {
    pub data: String,
    pub level: QrLevel,
    pub cell: u32,
    pub quiet_zone: bool,
}

impl QrSymbol {
    /// Assemble the renderer request. Empty data produces nothing to draw.
    pub fn request(&self) -> Option<QrRequest> {
        if self.data.is_empty() {
            return None;
        }
        Some(QrRequest {
            data: self.data.clone(),
            level: self.level,
            cell: self.cell,
            quiet_zone: self.quiet_zone,
        })
    }
}
