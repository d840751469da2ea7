//! # Printer Configuration
//!
//! Settings for one transformation: how many characters fit on a line, the
//! character set, and how the renderer is driven.
//!
//! ## Presets
//!
//! | Preset | Paper | Characters per line | Dots per character |
//! |--------|-------|---------------------|--------------------|
//! | `RECEIPT_80MM` | 80mm | 48 | 12 |
//! | `receipt_58mm()` | 58mm | 32 | 12 |
//!
//! ## Usage
//!
//! ```
//! use receiptline::printer::PrinterConfig;
//!
//! let config = PrinterConfig::from_json(r#"{ "cpl": 42, "encoding": "cp932" }"#).unwrap();
//! assert_eq!(config.cpl, 42);
//! assert_eq!(config.char_width, 12);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ReceiptError, Result};
use crate::text::Encoding;

/// # Printer Configuration
///
/// ## Geometry
///
/// - **cpl**: Characters per line, the unit of every layout calculation
/// - **char_width**: Dots per character cell, for renderers that draw
/// - **spacing**: Extra line spacing
/// - **margin** / **margin_right**: Cells the renderer reserves outside `cpl`
///
/// ## Content
///
/// - **encoding**: Character set for measurement and output
/// - **quiet_zone**: Default quiet-zone flag for barcodes and QR codes
///
/// ## Rendering
///
/// - **lock_timeout_ms**: How long to wait for a busy renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    pub cpl: usize,
    pub char_width: usize,
    pub spacing: bool,
    pub encoding: Encoding,
    pub margin: usize,
    pub margin_right: usize,
    pub quiet_zone: bool,
    pub lock_timeout_ms: u64,
}

impl PrinterConfig {
    /// 80mm paper, 48 characters per line.
    pub const RECEIPT_80MM: Self = Self {
        cpl: 48,
        char_width: 12,
        spacing: false,
        encoding: Encoding::Cp437,
        margin: 0,
        margin_right: 0,
        quiet_zone: false,
        lock_timeout_ms: 5000,
    };

    /// 58mm paper, 32 characters per line.
    pub fn receipt_58mm() -> Self {
        Self {
            cpl: 32,
            ..Self::RECEIPT_80MM
        }
    }

    /// Parse and validate a JSON configuration. Missing fields take the
    /// 80mm defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cpl == 0 {
            return Err(ReceiptError::Config("cpl must be at least 1".into()));
        }
        if self.char_width == 0 {
            return Err(ReceiptError::Config("char_width must be at least 1".into()));
        }
        Ok(())
    }

    /// Print width in dots.
    #[inline]
    pub fn width_dots(&self) -> usize {
        self.cpl * self.char_width
    }

    #[inline]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::RECEIPT_80MM
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_80mm_dimensions() {
        let config = PrinterConfig::RECEIPT_80MM;
        assert_eq!(config.cpl, 48);
        assert_eq!(config.width_dots(), 576);
    }

    #[test]
    fn test_58mm_preset() {
        let config = PrinterConfig::receipt_58mm();
        assert_eq!(config.cpl, 32);
        assert_eq!(config.width_dots(), 384);
        assert_eq!(config.encoding, Encoding::Cp437);
    }

    #[test]
    fn test_from_json_defaults() {
        let config = PrinterConfig::from_json(r#"{"encoding": "shiftjis", "quiet_zone": true}"#).unwrap();
        assert_eq!(config.encoding, Encoding::Cp932);
        assert!(config.quiet_zone);
        assert_eq!(config.cpl, 48);
        assert_eq!(config.lock_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_from_json_rejects_zero_cpl() {
        let err = PrinterConfig::from_json(r#"{"cpl": 0}"#).unwrap_err();
        assert!(matches!(err, ReceiptError::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_unknown_encoding() {
        let err = PrinterConfig::from_json(r#"{"encoding": "ebcdic"}"#).unwrap_err();
        assert!(matches!(err, ReceiptError::Json(_)));
    }

    #[test]
    fn test_default_is_80mm() {
        assert_eq!(PrinterConfig::default(), PrinterConfig::RECEIPT_80MM);
    }
}
