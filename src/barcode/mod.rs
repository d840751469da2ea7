//! # Barcode Encoding
//!
//! Turns a barcode symbol into the module pattern a renderer draws. The
//! encoder is a pure function: it never fails, it only returns an empty
//! [`BarcodeForm`] when the payload is not valid for the symbology.
//!
//! ## Supported Symbologies
//!
//! | Keyword | Symbology | Check |
//! |---------|-----------|-------|
//! | `upc` | UPC-A / UPC-E | mod 10, weights 3-1 |
//! | `ean`, `jan` | EAN-13 / EAN-8 | mod 10, weights 3-1 |
//! | `code39` | Code 39 | none |
//! | `itf` | Interleaved 2 of 5 | none |
//! | `codabar`, `nw7` | Codabar (NW-7) | none |
//! | `code93` | Code 93 | two mod 47 characters |
//! | `code128` | Code 128 | mod 103 |
//! | `qrcode` | QR Code | delegated to the renderer |
//!
//! ## Output Shape
//!
//! [`BarcodeForm::widths`] alternates space and bar, starting and ending with
//! a space: the first and last entries are the quiet zones (zero wide when
//! not requested). Every width is already multiplied by the module width.
//!
//! ```
//! use receiptline::barcode::{self, BarcodeSymbol, Symbology};
//!
//! let symbol = BarcodeSymbol::new(Symbology::Ean, "590123412345");
//! let form = barcode::encode(&symbol);
//! assert_eq!(form.text, "5901234123457");
//! ```

mod codabar;
mod code128;
mod code39;
mod code93;
mod itf;
pub mod qr;
mod upc;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use qr::{QrLevel, QrRequest, QrSymbol};

/// Quiet zone width in modules, applied on each side.
pub const QUIET_ZONE_MODULES: u32 = 10;

/// Barcode and 2D code symbologies selectable from `option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    /// UPC-A, or UPC-E for payloads shorter than 9 digits
    Upc,
    /// EAN-13 / JAN-13, or EAN-8 for payloads shorter than 9 digits
    #[serde(alias = "jan")]
    Ean,
    Code39,
    Itf,
    /// Codabar / NW-7
    #[serde(alias = "nw7")]
    Codabar,
    Code93,
    #[default]
    Code128,
    /// QR Code (matrix generated by the renderer)
    #[serde(rename = "qrcode")]
    QrCode,
}

impl Symbology {
    /// Look up an `option` keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "upc" => Some(Symbology::Upc),
            "ean" | "jan" => Some(Symbology::Ean),
            "code39" => Some(Symbology::Code39),
            "itf" => Some(Symbology::Itf),
            "codabar" | "nw7" => Some(Symbology::Codabar),
            "code93" => Some(Symbology::Code93),
            "code128" => Some(Symbology::Code128),
            "qrcode" => Some(Symbology::QrCode),
            _ => None,
        }
    }

    /// Canonical keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Symbology::Upc => "upc",
            Symbology::Ean => "ean",
            Symbology::Code39 => "code39",
            Symbology::Itf => "itf",
            Symbology::Codabar => "codabar",
            Symbology::Code93 => "code93",
            Symbology::Code128 => "code128",
            Symbology::QrCode => "qrcode",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Symbology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbology::from_keyword(&s.to_lowercase()).ok_or_else(|| format!("Unknown symbology '{}'", s))
    }
}

/// A 1D barcode to encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeSymbol {
    pub data: String,
    pub symbology: Symbology,
    /// Module width in dots (2-4)
    pub module: u32,
    /// Bar height in dots
    pub height: u32,
    /// Print human readable interpretation
    pub hri: bool,
    pub quiet_zone: bool,
}

impl BarcodeSymbol {
    /// Symbol with the default geometry (module 2, height 72, no HRI).
    pub fn new(symbology: Symbology, data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            symbology,
            module: 2,
            height: 72,
            hri: false,
            quiet_zone: false,
        }
    }
}

/// Check characters derived while encoding. Never supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Checksum {
    /// Mod 10 check digit (UPC, EAN)
    Digit { value: u8 },
    /// Code 93 check characters C and K (symbol values 0-46)
    Code93 { c: u8, k: u8 },
    /// Code 128 mod 103 check symbol value
    Mod103 { value: u8 },
}

/// Encoded barcode ready for drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeForm {
    /// Space/bar widths in dots, starting and ending with a quiet zone space
    pub widths: Vec<u32>,
    /// Sum of `widths`
    pub length: u32,
    /// Bar height in dots
    pub height: u32,
    /// Text to print under the bars, present when HRI is enabled
    pub hri: Option<String>,
    /// Human readable interpretation, control bytes replaced by spaces
    pub text: String,
    pub check: Option<Checksum>,
}

impl BarcodeForm {
    /// True when the payload was rejected.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Unscaled result of one symbology encoder.
struct Encoded {
    /// Bar/space widths in modules, starting with a bar
    modules: Vec<u32>,
    text: String,
    check: Option<Checksum>,
}

/// Encode a 1D barcode. Invalid payloads produce an empty form.
pub fn encode(symbol: &BarcodeSymbol) -> BarcodeForm {
    let data = symbol.data.as_str();
    let encoded = match symbol.symbology {
        Symbology::Upc if data.len() < 9 => upc::upc_e(data),
        Symbology::Upc => upc::upc_a(data),
        Symbology::Ean if data.len() < 9 => upc::ean8(data),
        Symbology::Ean => upc::ean13(data),
        Symbology::Code39 => code39::encode(data),
        Symbology::Itf => itf::encode(data),
        Symbology::Codabar => codabar::encode(data),
        Symbology::Code93 => code93::encode(data),
        Symbology::Code128 => code128::encode(data),
        Symbology::QrCode => None,
    };

    let Some(encoded) = encoded else {
        return BarcodeForm::default();
    };

    let module = symbol.module.max(1);
    let quiet = if symbol.quiet_zone {
        QUIET_ZONE_MODULES * module
    } else {
        0
    };

    let mut widths = Vec::with_capacity(encoded.modules.len() + 2);
    widths.push(quiet);
    widths.extend(encoded.modules.iter().map(|m| m * module));
    widths.push(quiet);

    let text = printable(&encoded.text);
    BarcodeForm {
        length: widths.iter().sum(),
        widths,
        height: symbol.height,
        hri: symbol.hri.then(|| text.clone()),
        text,
        check: encoded.check,
    }
}

/// Replace control bytes with spaces for human readable text.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Expand a pattern string such as `"211214"` into module widths.
fn pattern_widths(pattern: &str) -> impl Iterator<Item = u32> + '_ {
    pattern.bytes().map(|b| u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbology_keywords() {
        assert_eq!(Symbology::from_keyword("jan"), Some(Symbology::Ean));
        assert_eq!(Symbology::from_keyword("nw7"), Some(Symbology::Codabar));
        assert_eq!(Symbology::from_keyword("pdf417"), None);
        assert_eq!("CODE93".parse::<Symbology>().unwrap(), Symbology::Code93);
    }

    #[test]
    fn test_quiet_zone_and_scaling() {
        let mut symbol = BarcodeSymbol::new(Symbology::Code39, "A");
        symbol.module = 3;
        symbol.quiet_zone = true;
        let form = encode(&symbol);
        assert_eq!(form.widths[0], 30);
        assert_eq!(*form.widths.last().unwrap(), 30);
        assert!(form.widths[1..form.widths.len() - 1].iter().all(|w| w % 3 == 0));
        assert_eq!(form.length, form.widths.iter().sum::<u32>());
    }

    #[test]
    fn test_no_quiet_zone_keeps_zero_edges() {
        let form = encode(&BarcodeSymbol::new(Symbology::Itf, "1234"));
        assert_eq!(form.widths[0], 0);
        assert_eq!(*form.widths.last().unwrap(), 0);
        // space, then alternating bars and spaces, ending in a bar before the quiet zone
        assert_eq!(form.widths.len() % 2, 1);
    }

    #[test]
    fn test_hri_follows_flag() {
        let mut symbol = BarcodeSymbol::new(Symbology::Code128, "ABC");
        assert_eq!(encode(&symbol).hri, None);
        symbol.hri = true;
        assert_eq!(encode(&symbol).hri.as_deref(), Some("ABC"));
    }

    #[test]
    fn test_hri_replaces_control_bytes() {
        let symbol = BarcodeSymbol::new(Symbology::Code128, "A\tB");
        assert_eq!(encode(&symbol).text, "A B");
    }

    #[test]
    fn test_invalid_payload_is_empty() {
        let form = encode(&BarcodeSymbol::new(Symbology::Itf, "123"));
        assert!(form.is_empty());
        assert_eq!(form.check, None);
        assert_eq!(form.length, 0);
    }

    #[test]
    fn test_qrcode_is_not_a_1d_symbol() {
        assert!(encode(&BarcodeSymbol::new(Symbology::QrCode, "x")).is_empty());
    }

    #[test]
    fn test_height_passthrough() {
        let mut symbol = BarcodeSymbol::new(Symbology::Code93, "TEST");
        symbol.height = 120;
        assert_eq!(encode(&symbol).height, 120);
    }
}
