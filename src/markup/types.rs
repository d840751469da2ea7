//! Parser state and parsed column types.

use serde::{Deserialize, Serialize};

use crate::barcode::{BarcodeSymbol, QrLevel, QrSymbol, Symbology};
use crate::layout::rules::RuleMachine;
use crate::printer::PrinterConfig;

/// Border width value for ruled (line) borders.
pub const BORDER_LINE: i32 = -1;

/// Width list entry for a flexible (`*`) column.
pub const FLEXIBLE: i32 = -1;

/// Line alignment set by the `align` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlign {
    Left = 0,
    #[default]
    Center = 1,
    Right = 2,
}

impl LineAlign {
    /// Share of leftover width placed before the line, in halves.
    pub fn factor(self) -> usize {
        self as usize
    }
}

/// Barcode and QR settings selected by the `option` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeOptions {
    pub symbology: Symbology,
    /// Barcode module width (2-4)
    pub module: u32,
    /// Barcode height (24-240)
    pub height: u32,
    pub hri: bool,
    /// QR cell size (3-8)
    pub cell: u32,
    pub level: QrLevel,
    pub quiet_zone: bool,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            symbology: Symbology::Code128,
            module: 2,
            height: 72,
            hri: false,
            cell: 3,
            level: QrLevel::L,
            quiet_zone: false,
        }
    }
}

/// Settings carried from line to line across one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserState {
    /// Wrap text onto further rows
    pub wrap: bool,
    /// -1 ruled, 0 none, 1-2 blank cells between columns
    pub border: i32,
    /// Empty for auto, else -1 (flexible) or a cell count per column
    pub widths: Vec<i32>,
    pub align: LineAlign,
    pub option: CodeOptions,
    pub rules: RuleMachine,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            wrap: true,
            border: 1,
            widths: Vec::new(),
            align: LineAlign::Center,
            option: CodeOptions::default(),
            rules: RuleMachine::default(),
        }
    }
}

impl ParserState {
    /// Initial state for a document printed with `config`.
    pub fn new(config: &PrinterConfig) -> Self {
        let mut state = Self::default();
        state.option.quiet_zone = config.quiet_zone;
        state
    }

    /// Whether borders are drawn as rules.
    pub fn is_ruled(&self) -> bool {
        self.border < 0
    }
}

/// One piece of a text column: literal text or a decoration marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Text(String),
    /// `_` toggles underline
    Underline,
    /// `"` toggles emphasis
    Emphasis,
    /// `` ` `` toggles inversion
    Invert,
    /// Run of `^`, length capped at 7
    Scale(u8),
    /// `\n` forces a new row
    Break,
}

/// Rule marker lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleMarker {
    /// `---`
    Horizontal,
    /// `===`
    Cut,
}

/// Vertical rule toggles produced by `border` changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VrMarker {
    Start,
    Stop,
}

/// What a column carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Text(Vec<Segment>),
    Barcode(BarcodeSymbol),
    Qr(QrSymbol),
    /// Base64 PNG, padding repaired
    Image(String),
    /// Raw device command
    Command(String),
    Comment(String),
    Rule(RuleMarker),
    /// Property block with nothing to draw
    Settings,
}

/// One column of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedColumn {
    /// 0 hugs the left edge, 1 centers, 2 hugs the right edge
    pub align: u8,
    pub wrap: bool,
    pub border: i32,
    /// -1 flexible, 0 dropped, else cells
    pub width: i32,
    /// Line alignment in effect
    pub alignment: LineAlign,
    pub payload: Payload,
    /// Rule toggle raised by this column's `border` property
    pub vr: Option<VrMarker>,
    /// Offending source text when the column is malformed
    pub error: Option<String>,
}

impl ParsedColumn {
    pub fn is_text(&self) -> bool {
        matches!(self.payload, Payload::Text(_))
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
