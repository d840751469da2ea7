//! # Instruction Set
//!
//! One [`Op`] per Command Sink call. Geometry is in character cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::barcode::{BarcodeForm, BarcodeSymbol, QrRequest};
use crate::printer::PrinterConfig;

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    // ===== Lifecycle =====
    /// Start of document
    Open(PrinterConfig),
    /// End of document
    Close,

    // ===== Geometry =====
    /// Print area for the following content
    Area { left: usize, width: usize, right: usize },
    /// Content alignment inside the area (0 left, 1 center, 2 right)
    Align(u8),
    /// Move to a cell position within the area
    Absolute(usize),
    /// Move by a number of cells, possibly fractional
    Relative(f64),

    // ===== Rules =====
    /// Free-standing horizontal rule
    Hr(usize),
    /// Vertical rules for one row
    Vr { widths: Vec<usize>, height: u8 },
    /// Top edge of a ruled table
    VrStart(Vec<usize>),
    /// Bottom edge of a ruled table
    VrStop(Vec<usize>),
    /// Horizontal rule between two ruled lines, with the offsets of the
    /// lower line's left and right edges relative to the upper one
    VrHr {
        above: Vec<usize>,
        below: Vec<usize>,
        dl: i64,
        dr: i64,
    },
    /// End a row; `true` while rules are running
    VrLf(bool),

    // ===== Decoration =====
    Ul,
    Em,
    Iv,
    /// Character scale tier (1-7)
    Wh(u8),
    /// Reset decoration
    Normal,

    // ===== Content =====
    Text(String),
    Lf,
    Cut,
    /// Raw device command
    Command(String),
    /// Base64 PNG
    Image(String),
    QrCode(QrRequest),
    Barcode { symbol: BarcodeSymbol, form: BarcodeForm },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Open(config) => write!(f, "open(cpl={}, encoding={})", config.cpl, config.encoding),
            Op::Close => f.write_str("close"),
            Op::Area { left, width, right } => write!(f, "area({}, {}, {})", left, width, right),
            Op::Align(align) => write!(f, "align({})", align),
            Op::Absolute(pos) => write!(f, "absolute({})", pos),
            Op::Relative(delta) => write!(f, "relative({})", delta),
            Op::Hr(width) => write!(f, "hr({})", width),
            Op::Vr { widths, height } => write!(f, "vr({:?}, {})", widths, height),
            Op::VrStart(widths) => write!(f, "vrstart({:?})", widths),
            Op::VrStop(widths) => write!(f, "vrstop({:?})", widths),
            Op::VrHr { above, below, dl, dr } => {
                write!(f, "vrhr({:?}, {:?}, {}, {})", above, below, dl, dr)
            }
            Op::VrLf(ruled) => write!(f, "vrlf({})", ruled),
            Op::Ul => f.write_str("ul"),
            Op::Em => f.write_str("em"),
            Op::Iv => f.write_str("iv"),
            Op::Wh(scale) => write!(f, "wh({})", scale),
            Op::Normal => f.write_str("normal"),
            Op::Text(text) => write!(f, "text({:?})", text),
            Op::Lf => f.write_str("lf"),
            Op::Cut => f.write_str("cut"),
            Op::Command(command) => write!(f, "command({:?})", command),
            Op::Image(data) => write!(f, "image({} bytes)", data.len()),
            Op::QrCode(request) => write!(f, "qrcode({:?}, {:?}, {})", request.data, request.level, request.cell),
            Op::Barcode { symbol, form } => {
                write!(f, "barcode({}, {:?}, {} modules)", symbol.symbology, form.text, form.length)
            }
        }
    }
}

/// A sequence of instructions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Text content only, concatenated.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            writeln!(f, "{}", op)?;
        }
        Ok(())
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
    }

    #[test]
    fn test_program_push() {
        let mut program = Program::new();
        program.push(Op::Normal);
        program.push(Op::Ul);
        program.push(Op::Text("Hello".into()));
        assert_eq!(program.len(), 3);
        assert_eq!(program.text(), "Hello");
    }

    #[test]
    fn test_op_display() {
        assert_eq!(Op::Relative(1.5).to_string(), "relative(1.5)");
        assert_eq!(Op::VrStart(vec![4, 5]).to_string(), "vrstart([4, 5])");
        assert_eq!(Op::Text("a b".into()).to_string(), "text(\"a b\")");
    }

    #[test]
    fn test_op_json() {
        let json = serde_json::to_string(&Op::Area { left: 1, width: 2, right: 3 }).unwrap();
        assert_eq!(json, r#"{"area":{"left":1,"width":2,"right":3}}"#);
        assert_eq!(serde_json::to_string(&Op::Lf).unwrap(), r#""lf""#);
    }
}
