//! # Transformation Pipeline
//!
//! Drives a whole document through the parser, the layout engine and a
//! [`CommandSink`]:
//!
//! ```text
//! document ─► lines ─► parse_line ─► render_line ─► Program ─► sink
//!                          ▲              │
//!                          └─ ParserState ┘
//! ```
//!
//! Each line is turned into a [`Program`](crate::ir::Program) first and
//! then played against the sink, so measurement happens before any drawing
//! call for that line is issued.

mod line;
mod renderer;

use tracing::{debug, instrument};
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::markup::{ParserState, parse_line};
use crate::printer::PrinterConfig;
use crate::sink::CommandSink;

pub use line::{finish_document, render_line};
pub use renderer::Renderer;

/// Split a document into lines.
///
/// A leading byte-order mark is dropped, the text is NFC-normalized, and
/// LF, CRLF and CR all end a line.
pub fn split_lines(doc: &str) -> Vec<String> {
    let doc = doc.strip_prefix('\u{feff}').unwrap_or(doc);
    let normalized: String = doc.nfc().collect();
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = normalized.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => lines.push(std::mem::take(&mut current)),
            '\r' => {
                chars.next_if_eq(&'\n');
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    lines.push(current);
    lines
}

/// Transform a document, issuing drawing calls to `sink`.
///
/// The sink is opened before the first line and closed after rules left
/// open by the last line are closed.
#[instrument(skip_all, fields(cpl = config.cpl, encoding = %config.encoding))]
pub async fn transform<S: CommandSink + ?Sized>(
    doc: &str,
    config: &PrinterConfig,
    sink: &mut S,
) -> Result<()> {
    let lines = split_lines(doc);
    debug!(lines = lines.len(), "transforming document");

    sink.open(config).await?;
    let mut state = ParserState::new(config);
    for line in &lines {
        let columns = parse_line(line, &mut state);
        let program = render_line(&columns, &mut state, config, &*sink);
        program.play(&mut *sink, config.encoding).await?;
    }
    finish_document(&mut state)
        .play(&mut *sink, config.encoding)
        .await?;
    sink.close().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_endings() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\r\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_strips_bom() {
        assert_eq!(split_lines("\u{feff}x"), vec!["x"]);
    }

    #[test]
    fn test_split_normalizes() {
        assert_eq!(split_lines("e\u{0301}"), vec!["\u{e9}"]);
    }
}
