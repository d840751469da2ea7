//! Line parser.
//!
//! Splits one markup line into columns and classifies each one. Property
//! blocks update the [`ParserState`] in place; every other column is read
//! against the state as it stands.

use tracing::{trace, warn};

use super::escape;
use super::property::{self, PropertyBlock};
use super::types::*;
use crate::barcode::{BarcodeSymbol, QrSymbol, Symbology};

/// Parse one line (without its terminator).
pub fn parse_line(line: &str, state: &mut ParserState) -> Vec<ParsedColumn> {
    let line = escape::protect_delimiters(line.trim_matches(|c: char| c == ' ' || c == '\t'));
    let line = pad_edge_columns(&line);
    let body = line.strip_prefix('|').unwrap_or(&line);
    let body = body.strip_suffix('|').unwrap_or(body);

    let raw: Vec<&str> = body.split('|').collect();
    let single = raw.len() == 1;

    let mut columns: Vec<ParsedColumn> = raw
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_column(raw, index, single, state))
        .collect();

    if columns.iter().all(ParsedColumn::is_text) && !state.widths.is_empty() {
        while columns.len() < state.widths.len() {
            let width = state.widths[columns.len()];
            columns.push(ParsedColumn {
                align: 2,
                wrap: state.wrap,
                border: state.border,
                width,
                alignment: state.align,
                payload: Payload::Text(Vec::new()),
                vr: None,
                error: None,
            });
        }
    }

    trace!(columns = columns.len(), "parsed line");
    columns
}

/// Make a text column that touches an outer pipe align like one that
/// doesn't: `A|` reads as ` A|` and `|A` as `|A `.
fn pad_edge_columns(line: &str) -> String {
    let mut padded = line.to_string();
    if let Some(first) = line.find('|') {
        if first > 0 && !line[..first].ends_with([' ', '\t']) {
            padded.insert(0, ' ');
        }
    }
    if let Some(last) = line.rfind('|') {
        let tail = &line[last + 1..];
        if tail.starts_with(|c: char| c != ' ' && c != '\t') {
            padded.push(' ');
        }
    }
    padded
}

fn parse_column(raw: &str, index: usize, single: bool, state: &mut ParserState) -> ParsedColumn {
    let lead = raw.starts_with([' ', '\t']) as i32;
    let trail = raw.ends_with([' ', '\t']) as i32;
    let align = (1 + lead - trail) as u8;
    let element = raw.trim_matches(|c: char| c == ' ' || c == '\t');

    let mut vr = None;
    let mut error = None;
    let payload = if property::is_block(element) {
        let block = property::parse_block(element);
        if block.error {
            warn!(column = element, "malformed property block");
            error = Some(element.to_string());
        }
        if single {
            vr = apply_properties(&block, state);
        }
        if block.error || !single {
            Payload::Settings
        } else {
            block_payload(&block, state)
        }
    } else if element.contains(['{', '}']) {
        warn!(column = element, "stray brace");
        error = Some(element.to_string());
        Payload::Text(Vec::new())
    } else if single && is_rule(element, '-') {
        Payload::Rule(RuleMarker::Horizontal)
    } else if single && is_rule(element, '=') {
        Payload::Rule(RuleMarker::Cut)
    } else {
        Payload::Text(segments(element))
    };

    let text = matches!(payload, Payload::Text(_));
    ParsedColumn {
        align,
        wrap: state.wrap,
        border: state.border,
        width: resolve_width(state, index, text),
        alignment: state.align,
        payload,
        vr,
        error,
    }
}

fn is_rule(element: &str, marker: char) -> bool {
    !element.is_empty() && element.chars().all(|c| c == marker)
}

/// Update the state from a block. Returns the rule toggle a `border`
/// change raises, if any.
fn apply_properties(block: &PropertyBlock, state: &mut ParserState) -> Option<VrMarker> {
    let mut vr = None;
    if let Some(text) = block.get("text") {
        state.wrap = property::parse_wrap(text);
    }
    if let Some(border) = block.get("border") {
        let was_ruled = state.is_ruled();
        state.border = property::parse_border(border);
        vr = match (was_ruled, state.is_ruled()) {
            (false, true) => Some(VrMarker::Start),
            (true, false) => Some(VrMarker::Stop),
            _ => None,
        };
    }
    if let Some(width) = block.get("width") {
        state.widths = property::parse_widths(width);
    }
    if let Some(align) = block.get("align") {
        state.align = property::parse_align(align);
    }
    if let Some(option) = block.get("option") {
        state.option = property::parse_option(option, state.option.quiet_zone);
    }
    vr
}

/// Drawable content of a block. Images win over codes, codes over commands.
fn block_payload(block: &PropertyBlock, state: &ParserState) -> Payload {
    if let Some(image) = block.get("image") {
        return Payload::Image(property::sanitize_image(image));
    }
    if let Some(code) = block.get("code") {
        let option = &state.option;
        if option.symbology == Symbology::QrCode {
            return Payload::Qr(QrSymbol {
                data: code.to_string(),
                level: option.level,
                cell: option.cell,
                quiet_zone: option.quiet_zone,
            });
        }
        return Payload::Barcode(BarcodeSymbol {
            data: code.to_string(),
            symbology: option.symbology,
            module: option.module,
            height: option.height,
            hri: option.hri,
            quiet_zone: option.quiet_zone,
        });
    }
    if let Some(command) = block.get("command") {
        return Payload::Command(command.to_string());
    }
    if let Some(comment) = block.get("comment") {
        return Payload::Comment(comment.to_string());
    }
    Payload::Settings
}

/// Split text into literal runs and decoration markers.
fn segments(element: &str) -> Vec<Segment> {
    let prepared = escape::prepare_text(element);
    let mut out = Vec::new();
    let mut literal = String::new();
    let mut chars = prepared.chars().peekable();

    let flush = |literal: &mut String, out: &mut Vec<Segment>| {
        if !literal.is_empty() {
            out.push(Segment::Text(escape::decode(literal.as_str())));
            literal.clear();
        }
    };

    while let Some(c) = chars.next() {
        let marker = match c {
            '_' => Segment::Underline,
            '"' => Segment::Emphasis,
            '`' => Segment::Invert,
            '\n' => Segment::Break,
            '^' => {
                let mut run = 1usize;
                while chars.next_if_eq(&'^').is_some() {
                    run += 1;
                }
                Segment::Scale(run.min(7) as u8)
            }
            _ => {
                literal.push(c);
                continue;
            }
        };
        flush(&mut literal, &mut out);
        out.push(marker);
    }
    flush(&mut literal, &mut out);
    out
}

/// Width of a column from the width list in effect.
fn resolve_width(state: &ParserState, index: usize, text: bool) -> i32 {
    let widths = &state.widths;
    if widths.is_empty() {
        return FLEXIBLE;
    }
    if text {
        return widths.get(index).copied().unwrap_or(0);
    }
    if widths.iter().any(|w| *w < 0) {
        return FLEXIBLE;
    }
    let fixed: Vec<i64> = widths.iter().filter(|w| **w > 0).map(|w| i64::from(*w)).collect();
    if fixed.is_empty() {
        return 0;
    }
    let count = fixed.len() as i64;
    let borders = if state.is_ruled() {
        count + 1
    } else {
        (count - 1) * i64::from(state.border)
    };
    let total = fixed.iter().fold(borders, |sum, w| sum.saturating_add(*w));
    total.min(i64::from(property::MAX_WIDTH)) as i32
}
