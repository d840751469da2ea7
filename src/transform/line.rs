//! Line rendering.
//!
//! Turns one parsed line into drawing instructions and advances the rule
//! state machine.

use tracing::{trace, warn};

use crate::barcode;
use crate::ir::{Op, Program};
use crate::layout::{
    LineLayout, RuleEffect, RuleEvent, RuleGeometry, Row, layout_line, wrap_text,
};
use crate::markup::{ParsedColumn, ParserState, Payload, RuleMarker, VrMarker};
use crate::printer::PrinterConfig;
use crate::text::TextMetrics;

/// Instructions for one parsed line.
///
/// Text lines print their wrapped rows; rule markers, rule toggles and
/// drawable payloads are taken from the first column.
pub fn render_line<M: TextMetrics + ?Sized>(
    columns: &[ParsedColumn],
    state: &mut ParserState,
    config: &PrinterConfig,
    metrics: &M,
) -> Program {
    let mut program = Program::new();
    let Some(first) = columns.first() else {
        return program;
    };
    let text = columns.iter().all(ParsedColumn::is_text);
    let layout = layout_line(columns, config.cpl, text);
    let current = geometry(&layout);

    if text {
        for effect in state.rules.apply(RuleEvent::Text) {
            emit(&mut program, *effect, &state.rules.geometry, &current, config.cpl);
        }
        state.rules.geometry = current.clone();
        render_rows(&mut program, &layout, state.rules.is_running(), config, metrics);
    }

    if let Payload::Rule(marker) = &first.payload {
        let event = match marker {
            RuleMarker::Horizontal => RuleEvent::HorizontalRule,
            RuleMarker::Cut => RuleEvent::Cut,
        };
        for effect in state.rules.apply(event) {
            emit(&mut program, *effect, &state.rules.geometry, &current, config.cpl);
        }
    }

    if let Some(marker) = first.vr {
        let event = match marker {
            VrMarker::Start => RuleEvent::Start,
            VrMarker::Stop => RuleEvent::Stop,
        };
        for effect in state.rules.apply(event) {
            emit(&mut program, *effect, &state.rules.geometry, &current, config.cpl);
        }
    }

    if !text && !first.is_error() {
        render_content(&mut program, first, &layout);
    }

    trace!(ops = program.len(), "rendered line");
    program
}

/// Close any rules still open at the end of the document.
pub fn finish_document(state: &mut ParserState) -> Program {
    let mut program = Program::new();
    let saved = state.rules.geometry.clone();
    for effect in state.rules.apply(RuleEvent::End) {
        emit(&mut program, *effect, &saved, &saved, 0);
    }
    program
}

fn geometry(layout: &LineLayout) -> RuleGeometry {
    RuleGeometry {
        left: layout.left,
        width: layout.width,
        right: layout.right,
        widths: layout.widths(),
    }
}

fn area(program: &mut Program, g: &RuleGeometry) {
    program.push(Op::Area {
        left: g.left,
        width: g.width,
        right: g.right,
    });
}

/// `saved` is the last ruled line, `current` the line being printed.
fn emit(
    program: &mut Program,
    effect: RuleEffect,
    saved: &RuleGeometry,
    current: &RuleGeometry,
    cpl: usize,
) {
    match effect {
        RuleEffect::Open => {
            program.push(Op::Normal);
            area(program, current);
            program.push(Op::Align(0));
            program.push(Op::VrStart(current.widths.clone()));
            program.push(Op::VrLf(true));
        }
        RuleEffect::TieIn => {
            let dl = current.left as i64 - saved.left as i64;
            let dw = current.width as i64 - saved.width as i64;
            let left = current.left.min(saved.left);
            let right = current.right.min(saved.right);
            program.push(Op::Normal);
            program.push(Op::Area {
                left,
                width: cpl.saturating_sub(left + right),
                right,
            });
            program.push(Op::Align(0));
            program.push(Op::VrHr {
                above: saved.widths.clone(),
                below: current.widths.clone(),
                dl,
                dr: dl + dw,
            });
            program.push(Op::Lf);
        }
        RuleEffect::Close => {
            program.push(Op::Normal);
            area(program, saved);
            program.push(Op::Align(0));
            program.push(Op::VrStop(saved.widths.clone()));
            program.push(Op::VrLf(false));
        }
        RuleEffect::Divider => {
            program.push(Op::Normal);
            area(program, current);
            program.push(Op::Align(0));
            program.push(Op::Hr(current.width));
            program.push(Op::Lf);
        }
        RuleEffect::Cut => program.push(Op::Cut),
    }
}

fn render_rows<M: TextMetrics + ?Sized>(
    program: &mut Program,
    layout: &LineLayout,
    ruled: bool,
    config: &PrinterConfig,
    metrics: &M,
) {
    let Some(first) = layout.columns.first() else {
        return;
    };
    let widths = layout.widths();
    let border = first.column.border.unsigned_abs() as usize;
    let rows: Vec<Vec<Row>> = layout
        .columns
        .iter()
        .map(|placed| match &placed.column.payload {
            Payload::Text(segments) => wrap_text(
                segments,
                placed.width,
                placed.column.align,
                config.encoding,
                metrics,
            ),
            _ => Vec::new(),
        })
        .collect();

    let count = if first.column.wrap {
        rows.iter().map(Vec::len).max().unwrap_or(0).max(1)
    } else {
        1
    };

    for j in 0..count {
        program.push(Op::Normal);
        program.push(Op::Area {
            left: layout.left,
            width: layout.width,
            right: layout.right,
        });
        program.push(Op::Align(0));

        let mut position = 0;
        if ruled {
            let height = rows
                .iter()
                .filter_map(|column| column.get(j))
                .map(|row| row.height)
                .fold(1, u8::max);
            program.push(Op::Normal);
            program.push(Op::Absolute(position));
            program.push(Op::Vr {
                widths: widths.clone(),
                height,
            });
            position += 1;
        }

        for (placed, column) in layout.columns.iter().zip(&rows) {
            program.push(Op::Absolute(position));
            match column.get(j) {
                Some(row) => {
                    program.push(Op::Relative(row.margin));
                    for run in &row.runs {
                        program.push(Op::Normal);
                        let d = run.decoration;
                        if d.underline {
                            program.push(Op::Ul);
                        }
                        if d.emphasis {
                            program.push(Op::Em);
                        }
                        if d.invert {
                            program.push(Op::Iv);
                        }
                        if d.scale > 0 {
                            program.push(Op::Wh(d.scale));
                        }
                        program.push(Op::Text(run.text.clone()));
                    }
                }
                None => {
                    program.push(Op::Normal);
                    program.push(Op::Text(" ".to_string()));
                }
            }
            position += placed.width + border;
        }
        program.push(Op::VrLf(ruled));
    }
}

/// Images, codes and commands occupy a block of their own.
fn render_content(program: &mut Program, column: &ParsedColumn, layout: &LineLayout) {
    let content = match &column.payload {
        Payload::Image(data) => Op::Image(data.clone()),
        Payload::Command(command) => Op::Command(command.clone()),
        Payload::Barcode(symbol) => {
            let form = barcode::encode(symbol);
            if form.is_empty() {
                warn!(symbology = %symbol.symbology, data = %symbol.data, "barcode data rejected");
                return;
            }
            Op::Barcode {
                symbol: symbol.clone(),
                form,
            }
        }
        Payload::Qr(symbol) => match symbol.request() {
            Some(request) => Op::QrCode(request),
            None => return,
        },
        Payload::Text(_) | Payload::Comment(_) | Payload::Rule(_) | Payload::Settings => return,
    };
    program.push(Op::Normal);
    program.push(Op::Area {
        left: layout.left,
        width: layout.width,
        right: layout.right,
    });
    program.push(Op::Align(column.align));
    program.push(content);
}
