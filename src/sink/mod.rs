//! # Command Sink
//!
//! The renderer side of the pipeline. A sink receives drawing calls in
//! document order and turns them into whatever it renders: printer bytes,
//! an image, markup. Geometry arguments are character cells.
//!
//! Measurement comes through the [`TextMetrics`] supertrait so renderers
//! with their own font metrics can wrap text the way they draw it.
//!
//! [`Recorder`] is the built-in sink: it records every call as an
//! [`Op`] for inspection.

use async_trait::async_trait;

use crate::barcode::{BarcodeForm, BarcodeSymbol, QrRequest};
use crate::error::Result;
use crate::ir::{Op, Program};
use crate::printer::PrinterConfig;
use crate::text::{Encoding, TextMetrics};

/// A rendering backend driven by the pipeline.
///
/// Calls arrive strictly in order, each one completing before the next is
/// issued. A failing call aborts the transformation with its error.
#[async_trait]
pub trait CommandSink: TextMetrics + Send {
    // ===== Lifecycle =====
    async fn open(&mut self, config: &PrinterConfig) -> Result<()>;
    async fn close(&mut self) -> Result<()>;

    // ===== Geometry =====
    async fn area(&mut self, left: usize, width: usize, right: usize) -> Result<()>;
    async fn align(&mut self, align: u8) -> Result<()>;
    async fn absolute(&mut self, position: usize) -> Result<()>;
    async fn relative(&mut self, delta: f64) -> Result<()>;

    // ===== Rules =====
    async fn hr(&mut self, width: usize) -> Result<()>;
    async fn vr(&mut self, widths: &[usize], height: u8) -> Result<()>;
    async fn vrstart(&mut self, widths: &[usize]) -> Result<()>;
    async fn vrstop(&mut self, widths: &[usize]) -> Result<()>;
    async fn vrhr(&mut self, above: &[usize], below: &[usize], dl: i64, dr: i64) -> Result<()>;
    async fn vrlf(&mut self, ruled: bool) -> Result<()>;
    async fn cut(&mut self) -> Result<()>;

    // ===== Decoration =====
    async fn ul(&mut self) -> Result<()>;
    async fn em(&mut self) -> Result<()>;
    async fn iv(&mut self) -> Result<()>;
    async fn wh(&mut self, scale: u8) -> Result<()>;
    async fn normal(&mut self) -> Result<()>;

    // ===== Content =====
    async fn text(&mut self, text: &str, encoding: Encoding) -> Result<()>;
    async fn lf(&mut self) -> Result<()>;
    async fn command(&mut self, command: &str) -> Result<()>;
    async fn image(&mut self, png_base64: &str) -> Result<()>;
    async fn qrcode(&mut self, request: &QrRequest, encoding: Encoding) -> Result<()>;
    async fn barcode(
        &mut self,
        symbol: &BarcodeSymbol,
        form: &BarcodeForm,
        encoding: Encoding,
    ) -> Result<()>;
}

/// Sink that records every call.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    program: Program,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    fn record(&mut self, op: Op) -> Result<()> {
        self.program.push(op);
        Ok(())
    }
}

impl TextMetrics for Recorder {}

#[async_trait]
impl CommandSink for Recorder {
    async fn open(&mut self, config: &PrinterConfig) -> Result<()> {
        self.record(Op::Open(config.clone()))
    }

    async fn close(&mut self) -> Result<()> {
        self.record(Op::Close)
    }

    async fn area(&mut self, left: usize, width: usize, right: usize) -> Result<()> {
        self.record(Op::Area { left, width, right })
    }

    async fn align(&mut self, align: u8) -> Result<()> {
        self.record(Op::Align(align))
    }

    async fn absolute(&mut self, position: usize) -> Result<()> {
        self.record(Op::Absolute(position))
    }

    async fn relative(&mut self, delta: f64) -> Result<()> {
        self.record(Op::Relative(delta))
    }

    async fn hr(&mut self, width: usize) -> Result<()> {
        self.record(Op::Hr(width))
    }

    async fn vr(&mut self, widths: &[usize], height: u8) -> Result<()> {
        self.record(Op::Vr {
            widths: widths.to_vec(),
            height,
        })
    }

    async fn vrstart(&mut self, widths: &[usize]) -> Result<()> {
        self.record(Op::VrStart(widths.to_vec()))
    }

    async fn vrstop(&mut self, widths: &[usize]) -> Result<()> {
        self.record(Op::VrStop(widths.to_vec()))
    }

    async fn vrhr(&mut self, above: &[usize], below: &[usize], dl: i64, dr: i64) -> Result<()> {
        self.record(Op::VrHr {
            above: above.to_vec(),
            below: below.to_vec(),
            dl,
            dr,
        })
    }

    async fn vrlf(&mut self, ruled: bool) -> Result<()> {
        self.record(Op::VrLf(ruled))
    }

    async fn cut(&mut self) -> Result<()> {
        self.record(Op::Cut)
    }

    async fn ul(&mut self) -> Result<()> {
        self.record(Op::Ul)
    }

    async fn em(&mut self) -> Result<()> {
        self.record(Op::Em)
    }

    async fn iv(&mut self) -> Result<()> {
        self.record(Op::Iv)
    }

    async fn wh(&mut self, scale: u8) -> Result<()> {
        self.record(Op::Wh(scale))
    }

    async fn normal(&mut self) -> Result<()> {
        self.record(Op::Normal)
    }

    async fn text(&mut self, text: &str, _encoding: Encoding) -> Result<()> {
        self.record(Op::Text(text.to_string()))
    }

    async fn lf(&mut self) -> Result<()> {
        self.record(Op::Lf)
    }

    async fn command(&mut self, command: &str) -> Result<()> {
        self.record(Op::Command(command.to_string()))
    }

    async fn image(&mut self, png_base64: &str) -> Result<()> {
        self.record(Op::Image(png_base64.to_string()))
    }

    async fn qrcode(&mut self, request: &QrRequest, _encoding: Encoding) -> Result<()> {
        self.record(Op::QrCode(request.clone()))
    }

    async fn barcode(
        &mut self,
        symbol: &BarcodeSymbol,
        form: &BarcodeForm,
        _encoding: Encoding,
    ) -> Result<()> {
        self.record(Op::Barcode {
            symbol: symbol.clone(),
            form: form.clone(),
        })
    }
}
