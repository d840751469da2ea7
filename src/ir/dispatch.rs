//! # Dispatch
//!
//! Plays instructions against a [`CommandSink`], one awaited call at a time.

use super::ops::{Op, Program};
use crate::error::Result;
use crate::sink::CommandSink;
use crate::text::Encoding;

impl Program {
    /// Issue every op to `sink` in order. Stops at the first failing call.
    pub async fn play<S: CommandSink + ?Sized>(&self, sink: &mut S, encoding: Encoding) -> Result<()> {
        for op in &self.ops {
            op.dispatch(&mut *sink, encoding).await?;
        }
        Ok(())
    }
}

impl Op {
    /// Issue this op as the matching sink call.
    pub async fn dispatch<S: CommandSink + ?Sized>(&self, sink: &mut S, encoding: Encoding) -> Result<()> {
        match self {
            // ===== Lifecycle =====
            Op::Open(config) => sink.open(config).await,
            Op::Close => sink.close().await,

            // ===== Geometry =====
            Op::Area { left, width, right } => sink.area(*left, *width, *right).await,
            Op::Align(align) => sink.align(*align).await,
            Op::Absolute(position) => sink.absolute(*position).await,
            Op::Relative(delta) => sink.relative(*delta).await,

            // ===== Rules =====
            Op::Hr(width) => sink.hr(*width).await,
            Op::Vr { widths, height } => sink.vr(widths, *height).await,
            Op::VrStart(widths) => sink.vrstart(widths).await,
            Op::VrStop(widths) => sink.vrstop(widths).await,
            Op::VrHr { above, below, dl, dr } => sink.vrhr(above, below, *dl, *dr).await,
            Op::VrLf(ruled) => sink.vrlf(*ruled).await,

            // ===== Decoration =====
            Op::Ul => sink.ul().await,
            Op::Em => sink.em().await,
            Op::Iv => sink.iv().await,
            Op::Wh(scale) => sink.wh(*scale).await,
            Op::Normal => sink.normal().await,

            // ===== Content =====
            Op::Text(text) => sink.text(text, encoding).await,
            Op::Lf => sink.lf().await,
            Op::Cut => sink.cut().await,
            Op::Command(command) => sink.command(command).await,
            Op::Image(data) => sink.image(data).await,
            Op::QrCode(request) => sink.qrcode(request, encoding).await,
            Op::Barcode { symbol, form } => sink.barcode(symbol, form, encoding).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::{BarcodeForm, BarcodeSymbol, QrRequest};
    use crate::error::ReceiptError;
    use crate::printer::PrinterConfig;
    use crate::sink::Recorder;
    use crate::text::TextMetrics;
    use async_trait::async_trait;

    #[tokio::test]
    async fn test_play_into_recorder_round_trips() {
        let program: Program = vec![
            Op::Normal,
            Op::Area { left: 0, width: 10, right: 0 },
            Op::Align(0),
            Op::VrHr { above: vec![4, 5], below: vec![9], dl: 0, dr: 0 },
            Op::Relative(0.5),
            Op::Text("x".into()),
            Op::VrLf(false),
        ]
        .into_iter()
        .collect();

        let mut recorder = Recorder::new();
        program.play(&mut recorder, Encoding::Cp437).await.unwrap();
        assert_eq!(recorder.into_program(), program);
    }

    /// Records like a [`Recorder`] but fails every `text` call.
    #[derive(Default)]
    struct FailingSink {
        inner: Recorder,
    }

    impl TextMetrics for FailingSink {}

    #[async_trait]
    impl CommandSink for FailingSink {
        async fn open(&mut self, config: &PrinterConfig) -> Result<()> {
            self.inner.open(config).await
        }

        async fn close(&mut self) -> Result<()> {
            self.inner.close().await
        }

        async fn area(&mut self, left: usize, width: usize, right: usize) -> Result<()> {
            self.inner.area(left, width, right).await
        }

        async fn align(&mut self, align: u8) -> Result<()> {
            self.inner.align(align).await
        }

        async fn absolute(&mut self, position: usize) -> Result<()> {
            self.inner.absolute(position).await
        }

        async fn relative(&mut self, delta: f64) -> Result<()> {
            self.inner.relative(delta).await
        }

        async fn hr(&mut self, width: usize) -> Result<()> {
            self.inner.hr(width).await
        }

        async fn vr(&mut self, widths: &[usize], height: u8) -> Result<()> {
            self.inner.vr(widths, height).await
        }

        async fn vrstart(&mut self, widths: &[usize]) -> Result<()> {
            self.inner.vrstart(widths).await
        }

        async fn vrstop(&mut self, widths: &[usize]) -> Result<()> {
            self.inner.vrstop(widths).await
        }

        async fn vrhr(&mut self, above: &[usize], below: &[usize], dl: i64, dr: i64) -> Result<()> {
            self.inner.vrhr(above, below, dl, dr).await
        }

        async fn vrlf(&mut self, ruled: bool) -> Result<()> {
            self.inner.vrlf(ruled).await
        }

        async fn cut(&mut self) -> Result<()> {
            self.inner.cut().await
        }

        async fn ul(&mut self) -> Result<()> {
            self.inner.ul().await
        }

        async fn em(&mut self) -> Result<()> {
            self.inner.em().await
        }

        async fn iv(&mut self) -> Result<()> {
            self.inner.iv().await
        }

        async fn wh(&mut self, scale: u8) -> Result<()> {
            self.inner.wh(scale).await
        }

        async fn normal(&mut self) -> Result<()> {
            self.inner.normal().await
        }

        async fn text(&mut self, _text: &str, _encoding: Encoding) -> Result<()> {
            Err(ReceiptError::Sink("paper out".into()))
        }

        async fn lf(&mut self) -> Result<()> {
            self.inner.lf().await
        }

        async fn command(&mut self, command: &str) -> Result<()> {
            self.inner.command(command).await
        }

        async fn image(&mut self, data: &str) -> Result<()> {
            self.inner.image(data).await
        }

        async fn qrcode(&mut self, request: &QrRequest, encoding: Encoding) -> Result<()> {
            self.inner.qrcode(request, encoding).await
        }

        async fn barcode(
            &mut self,
            symbol: &BarcodeSymbol,
            form: &BarcodeForm,
            encoding: Encoding,
        ) -> Result<()> {
            self.inner.barcode(symbol, form, encoding).await
        }
    }

    #[tokio::test]
    async fn test_play_stops_at_first_failure() {
        let program: Program = vec![Op::Normal, Op::Text("x".into()), Op::Lf]
            .into_iter()
            .collect();
        let mut sink = FailingSink::default();
        let err = program.play(&mut sink, Encoding::Cp437).await.unwrap_err();
        assert!(matches!(err, ReceiptError::Sink(_)));
        assert_eq!(sink.inner.program().ops, vec![Op::Normal]);
    }
}
