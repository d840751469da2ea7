//! # Receiptline - Receipt Markup Library
//!
//! Receiptline turns a plain-text receipt markup into an ordered stream of
//! abstract drawing instructions for a pluggable renderer. It provides:
//!
//! - **Markup parsing**: Columns, decorations, property blocks, rules
//! - **Layout**: Column widths, text wrapping, ruled tables
//! - **Barcodes**: UPC/EAN, CODE39, ITF, CODABAR, CODE93, CODE128 bar widths
//! - **Rendering**: A [`CommandSink`](sink::CommandSink) trait and a recorder
//!
//! ## Quick Start
//!
//! ```
//! use receiptline::{PrinterConfig, sink::Recorder, transform::Renderer};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let doc = "^^Coffee Shop\n---\nLatte | 4.50\n{code:1234567; option:code128 2 72 hri}";
//!
//! let renderer = Renderer::new(Recorder::new());
//! renderer.transform(doc, &PrinterConfig::RECEIPT_80MM).await?;
//!
//! let program = renderer.into_inner().into_program();
//! println!("{}", program);
//! # Ok::<(), receiptline::ReceiptError>(())
//! # }).unwrap();
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`markup`] | Line parser and parser state |
//! | [`layout`] | Column layout, wrapping, rule state machine |
//! | [`barcode`] | Barcode encoders and QR requests |
//! | [`text`] | Encodings and display width |
//! | [`ir`] | Drawing instructions as data |
//! | [`sink`] | Renderer interface |
//! | [`transform`] | Document pipeline |
//! | [`printer`] | Printer configuration |
//! | [`error`] | Error types |

pub mod barcode;
pub mod error;
pub mod ir;
pub mod layout;
pub mod markup;
pub mod printer;
pub mod sink;
pub mod text;
pub mod transform;

// Re-exports for convenience
pub use error::{ReceiptError, Result};
pub use printer::PrinterConfig;
pub use transform::transform;
