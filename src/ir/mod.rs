//! # Drawing Instructions
//!
//! The pipeline describes a receipt as a sequence of drawing instructions
//! before any renderer sees it. Each line becomes a [`Program`] of [`Op`]s,
//! which is then played against a [`CommandSink`](crate::sink::CommandSink)
//! strictly in order.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Markup    │ ──► │   Program   │ ──► │ CommandSink │
//! │   (lines)   │     │  (Vec<Op>)  │     │ (renderer)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Keeping the instructions as data makes a transformation easy to inspect
//! and test: the [`Recorder`](crate::sink::Recorder) sink simply collects
//! them back into a `Program`.
//!
//! ## Example
//!
//! ```
//! use receiptline::ir::{Op, Program};
//!
//! let mut program = Program::new();
//! program.push(Op::Area { left: 0, width: 48, right: 0 });
//! program.push(Op::Hr(48));
//! program.push(Op::Lf);
//!
//! assert_eq!(program.to_string(), "area(0, 48, 0)\nhr(48)\nlf\n");
//! ```

mod dispatch;
mod ops;

pub use ops::*;
