//! # Line Layout
//!
//! Geometry of one line: how wide each column is, where the line sits
//! between the margins, how text breaks into rows, and whether vertical
//! rules are open.
//!
//! - [`columns`]: Column widths and line margins
//! - [`wrap`]: Breaking decorated text into rows
//! - [`rules`]: Vertical rule state machine

pub mod columns;
pub mod rules;
pub mod wrap;

pub use columns::{LineLayout, PlacedColumn, layout_line};
pub use rules::{RuleEffect, RuleEvent, RuleGeometry, RuleMachine, RuleState};
pub use wrap::{Decoration, Row, Run, wrap_text};
