//! # Receipt Markup
//!
//! Line-oriented parsing of receipt markup. Every input line becomes an
//! ordered list of [`ParsedColumn`]s; settings that outlive the line are
//! kept in a [`ParserState`] threaded through the whole document.
//!
//! ## Syntax Overview
//!
//! ```text
//! Item     |   1.00     two columns, text hugs its adjacent pipe
//! {width:*,8; border:line}    property block
//! ^^Large "bold" _under_      decorated text
//! ---                         horizontal rule
//! ===                         paper cut
//! ```
//!
//! ## Modules
//!
//! - [`escape`]: Backslash escapes and hex placeholders
//! - [`property`]: `{key:value; ...}` blocks
//! - [`parser`]: Column splitting and classification
//! - [`types`]: State and column types

pub mod escape;
pub mod parser;
pub mod property;
pub mod types;

pub use parser::parse_line;
pub use types::*;
