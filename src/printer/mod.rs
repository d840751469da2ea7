//! # Printer Module
//!
//! Printer and document settings handed to the pipeline and its sink.
//!
//! ## Modules
//!
//! - [`config`]: Print geometry, character set and timeouts

pub mod config;

pub use config::PrinterConfig;
