//! # Text Measurement
//!
//! Character-set identifiers and the display-width rules that go with them.
//!
//! - [`encoding`]: The fixed set of printer encodings
//! - [`width`]: Cell width and display-unit splitting per encoding

pub mod encoding;
pub mod width;

pub use encoding::Encoding;
pub use width::{DefaultMetrics, TextMetrics, array_from, measure_text};
