//! # Display Width
//!
//! Character-cell measurement for the print area. Renderers are free to
//! override these through [`CommandSink`](crate::sink::CommandSink), but the
//! defaults here follow how receipt printers lay glyphs out:
//!
//! - Single-byte code pages: one cell per character.
//! - Double-byte encodings: characters the codec stores in two bytes take two
//!   cells (so half-width katakana and ASCII stay narrow), characters the
//!   codec cannot map are assumed wide.
//! - TIS-620: a consonant and its stacked vowel/tone marks print in one cell,
//!   so text is split into grapheme clusters.

use unicode_segmentation::UnicodeSegmentation;

use super::encoding::Encoding;

/// Measurement hooks used while wrapping text.
///
/// Both methods default to the functions in this module.
pub trait TextMetrics {
    /// Width of `text` in character cells.
    fn measure_text(&self, text: &str, encoding: Encoding) -> usize {
        measure_text(text, encoding)
    }

    /// Split `text` into units that must stay on one row.
    fn array_from(&self, text: &str, encoding: Encoding) -> Vec<String> {
        array_from(text, encoding)
    }
}

/// The default measurement rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMetrics;

impl TextMetrics for DefaultMetrics {}

/// Split text into the units the wrapper may not break apart.
pub fn array_from(text: &str, encoding: Encoding) -> Vec<String> {
    match encoding {
        Encoding::Tis620 => text.graphemes(true).map(str::to_owned).collect(),
        _ => text.chars().map(String::from).collect(),
    }
}

/// Measure text in character cells.
pub fn measure_text(text: &str, encoding: Encoding) -> usize {
    match encoding.multibyte_codec() {
        Some(codec) => text.chars().map(|c| char_cells(c, codec)).sum(),
        None if encoding == Encoding::Tis620 => text.graphemes(true).count(),
        None => text.chars().count(),
    }
}

fn char_cells(c: char, codec: &'static encoding_rs::Encoding) -> usize {
    if c.is_ascii() {
        return 1;
    }
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = codec.encode(c.encode_utf8(&mut buf));
    if had_errors {
        2
    } else {
        bytes.len().clamp(1, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_counts_chars() {
        assert_eq!(measure_text("hello", Encoding::Cp437), 5);
        assert_eq!(measure_text("café", Encoding::Cp1252), 4);
        assert_eq!(measure_text("", Encoding::Cp437), 0);
    }

    #[test]
    fn test_shift_jis_widths() {
        assert_eq!(measure_text("AB", Encoding::Cp932), 2);
        assert_eq!(measure_text("日本", Encoding::Cp932), 4);
        // half-width katakana stays narrow
        assert_eq!(measure_text("ｱｲ", Encoding::Cp932), 2);
        assert_eq!(measure_text("¥", Encoding::Cp932), 1);
    }

    #[test]
    fn test_chinese_and_korean_widths() {
        assert_eq!(measure_text("AB中文CD", Encoding::Cp936), 8);
        assert_eq!(measure_text("한글", Encoding::Cp949), 4);
        assert_eq!(measure_text("中文", Encoding::Cp950), 4);
    }

    #[test]
    fn test_unmappable_is_wide() {
        assert_eq!(measure_text("\u{1F600}", Encoding::Cp950), 2);
    }

    #[test]
    fn test_thai_clusters() {
        // KO KAI + MAI EK form one cell
        let text = "\u{0E01}\u{0E48}\u{0E02}";
        assert_eq!(array_from(text, Encoding::Tis620).len(), 2);
        assert_eq!(measure_text(text, Encoding::Tis620), 2);
        assert_eq!(array_from(text, Encoding::Cp437).len(), 3);
    }

    #[test]
    fn test_array_from_chars() {
        assert_eq!(array_from("ab", Encoding::Cp437), vec!["a", "b"]);
    }
}
