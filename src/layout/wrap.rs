//! Text wrapping.
//!
//! Breaks a segment stream into rows that fit a column. Decoration markers
//! toggle attributes as they are met; every run of text carries a copy of
//! the attributes in force when it was emitted, so rows can be rendered
//! without replaying the markers.

use serde::{Deserialize, Serialize};

use crate::markup::Segment;
use crate::text::{Encoding, TextMetrics};

/// Character attributes for a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub underline: bool,
    pub emphasis: bool,
    pub invert: bool,
    /// 0 normal, 1 double width, 2 double height, 3-7 both at size 2-6
    pub scale: u8,
}

impl Decoration {
    /// Horizontal magnification.
    pub fn width_factor(&self) -> usize {
        match self.scale {
            0 | 1 => self.scale as usize + 1,
            n => n as usize - 1,
        }
    }

    /// Vertical magnification.
    pub fn height_factor(&self) -> u8 {
        match self.scale {
            0..=2 => self.scale,
            n => n - 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub decoration: Decoration,
    pub text: String,
}

/// One printed row of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub runs: Vec<Run>,
    /// Cells to skip before the first run
    pub margin: f64,
    /// Row height in lines
    pub height: u8,
}

struct RowBuilder {
    width: usize,
    align: u8,
    space: usize,
    height: u8,
    runs: Vec<Run>,
}

impl RowBuilder {
    fn new(width: usize, align: u8) -> Self {
        Self {
            width,
            align,
            space: width,
            height: 1,
            runs: Vec::new(),
        }
    }

    fn finish(&mut self, rows: &mut Vec<Row>) {
        rows.push(Row {
            runs: std::mem::take(&mut self.runs),
            margin: self.space as f64 * self.align as f64 / 2.0,
            height: self.height,
        });
        self.space = self.width;
        self.height = 1;
    }
}

/// Wrap text segments into rows `width` cells wide.
///
/// Glyphs are placed greedily. A glyph wider than the whole column is
/// dropped. Each row records the leftover space as a margin, scaled by the
/// column alignment (0 left, 1 center, 2 right).
pub fn wrap_text<M: TextMetrics + ?Sized>(
    segments: &[Segment],
    width: usize,
    align: u8,
    encoding: Encoding,
    metrics: &M,
) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut row = RowBuilder::new(width, align);
    let mut decoration = Decoration::default();

    for segment in segments {
        match segment {
            Segment::Text(text) => {
                let units = metrics.array_from(text, encoding);
                let mut start = 0;
                while start < units.len() {
                    let mut glyph = 0;
                    let mut end = start;
                    while end < units.len() {
                        glyph = metrics.measure_text(&units[end], encoding) * decoration.width_factor();
                        if glyph > row.space {
                            break;
                        }
                        row.space -= glyph;
                        glyph = 0;
                        end += 1;
                    }
                    if end > start {
                        row.runs.push(Run {
                            decoration,
                            text: units[start..end].concat(),
                        });
                        row.height = row.height.max(decoration.height_factor());
                        start = end;
                    }
                    if glyph > width {
                        start += 1;
                        continue;
                    }
                    if glyph > row.space || row.space == 0 {
                        row.finish(&mut rows);
                    }
                }
            }
            Segment::Break => row.finish(&mut rows),
            Segment::Underline => decoration.underline = !decoration.underline,
            Segment::Emphasis => decoration.emphasis = !decoration.emphasis,
            Segment::Invert => decoration.invert = !decoration.invert,
            Segment::Scale(run) => {
                let scale = (*run).min(7);
                decoration.scale = if decoration.scale == scale { 0 } else { scale };
            }
        }
    }
    if !row.runs.is_empty() {
        row.finish(&mut rows);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DefaultMetrics;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    fn wrap(segments: &[Segment], width: usize, align: u8) -> Vec<Row> {
        wrap_text(segments, width, align, Encoding::Cp437, &DefaultMetrics)
    }

    fn row_text(row: &Row) -> String {
        row.runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_fits_in_one_row() {
        let rows = wrap(&[text("abc")], 5, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(row_text(&rows[0]), "abc");
        assert_eq!(rows[0].margin, 1.0);
        assert_eq!(rows[0].height, 1);
    }

    #[test]
    fn test_greedy_break() {
        let rows = wrap(&[text("abcdefg")], 3, 0);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["abc", "def", "g"]);
        assert_eq!(rows[2].margin, 0.0);
    }

    #[test]
    fn test_right_margin() {
        let rows = wrap(&[text("ab")], 6, 2);
        assert_eq!(rows[0].margin, 4.0);
    }

    #[test]
    fn test_fractional_margin() {
        let rows = wrap(&[text("ab")], 5, 1);
        assert_eq!(rows[0].margin, 1.5);
    }

    #[test]
    fn test_decoration_snapshot() {
        let rows = wrap(
            &[text("a"), Segment::Underline, text("b"), Segment::Underline, text("c")],
            10,
            0,
        );
        let decorations: Vec<bool> = rows[0].runs.iter().map(|r| r.decoration.underline).collect();
        assert_eq!(decorations, vec![false, true, false]);
    }

    #[test]
    fn test_double_width_wraps_earlier() {
        let rows = wrap(&[Segment::Scale(1), text("abcd")], 4, 0);
        assert_eq!(rows.len(), 2);
        assert_eq!(row_text(&rows[0]), "ab");
        assert_eq!(rows[0].runs[0].decoration.scale, 1);
        assert_eq!(rows[0].height, 1);
    }

    #[test]
    fn test_scale_height() {
        let rows = wrap(&[Segment::Scale(2), text("a")], 4, 0);
        assert_eq!(rows[0].height, 2);
        assert_eq!(rows[0].margin, 0.0);

        let rows = wrap(&[Segment::Scale(3), text("a")], 4, 0);
        assert_eq!(rows[0].height, 2);
        assert_eq!(rows[0].runs[0].text, "a");
    }

    #[test]
    fn test_same_scale_toggles_off() {
        let rows = wrap(
            &[Segment::Scale(2), text("a"), Segment::Scale(2), text("b")],
            10,
            0,
        );
        assert_eq!(rows[0].runs[1].decoration.scale, 0);
    }

    #[test]
    fn test_oversized_glyph_dropped() {
        let rows = wrap(&[Segment::Scale(7), text("ab")], 5, 0);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_explicit_break() {
        let rows = wrap(&[text("a"), Segment::Break, text("b")], 10, 0);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_text_has_no_rows() {
        assert!(wrap(&[], 10, 1).is_empty());
    }

    #[test]
    fn test_wide_cjk_glyph() {
        let rows = wrap_text(&[text("日本語")], 5, 0, Encoding::Cp932, &DefaultMetrics);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["日本", "語"]);
        assert_eq!(rows[0].margin, 0.0);
    }
}
