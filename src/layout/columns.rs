//! Column widths and line placement.
//!
//! The print width left over after fixed columns and borders goes to the
//! flexible columns. When fixed columns do not fit, the widest ones give up
//! cells until they do. Whatever is still left after that
//! becomes margin, split according to the line alignment.

use crate::markup::ParsedColumn;

/// A column that survived layout, with its final width in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedColumn<'a> {
    pub column: &'a ParsedColumn,
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLayout<'a> {
    pub columns: Vec<PlacedColumn<'a>>,
    /// Cells before the line
    pub left: usize,
    /// Cells occupied by columns and borders
    pub width: usize,
    /// Cells after the line
    pub right: usize,
}

impl LineLayout<'_> {
    pub fn widths(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.width).collect()
    }
}

/// Most columns a text line can hold at `cpl` with the given border.
pub fn column_limit(cpl: usize, border: i32) -> usize {
    if border < 0 {
        cpl.saturating_sub(1) / 2
    } else {
        let border = border as usize;
        (cpl + border) / (border + 1)
    }
}

/// Lay out one line at `cpl` characters per line.
///
/// Zero-width columns are dropped. Text lines are cut down to the columns
/// that can hold at least one cell each and pay for their borders; other
/// lines use their first column alone.
pub fn layout_line(line: &[ParsedColumn], cpl: usize, text: bool) -> LineLayout<'_> {
    let Some(first) = line.first() else {
        return LineLayout {
            columns: Vec::new(),
            left: 0,
            width: cpl,
            right: 0,
        };
    };

    let mut kept: Vec<&ParsedColumn> = line.iter().filter(|c| c.width != 0).collect();
    if text {
        kept.truncate(column_limit(cpl, first.border));
    }

    let mut widths: Vec<Option<usize>> = kept
        .iter()
        .map(|c| (c.width > 0).then_some(c.width as usize))
        .collect();

    let fixed: i64 = widths.iter().flatten().map(|w| *w as i64).sum();
    let mut spare = cpl as i64 - fixed;
    if text && !kept.is_empty() {
        let count = kept.len() as i64;
        spare -= if first.border < 0 {
            count + 1
        } else {
            (count - 1) * first.border as i64
        };
    }

    let flexible = widths.iter().filter(|w| w.is_none()).count() as i64;
    if flexible > spare {
        spare += shrink_widest(&mut widths, (flexible - spare) as usize) as i64;
    }

    if flexible > 0 {
        let mut index = 0;
        for width in widths.iter_mut().filter(|w| w.is_none()) {
            *width = Some(((spare + index) / flexible).max(0) as usize);
            index += 1;
        }
        spare = 0;
    }

    let spare = spare.clamp(0, cpl as i64) as usize;
    let left = spare * first.alignment.factor() / 2;
    LineLayout {
        columns: kept
            .into_iter()
            .zip(widths)
            .map(|(column, width)| PlacedColumn {
                column,
                width: width.unwrap_or(0),
            })
            .collect(),
        left,
        width: cpl - spare,
        right: spare - left,
    }
}

/// Take up to `need` cells from the fixed columns, always from the widest.
/// Columns tied for widest give up cells in column order. Returns the number
/// of cells taken.
fn shrink_widest(widths: &mut [Option<usize>], need: usize) -> usize {
    let mut taken = 0;
    while taken < need {
        let Some(top) = widths.iter().flatten().copied().max().filter(|w| *w > 0) else {
            break;
        };
        let next = widths.iter().flatten().copied().filter(|w| *w < top).max().unwrap_or(0);
        let widest: Vec<usize> = (0..widths.len()).filter(|i| widths[*i] == Some(top)).collect();

        let count = widest.len();
        let step = ((top - next).saturating_mul(count)).min(need - taken);
        let (rounds, extra) = (step / count, step % count);
        for (n, i) in widest.into_iter().enumerate() {
            widths[i] = Some(top - rounds - usize::from(n < extra));
        }
        taken += step;
    }
    taken
}
