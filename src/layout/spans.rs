use crate::error::{Error, Result};
use crate::model::{CellRect, Span};

use super::geometry::CellRects;

/// How a logical cell takes part in rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Not inside any span; drawn as a 1x1 cell.
    Ordinary,
    /// Top-left cell of a span; drawn with the merged rectangle.
    Anchor { end_row: usize, end_col: usize },
    /// Inside a span but not its anchor; never drawn.
    Covered {
        anchor_row: usize,
        anchor_col: usize,
    },
}

/// Classification of every cell of a grid against a validated span list.
#[derive(Clone, Debug)]
pub struct SpanMap {
    kinds: Vec<CellKind>,
    spans: Vec<Span>,
    rows: usize,
    cols: usize,
}

impl SpanMap {
    pub fn kind(&self, row: usize, col: usize) -> Option<CellKind> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.kinds[row * self.cols + col])
    }

    /// Validated spans in input order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Span end for an anchor cell, `None` for any other cell.
    pub fn anchor_end(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        match self.kind(row, col)? {
            CellKind::Anchor { end_row, end_col } => Some((end_row, end_col)),
            _ => None,
        }
    }

    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        matches!(self.kind(row, col), Some(CellKind::Covered { .. }))
    }

    /// Covered cells in row-major order.
    pub fn covered(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| matches!(k, CellKind::Covered { .. }))
            .map(move |(i, _)| (i / cols, i % cols))
    }
}

fn in_bounds(span: &Span, rows: usize, cols: usize) -> bool {
    span.start_row <= span.end_row
        && span.end_row < rows
        && span.start_col <= span.end_col
        && span.end_col < cols
}

/// Validate `spans` against a `rows` x `cols` grid and classify every cell.
///
/// Each span is bounds-checked, then claims its cells in order; a cell that
/// is already claimed (as anchor or covered) by an earlier span is an
/// overlap. The whole list is validated before anything is returned.
pub fn resolve_spans(rows: usize, cols: usize, spans: &[Span]) -> Result<SpanMap> {
    let mut owner: Vec<Option<usize>> = vec![None; rows * cols];

    for (i, span) in spans.iter().enumerate() {
        if !in_bounds(span, rows, cols) {
            return Err(Error::SpanOutOfBounds {
                span: *span,
                rows,
                cols,
            });
        }
        for (r, c) in span.cells() {
            let slot = &mut owner[r * cols + c];
            if let Some(j) = *slot {
                return Err(Error::OverlappingSpan {
                    span: *span,
                    other: spans[j],
                    row: r,
                    col: c,
                });
            }
            *slot = Some(i);
        }
    }

    let kinds = owner
        .iter()
        .enumerate()
        .map(|(idx, o)| {
            let Some(i) = *o else {
                return CellKind::Ordinary;
            };
            let span = &spans[i];
            if (idx / cols, idx % cols) == span.anchor() {
                CellKind::Anchor {
                    end_row: span.end_row,
                    end_col: span.end_col,
                }
            } else {
                CellKind::Covered {
                    anchor_row: span.start_row,
                    anchor_col: span.start_col,
                }
            }
        })
        .collect();

    Ok(SpanMap {
        kinds,
        spans: spans.to_vec(),
        rows,
        cols,
    })
}

/// Rectangle of a merged region: origin of the anchor's plain cell, size the
/// sum of the spanned column widths and row heights.
pub fn merged_rect(
    rects: &CellRects,
    col_widths: &[f32],
    row_heights: &[f32],
    span: &Span,
) -> Option<CellRect> {
    let origin = rects.get(span.start_row, span.start_col)?;
    let width: f32 = col_widths.get(span.start_col..=span.end_col)?.iter().sum();
    let height: f32 = row_heights.get(span.start_row..=span.end_row)?.iter().sum();
    Some(CellRect {
        x: origin.x,
        y_top: origin.y_top,
        width,
        height,
    })
}
